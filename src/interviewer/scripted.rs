use crate::conversation::Language;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScriptedExchange {
    pub interviewer: &'static str,
    pub sample_answer: &'static str,
}

const ENGLISH: &[ScriptedExchange] = &[
    ScriptedExchange {
        interviewer: "Hello and welcome! Thank you for taking the time to meet with us today. Are you ready to begin?",
        sample_answer: "Yes, I'm ready. Thank you for having me.",
    },
    ScriptedExchange {
        interviewer: "Great. To start, could you tell me a little about yourself and your background?",
        sample_answer: "I have a few years of experience in the field, and I enjoy solving problems with the people around me.",
    },
    ScriptedExchange {
        interviewer: "Can you describe a time you worked in a team to overcome a difficult challenge? What was your role?",
        sample_answer: "On my last project we had a tight deadline. I coordinated the work between two teams and we delivered on time.",
    },
    ScriptedExchange {
        interviewer: "What interests you about this position, and why do you think you would be a good fit?",
        sample_answer: "The role matches my skills and I am keen to grow in an organisation that values learning.",
    },
    ScriptedExchange {
        interviewer: "When you have several competing deadlines, how do you decide what to prioritise?",
        sample_answer: "",
    },
];

const FRENCH: &[ScriptedExchange] = &[
    ScriptedExchange {
        interviewer: "Bonjour et bienvenue ! Merci d'avoir pris le temps de nous rencontrer aujourd'hui. Êtes-vous prêt à commencer ?",
        sample_answer: "Oui, je suis prêt. Merci de me recevoir.",
    },
    ScriptedExchange {
        interviewer: "Très bien. Pour commencer, pouvez-vous vous présenter et nous parler de votre parcours ?",
        sample_answer: "J'ai quelques années d'expérience dans le domaine et j'aime résoudre des problèmes en équipe.",
    },
    ScriptedExchange {
        interviewer: "Pouvez-vous décrire une situation où vous avez travaillé en équipe pour surmonter une difficulté ? Quel était votre rôle ?",
        sample_answer: "Lors de mon dernier projet, nous avions un délai serré. J'ai coordonné le travail entre deux équipes et nous avons livré à temps.",
    },
    ScriptedExchange {
        interviewer: "Qu'est-ce qui vous intéresse dans ce poste, et pourquoi pensez-vous être un bon candidat ?",
        sample_answer: "Le poste correspond à mes compétences et je souhaite évoluer dans une organisation qui valorise l'apprentissage.",
    },
    ScriptedExchange {
        interviewer: "Lorsque vous avez plusieurs échéances en même temps, comment décidez-vous de vos priorités ?",
        sample_answer: "",
    },
];

/// Fixed interviewer lines, handed out strictly in order. Used for the
/// whole session in scripted mode and as the fallback in assisted mode.
#[derive(Debug, Clone)]
pub struct Script {
    exchanges: &'static [ScriptedExchange],
    cursor: usize,
}

impl Script {
    pub fn for_language(language: Language) -> Self {
        Self::new(match language {
            Language::En => ENGLISH,
            Language::Fr => FRENCH,
        })
    }

    pub fn new(exchanges: &'static [ScriptedExchange]) -> Self {
        Self {
            exchanges,
            cursor: 0,
        }
    }

    /// Consumes the next unused line, or `None` once every line has been used.
    pub fn next_line(&mut self) -> Option<&'static str> {
        let exchange = self.exchanges.get(self.cursor)?;
        self.cursor += 1;
        Some(exchange.interviewer)
    }

    /// Sample answer to the most recently delivered line, if it has one.
    pub fn hint(&self) -> Option<&'static str> {
        self.cursor
            .checked_sub(1)
            .and_then(|index| self.exchanges.get(index))
            .map(|exchange| exchange.sample_answer)
            .filter(|answer| !answer.is_empty())
    }

    pub fn lines(&self) -> impl Iterator<Item = &'static str> {
        self.exchanges.iter().map(|exchange| exchange.interviewer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lines_are_consumed_in_order_then_exhausted() {
        let mut script = Script::for_language(Language::En);
        let expected: Vec<_> = script.lines().collect();

        let delivered: Vec<_> = std::iter::from_fn(|| script.next_line()).collect();

        assert_eq!(delivered, expected);
        assert_eq!(script.next_line(), None);
        assert_eq!(script.next_line(), None);
    }

    #[test]
    fn test_hint_follows_the_last_delivered_line() {
        let mut script = Script::for_language(Language::Fr);
        assert_eq!(script.hint(), None);

        script.next_line();
        assert_eq!(script.hint(), Some(FRENCH[0].sample_answer));

        while script.next_line().is_some() {}
        assert_eq!(script.hint(), None);
    }

    #[test]
    fn test_both_languages_have_the_same_shape() {
        assert_eq!(ENGLISH.len(), FRENCH.len());
        assert!(ENGLISH.iter().all(|e| !e.interviewer.is_empty()));
        assert!(FRENCH.iter().all(|e| !e.interviewer.is_empty()));
    }
}
