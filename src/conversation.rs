use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::auth::UserProfile;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumString, Display)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    Fr,
}

impl Language {
    /// Locale handed to the speech recognizer.
    pub fn voice_locale(self) -> &'static str {
        match self {
            Language::En => "en-US",
            Language::Fr => "fr-FR",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    Interviewer,
    Candidate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationMessage {
    pub id: u64,
    pub speaker: Speaker,
    pub text: String,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("the {speaker} cannot take this turn")]
pub struct OutOfTurn {
    pub speaker: Speaker,
}

/// Append-only list of turns. The interviewer always opens and the two
/// speakers strictly alternate.
#[derive(Debug, Default, Clone)]
pub struct Transcript {
    messages: Vec<ConversationMessage>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_speaker(&self) -> Speaker {
        match self.messages.last() {
            Some(message) if message.speaker == Speaker::Interviewer => Speaker::Candidate,
            _ => Speaker::Interviewer,
        }
    }

    pub fn append(
        &mut self,
        speaker: Speaker,
        text: impl Into<String>,
    ) -> Result<&ConversationMessage, OutOfTurn> {
        if speaker != self.next_speaker() {
            return Err(OutOfTurn { speaker });
        }

        let id = self.messages.last().map_or(1, |message| message.id + 1);
        self.messages.push(ConversationMessage {
            id,
            speaker,
            text: text.into(),
        });

        Ok(&self.messages[self.messages.len() - 1])
    }

    pub fn messages(&self) -> &[ConversationMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorDocuments {
    pub cv: Option<String>,
    pub cover_letter: Option<String>,
}

/// Fixed for the lifetime of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionContext {
    pub role: String,
    pub language: Language,
    pub documents: PriorDocuments,
}

/// What the reporting side receives once the interview is over.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub role: String,
    pub language: Language,
    pub candidate: Option<UserProfile>,
    pub elapsed_secs: u64,
    pub transcript: Vec<ConversationMessage>,
}
