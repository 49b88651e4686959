use std::sync::Arc;

use super::CaptureError;
use crate::conversation::Language;

/// Events delivered by the platform while a recognition is running.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecognitionEvent {
    Result { transcript: String, is_final: bool },
    Error(String),
    End,
}

pub trait Recognition: Send {
    fn stop(&mut self);
    fn abort(&mut self);
}

pub trait SpeechRecognizer: Send + Sync {
    fn start(&self, locale: &str) -> Result<Box<dyn Recognition>, CaptureError>;
}

/// Backend for platforms without speech recognition.
pub struct Unsupported;

impl SpeechRecognizer for Unsupported {
    fn start(&self, _locale: &str) -> Result<Box<dyn Recognition>, CaptureError> {
        Err(CaptureError::Unsupported)
    }
}

pub struct VoiceCapture {
    recognizer: Arc<dyn SpeechRecognizer>,
    language: Language,
    active: Option<Box<dyn Recognition>>,
    buffer: String,
    notice: Option<String>,
}

impl VoiceCapture {
    pub fn new(recognizer: Arc<dyn SpeechRecognizer>, language: Language) -> Self {
        Self {
            recognizer,
            language,
            active: None,
            buffer: String::new(),
            notice: None,
        }
    }

    pub fn is_capturing(&self) -> bool {
        self.active.is_some()
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Takes effect from the next capture.
    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    pub fn heard_so_far(&self) -> &str {
        &self.buffer
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn start_capture(&mut self) -> Result<(), CaptureError> {
        if self.active.is_some() {
            return Ok(());
        }

        match self.recognizer.start(self.language.voice_locale()) {
            Ok(recognition) => {
                tracing::debug!(locale = self.language.voice_locale(), "Voice capture started");
                self.active = Some(recognition);
                self.buffer.clear();
                self.notice = None;
                Ok(())
            }
            Err(err) => {
                tracing::warn!(%err, "Voice capture unavailable");
                self.notice = Some(unavailable_notice(self.language).to_string());
                Err(err)
            }
        }
    }

    /// Returns the captured text when this event ends the capture.
    pub fn handle(&mut self, event: RecognitionEvent) -> Option<String> {
        self.active.as_ref()?;

        match event {
            RecognitionEvent::Result {
                transcript,
                is_final: true,
            } => {
                append_spaced(&mut self.buffer, &transcript);
                None
            }
            RecognitionEvent::Result {
                is_final: false, ..
            } => None,
            RecognitionEvent::Error(reason) => {
                tracing::warn!(%reason, "Speech recognition failed");
                self.active = None;
                self.notice = Some(unavailable_notice(self.language).to_string());
                Some(std::mem::take(&mut self.buffer))
            }
            RecognitionEvent::End => {
                self.active = None;
                Some(std::mem::take(&mut self.buffer))
            }
        }
    }

    /// Stops the running capture and returns what it heard. `None` when
    /// nothing was running.
    pub fn stop(&mut self) -> Option<String> {
        let mut recognition = self.active.take()?;
        recognition.stop();
        Some(std::mem::take(&mut self.buffer))
    }

    pub fn abort(&mut self) {
        if let Some(mut recognition) = self.active.take() {
            recognition.abort();
        }
        self.buffer.clear();
    }
}

fn unavailable_notice(language: Language) -> &'static str {
    match language {
        Language::En => "Voice input is not available right now. You can keep typing your answer.",
        Language::Fr => "La saisie vocale n'est pas disponible pour le moment. Vous pouvez continuer à écrire votre réponse.",
    }
}

pub(crate) fn append_spaced(target: &mut String, text: &str) {
    let text = text.trim();
    if text.is_empty() {
        return;
    }
    if !target.is_empty() {
        target.push(' ');
    }
    target.push_str(text);
}
