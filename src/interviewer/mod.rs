pub(crate) mod openai;
pub(crate) mod scripted;

use async_trait::async_trait;
use std::sync::Arc;

use crate::conversation::{ConversationMessage, SessionContext};

#[derive(Debug, thiserror::Error)]
pub enum InterviewerError {
    #[error("Failed to reach the chat completion API: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Chat completion API returned {0}")]
    Status(reqwest::StatusCode),
    #[error("Malformed chat completion response: {0}")]
    Malformed(String),
    #[error("Chat completion response had no content")]
    Empty,
}

/// Produces the next interviewer line from the conversation so far. An
/// empty history asks for the opening line.
#[async_trait]
pub trait Interviewer: Send + Sync {
    async fn respond(
        &self,
        history: &[ConversationMessage],
        context: &SessionContext,
    ) -> Result<String, InterviewerError>;
}

/// Chosen once when the session is built and never changed afterwards.
#[derive(Clone)]
pub enum SessionMode {
    Scripted,
    Assisted(Arc<dyn Interviewer>),
}

impl std::fmt::Debug for SessionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionMode::Scripted => f.write_str("Scripted"),
            SessionMode::Assisted(_) => f.write_str("Assisted"),
        }
    }
}
