use async_trait::async_trait;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::{Interviewer, InterviewerError};
use crate::config::OpenAiSettings;
use crate::conversation::{ConversationMessage, Language, SessionContext, Speaker};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    Assistant,
    User,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<Message>,
    temperature: f64,
    max_tokens: u32,
    presence_penalty: f64,
    frequency_penalty: f64,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

pub fn system_prompt(context: &SessionContext) -> String {
    let role = &context.role;
    let language = match context.language {
        Language::En => "Conduct the entire interview in English.",
        Language::Fr => "Conduct the entire interview in French.",
    };
    let documents = [
        context
            .documents
            .cv
            .as_deref()
            .map(|cv| format!("The candidate's CV includes: {cv}")),
        context
            .documents
            .cover_letter
            .as_deref()
            .map(|letter| format!("The candidate's cover letter mentions: {letter}")),
    ]
    .into_iter()
    .flatten()
    .join("\n");

    format!(
        r#"You are an experienced professional interviewer conducting a job interview for a {role} position. Your role is to:

1. Ask relevant, professional interview questions appropriate for the {role} role
2. Be conversational but professional in tone
3. Ask follow-up questions based on the candidate's responses
4. Provide a realistic interview experience
5. Focus on behavioral questions, technical skills (if applicable), and cultural fit
6. Keep your responses concise (2-3 sentences max per question)
7. Only ask one question at a time
8. Be encouraging but maintain professional boundaries

{language}

{documents}

Start with a brief, friendly greeting and then ask your first interview question."#
    )
}

/// System prompt first, then every turn in order: the interviewer speaks
/// as the assistant and the candidate as the user.
pub fn to_chat_messages(history: &[ConversationMessage], context: &SessionContext) -> Vec<Message> {
    std::iter::once(Message {
        role: Role::System,
        content: system_prompt(context),
    })
    .chain(history.iter().map(|message| Message {
        role: match message.speaker {
            Speaker::Interviewer => Role::Assistant,
            Speaker::Candidate => Role::User,
        },
        content: message.text.clone(),
    }))
    .collect()
}

pub struct OpenAiInterviewer {
    client: reqwest::Client,
    settings: OpenAiSettings,
    api_key: String,
}

impl OpenAiInterviewer {
    pub fn new(settings: OpenAiSettings, api_key: String) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            settings,
            api_key,
        })
    }
}

#[async_trait]
impl Interviewer for OpenAiInterviewer {
    async fn respond(
        &self,
        history: &[ConversationMessage],
        context: &SessionContext,
    ) -> Result<String, InterviewerError> {
        let request = ChatCompletionRequest {
            model: &self.settings.model,
            messages: to_chat_messages(history, context),
            temperature: self.settings.temperature,
            max_tokens: self.settings.max_tokens,
            presence_penalty: self.settings.presence_penalty,
            frequency_penalty: self.settings.frequency_penalty,
        };

        let url = format!(
            "{}/v1/chat/completions",
            self.settings.api_base.trim_end_matches('/')
        );
        tracing::debug!(%url, turns = history.len(), "Requesting interviewer turn");

        let response = self
            .client
            .post(url)
            .bearer_auth(&self.api_key)
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(InterviewerError::Status(status));
        }

        let api_response: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|err| InterviewerError::Malformed(err.to_string()))?;

        let text = api_response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_owned())
            .unwrap_or_default();

        if text.is_empty() {
            return Err(InterviewerError::Empty);
        }

        Ok(text)
    }
}
