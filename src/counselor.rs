//! Career counselor
//!
//! Wraps the completion capability: one call per recommendation and one per
//! chat turn, no retries, no caching.

mod prompt;

pub use prompt::COUNSELOR_SYSTEM_PROMPT;

use crate::llm::{LlmError, LlmMessage, LlmRequest, LlmService};
use crate::state_machine::state::{split_careers, Answers, ChatHistory, ChatTurn};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::time::timeout;

/// How much of the transcript a chat turn forwards to the model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChatContext {
    /// Only the newest message; each reply is independent of history
    #[default]
    Latest,
    /// Every prior turn, then the newest message
    Full,
}

impl FromStr for ChatContext {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "latest" => Ok(ChatContext::Latest),
            "full" => Ok(ChatContext::Full),
            other => Err(format!("expected 'latest' or 'full', got '{other}'")),
        }
    }
}

/// Completion parameters shared by every call
#[derive(Debug, Clone)]
pub struct CounselorSettings {
    pub max_tokens: u32,
    pub temperature: f32,
    pub timeout: Duration,
    pub chat_context: ChatContext,
    /// Reject recommendations with no comma-separated item
    pub validate_recommendations: bool,
}

impl Default for CounselorSettings {
    fn default() -> Self {
        Self {
            max_tokens: 300,
            temperature: 0.7,
            timeout: Duration::from_secs(30),
            chat_context: ChatContext::Latest,
            validate_recommendations: false,
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CounselorError {
    #[error(transparent)]
    Service(#[from] LlmError),
    #[error("Counselor returned an unusable answer: {0}")]
    MalformedResponse(String),
}

pub struct Counselor {
    llm: Arc<dyn LlmService>,
    settings: CounselorSettings,
}

impl Counselor {
    pub fn new(llm: Arc<dyn LlmService>, settings: CounselorSettings) -> Self {
        Self { llm, settings }
    }

    /// Ask for the top careers matching a finished quiz.
    ///
    /// The text comes back as the model wrote it. Empty replies are always
    /// rejected; with validation on, a reply must also split into at least
    /// one career.
    pub async fn generate_recommendation(
        &self,
        stream: &str,
        answers: &Answers,
    ) -> Result<String, CounselorError> {
        let prompt = prompt::career_prompt(stream, answers);
        let text = self.complete(vec![LlmMessage::user(prompt)]).await?;

        if text.trim().is_empty() {
            return Err(CounselorError::MalformedResponse("empty response".to_string()));
        }
        if self.settings.validate_recommendations && split_careers(&text).is_empty() {
            return Err(CounselorError::MalformedResponse(format!(
                "expected a comma-separated list, got '{text}'"
            )));
        }

        tracing::info!(stream = %stream, answers = answers.len(), "Recommendation generated");
        Ok(text)
    }

    /// Answer one chat message.
    ///
    /// Returns a copy of `history` with the user's message and the reply
    /// appended. On failure nothing is appended.
    pub async fn send_chat_message(
        &self,
        history: &[ChatTurn],
        message: &str,
    ) -> Result<ChatHistory, CounselorError> {
        let messages = prompt::chat_messages(history, message, self.settings.chat_context);
        let reply = self.complete(messages).await?;

        let mut updated = history.to_vec();
        updated.push(ChatTurn::user(message));
        updated.push(ChatTurn::counselor(reply));
        Ok(updated)
    }

    async fn complete(&self, messages: Vec<LlmMessage>) -> Result<String, LlmError> {
        let request = LlmRequest {
            system: COUNSELOR_SYSTEM_PROMPT.to_string(),
            messages,
            max_tokens: self.settings.max_tokens,
            temperature: self.settings.temperature,
        };

        match timeout(self.settings.timeout, self.llm.complete(&request)).await {
            Ok(result) => result.map(|response| response.text),
            Err(_) => Err(LlmError::timeout(format!(
                "No response from the counselor within {}s",
                self.settings.timeout.as_secs()
            ))),
        }
    }
}
