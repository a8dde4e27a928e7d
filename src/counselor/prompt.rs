//! Prompt construction for the career counselor

use super::ChatContext;
use crate::llm::LlmMessage;
use crate::state_machine::state::{Answers, ChatTurn, Speaker};
use std::fmt::Write;

/// Fixed persona sent with every completion call
pub const COUNSELOR_SYSTEM_PROMPT: &str =
    "You are an expert career counselor. Guide the user based on their quiz answers.";

/// Build the career-prediction prompt for a finished quiz.
///
/// Answers are rendered one `key: value` line each, in question order.
pub fn career_prompt(stream: &str, answers: &Answers) -> String {
    let summary = answers
        .iter()
        .map(|(key, choice)| format!("{key}: {choice}"))
        .collect::<Vec<_>>()
        .join("\n");

    let mut prompt = String::new();
    let _ = writeln!(prompt, "Student's chosen stream: {stream}");
    let _ = writeln!(prompt, "Student's quiz answers:");
    let _ = writeln!(prompt, "{summary}");
    prompt.push('\n');
    prompt.push_str(
        "Suggest the top 3 most suitable careers for this student in their chosen stream.\n",
    );
    prompt.push_str("Answer as a simple comma-separated list.");
    prompt
}

/// Build the message list for a chat turn
pub fn chat_messages(history: &[ChatTurn], message: &str, context: ChatContext) -> Vec<LlmMessage> {
    let mut messages = match context {
        ChatContext::Latest => Vec::with_capacity(1),
        ChatContext::Full => history
            .iter()
            .map(|turn| match turn.speaker {
                Speaker::User => LlmMessage::user(turn.message.clone()),
                Speaker::Counselor => LlmMessage::assistant(turn.message.clone()),
            })
            .collect(),
    };
    messages.push(LlmMessage::user(message));
    messages
}
