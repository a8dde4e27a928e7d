//! Effects produced by state transitions

use super::state::{Answers, ChatHistory};

/// Side effects to be executed after a state transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Ask the counselor for career suggestions from a finished quiz
    RequestRecommendation { stream: String, answers: Answers },

    /// Ask the counselor to answer a chat message
    RequestChatReply { history: ChatHistory, message: String },
}
