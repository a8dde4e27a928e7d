//! Events that can occur in a session

use super::state::ChatHistory;

/// Events that trigger state transitions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    // Quiz actions
    SelectStream { stream: String },
    Answer { choice: String },
    Back,
    Next,
    Submit,
    Reset,

    // Chat actions
    SendChat { text: String },
    ClearChat,

    // Completion outcomes
    RecommendationReady { text: String },
    RecommendationFailed { error: String },
    ChatReplyReady { history: ChatHistory },
    ChatReplyFailed { error: String },
}

impl Event {
    /// Short name used in logs
    pub fn name(&self) -> &'static str {
        match self {
            Event::SelectStream { .. } => "select_stream",
            Event::Answer { .. } => "answer",
            Event::Back => "back",
            Event::Next => "next",
            Event::Submit => "submit",
            Event::Reset => "reset",
            Event::SendChat { .. } => "send_chat",
            Event::ClearChat => "clear_chat",
            Event::RecommendationReady { .. } => "recommendation_ready",
            Event::RecommendationFailed { .. } => "recommendation_failed",
            Event::ChatReplyReady { .. } => "chat_reply_ready",
            Event::ChatReplyFailed { .. } => "chat_reply_failed",
        }
    }
}
