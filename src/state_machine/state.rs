//! Session state types

use crate::quiz::QuestionBank;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

// ============================================================================
// Quiz State
// ============================================================================

/// Where the session is in the quiz flow
#[derive(Debug, Clone, Serialize, PartialEq, Eq, Default)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QuizState {
    /// Waiting for the student to pick a stream
    #[default]
    NoStreamSelected,

    /// Answering questions of the selected stream
    InProgress { stream: String, index: usize },

    /// Submit accepted, recommendation request in flight
    AwaitingRecommendation { stream: String },

    /// Recommendation generated, open chat available
    Submitted { stream: String },

    /// Chat message sent, counselor reply in flight
    AwaitingChatReply { stream: String, message: String },
}

impl QuizState {
    pub fn stream(&self) -> Option<&str> {
        match self {
            QuizState::NoStreamSelected => None,
            QuizState::InProgress { stream, .. }
            | QuizState::AwaitingRecommendation { stream }
            | QuizState::Submitted { stream }
            | QuizState::AwaitingChatReply { stream, .. } => Some(stream),
        }
    }

    /// A completion call is outstanding; only reset is accepted
    pub fn is_busy(&self) -> bool {
        matches!(
            self,
            QuizState::AwaitingRecommendation { .. } | QuizState::AwaitingChatReply { .. }
        )
    }

    pub fn name(&self) -> &'static str {
        match self {
            QuizState::NoStreamSelected => "no_stream_selected",
            QuizState::InProgress { .. } => "in_progress",
            QuizState::AwaitingRecommendation { .. } => "awaiting_recommendation",
            QuizState::Submitted { .. } => "submitted",
            QuizState::AwaitingChatReply { .. } => "awaiting_chat_reply",
        }
    }
}

// ============================================================================
// Answers
// ============================================================================

/// Answer slot, rendered as `{stream}_{index}`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AnswerKey {
    pub stream: String,
    pub index: usize,
}

impl AnswerKey {
    pub fn new(stream: impl Into<String>, index: usize) -> Self {
        Self {
            stream: stream.into(),
            index,
        }
    }
}

impl fmt::Display for AnswerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.stream, self.index)
    }
}

/// Recorded choices, iterated in (stream, index) order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Answers(BTreeMap<AnswerKey, String>);

impl Answers {
    /// Record a choice, overwriting any earlier one for the same slot
    pub fn record(&mut self, key: AnswerKey, choice: impl Into<String>) {
        self.0.insert(key, choice.into());
    }

    pub fn get(&self, stream: &str, index: usize) -> Option<&str> {
        self.0
            .get(&AnswerKey::new(stream, index))
            .map(String::as_str)
    }

    pub fn is_answered(&self, stream: &str, index: usize) -> bool {
        self.get(stream, index).is_some()
    }

    /// Every index in `0..count` has an answer
    pub fn is_complete(&self, stream: &str, count: usize) -> bool {
        (0..count).all(|i| self.is_answered(stream, i))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&AnswerKey, &str)> {
        self.0.iter().map(|(k, v)| (k, v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for Answers {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(k, v)| (k.to_string(), v)))
    }
}

// ============================================================================
// Chat
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Speaker {
    User,
    Counselor,
}

/// One line of the chat transcript
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatTurn {
    pub speaker: Speaker,
    pub message: String,
}

impl ChatTurn {
    pub fn user(message: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::User,
            message: message.into(),
        }
    }

    pub fn counselor(message: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::Counselor,
            message: message.into(),
        }
    }
}

pub type ChatHistory = Vec<ChatTurn>;

// ============================================================================
// Recommendation
// ============================================================================

/// Career suggestions produced for a completed quiz
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    pub stream: String,
    /// Raw completion text, never parsed for correctness
    pub text: String,
}

impl Recommendation {
    pub fn headline(&self) -> String {
        format!(
            "Based on your answers, top career options in {}:\n{}",
            self.stream, self.text
        )
    }

    /// Best-effort split of the comma-separated answer, for display only
    pub fn careers(&self) -> Vec<&str> {
        split_careers(&self.text)
    }
}

pub fn split_careers(text: &str) -> Vec<&str> {
    text.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

// ============================================================================
// Session
// ============================================================================

/// Full mutable state of one student's quiz and chat
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub state: QuizState,
    pub answers: Answers,
    pub recommendation: Option<Recommendation>,
    pub chat_history: ChatHistory,
    /// Last completion failure, shown until the next successful action
    pub last_error: Option<String>,
}

impl Session {
    pub fn selected_stream(&self) -> Option<&str> {
        self.state.stream()
    }

    /// Index of the question on screen; the last index once submitted
    pub fn current_question_index(&self, bank: &QuestionBank) -> usize {
        match &self.state {
            QuizState::NoStreamSelected => 0,
            QuizState::InProgress { index, .. } => *index,
            QuizState::AwaitingRecommendation { stream }
            | QuizState::Submitted { stream }
            | QuizState::AwaitingChatReply { stream, .. } => bank.len(stream).saturating_sub(1),
        }
    }

    pub fn is_submitted(&self) -> bool {
        matches!(
            self.state,
            QuizState::Submitted { .. } | QuizState::AwaitingChatReply { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_answer_key_rendering() {
        assert_eq!(AnswerKey::new("Commerce", 3).to_string(), "Commerce_3");
    }

    #[test]
    fn test_answers_iterate_in_index_order() {
        let mut answers = Answers::default();
        answers.record(AnswerKey::new("Arts", 2), "No");
        answers.record(AnswerKey::new("Arts", 0), "Yes");
        answers.record(AnswerKey::new("Arts", 1), "Maybe");
        answers.record(AnswerKey::new("Arts", 0), "Sometimes");

        let rendered: Vec<_> = answers
            .iter()
            .map(|(k, v)| format!("{k}: {v}"))
            .collect();
        assert_eq!(rendered, vec!["Arts_0: Sometimes", "Arts_1: Maybe", "Arts_2: No"]);
        assert!(answers.is_complete("Arts", 3));
        assert!(!answers.is_complete("Arts", 4));
    }

    #[test]
    fn test_answers_serialize_as_map() {
        let mut answers = Answers::default();
        answers.record(AnswerKey::new("Science", 0), "Lab");
        let json = serde_json::to_value(&answers).unwrap();
        assert_eq!(json, serde_json::json!({ "Science_0": "Lab" }));
    }

    #[test]
    fn test_recommendation_careers() {
        let rec = Recommendation {
            stream: "Science".to_string(),
            text: "Doctor, Research Scientist ,  , Pharmacist".to_string(),
        };
        assert_eq!(rec.careers(), vec!["Doctor", "Research Scientist", "Pharmacist"]);
        assert!(rec
            .headline()
            .starts_with("Based on your answers, top career options in Science:"));
    }

    #[test]
    fn test_state_serialization() {
        let state = QuizState::InProgress {
            stream: "Arts".to_string(),
            index: 4,
        };
        assert_eq!(
            serde_json::to_value(&state).unwrap(),
            serde_json::json!({ "type": "in_progress", "stream": "Arts", "index": 4 })
        );
    }
}
