//! API request and response types

use crate::quiz::{Question, QuestionBank};
use crate::runtime::SessionRuntime;
use crate::state_machine::state::{Answers, Recommendation};
use crate::state_machine::{ChatHistory, Event, QuizState};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Request to pick a stream
#[derive(Debug, Serialize, Deserialize)]
pub struct SelectStreamRequest {
    pub stream: String,
}

/// Request to answer the current question
#[derive(Debug, Serialize, Deserialize)]
pub struct AnswerRequest {
    pub choice: String,
}

/// Request to send a chat message
#[derive(Debug, Serialize, Deserialize)]
pub struct ChatRequest {
    pub text: String,
}

/// One entry of the stream catalogue
#[derive(Debug, Serialize)]
pub struct StreamInfo {
    pub name: String,
    pub question_count: usize,
}

#[derive(Debug, Serialize)]
pub struct StreamsResponse {
    pub streams: Vec<StreamInfo>,
}

impl StreamsResponse {
    pub fn from_bank(bank: &QuestionBank) -> Self {
        Self {
            streams: bank
                .streams()
                .iter()
                .map(|s| StreamInfo {
                    name: s.name.clone(),
                    question_count: s.questions.len(),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RecommendationView {
    pub headline: String,
    pub text: String,
    pub careers: Vec<String>,
}

impl From<&Recommendation> for RecommendationView {
    fn from(r: &Recommendation) -> Self {
        Self {
            headline: r.headline(),
            text: r.text.clone(),
            careers: r.careers().into_iter().map(str::to_string).collect(),
        }
    }
}

/// Everything a client needs to render one session
#[derive(Debug, Serialize)]
pub struct SessionView {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub state: QuizState,
    pub stream: Option<String>,
    pub question_index: usize,
    pub question_count: usize,
    pub question: Option<Question>,
    pub selected_answer: Option<String>,
    pub answers: Answers,
    pub can_go_back: bool,
    pub can_go_next: bool,
    pub can_submit: bool,
    pub submitted: bool,
    pub busy: bool,
    pub recommendation: Option<RecommendationView>,
    pub chat_history: ChatHistory,
    pub last_error: Option<String>,
}

impl SessionView {
    pub fn new(runtime: &SessionRuntime) -> Self {
        let session = runtime.session();
        let bank = runtime.bank();
        let stream = session.selected_stream();
        let index = session.current_question_index(bank);

        Self {
            id: runtime.id().to_string(),
            created_at: runtime.created_at(),
            state: session.state.clone(),
            stream: stream.map(str::to_string),
            question_index: index,
            question_count: stream.map_or(0, |s| bank.len(s)),
            question: stream.and_then(|s| bank.question(s, index)).cloned(),
            selected_answer: stream
                .and_then(|s| session.answers.get(s, index))
                .map(str::to_string),
            answers: session.answers.clone(),
            can_go_back: session.permits(bank, Event::Back),
            can_go_next: session.permits(bank, Event::Next),
            can_submit: session.permits(bank, Event::Submit),
            submitted: session.is_submitted(),
            busy: session.state.is_busy(),
            recommendation: session.recommendation.as_ref().map(RecommendationView::from),
            chat_history: session.chat_history.clone(),
            last_error: session.last_error.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SessionCreatedResponse {
    pub id: String,
    pub session: SessionView,
}

#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    /// Session as it stands after a failed completion
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session: Option<SessionView>,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
            session: None,
        }
    }

    pub fn with_session(mut self, session: SessionView) -> Self {
        self.session = Some(session);
        self
    }
}
