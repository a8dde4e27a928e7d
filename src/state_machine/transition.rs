//! Pure state transition function
//!
//! Given the same session, bank and event, `transition` always produces the
//! same result and performs no I/O. Completion calls are requested through
//! [`Effect`]s and their outcomes come back as events.

use super::state::{AnswerKey, Answers, QuizState, Recommendation, Session};
use super::{Effect, Event};
use crate::quiz::QuestionBank;
use thiserror::Error;

/// Result of a state transition
#[derive(Debug)]
pub struct TransitionResult {
    pub new_session: Session,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(session: Session) -> Self {
        Self {
            new_session: session,
            effects: vec![],
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }
}

/// Guard violations; the session is left unchanged
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("Unknown stream: {0}")]
    UnknownStream(String),
    #[error("A stream is already selected; reset the quiz to choose another")]
    StreamAlreadySelected,
    #[error("Choose a stream first")]
    NoStreamSelected,
    #[error("'{0}' is not one of the options for this question")]
    InvalidChoice(String),
    #[error("Already at the first question")]
    AtFirstQuestion,
    #[error("Answer the current question first")]
    Unanswered,
    #[error("This is the last question; submit the quiz instead")]
    AtLastQuestion,
    #[error("Not at the last question yet")]
    NotAtLastQuestion,
    #[error("Some questions have not been answered")]
    Incomplete,
    #[error("Quiz already submitted; reset to start over")]
    AlreadySubmitted,
    #[error("Chat is available once the quiz is submitted")]
    ChatUnavailable,
    #[error("Message is empty")]
    EmptyMessage,
    #[error("Waiting for the counselor to respond")]
    Busy,
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),
}

impl TransitionError {
    /// The action carried bad input rather than arriving at the wrong time
    pub fn is_bad_input(&self) -> bool {
        matches!(
            self,
            TransitionError::UnknownStream(_)
                | TransitionError::InvalidChoice(_)
                | TransitionError::EmptyMessage
        )
    }
}

/// Pure transition function
pub fn transition(
    session: &Session,
    bank: &QuestionBank,
    event: Event,
) -> Result<TransitionResult, TransitionError> {
    match (&session.state, event) {
        // ============================================================
        // Reset is accepted from every state
        // ============================================================
        (_, Event::Reset) => Ok(TransitionResult::new(Session::default())),

        // ============================================================
        // Completion outcomes
        // ============================================================
        (QuizState::AwaitingRecommendation { stream }, Event::RecommendationReady { text }) => {
            let mut next = advance(session, QuizState::Submitted {
                stream: stream.clone(),
            });
            next.recommendation = Some(Recommendation {
                stream: stream.clone(),
                text,
            });
            Ok(TransitionResult::new(next))
        }

        // Failed submit returns to the last question so the student can retry
        (QuizState::AwaitingRecommendation { stream }, Event::RecommendationFailed { error }) => {
            let mut next = advance(session, QuizState::InProgress {
                stream: stream.clone(),
                index: bank.len(stream).saturating_sub(1),
            });
            next.last_error = Some(error);
            Ok(TransitionResult::new(next))
        }

        (QuizState::AwaitingChatReply { stream, .. }, Event::ChatReplyReady { history }) => {
            let mut next = advance(session, QuizState::Submitted {
                stream: stream.clone(),
            });
            next.chat_history = history;
            Ok(TransitionResult::new(next))
        }

        (QuizState::AwaitingChatReply { stream, .. }, Event::ChatReplyFailed { error }) => {
            let mut next = advance(session, QuizState::Submitted {
                stream: stream.clone(),
            });
            next.last_error = Some(error);
            Ok(TransitionResult::new(next))
        }

        // Busy states reject every user action except reset
        (
            QuizState::AwaitingRecommendation { .. } | QuizState::AwaitingChatReply { .. },
            Event::SelectStream { .. }
            | Event::Answer { .. }
            | Event::Back
            | Event::Next
            | Event::Submit
            | Event::SendChat { .. }
            | Event::ClearChat,
        ) => Err(TransitionError::Busy),

        // ============================================================
        // Stream selection
        // ============================================================
        (QuizState::NoStreamSelected, Event::SelectStream { stream }) => {
            if !bank.contains(&stream) {
                return Err(TransitionError::UnknownStream(stream));
            }
            let mut next = advance(session, QuizState::InProgress { stream, index: 0 });
            next.answers = Answers::default();
            Ok(TransitionResult::new(next))
        }

        (_, Event::SelectStream { .. }) => Err(TransitionError::StreamAlreadySelected),

        (
            QuizState::NoStreamSelected,
            Event::Answer { .. } | Event::Back | Event::Next | Event::Submit,
        ) => Err(TransitionError::NoStreamSelected),

        // ============================================================
        // Quiz navigation
        // ============================================================
        (QuizState::InProgress { stream, index }, Event::Answer { choice }) => {
            let question = bank.question(stream, *index).ok_or_else(|| {
                TransitionError::InvalidTransition(format!(
                    "No question {index} in stream {stream}"
                ))
            })?;
            if !question.has_option(&choice) {
                return Err(TransitionError::InvalidChoice(choice));
            }
            let mut next = advance(session, session.state.clone());
            next.answers.record(AnswerKey::new(stream.clone(), *index), choice);
            Ok(TransitionResult::new(next))
        }

        (QuizState::InProgress { stream, index }, Event::Back) => {
            if *index == 0 {
                return Err(TransitionError::AtFirstQuestion);
            }
            Ok(TransitionResult::new(advance(session, QuizState::InProgress {
                stream: stream.clone(),
                index: index - 1,
            })))
        }

        (QuizState::InProgress { stream, index }, Event::Next) => {
            if !session.answers.is_answered(stream, *index) {
                return Err(TransitionError::Unanswered);
            }
            if *index + 1 >= bank.len(stream) {
                return Err(TransitionError::AtLastQuestion);
            }
            Ok(TransitionResult::new(advance(session, QuizState::InProgress {
                stream: stream.clone(),
                index: index + 1,
            })))
        }

        (QuizState::InProgress { stream, index }, Event::Submit) => {
            let count = bank.len(stream);
            if !session.answers.is_answered(stream, *index) {
                return Err(TransitionError::Unanswered);
            }
            if *index + 1 < count {
                return Err(TransitionError::NotAtLastQuestion);
            }
            if !session.answers.is_complete(stream, count) {
                return Err(TransitionError::Incomplete);
            }
            let next = advance(session, QuizState::AwaitingRecommendation {
                stream: stream.clone(),
            });
            Ok(TransitionResult::new(next).with_effect(Effect::RequestRecommendation {
                stream: stream.clone(),
                answers: session.answers.clone(),
            }))
        }

        (
            QuizState::Submitted { .. },
            Event::Answer { .. } | Event::Back | Event::Next | Event::Submit,
        ) => Err(TransitionError::AlreadySubmitted),

        // ============================================================
        // Chat
        // ============================================================
        (QuizState::Submitted { stream }, Event::SendChat { text }) => {
            if text.trim().is_empty() {
                return Err(TransitionError::EmptyMessage);
            }
            let next = advance(session, QuizState::AwaitingChatReply {
                stream: stream.clone(),
                message: text.clone(),
            });
            Ok(TransitionResult::new(next).with_effect(Effect::RequestChatReply {
                history: session.chat_history.clone(),
                message: text,
            }))
        }

        (_, Event::SendChat { .. }) => Err(TransitionError::ChatUnavailable),

        // Clearing the transcript never touches quiz progress
        (_, Event::ClearChat) => {
            let mut next = advance(session, session.state.clone());
            next.chat_history.clear();
            Ok(TransitionResult::new(next))
        }

        // ============================================================
        // Invalid Transitions
        // ============================================================
        (state, event) => Err(TransitionError::InvalidTransition(format!(
            "No transition from {} with event {}",
            state.name(),
            event.name()
        ))),
    }
}

/// Copy of the session in a new state, with any shown error dismissed
fn advance(session: &Session, state: QuizState) -> Session {
    Session {
        state,
        last_error: None,
        ..session.clone()
    }
}
