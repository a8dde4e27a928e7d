//! Session runtime
//!
//! Feeds events through the pure transition function and executes the
//! resulting effects, one event at a time.

use crate::counselor::{Counselor, CounselorError};
use crate::quiz::QuestionBank;
use crate::state_machine::{transition, Effect, Event, Session, TransitionError};
use chrono::{DateTime, Utc};
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;

/// Errors surfaced to whoever dispatched an event
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Transition(#[from] TransitionError),
    #[error(transparent)]
    Counselor(#[from] CounselorError),
}

/// Runtime for a single session
pub struct SessionRuntime {
    id: String,
    created_at: DateTime<Utc>,
    last_active: Instant,
    session: Session,
    bank: Arc<QuestionBank>,
    counselor: Arc<Counselor>,
}

impl SessionRuntime {
    pub fn new(id: impl Into<String>, bank: Arc<QuestionBank>, counselor: Arc<Counselor>) -> Self {
        Self {
            id: id.into(),
            created_at: Utc::now(),
            last_active: Instant::now(),
            session: Session::default(),
            bank,
            counselor,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Time since the last dispatched event, or since creation
    pub fn idle_for(&self) -> Duration {
        self.last_active.elapsed()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    /// Apply a user event and run it to completion.
    ///
    /// A completion call triggered by the event finishes before this returns.
    /// If that call fails the session is moved to its failure state and the
    /// error is returned.
    ///
    /// The session is only replaced once every follow-up event has been
    /// applied. Dropping the future mid-call leaves it as it was before the
    /// event, never in a busy state.
    pub async fn dispatch(&mut self, event: Event) -> Result<&Session, SessionError> {
        self.last_active = Instant::now();
        let mut session = self.session.clone();
        let mut queue = VecDeque::from([event]);
        let mut failure = None;

        while let Some(event) = queue.pop_front() {
            let name = event.name();
            let result = transition(&session, &self.bank, event).map_err(|e| {
                tracing::debug!(session_id = %self.id, event = name, error = %e, "Event rejected");
                e
            })?;

            session = result.new_session;
            tracing::debug!(
                session_id = %self.id,
                event = name,
                state = session.state.name(),
                "Transition applied"
            );

            for effect in result.effects {
                let (follow_up, error) = self.execute_effect(effect).await;
                queue.push_back(follow_up);
                if let Some(error) = error {
                    failure = Some(error);
                }
            }
        }

        self.session = session;
        self.last_active = Instant::now();

        match failure {
            Some(error) => Err(SessionError::Counselor(error)),
            None => Ok(&self.session),
        }
    }

    /// Run one effect, returning the event that reports its outcome
    async fn execute_effect(&self, effect: Effect) -> (Event, Option<CounselorError>) {
        match effect {
            Effect::RequestRecommendation { stream, answers } => {
                match self.counselor.generate_recommendation(&stream, &answers).await {
                    Ok(text) => (Event::RecommendationReady { text }, None),
                    Err(e) => {
                        tracing::warn!(
                            session_id = %self.id,
                            stream = %stream,
                            error = %e,
                            "Recommendation failed"
                        );
                        (
                            Event::RecommendationFailed {
                                error: e.to_string(),
                            },
                            Some(e),
                        )
                    }
                }
            }
            Effect::RequestChatReply { history, message } => {
                match self.counselor.send_chat_message(&history, &message).await {
                    Ok(history) => (Event::ChatReplyReady { history }, None),
                    Err(e) => {
                        tracing::warn!(session_id = %self.id, error = %e, "Chat reply failed");
                        (
                            Event::ChatReplyFailed {
                                error: e.to_string(),
                            },
                            Some(e),
                        )
                    }
                }
            }
        }
    }
}
