//! Quiz and chat session state machine
//!
//! Implements the Elm Architecture pattern with pure state transitions.

mod effect;
pub mod event;
pub mod state;
pub(crate) mod transition;

#[cfg(test)]
mod proptests;

pub use effect::Effect;
pub use event::Event;
pub use state::{ChatHistory, ChatTurn, QuizState, Session};
pub use transition::{transition, TransitionError};

use crate::quiz::QuestionBank;

impl Session {
    /// Whether `event` would be accepted right now
    pub fn permits(&self, bank: &QuestionBank, event: Event) -> bool {
        transition(self, bank, event).is_ok()
    }
}
