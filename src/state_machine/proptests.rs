//! Property-based tests for the state machine
//!
//! These tests verify key invariants hold across all possible inputs.

use super::state::*;
use super::transition::*;
use super::*;
use crate::quiz::{default_bank, Question, QuestionBank};
use proptest::prelude::*;
use std::collections::BTreeMap;

// ============================================================================
// Test Helpers
// ============================================================================

/// Small bank so random walks reach the last question often
fn short_bank() -> QuestionBank {
    QuestionBank::default()
        .with_stream(
            "Alpha",
            vec![
                Question::new("a0", &["Yes", "No"]),
                Question::new("a1", &["Yes", "No", "Maybe"]),
                Question::new("a2", &["Lab", "Field", "Both"]),
            ],
        )
        .with_stream("Beta", vec![Question::new("b0", &["Yes", "No"])])
}

/// Action chosen by the generator, resolved against the current session
#[derive(Debug, Clone)]
enum Action {
    /// Pick option `n % options.len()` of the current question
    Answer(usize),
    /// Offer a choice that no question lists
    BogusAnswer,
    Back,
    Next,
    Submit,
    ClearChat,
    RecommendationOk,
    RecommendationErr,
}

fn resolve(action: &Action, session: &Session, bank: &QuestionBank) -> Event {
    match action {
        Action::Answer(n) => {
            let choice = match &session.state {
                QuizState::InProgress { stream, index } => bank
                    .question(stream, *index)
                    .map(|q| q.options[n % q.options.len()].clone())
                    .unwrap_or_default(),
                _ => "Yes".to_string(),
            };
            Event::Answer { choice }
        }
        Action::BogusAnswer => Event::Answer {
            choice: "definitely-not-an-option".to_string(),
        },
        Action::Back => Event::Back,
        Action::Next => Event::Next,
        Action::Submit => Event::Submit,
        Action::ClearChat => Event::ClearChat,
        Action::RecommendationOk => Event::RecommendationReady {
            text: "Engineer, Analyst, Teacher".to_string(),
        },
        Action::RecommendationErr => Event::RecommendationFailed {
            error: "Connection failed".to_string(),
        },
    }
}

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_action() -> impl Strategy<Value = Action> {
    prop_oneof![
        4 => (0usize..3).prop_map(Action::Answer),
        1 => Just(Action::BogusAnswer),
        2 => Just(Action::Back),
        4 => Just(Action::Next),
        2 => Just(Action::Submit),
        1 => Just(Action::ClearChat),
        1 => Just(Action::RecommendationOk),
        1 => Just(Action::RecommendationErr),
    ]
}

fn arb_stream() -> impl Strategy<Value = String> {
    prop_oneof![Just("Alpha".to_string()), Just("Beta".to_string())]
}

fn arb_default_stream() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("Science".to_string()),
        Just("Mathematics".to_string()),
        Just("Arts".to_string()),
        Just("Commerce".to_string()),
    ]
}

// ============================================================================
// State Validity Checkers
// ============================================================================

fn is_valid_session(session: &Session, bank: &QuestionBank) -> bool {
    match &session.state {
        QuizState::NoStreamSelected => {
            session.answers.is_empty() && session.recommendation.is_none()
        }
        QuizState::InProgress { stream, index } => {
            *index < bank.len(stream) && session.recommendation.is_none()
        }
        QuizState::AwaitingRecommendation { stream } => {
            session.answers.is_complete(stream, bank.len(stream))
                && session.recommendation.is_none()
        }
        QuizState::Submitted { stream } | QuizState::AwaitingChatReply { stream, .. } => {
            session.answers.is_complete(stream, bank.len(stream))
                && session
                    .recommendation
                    .as_ref()
                    .is_some_and(|r| !r.text.is_empty())
        }
    }
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    // Invariant 1: Valid session after any sequence of transitions
    #[test]
    fn prop_transitions_preserve_validity(
        stream in arb_stream(),
        actions in proptest::collection::vec(arb_action(), 0..40)
    ) {
        let bank = short_bank();
        let mut session = transition(&Session::default(), &bank, Event::SelectStream { stream })
            .unwrap()
            .new_session;

        for action in &actions {
            let event = resolve(action, &session, &bank);
            if let Ok(result) = transition(&session, &bank, event) {
                session = result.new_session;
                prop_assert!(is_valid_session(&session, &bank), "Invalid session: {:?}", session);
            }
        }
    }

    // Invariant 2: Select then reset is an exact round trip
    #[test]
    fn prop_select_then_reset_is_default(stream in arb_default_stream()) {
        let bank = default_bank();
        let selected = transition(&Session::default(), &bank, Event::SelectStream { stream })
            .unwrap()
            .new_session;
        let reset = transition(&selected, &bank, Event::Reset).unwrap().new_session;
        prop_assert_eq!(reset, Session::default());
    }

    // Invariant 3: Navigation never loses a recorded answer
    #[test]
    fn prop_answers_persist_across_navigation(
        stream in arb_stream(),
        actions in proptest::collection::vec(arb_action(), 0..40)
    ) {
        let bank = short_bank();
        let select = Event::SelectStream { stream: stream.clone() };
        let mut session = transition(&Session::default(), &bank, select)
            .unwrap()
            .new_session;
        let mut expected: BTreeMap<usize, String> = BTreeMap::new();

        for action in &actions {
            let event = resolve(action, &session, &bank);
            let answered_at = match (&session.state, &event) {
                (QuizState::InProgress { index, .. }, Event::Answer { choice }) => {
                    Some((*index, choice.clone()))
                }
                _ => None,
            };
            if let Ok(result) = transition(&session, &bank, event) {
                session = result.new_session;
                if let Some((index, choice)) = answered_at {
                    expected.insert(index, choice);
                }
            }
            for (index, choice) in &expected {
                prop_assert_eq!(session.answers.get(&stream, *index), Some(choice.as_str()));
            }
            prop_assert_eq!(session.answers.len(), expected.len());
        }
    }

    // Invariant 4: Next and Submit are rejected while the current question is unanswered
    #[test]
    fn prop_unanswered_blocks_progress(
        stream in arb_default_stream(),
        steps in 0usize..9
    ) {
        let bank = default_bank();
        let mut session = transition(&Session::default(), &bank, Event::SelectStream { stream })
            .unwrap()
            .new_session;
        for _ in 0..steps {
            session = transition(&session, &bank, resolve(&Action::Answer(0), &session, &bank))
                .unwrap()
                .new_session;
            session = transition(&session, &bank, Event::Next).unwrap().new_session;
        }

        prop_assert_eq!(
            transition(&session, &bank, Event::Next).unwrap_err(),
            TransitionError::Unanswered
        );
        prop_assert_eq!(
            transition(&session, &bank, Event::Submit).unwrap_err(),
            TransitionError::Unanswered
        );
    }

    // Invariant 5: Back is rejected only at the first question
    #[test]
    fn prop_back_at_first_question_is_rejected(
        stream in arb_stream(),
        actions in proptest::collection::vec(arb_action(), 0..30)
    ) {
        let bank = short_bank();
        let mut session = transition(&Session::default(), &bank, Event::SelectStream { stream })
            .unwrap()
            .new_session;

        for action in &actions {
            let event = resolve(action, &session, &bank);
            if let Ok(result) = transition(&session, &bank, event) {
                session = result.new_session;
            }
        }

        if let QuizState::InProgress { index, .. } = session.state {
            let back = transition(&session, &bank, Event::Back);
            if index == 0 {
                prop_assert_eq!(back.unwrap_err(), TransitionError::AtFirstQuestion);
            } else {
                prop_assert!(back.is_ok());
            }
        }
    }

    // Invariant 6: An accepted Submit always carries a complete answer set
    #[test]
    fn prop_submit_requires_complete_answers(
        stream in arb_stream(),
        actions in proptest::collection::vec(arb_action(), 0..40)
    ) {
        let bank = short_bank();
        let mut session = transition(&Session::default(), &bank, Event::SelectStream { stream })
            .unwrap()
            .new_session;

        for action in &actions {
            let event = resolve(action, &session, &bank);
            let is_submit = matches!(event, Event::Submit);
            if let Ok(result) = transition(&session, &bank, event) {
                if is_submit {
                    let submitted_complete = result.effects.iter().all(|e| match e {
                        Effect::RequestRecommendation { stream, answers } => {
                            answers.is_complete(stream, bank.len(stream))
                        }
                        Effect::RequestChatReply { .. } => false,
                    });
                    prop_assert!(submitted_complete);
                    prop_assert_eq!(result.effects.len(), 1);
                }
                session = result.new_session;
            }
        }
    }

    // Invariant 7: Once the current question is answered, neither Next nor
    // Submit can fail with Unanswered at that index
    #[test]
    fn prop_answered_question_never_reported_unanswered(
        stream in arb_stream(),
        actions in proptest::collection::vec(arb_action(), 0..40)
    ) {
        let bank = short_bank();
        let mut session = transition(&Session::default(), &bank, Event::SelectStream { stream })
            .unwrap()
            .new_session;

        for action in &actions {
            let event = resolve(action, &session, &bank);
            let is_answer = matches!(event, Event::Answer { .. });
            let Ok(result) = transition(&session, &bank, event) else {
                continue;
            };
            session = result.new_session;
            if !is_answer {
                continue;
            }

            for follow_up in [Event::Next, Event::Submit] {
                let outcome = transition(&session, &bank, follow_up);
                prop_assert_ne!(outcome.err(), Some(TransitionError::Unanswered));
            }
        }
    }
}
