//! Event handling and state transition logic.
//!
//! [`handle_event`] is the only function that transitions
//! [`SessionState`](super::SessionState). It is synchronous and total: every
//! event is accepted in every state, and events that make no sense in the
//! current state are ignored rather than rejected.
//!
//! # Event Types
//!
//! - **Input**: `InputChanged`, `InputFocused`
//! - **Submission**: `Submit`
//! - **Dispatcher**: `DispatchSettled` with the outcome of an `Action::Dispatch`
//!
//! # Example
//!
//! ```rust
//! use saral::app::{handle_event, Action, AppState, Event};
//!
//! let mut state = AppState::new();
//! handle_event(&mut state, &Event::InputChanged("Preamble".to_string()));
//! let (render, actions) = handle_event(&mut state, &Event::Submit);
//!
//! assert!(render);
//! assert_eq!(actions, vec![Action::Dispatch { text: "Preamble".to_string() }]);
//! assert!(state.session.is_loading());
//! ```

use super::modes::{InputPresentation, SessionState};
use crate::app::{Action, AppState};
use crate::domain::{AnalysisResult, DispatchError};

/// Events triggered by user input or dispatcher outcomes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// The input text was replaced with a new value.
    InputChanged(String),

    /// The user focused the input box.
    ///
    /// While a result is shown this returns to editing and discards the result.
    InputFocused,

    /// The user triggered submission of the current input.
    Submit,

    /// The dispatch started by the last `Action::Dispatch` finished.
    DispatchSettled(Result<AnalysisResult, DispatchError>),
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// # Returns
///
/// A `(render, actions)` pair: whether the visible state changed, and the side
/// effects to execute in order.
pub fn handle_event(state: &mut AppState, event: &Event) -> (bool, Vec<Action>) {
    let _span = tracing::debug_span!("handle_event",
        event_type = event_name(event),
        session = state.session.label()
    )
    .entered();

    match event {
        Event::InputChanged(text) => {
            if state.session.is_loading() {
                tracing::trace!("input is disabled while loading");
                return (false, vec![]);
            }
            if &state.input_text == text {
                return (false, vec![]);
            }
            state.input_text.clone_from(text);
            (true, vec![])
        }
        Event::InputFocused => {
            if state.input == InputPresentation::Minimized && !state.session.is_loading() {
                tracing::debug!("returning to editing, discarding result");
                state.input = InputPresentation::Expanded;
                if matches!(state.session, SessionState::Result(_)) {
                    state.session = SessionState::Editing;
                }
                return (true, vec![]);
            }
            (false, vec![])
        }
        Event::Submit => {
            if state.session.is_loading() {
                tracing::debug!("submission already in flight, ignoring");
                return (false, vec![]);
            }
            if state.input_text.trim().is_empty() {
                tracing::debug!("blank submission rejected");
                state.session = SessionState::Error(DispatchError::Validation.message());
                return (true, vec![]);
            }

            tracing::debug!(text_len = state.input_text.len(), "submission started");
            state.session = SessionState::Loading;
            (
                true,
                vec![Action::Dispatch {
                    text: state.input_text.clone(),
                }],
            )
        }
        Event::DispatchSettled(outcome) => {
            if !state.session.is_loading() {
                tracing::debug!("stale dispatch outcome dropped");
                return (false, vec![]);
            }

            match outcome {
                Ok(result) => {
                    tracing::debug!(
                        key_points = result.key_points.len(),
                        references = result.legal_references.len(),
                        "showing result"
                    );
                    state.session = SessionState::Result(result.clone());
                    state.input = InputPresentation::Minimized;
                }
                Err(error) => {
                    tracing::debug!(error = %error, "submission failed");
                    state.session = SessionState::Error(error.message());
                    state.input = InputPresentation::Expanded;
                }
            }
            (true, vec![])
        }
    }
}

const fn event_name(event: &Event) -> &'static str {
    match event {
        Event::InputChanged(_) => "input_changed",
        Event::InputFocused => "input_focused",
        Event::Submit => "submit",
        Event::DispatchSettled(Ok(_)) => "dispatch_succeeded",
        Event::DispatchSettled(Err(_)) => "dispatch_failed",
    }
}
