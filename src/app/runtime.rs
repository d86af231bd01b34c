//! Async driver around the pure state machine.
//!
//! [`Session`] owns the [`AppState`] and the [`Dispatcher`]. It feeds events to
//! [`handle_event`], executes the resulting actions, feeds their outcomes back
//! in, and publishes every `SessionState` change on a `watch` channel so any
//! observer (renderer, tests, background UI glue) sees the same snapshots.
//!
//! ```text
//! Event ─► handle_event ─► Action::Dispatch ─► Dispatcher::submit ─┐
//!   ▲                                                              │
//!   └──────────────── Event::DispatchSettled ◄─────────────────────┘
//! ```

use super::handler::{handle_event, Event};
use super::modes::SessionState;
use super::{Action, AppState};
use crate::api::Dispatcher;
use std::collections::VecDeque;
use tokio::sync::watch;

/// One user session: state, dispatcher and snapshot publisher.
#[derive(Debug)]
pub struct Session {
    state: AppState,
    dispatcher: Dispatcher,
    publisher: watch::Sender<SessionState>,
}

impl Session {
    #[must_use]
    pub fn new(dispatcher: Dispatcher) -> Self {
        let (publisher, _) = watch::channel(SessionState::default());
        Self {
            state: AppState::new(),
            dispatcher,
            publisher,
        }
    }

    #[must_use]
    pub const fn state(&self) -> &AppState {
        &self.state
    }

    /// Subscribes to `SessionState` snapshots. The receiver starts at the
    /// current state.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.publisher.subscribe()
    }

    /// Applies one event and publishes the new session state if it changed.
    ///
    /// Returns the actions the handler requested; the caller decides whether
    /// to run them. Most callers want [`Session::submit`] instead.
    pub fn apply(&mut self, event: &Event) -> (bool, Vec<Action>) {
        let (render, actions) = handle_event(&mut self.state, event);
        let current = &self.state.session;
        self.publisher.send_if_modified(|published| {
            if published == current {
                false
            } else {
                published.clone_from(current);
                true
            }
        });
        (render, actions)
    }

    /// Replaces the input text. Returns whether anything changed.
    pub fn set_input(&mut self, text: impl Into<String>) -> bool {
        self.apply(&Event::InputChanged(text.into())).0
    }

    /// Signals that the user focused the input. Returns whether anything changed.
    pub fn focus_input(&mut self) -> bool {
        self.apply(&Event::InputFocused).0
    }

    /// Submits the current input and drives the dispatch to completion.
    ///
    /// The published state is `Loading` for exactly the duration of the
    /// dispatcher call. A submit while already loading, or with blank input,
    /// performs no network call.
    pub async fn submit(&mut self) -> &SessionState {
        let (_, actions) = self.apply(&Event::Submit);
        let mut pending: VecDeque<Action> = actions.into();

        while let Some(action) = pending.pop_front() {
            let event = self.execute(action).await;
            let (_, follow_up) = self.apply(&event);
            pending.extend(follow_up);
        }

        &self.state.session
    }

    async fn execute(&self, action: Action) -> Event {
        match action {
            Action::Dispatch { text } => {
                Event::DispatchSettled(self.dispatcher.submit(&text).await)
            }
        }
    }
}
