//! Actions representing side effects to be executed by the session runtime.
//!
//! The event handler is pure: it mutates [`AppState`](super::AppState) and
//! returns the effects it wants performed. The runtime executes them and feeds
//! their outcomes back in as events.

/// Commands representing side effects to be executed by the session runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Submit `text` to the dispatcher. The outcome comes back as
    /// [`Event::DispatchSettled`](super::Event::DispatchSettled).
    Dispatch {
        /// Raw input as typed by the user.
        text: String,
    },
}
