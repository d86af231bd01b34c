//! Session and input presentation state types.
//!
//! # State Machine
//!
//! ```text
//!            Submit (valid)               DispatchSettled(Ok)
//! Editing ──────────────────► Loading ─────────────────────► Result
//!    ▲  ▲                        │                              │
//!    │  │                        │ DispatchSettled(Err)         │ InputFocused
//!    │  └─────── Error ◄─────────┘                              │
//!    │   (editable, carries a message)                          │
//!    └──────────────────────────────────────────────────────────┘
//! ```
//!
//! `Error` behaves like `Editing` with an attached message: the user may edit
//! and resubmit straight away.

use crate::domain::AnalysisResult;

/// Lifecycle of the current submission. Exactly one variant is active.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SessionState {
    /// The user is composing input.
    #[default]
    Editing,

    /// One dispatch is in flight. Always transient.
    Loading,

    /// The last dispatch succeeded; the result is shown.
    Result(AnalysisResult),

    /// The last submission failed; the input stays editable.
    Error(String),
}

impl SessionState {
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// True when the user may edit the input (`Editing` or `Error`).
    #[must_use]
    pub const fn is_editable(&self) -> bool {
        matches!(self, Self::Editing | Self::Error(_))
    }

    #[must_use]
    pub const fn result(&self) -> Option<&AnalysisResult> {
        match self {
            Self::Result(result) => Some(result),
            _ => None,
        }
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Error(message) => Some(message),
            _ => None,
        }
    }

    /// Short label used in logs.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Editing => "editing",
            Self::Loading => "loading",
            Self::Result(_) => "result",
            Self::Error(_) => "error",
        }
    }
}

/// How the input affordance is presented.
///
/// `Minimized` collapses the input once a result is on screen; focusing the
/// input expands it again.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InputPresentation {
    #[default]
    Expanded,
    Minimized,
}
