//! Application state management and view model computation.
//!
//! [`AppState`] is the single source of truth for the session: the input text,
//! the current [`SessionState`] and how the input is presented. It is mutated
//! only by [`handle_event`](super::handle_event); everything else reads it.
//!
//! # View Model Computation
//!
//! `compute_viewmodel` turns a state snapshot, plus the read-only status of the
//! background services, into a renderable [`UIViewModel`]. The renderer never
//! looks at `AppState` directly.
//!
//! # Example
//!
//! ```rust
//! use saral::app::AppState;
//! use saral::background::AvailabilityStatus;
//!
//! let mut state = AppState::new();
//! state.input_text = "Article 21".to_string();
//! assert!(state.can_submit());
//!
//! let viewmodel = state.compute_viewmodel(AvailabilityStatus::Checking, &[]);
//! assert_eq!(viewmodel.input_bar.char_count, 10);
//! ```

use super::modes::{InputPresentation, SessionState};
use crate::background::{AvailabilityStatus, Notification};
use crate::ui::viewmodel::{
    HeaderInfo, InputBarInfo, NoticeView, ResultView, StatusInfo, UIViewModel,
};

/// Application title shown in the header.
pub const APP_TITLE: &str = "Samvidhaan Saral";

/// Header subtitle, shown only while the input is expanded.
pub const APP_SUBTITLE: &str =
    "Enter a legal text below to get a detailed, simplified explanation.";

/// Placeholder shown in an empty input.
pub const INPUT_PLACEHOLDER: &str = "Ask anything or paste legal text...";

/// Central application state container.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppState {
    /// Current contents of the input box.
    pub input_text: String,

    /// Lifecycle of the current submission.
    pub session: SessionState,

    /// Expanded while composing, minimized while a result is shown.
    pub input: InputPresentation,
}

impl AppState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the submit trigger is enabled: not loading and non-blank input.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        !self.session.is_loading() && !self.input_text.trim().is_empty()
    }

    /// Computes a renderable view model from the current state.
    ///
    /// `notifications` is the full notification set; dismissed entries are
    /// skipped but keep their index so dismissal commands stay stable.
    #[must_use]
    pub fn compute_viewmodel(
        &self,
        availability: AvailabilityStatus,
        notifications: &[Notification],
    ) -> UIViewModel {
        let minimized = self.input == InputPresentation::Minimized;

        UIViewModel {
            header: HeaderInfo {
                title: APP_TITLE.to_string(),
                subtitle: (!minimized).then(|| APP_SUBTITLE.to_string()),
            },
            input_bar: InputBarInfo {
                placeholder: INPUT_PLACEHOLDER.to_string(),
                char_count: self.input_text.chars().count(),
                minimized,
                loading: self.session.is_loading(),
                submit_enabled: self.can_submit(),
                error: self.session.error().map(str::to_string),
            },
            result: self.session.result().map(ResultView::from),
            status: StatusInfo { availability },
            notices: notifications
                .iter()
                .enumerate()
                .filter(|(_, n)| !n.dismissed)
                .map(|(index, n)| NoticeView {
                    index,
                    message: n.message.clone(),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::AnalysisResult;

    #[test]
    fn submit_is_disabled_for_blank_input_or_while_loading() {
        let mut state = AppState::new();
        assert!(!state.can_submit());

        state.input_text = "   ".to_string();
        assert!(!state.can_submit());

        state.input_text = "Article 14".to_string();
        assert!(state.can_submit());

        state.session = SessionState::Loading;
        assert!(!state.can_submit());
    }

    #[test]
    fn minimized_input_hides_the_subtitle() {
        let mut state = AppState::new();
        let expanded = state.compute_viewmodel(AvailabilityStatus::Online, &[]);
        assert!(expanded.header.subtitle.is_some());

        state.input = InputPresentation::Minimized;
        state.session = SessionState::Result(AnalysisResult::default());
        let minimized = state.compute_viewmodel(AvailabilityStatus::Online, &[]);
        assert!(minimized.header.subtitle.is_none());
        assert!(minimized.input_bar.minimized);
        assert!(minimized.result.is_some());
    }

    #[test]
    fn dismissed_notifications_keep_their_index() {
        let notifications = vec![
            Notification::new("first", 1_000),
            Notification {
                dismissed: true,
                ..Notification::new("second", 1_000)
            },
            Notification::new("third", 1_000),
        ];

        let vm = AppState::new().compute_viewmodel(AvailabilityStatus::Checking, &notifications);

        let indices: Vec<usize> = vm.notices.iter().map(|n| n.index).collect();
        assert_eq!(indices, vec![0, 2]);
        assert_eq!(vm.notices[1].message, "third");
    }

    #[test]
    fn error_is_surfaced_on_the_input_bar() {
        let state = AppState {
            session: SessionState::Error("boom".to_string()),
            ..AppState::new()
        };

        let vm = state.compute_viewmodel(AvailabilityStatus::Offline, &[]);

        assert_eq!(vm.input_bar.error.as_deref(), Some("boom"));
        assert!(vm.result.is_none());
    }
}
