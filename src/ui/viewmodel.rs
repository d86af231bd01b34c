//! View model types representing renderable UI state.
//!
//! View models are created via `AppState::compute_viewmodel()` and consumed by
//! the renderer. They contain no business logic, only display-ready data.
//!
//! # Example
//!
//! ```rust
//! use saral::ui::viewmodel::{HeaderInfo, InputBarInfo, StatusInfo, UIViewModel};
//! use saral::background::AvailabilityStatus;
//!
//! let vm = UIViewModel {
//!     header: HeaderInfo { title: "Samvidhaan Saral".to_string(), subtitle: None },
//!     input_bar: InputBarInfo {
//!         placeholder: String::new(),
//!         char_count: 0,
//!         minimized: false,
//!         loading: false,
//!         submit_enabled: false,
//!         error: None,
//!     },
//!     result: None,
//!     status: StatusInfo { availability: AvailabilityStatus::Online },
//!     notices: vec![],
//! };
//! assert!(vm.result.is_none());
//! ```

use crate::background::AvailabilityStatus;
use crate::domain::AnalysisResult;

/// Complete UI view model for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UIViewModel {
    pub header: HeaderInfo,
    pub input_bar: InputBarInfo,

    /// Present only while a result is shown.
    pub result: Option<ResultView>,

    pub status: StatusInfo,

    /// Visible notifications, in creation order.
    pub notices: Vec<NoticeView>,
}

/// Header display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    pub title: String,

    /// Introductory line, hidden once the input is minimized.
    pub subtitle: Option<String>,
}

/// Input bar display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputBarInfo {
    pub placeholder: String,

    /// Number of characters currently typed.
    pub char_count: usize,

    pub minimized: bool,

    /// A submission is in flight; the input is disabled and a spinner shown.
    pub loading: bool,

    /// Whether the submit trigger is enabled.
    pub submit_enabled: bool,

    /// Message of the last failed submission.
    pub error: Option<String>,
}

/// Display-ready analysis sections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultView {
    pub simplified_text: String,
    pub key_points: Vec<String>,
    pub legal_references: Vec<String>,

    /// `(term, definition)` pairs sorted by term.
    pub defined_terms: Vec<(String, String)>,

    pub contextual_focus: Option<String>,
}

impl From<&AnalysisResult> for ResultView {
    fn from(result: &AnalysisResult) -> Self {
        Self {
            simplified_text: result.simplified_text.clone(),
            key_points: result.key_points.clone(),
            legal_references: result.legal_references.clone(),
            defined_terms: result
                .defined_terms
                .iter()
                .map(|(term, definition)| (term.clone(), definition.clone()))
                .collect(),
            contextual_focus: result.contextual_focus.clone(),
        }
    }
}

/// Backend availability badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusInfo {
    pub availability: AvailabilityStatus,
}

/// A visible notification and its position in the full notification set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoticeView {
    pub index: usize,
    pub message: String,
}
