//! User interface layer: view models and the plain-text renderer.
//!
//! # Architecture
//!
//! The UI layer follows a declarative rendering model:
//!
//! ```text
//! AppState + background status → compute_viewmodel → UIViewModel → render → text
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: View model types representing renderable UI state
//! - [`renderer`]: Plain-text rendering of a view model

pub mod renderer;
pub mod viewmodel;

pub use renderer::render;
pub use viewmodel::{HeaderInfo, InputBarInfo, NoticeView, ResultView, StatusInfo, UIViewModel};
