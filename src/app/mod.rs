//! Application layer: the session state machine.
//!
//! # Architecture
//!
//! The application layer follows a unidirectional data flow pattern:
//!
//! ```text
//! User Input → Events → Event Handler → State Mutations → Actions → Dispatcher
//!                           ↑                                           ↓
//!                           └───────────── DispatchSettled ─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`handler`]: Event processing logic and state transitions
//! - [`modes`]: `SessionState` and input presentation types
//! - [`runtime`]: Async driver executing actions and publishing snapshots
//! - [`state`]: Central application state container and view model computation

pub mod actions;
pub mod handler;
pub mod modes;
pub mod runtime;
pub mod state;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use modes::{InputPresentation, SessionState};
pub use runtime::Session;
pub use state::AppState;
