//! Domain layer for the Saral client.
//!
//! Core value types shared by every other layer, independent of the HTTP
//! client, the async runtime and the terminal front end.
//!
//! # Organization
//!
//! - [`analysis`]: the structured explanation returned by the backend
//! - [`error`]: error types and result aliases
//! - [`request`]: immutable HTTP call descriptors

pub mod analysis;
pub mod error;
pub mod request;

pub use analysis::AnalysisResult;
pub use error::{DispatchError, Result, SaralError};
pub use request::{HttpMethod, RequestDescriptor};
