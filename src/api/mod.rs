//! Backend API layer: routing, transport and dispatch.
//!
//! ```text
//! input text → classifier → RequestDescriptor → dispatcher → transport → backend
//!                                                    ↓
//!                                 Result<AnalysisResult, DispatchError>
//! ```
//!
//! # Modules
//!
//! - [`classifier`]: pure mapping from input text to a request descriptor
//! - [`dispatcher`]: executes one request and normalizes the outcome
//! - [`transport`]: the network seam and its `reqwest` implementation

pub mod classifier;
pub mod dispatcher;
pub mod transport;

pub use classifier::{classify, route, Route};
pub use dispatcher::Dispatcher;
pub use transport::{HttpResponse, ReqwestTransport, Transport, TransportError};
