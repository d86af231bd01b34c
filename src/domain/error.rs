//! Error types for the Saral client.
//!
//! Two error families live here:
//!
//! - [`SaralError`]: crate-level failures (configuration, I/O, HTTP client
//!   construction) that abort start-up or a command.
//! - [`DispatchError`]: the outcome of a failed analysis request. Every variant
//!   resolves to a user-facing message and is never fatal; the session returns
//!   to an editable state so the user can retry immediately.

use thiserror::Error;

/// Message shown when the user submits blank input.
pub const EMPTY_INPUT_MESSAGE: &str = "Please enter some text to analyze.";

/// Message shown when no HTTP response could be obtained at all.
pub const NETWORK_FAILURE_MESSAGE: &str =
    "Failed to fetch analysis. Please check the backend server and console for details.";

/// Message shown when the server answered with a body that cannot be interpreted.
pub const INVALID_RESPONSE_MESSAGE: &str = "Server returned an invalid response";

/// Message shown when a non-success response carries no error text of its own.
pub const GENERIC_SERVER_MESSAGE: &str = "Network response was not ok";

/// The main error type for Saral operations outside of request dispatch.
///
/// # Examples
///
/// ```
/// use saral::SaralError;
///
/// fn validate() -> Result<(), SaralError> {
///     Err(SaralError::Config("base_url must not be empty".to_string()))
/// }
/// assert!(validate().is_err());
/// ```
#[derive(Debug, Error)]
pub enum SaralError {
    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Configuration file is not valid TOML or has unknown keys.
    #[error("Configuration file error: {0}")]
    ConfigFile(#[from] toml::de::Error),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The HTTP client could not be constructed.
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}

/// A failed analysis request.
///
/// The variant records where the failure happened; only the message reaches
/// the session state. See [`DispatchError::message`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    /// The input was blank. Raised locally, no request was made.
    #[error("{}", EMPTY_INPUT_MESSAGE)]
    Validation,

    /// No response was received (connection refused, DNS failure, timeout).
    #[error("{}", NETWORK_FAILURE_MESSAGE)]
    Transport {
        /// Low-level transport description, kept for logging.
        cause: String,
    },

    /// The server answered with a non-success status or an uninterpretable body.
    #[error("{message}")]
    Server {
        /// HTTP status code of the response.
        status: u16,
        /// Message extracted from the error payload, or a fallback.
        message: String,
    },

    /// The server answered successfully but the payload itself reports failure.
    #[error("{0}")]
    Logical(String),
}

impl DispatchError {
    /// Returns the message presented to the user for this failure.
    #[must_use]
    pub fn message(&self) -> String {
        self.to_string()
    }
}

/// A specialized `Result` type for Saral operations.
pub type Result<T> = std::result::Result<T, SaralError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_dispatch_error_has_a_non_empty_message() {
        let errors = [
            DispatchError::Validation,
            DispatchError::Transport {
                cause: "connection refused".to_string(),
            },
            DispatchError::Server {
                status: 500,
                message: INVALID_RESPONSE_MESSAGE.to_string(),
            },
            DispatchError::Logical("model overloaded".to_string()),
        ];

        for error in errors {
            assert!(!error.message().is_empty(), "{error:?}");
        }
    }

    #[test]
    fn transport_message_hides_the_low_level_cause() {
        let error = DispatchError::Transport {
            cause: "tcp connect error: Connection refused (os error 111)".to_string(),
        };
        assert_eq!(error.message(), NETWORK_FAILURE_MESSAGE);
    }
}
