//! Error types for the NFSN DNS tools
//!
//! Every fallible operation in the workspace returns [`Result`]. Errors are
//! surfaced to the immediate caller; nothing in the libraries retries.

use thiserror::Error;

/// Result type alias for NFSN operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for the NFSN DNS tools
#[derive(Error, Debug)]
pub enum Error {
    /// Credential file missing, unreadable or malformed
    #[error("Configuration error: {0}")]
    Config(String),

    /// Network-level failure reaching a remote service
    #[error("Transport error: {0}")]
    Transport(String),

    /// The API answered with a non-200 status
    #[error("API request failed: {status}: {body}")]
    Protocol {
        /// Status line, e.g. "403 Forbidden"
        status: String,
        /// Raw response body
        body: String,
    },

    /// Response body is not valid JSON or has the wrong shape
    #[error("Bad JSON response: {0}")]
    Decode(String),

    /// Public IP lookup failed
    #[error("IP source error: {0}")]
    IpSource(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a transport error
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Create a protocol error from a status line and response body
    pub fn protocol(status: impl Into<String>, body: impl Into<String>) -> Self {
        Self::Protocol {
            status: status.into(),
            body: body.into(),
        }
    }

    /// Create a decode error
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Create an IP source error
    pub fn ip_source(msg: impl Into<String>) -> Self {
        Self::IpSource(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

/// Helper for converting anyhow::Error to our Error type
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::Other(err.to_string())
    }
}
