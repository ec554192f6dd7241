//! Closed failure type shared between collaborators and the API layer.
//!
//! Every fallible collaborator call returns `Result<_, Failure>`, so the
//! API layer can classify failures by exhaustive matching instead of
//! probing an open error trait object at runtime.

use thiserror::Error;

/// A failure raised somewhere on the request path.
///
/// `Domain` is a deliberately raised, expected failure mode carrying a
/// machine-readable code and HTTP status. The other variants cover
/// unexpected faults of decreasing structure.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Failure {
    /// Expected failure mode with a machine-readable code and HTTP status.
    #[error("{message}")]
    Domain {
        message: String,
        code: String,
        status: u16,
    },

    /// Unexpected fault that still carries a human-readable message.
    #[error("{0}")]
    Runtime(String),

    /// A bare text value raised as a failure.
    #[error("{0}")]
    Text(String),

    /// A failure with no usable structure at all.
    #[error("unknown failure")]
    Opaque,
}

impl Failure {
    /// Builds a domain failure with an explicit status.
    pub fn domain(
        message: impl Into<String>,
        code: impl Into<String>,
        status: u16,
    ) -> Self {
        Failure::Domain {
            message: message.into(),
            code: code.into(),
            status,
        }
    }

    /// Builds a domain failure with the default 500 status.
    pub fn domain_unspecified(message: impl Into<String>, code: impl Into<String>) -> Self {
        Failure::domain(message, code, 500)
    }

    /// The conventional "weather backend is down" failure.
    pub fn weather_unavailable() -> Self {
        Failure::domain(
            "Weather service temporarily unavailable",
            "WEATHER_SERVICE_ERROR",
            503,
        )
    }
}

impl From<std::io::Error> for Failure {
    fn from(err: std::io::Error) -> Self {
        Failure::Runtime(err.to_string())
    }
}

impl From<tokio::task::JoinError> for Failure {
    fn from(err: tokio::task::JoinError) -> Self {
        Failure::Runtime(format!("background task failed: {err}"))
    }
}
