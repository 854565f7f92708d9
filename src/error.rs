//! Error types for the gateway library.

use thiserror::Error;

/// Result type alias for gateway operations.
pub type Result<T> = std::result::Result<T, GatewayError>;

/// Errors that can occur during gateway operations.
///
/// Only input-validation failures are surfaced through this type. Per-engine
/// runtime failures (timeouts, connection errors, unparseable HTML) are
/// absorbed into [`crate::FetchOutcome`] so that callers always receive a
/// structurally complete response for the engines they validly requested.
#[derive(Error, Debug)]
pub enum GatewayError {
    /// One or more requested engine shortcuts are not in the registry.
    #[error("Unknown engines: {}", .0.join(", "))]
    UnknownEngines(Vec<String>),

    /// Requested category is not in the registry.
    #[error("Unknown category '{requested}'. Available: {}", .valid.join(", "))]
    UnknownCategory {
        /// The category name that was requested.
        requested: String,
        /// All valid category names, in registry order.
        valid: Vec<String>,
    },

    /// Invalid query.
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// Failed to construct the HTTP client.
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}

impl GatewayError {
    /// Builds an `UnknownEngines` error from a single key.
    pub fn unknown_engine(key: impl Into<String>) -> Self {
        Self::UnknownEngines(vec![key.into()])
    }
}
