//! Backend errors

use thiserror::Error;

/// Errors from the persistence services.
#[derive(Debug, Error)]
pub enum BackendError {
    /// Transport-level failure
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Non-success HTTP status
    #[error("{endpoint} returned status {status}")]
    Status { endpoint: String, status: u16 },

    /// Response body did not match the service contract
    #[error("malformed response from {endpoint}: {message}")]
    Malformed { endpoint: String, message: String },
}
