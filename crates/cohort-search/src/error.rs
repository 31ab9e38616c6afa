//! Search gateway errors

use thiserror::Error;

/// Errors surfaced by a [`ResourceSearchGateway`](crate::ResourceSearchGateway).
///
/// The enum is `Clone`: a memoized in-flight fetch hands the same result to
/// every waiter, failures included.
#[derive(Debug, Clone, Error)]
pub enum SearchError {
    /// Transport-level failure
    #[error("network error for {query}: {message}")]
    Network { query: String, message: String },

    /// Non-success HTTP status
    #[error("search for {query} returned status {status}")]
    Status { query: String, status: u16 },

    /// Response body did not decode as a search bundle
    #[error("malformed response for {query}: {message}")]
    Malformed { query: String, message: String },
}

impl SearchError {
    /// Create a network error
    pub fn network(query: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Network {
            query: query.into(),
            message: message.into(),
        }
    }

    /// Create a malformed-response error
    pub fn malformed(query: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Malformed {
            query: query.into(),
            message: message.into(),
        }
    }
}
