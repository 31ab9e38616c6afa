//! Service-level errors

use cohort_backend::BackendError;
use cohort_eval::AggregateError;
use thiserror::Error;

/// Errors surfaced by [`CohortService`](crate::CohortService).
#[derive(Debug, Error)]
pub enum CohortError {
    /// The serialized query did not parse
    #[error("invalid cohort query: {0}")]
    InvalidQuery(#[from] serde_json::Error),

    /// Aggregation aborted on a failed fetch
    #[error("aggregation failed: {0}")]
    Aggregate(#[from] AggregateError),

    /// A persistence call failed
    #[error("persistence failed: {0}")]
    Backend(#[from] BackendError),

    /// The data layer accepted the group but returned no id
    #[error("stored group resource carries no id")]
    MissingGroupId,
}
