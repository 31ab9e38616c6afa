//! Aggregation errors

use cohort_search::SearchError;
use thiserror::Error;

/// Errors that abort an aggregation run.
///
/// Only I/O failures escalate: a failed fetch leaves a leaf's set unknown,
/// and guessing at it would change AND/OR semantics unpredictably. Unknown
/// criterion kinds and combinators degrade locally and never appear here.
#[derive(Debug, Clone, Error)]
pub enum AggregateError {
    /// A gateway fetch failed
    #[error("patient search failed: {0}")]
    Search(#[from] SearchError),
}
