//! Gateway trait for patient search

use crate::error::SearchError;
use async_trait::async_trait;

/// Identifier of an eligible subject (a Patient resource id).
pub type SubjectId = String;

/// Read-only patient search capability.
///
/// Implementations resolve a serialized search query to the ids of matching
/// patients. A matched resource without an id yields a `None` entry; callers
/// filter those out before set operations. Timeouts, retries and backoff are
/// the implementation's concern, not the caller's.
#[async_trait]
pub trait ResourceSearchGateway: Send + Sync {
    /// Resolve `query` to the ids of matching patients.
    async fn patient_ids(&self, query: &str) -> Result<Vec<Option<SubjectId>>, SearchError>;
}

/// NoOp gateway for testing
pub struct NoOpGateway;

#[async_trait]
impl ResourceSearchGateway for NoOpGateway {
    async fn patient_ids(&self, _query: &str) -> Result<Vec<Option<SubjectId>>, SearchError> {
        Ok(vec![])
    }
}

impl NoOpGateway {
    pub fn new() -> Self {
        Self
    }
}

impl Default for NoOpGateway {
    fn default() -> Self {
        Self::new()
    }
}
