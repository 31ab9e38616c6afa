//! Clinical cohort construction engine
//!
//! Builds ad-hoc patient cohorts from inclusion/exclusion criteria trees:
//! leaf criteria resolve to patient-id sets through a FHIR search gateway,
//! groups combine those sets with boolean set algebra against a
//! source-population universe, and the resulting population is persisted as
//! a Group resource together with a dated count measure and a cohort
//! metadata record.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use cohort::CohortService;
//! use cohort::backend::{HttpCohortStore, HttpExplorationBackend};
//! use cohort::search::FhirSearchClient;
//!
//! let service = CohortService::new(
//!     Arc::new(FhirSearchClient::new("https://fhir.example.org")),
//!     Arc::new(HttpCohortStore::new("https://fhir.example.org")),
//!     Arc::new(HttpExplorationBackend::new("https://backend.example.org")),
//! );
//!
//! let count = service
//!     .count_cohort(&serialized_query, "snapshot-id", "request-id")
//!     .await?;
//! ```

// Re-export all public APIs from internal crates
pub use cohort_backend as backend;
pub use cohort_eval as eval;
pub use cohort_fhir as fhir;
pub use cohort_query as query;
pub use cohort_search as search;

// Convenience re-exports
pub use cohort_eval::{Aggregator, SubjectSet, patient_group};
pub use cohort_query::CohortQuery;
pub use cohort_search::ResourceSearchGateway;

mod error;
mod service;

pub use error::CohortError;
pub use service::{CohortCount, CohortService, CreatedCohort, NewCohort};
