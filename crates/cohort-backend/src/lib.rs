//! Persistence boundary for cohort creation
//!
//! Two backing services sit behind this crate:
//!
//! - the FHIR data layer, which stores the computed [`cohort_fhir::Group`]
//!   resource ([`CohortStore`])
//! - the exploration service, which records dated count measures, cohort
//!   metadata, requests and query snapshots ([`ExplorationBackend`])
//!
//! Both are async traits with HTTP implementations; payload types mirror
//! the services' JSON contracts. Failures always escalate — the caller
//! decides what a partially persisted cohort means.

mod error;
mod exploration;
mod store;

pub use error::BackendError;
pub use exploration::{
    CohortRecord, CohortRecordRequest, DatedMeasure, DatedMeasureRequest, ExplorationBackend,
    HttpExplorationBackend, NewRequest, NewSnapshot, RequestRecord, Snapshot, SnapshotParent,
};
pub use store::{CohortStore, HttpCohortStore};
