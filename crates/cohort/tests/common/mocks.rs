//! Mock implementations for testing
//!
//! Configurable mocks of the search gateway and both persistence services,
//! recording every call so tests can assert transaction semantics.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use cohort::backend::{
    BackendError, CohortRecord, CohortRecordRequest, CohortStore, DatedMeasure,
    DatedMeasureRequest, ExplorationBackend, NewRequest, NewSnapshot, RequestRecord, Snapshot,
};
use cohort::fhir::Group;
use cohort::search::{ResourceSearchGateway, SearchError, SubjectId};
use parking_lot::RwLock;

/// Gateway with scripted query -> ids responses and a call log.
pub struct MockGateway {
    responses: RwLock<HashMap<String, Vec<Option<SubjectId>>>>,
    calls: RwLock<Vec<String>>,
}

impl MockGateway {
    pub fn new() -> Self {
        Self {
            responses: RwLock::new(HashMap::new()),
            calls: RwLock::new(Vec::new()),
        }
    }

    /// Script a response for a query
    pub fn respond(&self, query: impl Into<String>, ids: &[&str]) {
        self.responses
            .write()
            .insert(query.into(), ids.iter().map(|id| Some((*id).to_string())).collect());
    }

    pub fn call_count(&self, query: &str) -> usize {
        self.calls
            .read()
            .iter()
            .filter(|q| q.as_str() == query)
            .count()
    }
}

impl Default for MockGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ResourceSearchGateway for MockGateway {
    async fn patient_ids(&self, query: &str) -> Result<Vec<Option<SubjectId>>, SearchError> {
        self.calls.write().push(query.to_owned());
        Ok(self.responses.read().get(query).cloned().unwrap_or_default())
    }
}

/// Store assigning sequential group ids, optionally failing.
pub struct MockCohortStore {
    pub stored: RwLock<Vec<Group>>,
    next_id: AtomicUsize,
    failing: AtomicBool,
}

impl MockCohortStore {
    pub fn new() -> Self {
        Self {
            stored: RwLock::new(Vec::new()),
            next_id: AtomicUsize::new(0),
            failing: AtomicBool::new(false),
        }
    }

    /// Make every subsequent `create_group` fail
    pub fn fail(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }
}

impl Default for MockCohortStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CohortStore for MockCohortStore {
    async fn create_group(&self, group: &Group) -> Result<Group, BackendError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(BackendError::Status {
                endpoint: "/Group".to_string(),
                status: 500,
            });
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let mut stored = group.clone();
        stored.id = Some(format!("group-{}", id));
        self.stored.write().push(stored.clone());
        Ok(stored)
    }
}

/// Exploration backend recording every payload it receives.
pub struct MockBackend {
    pub measures: RwLock<Vec<DatedMeasureRequest>>,
    pub cohort_records: RwLock<Vec<CohortRecordRequest>>,
    pub requests: RwLock<Vec<NewRequest>>,
    pub snapshots: RwLock<Vec<NewSnapshot>>,
    failing_cohort_records: AtomicBool,
}

impl MockBackend {
    pub fn new() -> Self {
        Self {
            measures: RwLock::new(Vec::new()),
            cohort_records: RwLock::new(Vec::new()),
            requests: RwLock::new(Vec::new()),
            snapshots: RwLock::new(Vec::new()),
            failing_cohort_records: AtomicBool::new(false),
        }
    }

    /// Make every subsequent `create_cohort_record` fail
    pub fn fail_cohort_records(&self) {
        self.failing_cohort_records.store(true, Ordering::SeqCst);
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ExplorationBackend for MockBackend {
    async fn create_dated_measure(
        &self,
        measure: &DatedMeasureRequest,
    ) -> Result<DatedMeasure, BackendError> {
        self.measures.write().push(measure.clone());
        Ok(DatedMeasure {
            uuid: format!("measure-{}", self.measures.read().len()),
        })
    }

    async fn create_cohort_record(
        &self,
        record: &CohortRecordRequest,
    ) -> Result<CohortRecord, BackendError> {
        if self.failing_cohort_records.load(Ordering::SeqCst) {
            return Err(BackendError::Status {
                endpoint: "/explorations/cohorts/".to_string(),
                status: 500,
            });
        }

        self.cohort_records.write().push(record.clone());
        Ok(CohortRecord {
            uuid: format!("cohort-{}", self.cohort_records.read().len()),
            fhir_group_id: Some(record.fhir_group_id.clone()),
        })
    }

    async fn create_request(&self, request: &NewRequest) -> Result<RequestRecord, BackendError> {
        self.requests.write().push(request.clone());
        Ok(RequestRecord {
            uuid: format!("request-{}", self.requests.read().len()),
        })
    }

    async fn create_snapshot(&self, snapshot: &NewSnapshot) -> Result<Snapshot, BackendError> {
        self.snapshots.write().push(snapshot.clone());
        Ok(Snapshot {
            uuid: format!("snapshot-{}", self.snapshots.read().len()),
        })
    }
}
