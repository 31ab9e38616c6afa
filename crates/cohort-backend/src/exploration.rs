//! Exploration service records
//!
//! Dated measures, cohort metadata, requests and query snapshots. Payloads
//! mirror the service's snake_case JSON contract.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::BackendError;

/// A population count taken at a point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatedMeasureRequest {
    pub request_query_snapshot_id: String,
    pub request_id: String,
    /// `YYYY-MM-DDTHH:MM:SS`
    pub fhir_datetime: String,
    pub measure: u32,
}

/// Stored dated measure.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DatedMeasure {
    pub uuid: String,
}

/// Cohort metadata linking the stored group back to its originating query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CohortRecordRequest {
    pub dated_measure_id: String,
    pub request_query_snapshot_id: String,
    pub request_id: String,
    pub fhir_group_id: String,
    pub name: String,
    pub description: String,
}

/// Stored cohort record.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CohortRecord {
    pub uuid: String,
    #[serde(default)]
    pub fhir_group_id: Option<String>,
}

/// A new exploration request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewRequest {
    pub name: String,
    pub description: String,
    pub favorite: bool,
    pub data_type_of_query: String,
}

impl Default for NewRequest {
    fn default() -> Self {
        Self {
            name: "New request".to_string(),
            description: "Request created from the cohort builder".to_string(),
            favorite: false,
            data_type_of_query: "PATIENT".to_string(),
        }
    }
}

/// Stored exploration request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RequestRecord {
    pub uuid: String,
}

/// Parent of a query snapshot: the request itself for the first snapshot of
/// a request, the previous snapshot afterwards. Serializes as exactly one
/// of the two keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum SnapshotParent {
    #[serde(rename = "request_id")]
    Request(String),

    #[serde(rename = "previous_snapshot_id")]
    PreviousSnapshot(String),
}

/// A query snapshot to record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewSnapshot {
    #[serde(flatten)]
    pub parent: SnapshotParent,
    pub serialized_query: String,
}

/// Stored query snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Snapshot {
    pub uuid: String,
}

/// Exploration service boundary.
#[async_trait]
pub trait ExplorationBackend: Send + Sync {
    async fn create_dated_measure(
        &self,
        measure: &DatedMeasureRequest,
    ) -> Result<DatedMeasure, BackendError>;

    async fn create_cohort_record(
        &self,
        record: &CohortRecordRequest,
    ) -> Result<CohortRecord, BackendError>;

    async fn create_request(&self, request: &NewRequest) -> Result<RequestRecord, BackendError>;

    async fn create_snapshot(&self, snapshot: &NewSnapshot) -> Result<Snapshot, BackendError>;
}

/// HTTP implementation over the exploration REST API.
pub struct HttpExplorationBackend {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl HttpExplorationBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            token: None,
        }
    }

    /// Attach a bearer token to every request.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    async fn post<B, R>(&self, endpoint: &str, body: &B) -> Result<R, BackendError>
    where
        B: Serialize + Sync,
        R: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, endpoint);
        debug!(endpoint, "posting exploration record");

        let mut request = self.http.post(&url).json(body);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(BackendError::Status {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
            });
        }

        response.json().await.map_err(|e| BackendError::Malformed {
            endpoint: endpoint.to_string(),
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl ExplorationBackend for HttpExplorationBackend {
    async fn create_dated_measure(
        &self,
        measure: &DatedMeasureRequest,
    ) -> Result<DatedMeasure, BackendError> {
        self.post("/explorations/dated-measures/", measure).await
    }

    async fn create_cohort_record(
        &self,
        record: &CohortRecordRequest,
    ) -> Result<CohortRecord, BackendError> {
        self.post("/explorations/cohorts/", record).await
    }

    async fn create_request(&self, request: &NewRequest) -> Result<RequestRecord, BackendError> {
        self.post("/explorations/requests/", request).await
    }

    async fn create_snapshot(&self, snapshot: &NewSnapshot) -> Result<Snapshot, BackendError> {
        self.post("/explorations/request-query-snapshots/", snapshot)
            .await
    }
}
