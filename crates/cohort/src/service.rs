//! Cohort counting and creation flows

use std::sync::Arc;

use chrono::Utc;
use cohort_backend::{
    CohortRecord, CohortRecordRequest, CohortStore, DatedMeasureRequest, ExplorationBackend,
    NewRequest, NewSnapshot, RequestRecord, Snapshot, SnapshotParent,
};
use cohort_eval::{Aggregator, patient_group};
use cohort_query::CohortQuery;
use cohort_search::ResourceSearchGateway;
use tracing::{error, info};

use crate::error::CohortError;

/// Timestamp format of the exploration service.
const MEASURE_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Orchestrates cohort counting and creation against the three backing
/// services: the search gateway, the FHIR data layer and the exploration
/// backend.
pub struct CohortService {
    aggregator: Aggregator,
    store: Arc<dyn CohortStore>,
    backend: Arc<dyn ExplorationBackend>,
}

/// Result of a count run: the population size and the recorded measure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CohortCount {
    pub count: u32,
    pub measure_uuid: String,
}

/// Metadata of a cohort to create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCohort {
    pub name: String,
    pub description: String,
    pub dated_measure_id: String,
    pub snapshot_id: String,
    pub request_id: String,
}

/// A created cohort: the stored metadata record plus the group id it links.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedCohort {
    pub record: CohortRecord,
    pub fhir_group_id: String,
}

impl CohortService {
    pub fn new(
        gateway: Arc<dyn ResourceSearchGateway>,
        store: Arc<dyn CohortStore>,
        backend: Arc<dyn ExplorationBackend>,
    ) -> Self {
        Self {
            aggregator: Aggregator::new(gateway),
            store,
            backend,
        }
    }

    /// Resolve the query and record its population size as a dated measure.
    pub async fn count_cohort(
        &self,
        serialized_query: &str,
        snapshot_id: &str,
        request_id: &str,
    ) -> Result<CohortCount, CohortError> {
        let query = CohortQuery::from_json(serialized_query)?;
        let population = self.aggregator.aggregate(&query).await?;
        let count = population.len() as u32;

        let measure = self
            .backend
            .create_dated_measure(&DatedMeasureRequest {
                request_query_snapshot_id: snapshot_id.to_owned(),
                request_id: request_id.to_owned(),
                fhir_datetime: Utc::now().format(MEASURE_DATETIME_FORMAT).to_string(),
                measure: count,
            })
            .await?;

        info!(count, measure_uuid = %measure.uuid, "recorded cohort count");
        Ok(CohortCount {
            count,
            measure_uuid: measure.uuid,
        })
    }

    /// Resolve the query, store its population as a Group resource and link
    /// it to a cohort record.
    ///
    /// Every step must succeed for the creation to be reported. The
    /// underlying stores have no multi-resource transaction: if the record
    /// step fails after the group was stored, the orphaned group id is
    /// logged before the error is surfaced, and the caller must not report
    /// success.
    pub async fn create_cohort(
        &self,
        serialized_query: &str,
        cohort: &NewCohort,
    ) -> Result<CreatedCohort, CohortError> {
        let query = CohortQuery::from_json(serialized_query)?;
        let population = self.aggregator.aggregate(&query).await?;

        let stored = self.store.create_group(&patient_group(&population)).await?;
        let fhir_group_id = stored.id.ok_or(CohortError::MissingGroupId)?;

        let record = self
            .backend
            .create_cohort_record(&CohortRecordRequest {
                dated_measure_id: cohort.dated_measure_id.clone(),
                request_query_snapshot_id: cohort.snapshot_id.clone(),
                request_id: cohort.request_id.clone(),
                fhir_group_id: fhir_group_id.clone(),
                name: cohort.name.clone(),
                description: cohort.description.clone(),
            })
            .await
            .map_err(|err| {
                error!(%fhir_group_id, "cohort record creation failed, group left orphaned");
                err
            })?;

        info!(
            cohort_uuid = %record.uuid,
            %fhir_group_id,
            quantity = population.len(),
            "created cohort"
        );
        Ok(CreatedCohort {
            record,
            fhir_group_id,
        })
    }

    /// Create a fresh exploration request with default metadata.
    pub async fn new_request(&self) -> Result<RequestRecord, CohortError> {
        Ok(self.backend.create_request(&NewRequest::default()).await?)
    }

    /// Snapshot a serialized query under its request (`first` = true) or
    /// chain it to the previous snapshot.
    pub async fn save_snapshot(
        &self,
        id: &str,
        serialized_query: &str,
        first: bool,
    ) -> Result<Snapshot, CohortError> {
        let parent = if first {
            SnapshotParent::Request(id.to_owned())
        } else {
            SnapshotParent::PreviousSnapshot(id.to_owned())
        };

        Ok(self
            .backend
            .create_snapshot(&NewSnapshot {
                parent,
                serialized_query: serialized_query.to_owned(),
            })
            .await?)
    }
}
