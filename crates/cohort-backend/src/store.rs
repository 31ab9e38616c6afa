//! FHIR data-layer group storage

use async_trait::async_trait;
use cohort_fhir::Group;
use tracing::debug;

use crate::error::BackendError;

/// Stores computed cohorts as Group resources.
#[async_trait]
pub trait CohortStore: Send + Sync {
    /// Persist `group`; the returned resource carries the server-assigned id.
    async fn create_group(&self, group: &Group) -> Result<Group, BackendError>;
}

/// `POST /Group` against the FHIR REST API.
pub struct HttpCohortStore {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl HttpCohortStore {
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
}

#[async_trait]
impl CohortStore for HttpCohortStore {
    async fn create_group(&self, group: &Group) -> Result<Group, BackendError> {
        let url = format!("{}/Group", self.base_url);
        debug!(quantity = group.quantity, "storing cohort group");

        let mut request = self.http.post(&url).json(group);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(BackendError::Status {
                endpoint: "/Group".to_string(),
                status: status.as_u16(),
            });
        }

        response.json().await.map_err(|e| BackendError::Malformed {
            endpoint: "/Group".to_string(),
            message: e.to_string(),
        })
    }
}
