//! HTTP implementation of the search gateway

use async_trait::async_trait;
use cohort_fhir::Bundle;
use tracing::debug;

use crate::error::SearchError;
use crate::gateway::{ResourceSearchGateway, SubjectId};

/// Patient search over the FHIR REST API.
///
/// Issues `GET {base_url}{query}` with optional bearer authentication and
/// maps the returned search bundle to patient ids.
pub struct FhirSearchClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl FhirSearchClient {
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
impl ResourceSearchGateway for FhirSearchClient {
    async fn patient_ids(&self, query: &str) -> Result<Vec<Option<SubjectId>>, SearchError> {
        let url = format!("{}{}", self.base_url, query);
        debug!(%url, "fetching patient ids");

        let mut request = self.http.get(&url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| SearchError::network(query, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::Status {
                query: query.to_owned(),
                status: status.as_u16(),
            });
        }

        let bundle: Bundle = response
            .json()
            .await
            .map_err(|e| SearchError::malformed(query, e.to_string()))?;

        Ok(bundle.resource_ids())
    }
}
