//! Per-run memoization of gateway fetches

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use parking_lot::Mutex;
use tracing::debug;

use crate::error::SearchError;
use crate::gateway::{ResourceSearchGateway, SubjectId};

type SharedFetch = Shared<BoxFuture<'static, Result<Vec<Option<SubjectId>>, SearchError>>>;

/// Memoizes gateway fetches by exact query string.
///
/// Intended to live for exactly one aggregation run: sibling criteria that
/// resolve to the same query share a single round-trip, and a key requested
/// again while its first fetch is still in flight awaits that fetch instead
/// of issuing a second one. Dropping the wrapper drops the cache; nothing
/// carries over into the next run.
///
/// The empty query resolves locally to the empty id list, without touching
/// the underlying gateway.
pub struct MemoizedSearch<G: ?Sized> {
    inner: Arc<G>,
    cache: Mutex<HashMap<String, SharedFetch>>,
}

impl<G: ResourceSearchGateway + 'static> MemoizedSearch<G> {
    pub fn new(inner: G) -> Self {
        Self::from_arc(Arc::new(inner))
    }
}

impl<G: ResourceSearchGateway + ?Sized + 'static> MemoizedSearch<G> {
    /// Wrap an already shared gateway.
    pub fn from_arc(inner: Arc<G>) -> Self {
        Self {
            inner,
            cache: Mutex::new(HashMap::new()),
        }
    }

    fn fetch_for(&self, query: &str) -> SharedFetch {
        let mut cache = self.cache.lock();
        if let Some(fetch) = cache.get(query) {
            return fetch.clone();
        }

        debug!(query, "scheduling patient search");
        let inner = Arc::clone(&self.inner);
        let owned = query.to_owned();
        let fetch = async move { inner.patient_ids(&owned).await }.boxed().shared();
        cache.insert(query.to_owned(), fetch.clone());
        fetch
    }
}

#[async_trait]
impl<G: ResourceSearchGateway + ?Sized + 'static> ResourceSearchGateway for MemoizedSearch<G> {
    async fn patient_ids(&self, query: &str) -> Result<Vec<Option<SubjectId>>, SearchError> {
        if query.is_empty() {
            return Ok(Vec::new());
        }
        self.fetch_for(query).await
    }
}
