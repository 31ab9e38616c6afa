//! Bottom-up criteria-tree aggregation

use std::sync::Arc;

use cohort_fhir::{Group, Reference};
use cohort_query::{CohortQuery, Combinator, CriteriaGroup, Criterion, QueryNode};
use cohort_search::{MemoizedSearch, ResourceSearchGateway};
use futures::FutureExt;
use futures::future::{BoxFuture, try_join_all};
use tracing::debug;

use crate::criteria::{population_filter, query_for_criterion, universe_query};
use crate::error::AggregateError;
use crate::subject_set::SubjectSet;

/// Resolves cohort queries to patient populations.
///
/// Each [`aggregate`](Aggregator::aggregate) call is one run: it owns a
/// fresh memoization cache, prefetches every leaf query concurrently and
/// folds the tree bottom-up. Nothing is shared between runs.
pub struct Aggregator {
    gateway: Arc<dyn ResourceSearchGateway>,
}

impl Aggregator {
    pub fn new(gateway: Arc<dyn ResourceSearchGateway>) -> Self {
        Self { gateway }
    }

    /// Resolve `query` to its final patient population.
    ///
    /// An absent or childless root yields the empty set, not the universe.
    pub async fn aggregate(&self, query: &CohortQuery) -> Result<SubjectSet, AggregateError> {
        let Some(root) = query.root() else {
            return Ok(SubjectSet::new());
        };

        let run = AggregationRun {
            search: MemoizedSearch::from_arc(Arc::clone(&self.gateway)),
            population_filter: population_filter(&query.source_population),
        };
        run.prefetch(root).await?;
        run.resolve_group(root).await
    }
}

/// State of a single run: the per-run cache plus the population filter
/// every query is scoped by.
struct AggregationRun {
    search: MemoizedSearch<dyn ResourceSearchGateway>,
    population_filter: String,
}

impl AggregationRun {
    /// Issue every leaf query up front. The fetches run as concurrent
    /// outstanding requests and land in the per-run cache; the ordered fold
    /// below is then served from memory.
    async fn prefetch(&self, root: &CriteriaGroup) -> Result<(), AggregateError> {
        let mut queries = Vec::new();
        collect_leaf_queries(root, &self.population_filter, &mut queries);
        debug!(leaves = queries.len(), "prefetching criterion queries");

        try_join_all(queries.iter().map(|query| self.search.patient_ids(query))).await?;
        Ok(())
    }

    /// Fold a group's children into one set.
    ///
    /// Inclusive children are processed before exclusive ones: exclusion
    /// subtracts from what has been included so far, or from the universe
    /// when nothing has been, so an exclusive child seen first against an
    /// empty accumulator would subtract from nothing. The sort is stable;
    /// multiple exclusive children subtract sequentially in their original
    /// relative order.
    fn resolve_group<'a>(
        &'a self,
        group: &'a CriteriaGroup,
    ) -> BoxFuture<'a, Result<SubjectSet, AggregateError>> {
        async move {
            let mut children: Vec<&QueryNode> = group.children.iter().collect();
            children.sort_by_key(|child| !child.inclusive());

            let mut cohort = SubjectSet::new();
            for child in children {
                let resolved = match child {
                    QueryNode::Criterion(criterion) => self.resolve_criterion(criterion).await?,
                    QueryNode::Group(nested) => self.resolve_group(nested).await?,
                };
                cohort = self
                    .combine(group.combinator, child.inclusive(), cohort, resolved)
                    .await?;
            }
            Ok(cohort)
        }
        .boxed()
    }

    async fn resolve_criterion(&self, criterion: &Criterion) -> Result<SubjectSet, AggregateError> {
        let query = query_for_criterion(criterion, &self.population_filter);
        let ids = self.search.patient_ids(&query).await?;
        Ok(SubjectSet::from_resolved(ids))
    }

    /// One step of the fold, keyed on the group's combinator and the
    /// child's include/exclude flag. An empty accumulator re-seeds from the
    /// next inclusive child; an unrecognized combinator passes the
    /// accumulator through unchanged.
    async fn combine(
        &self,
        combinator: Combinator,
        inclusive: bool,
        cohort: SubjectSet,
        resolved: SubjectSet,
    ) -> Result<SubjectSet, AggregateError> {
        let combined = match (combinator, inclusive) {
            (Combinator::And, true) => {
                if cohort.is_empty() {
                    resolved
                } else {
                    cohort.intersect(&resolved)
                }
            }
            (Combinator::And, false) => {
                if cohort.is_empty() {
                    self.universe().await?.difference(&resolved)
                } else {
                    cohort.difference(&resolved)
                }
            }
            (Combinator::Or, true) => cohort.union(&resolved),
            (Combinator::Or, false) => {
                cohort.union(&self.universe().await?.difference(&resolved))
            }
            (Combinator::Unknown, _) => cohort,
        };
        Ok(combined)
    }

    /// The full eligible universe: the population filter alone. Fetched
    /// lazily on the first exclusive combination; the per-run cache makes
    /// later lookups free.
    async fn universe(&self) -> Result<SubjectSet, AggregateError> {
        let ids = self
            .search
            .patient_ids(&universe_query(&self.population_filter))
            .await?;
        Ok(SubjectSet::from_resolved(ids))
    }
}

fn collect_leaf_queries(group: &CriteriaGroup, population_filter: &str, queries: &mut Vec<String>) {
    for child in &group.children {
        match child {
            QueryNode::Criterion(criterion) => {
                queries.push(query_for_criterion(criterion, population_filter));
            }
            QueryNode::Group(nested) => collect_leaf_queries(nested, population_filter, queries),
        }
    }
}

/// Wrap an aggregated population as an actual `person` Group resource, one
/// member reference per subject.
pub fn patient_group(subjects: &SubjectSet) -> Group {
    Group::person(
        subjects
            .iter()
            .map(|id| Reference::patient(id).into())
            .collect(),
    )
}
