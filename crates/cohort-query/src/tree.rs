//! Query tree nodes

use serde::{Deserialize, Serialize};

/// Root query submitted by the front end: a source-population scope plus one
/// criteria tree.
///
/// A query is parsed once per cohort-creation session, consumed by a single
/// aggregation run and discarded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CohortQuery {
    #[serde(rename = "sourcePopulation")]
    pub source_population: SourcePopulation,

    /// The first entry is the root group; further entries are ignored.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub request: Vec<CriteriaGroup>,
}

impl CohortQuery {
    /// Parse the serialized query produced by the query builder.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// The root criteria group, if the request carries one.
    pub fn root(&self) -> Option<&CriteriaGroup> {
        self.request.first()
    }
}

/// Organizational scope restricting the universe of eligible subjects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourcePopulation {
    /// Care-site cohort ids the subjects must have encounters at.
    #[serde(rename = "caresiteCohortList")]
    pub care_site_ids: Vec<String>,
}

/// Boolean combinator of a criteria group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Combinator {
    #[serde(rename = "andGroup")]
    And,

    #[serde(rename = "orGroup")]
    Or,

    /// Any unrecognized combinator; aggregation treats such a group as a
    /// no-op rather than an error.
    #[serde(other)]
    Unknown,
}

/// Clinical resource kind a criterion filters on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResourceType {
    /// Demographic filter, a direct query parameter.
    Patient,

    /// Diagnosis filter, joined back to patients via a reverse reference.
    Condition,

    /// Document full-text filter, joined like Condition.
    Composition,

    /// Any unrecognized kind; such criteria match nothing.
    #[serde(other)]
    Unknown,
}

/// A leaf filter against one resource kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Criterion {
    #[serde(rename = "resourceType")]
    pub resource_type: ResourceType,

    /// Serialized search predicate, e.g. `gender=female`.
    #[serde(rename = "filterSolr", default)]
    pub filter: String,

    /// `true` keeps matches, `false` subtracts them from the universe.
    #[serde(rename = "isInclusive", default = "default_inclusive")]
    pub inclusive: bool,
}

impl Criterion {
    pub fn new(resource_type: ResourceType, filter: impl Into<String>) -> Self {
        Self {
            resource_type,
            filter: filter.into(),
            inclusive: true,
        }
    }

    /// The same criterion, flipped to exclude its matches.
    pub fn exclusive(mut self) -> Self {
        self.inclusive = false;
        self
    }
}

/// A boolean combination of criteria and nested groups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriteriaGroup {
    #[serde(rename = "_type")]
    pub combinator: Combinator,

    #[serde(rename = "isInclusive", default = "default_inclusive")]
    pub inclusive: bool,

    /// Ordered children; declaration order is the tie-break within each
    /// inclusive/exclusive partition.
    #[serde(rename = "criteria", default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<QueryNode>,
}

impl CriteriaGroup {
    pub fn new(combinator: Combinator, children: Vec<QueryNode>) -> Self {
        Self {
            combinator,
            inclusive: true,
            children,
        }
    }

    pub fn and(children: Vec<QueryNode>) -> Self {
        Self::new(Combinator::And, children)
    }

    pub fn or(children: Vec<QueryNode>) -> Self {
        Self::new(Combinator::Or, children)
    }

    /// The same group, flipped to exclude its resolved set.
    pub fn exclusive(mut self) -> Self {
        self.inclusive = false;
        self
    }
}

/// One child of a group: a leaf criterion or a nested group, evaluated
/// through the same recursive path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QueryNode {
    Group(CriteriaGroup),
    Criterion(Criterion),
}

impl QueryNode {
    /// Include/exclude flag of either node kind.
    pub fn inclusive(&self) -> bool {
        match self {
            QueryNode::Group(group) => group.inclusive,
            QueryNode::Criterion(criterion) => criterion.inclusive,
        }
    }
}

impl From<Criterion> for QueryNode {
    fn from(criterion: Criterion) -> Self {
        Self::Criterion(criterion)
    }
}

impl From<CriteriaGroup> for QueryNode {
    fn from(group: CriteriaGroup) -> Self {
        Self::Group(group)
    }
}

fn default_inclusive() -> bool {
    true
}
