//! Criteria-tree data model for cohort construction
//!
//! The query builder UI serializes a cohort definition as JSON: a source
//! population scoping the universe of eligible subjects, plus a nested
//! boolean tree of inclusion/exclusion criteria. This crate is that tree's
//! Rust shape.
//!
//! Groups and leaf criteria are unified behind one recursive [`QueryNode`]
//! variant, so evaluation needs a single path for both. Unrecognized
//! combinators and resource kinds deserialize to explicit `Unknown`
//! variants; downstream code degrades them permissively instead of failing
//! the whole query.
//!
//! # Example
//!
//! ```
//! use cohort_query::{CohortQuery, Combinator};
//!
//! let query = CohortQuery::from_json(r#"{
//!     "sourcePopulation": { "caresiteCohortList": ["8312002244"] },
//!     "request": [{
//!         "_type": "andGroup",
//!         "isInclusive": true,
//!         "criteria": [
//!             { "resourceType": "Patient", "filterSolr": "gender=female", "isInclusive": true }
//!         ]
//!     }]
//! }"#).unwrap();
//!
//! assert_eq!(query.root().unwrap().combinator, Combinator::And);
//! ```

mod tree;

pub use tree::{
    CohortQuery, Combinator, CriteriaGroup, Criterion, QueryNode, ResourceType, SourcePopulation,
};
