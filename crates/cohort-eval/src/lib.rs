//! Cohort aggregation engine
//!
//! Resolves a criteria tree to its final patient population:
//!
//! - `criteria`: translates each leaf criterion into a gateway search query
//! - `subject_set`: deduplicated id sets with the boolean set algebra
//! - `aggregate`: bottom-up tree evaluation combining child sets per group
//!
//! Fetches go through [`cohort_search::MemoizedSearch`], so a run issues at
//! most one round-trip per distinct query string. Sibling leaves are
//! prefetched as concurrent outstanding requests; the fold itself stays
//! strictly ordered, inclusive children before exclusive ones.
//!
//! Unknown criterion kinds resolve to the empty set and unknown combinators
//! pass the accumulator through unchanged; only gateway failures abort a
//! run.

mod aggregate;
mod criteria;
mod error;
mod subject_set;

pub use aggregate::{Aggregator, patient_group};
pub use criteria::{PATIENT_MAX_COUNT, population_filter, query_for_criterion, universe_query};
pub use error::AggregateError;
pub use subject_set::SubjectSet;
