//! Patient search gateway for cohort construction
//!
//! The aggregation engine sees patient search through one narrow boundary:
//! [`ResourceSearchGateway`] resolves a serialized search query to the ids
//! of matching patients. This crate provides the trait, the HTTP
//! implementation ([`FhirSearchClient`]) and the per-run memoization
//! wrapper ([`MemoizedSearch`]) that bounds an aggregation run's cost by
//! the number of *distinct* queries rather than the number of leaves.

mod client;
mod error;
mod gateway;
mod memo;

pub use client::FhirSearchClient;
pub use error::SearchError;
pub use gateway::{NoOpGateway, ResourceSearchGateway, SubjectId};
pub use memo::MemoizedSearch;
