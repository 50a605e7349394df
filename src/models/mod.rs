//! Data models for the harness
//!
//! Work items, per-case results and the run summary.

mod case;
mod summary;

pub use case::{CaseResult, WorkItem};
pub use summary::Summary;
