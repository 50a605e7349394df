//! Result aggregation and reporting
//!
//! Folds per-case results into a summary and packages it for output.

mod aggregate;
mod report;

pub use aggregate::Aggregator;
pub use report::RunReport;
