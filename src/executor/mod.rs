//! Case execution engine
//!
//! Runs the evaluator once per case across a fixed worker pool.

mod parallel;
mod runner;
mod stats;

pub use parallel::ParallelExecutor;
pub use runner::CaseRunner;
