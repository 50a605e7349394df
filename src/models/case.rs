//! Case models for evaluator runs
//!
//! Defines the unit of work handed to workers and the result each produces.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One test case: a query paired with the DAG it is evaluated against
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorkItem {
    pub query: String,
    pub graph: String,
}

impl WorkItem {
    pub fn new(query: impl Into<String>, graph: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            graph: graph.into(),
        }
    }

    /// First line of the query, used to identify the case in logs
    pub fn label(&self) -> &str {
        self.query.lines().next().unwrap_or("").trim()
    }
}

/// Outcome of evaluating a single case
///
/// `elapsed` and `operation_count` only carry meaning when `passed` is set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CaseResult {
    pub passed: bool,
    pub elapsed: f64,
    pub operation_count: f64,
}

impl CaseResult {
    pub fn pass(elapsed: f64, operation_count: f64) -> Self {
        Self {
            passed: true,
            elapsed,
            operation_count,
        }
    }

    pub fn failed() -> Self {
        Self::default()
    }

    /// Progress marker printed for this result
    pub fn symbol(&self) -> char {
        if self.passed {
            '.'
        } else {
            '!'
        }
    }
}

impl fmt::Display for CaseResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.passed {
            write!(
                f,
                "PASS elapsed={} calls={}",
                self.elapsed, self.operation_count
            )
        } else {
            write!(f, "FAIL")
        }
    }
}
