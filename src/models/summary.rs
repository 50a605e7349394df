//! Run summary model

use serde::{Deserialize, Serialize};
use std::fmt;

/// Aggregate statistics for a full corpus run
///
/// Means are taken over passing cases only and are `None` when nothing passed.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub total_cases: usize,
    pub passed_cases: usize,
    pub mean_elapsed: Option<f64>,
    pub mean_operation_count: Option<f64>,
}

impl Summary {
    pub fn failed_cases(&self) -> usize {
        self.total_cases - self.passed_cases
    }

    /// Pass rate as a percentage (0.0 - 100.0)
    pub fn pass_rate(&self) -> f64 {
        if self.total_cases == 0 {
            0.0
        } else {
            (self.passed_cases as f64 / self.total_cases as f64) * 100.0
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "passed {}/{} ({:.1}%), {} failed",
            self.passed_cases,
            self.total_cases,
            self.pass_rate(),
            self.failed_cases()
        )
    }
}
