//! Run report
//!
//! Wraps a summary with metadata about how the run was executed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::models::Summary;

/// Summary plus run metadata, serialised for machine-readable output
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RunReport {
    pub evaluator: PathBuf,
    pub database: PathBuf,
    pub workers: usize,
    pub timeout_secs: u64,
    pub wall_time_ms: u64,
    pub finished_at: DateTime<Utc>,
    #[serde(flatten)]
    pub summary: Summary,
}

impl RunReport {
    pub fn new(summary: Summary, evaluator: impl Into<PathBuf>, database: impl Into<PathBuf>) -> Self {
        Self {
            evaluator: evaluator.into(),
            database: database.into(),
            workers: 0,
            timeout_secs: 0,
            wall_time_ms: 0,
            finished_at: Utc::now(),
            summary,
        }
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_secs = timeout.as_secs();
        self
    }

    pub fn with_wall_time(mut self, wall_time: Duration) -> Self {
        self.wall_time_ms = wall_time.as_millis() as u64;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_serializes_flat_summary() {
        let summary = Summary {
            total_cases: 2,
            passed_cases: 0,
            mean_elapsed: None,
            mean_operation_count: None,
        };
        let report = RunReport::new(summary, "./daf", "db.igraph")
            .with_workers(4)
            .with_timeout(Duration::from_secs(115))
            .with_wall_time(Duration::from_millis(1500));

        let json: serde_json::Value = serde_json::to_value(&report).unwrap();
        assert_eq!(json["total_cases"], 2);
        assert_eq!(json["passed_cases"], 0);
        assert!(json["mean_elapsed"].is_null());
        assert_eq!(json["workers"], 4);
        assert_eq!(json["timeout_secs"], 115);
        assert_eq!(json["wall_time_ms"], 1500);
        assert!(json["finished_at"].is_string());
    }
}
