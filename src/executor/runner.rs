//! Single-case evaluator runner
//!
//! Writes a case to temporary files, runs the evaluator on them under a
//! deadline, and turns the outcome into a [`CaseResult`].

use std::future::Future;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::{Duration, Instant};
use tempfile::NamedTempFile;
use thiserror::Error;
use tokio::process::Command;
use tracing::{debug, warn};

use super::stats::{parse_stats, StatsError};
use crate::config::HarnessConfig;
use crate::models::{CaseResult, WorkItem};

/// Evaluator repeat count; each case is measured exactly once
const REPEAT_COUNT: &str = "1";

/// Anything that turns a work item into a result
///
/// Implementations must never fail outright: every error becomes a failed
/// [`CaseResult`].
pub trait CaseExecutor: Send + Sync + 'static {
    fn execute(&self, item: WorkItem) -> impl Future<Output = CaseResult> + Send;
}

/// Reasons a case did not pass
#[derive(Debug, Error)]
pub enum CaseError {
    #[error("failed to prepare {what} file: {source}")]
    Scratch {
        what: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to launch evaluator: {0}")]
    Launch(#[source] std::io::Error),

    #[error("evaluator exited with {status}: {stderr}")]
    Exit { status: String, stderr: String },

    #[error("evaluator timed out after {0:?}")]
    Timeout(Duration),

    #[error("malformed evaluator output: {0}")]
    Protocol(#[from] StatsError),
}

/// Runs the evaluator for one case at a time
#[derive(Clone, Debug)]
pub struct CaseRunner {
    evaluator: PathBuf,
    database: PathBuf,
    timeout: Duration,
    scratch_dir: Option<PathBuf>,
}

impl CaseRunner {
    pub fn new(evaluator: impl Into<PathBuf>, database: impl Into<PathBuf>) -> Self {
        let defaults = HarnessConfig::default();
        Self {
            evaluator: evaluator.into(),
            database: database.into(),
            timeout: defaults.timeout(),
            scratch_dir: None,
        }
    }

    /// Build a runner from harness configuration
    pub fn from_config(config: &HarnessConfig, database: impl Into<PathBuf>) -> Self {
        Self::new(&config.evaluator, database)
            .with_timeout(config.timeout())
            .with_scratch_dir(config.scratch_dir.clone())
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_scratch_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.scratch_dir = dir;
        self
    }

    /// Run one case and collapse any error into a failed result
    pub async fn run(&self, item: &WorkItem) -> CaseResult {
        let start = Instant::now();

        match self.try_run(item).await {
            Ok(result) => {
                debug!(
                    "{} passed in {}ms: {}",
                    item.label(),
                    start.elapsed().as_millis(),
                    result
                );
                result
            }
            Err(e @ CaseError::Scratch { .. }) => {
                warn!("{}: {}", item.label(), e);
                CaseResult::failed()
            }
            Err(e) => {
                debug!("{} failed: {}", item.label(), e);
                CaseResult::failed()
            }
        }
    }

    async fn try_run(&self, item: &WorkItem) -> Result<CaseResult, CaseError> {
        // Both files are removed when these guards drop, on every path.
        let query_file = self.materialize("daf-test-q-", "query", &item.query)?;
        let dag_file = self.materialize("daf-test-dag-", "DAG", &item.graph)?;

        let stdout = self.invoke(query_file.path(), dag_file.path()).await?;
        let stats = parse_stats(&stdout)?;

        Ok(CaseResult::pass(stats.elapsed, stats.calls))
    }

    fn materialize(
        &self,
        prefix: &str,
        what: &'static str,
        contents: &str,
    ) -> Result<NamedTempFile, CaseError> {
        let scratch = |source| CaseError::Scratch { what, source };

        let mut builder = tempfile::Builder::new();
        builder.prefix(prefix);
        let mut file = match self.scratch_dir {
            Some(ref dir) => builder.tempfile_in(dir),
            None => builder.tempfile(),
        }
        .map_err(scratch)?;

        file.write_all(contents.as_bytes()).map_err(scratch)?;
        file.flush().map_err(scratch)?;
        Ok(file)
    }

    async fn invoke(&self, query: &Path, dag: &Path) -> Result<String, CaseError> {
        let output = Command::new(&self.evaluator)
            .arg("-d")
            .arg(&self.database)
            .arg("-q")
            .arg(query)
            .arg("-a")
            .arg(dag)
            .arg("-n")
            .arg(REPEAT_COUNT)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output();

        // Dropping the pending output future kills the child.
        let output = tokio::time::timeout(self.timeout, output)
            .await
            .map_err(|_| CaseError::Timeout(self.timeout))?
            .map_err(CaseError::Launch)?;

        if !output.status.success() {
            return Err(CaseError::Exit {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl CaseExecutor for CaseRunner {
    async fn execute(&self, item: WorkItem) -> CaseResult {
        self.run(&item).await
    }
}
