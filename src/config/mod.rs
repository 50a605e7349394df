//! Configuration module
//!
//! Handles loading, layering and validating harness configuration.

mod env;
mod file;

pub use env::{EnvConfig, ENV_HELP};
pub use file::find_config;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Outer deadline imposed on each evaluator run by the grading environment
pub const EXTERNAL_CEILING_SECS: u64 = 120;

/// Headroom left below the outer deadline
pub const SAFETY_MARGIN_SECS: u64 = 5;

/// Harness configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HarnessConfig {
    /// Path to the evaluator executable
    pub evaluator: PathBuf,

    /// Number of workers; derived from available parallelism when unset
    pub workers: Option<usize>,

    /// Per-case wall-clock timeout in seconds
    pub timeout_secs: u64,

    /// Directory for per-case temporary files; system temp dir when unset
    pub scratch_dir: Option<PathBuf>,

    /// Report format (text, json, json-pretty)
    pub format: String,

    /// Print one progress marker per completed case
    pub progress: bool,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            evaluator: PathBuf::from("./daf"),
            workers: None,
            timeout_secs: EXTERNAL_CEILING_SECS - SAFETY_MARGIN_SECS,
            scratch_dir: None,
            format: "text".to_string(),
            progress: true,
        }
    }
}

impl HarnessConfig {
    /// Load configuration from file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = if file::is_yaml_file(path) {
            serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse YAML config: {}", path.display()))?
        } else {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))?
        };

        config.validate()?;
        Ok(config)
    }

    /// Load from an explicit path, or the first standard location found, or defaults
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        match explicit.map(Path::to_path_buf).or_else(find_config) {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Apply environment overrides
    pub fn merge_env(&mut self, env: &EnvConfig) {
        if let Some(ref evaluator) = env.evaluator {
            self.evaluator = PathBuf::from(evaluator);
        }
        if let Some(workers) = env.workers {
            self.workers = Some(workers);
        }
        if let Some(timeout) = env.timeout {
            self.timeout_secs = timeout;
        }
        if let Some(ref dir) = env.scratch_dir {
            self.scratch_dir = Some(PathBuf::from(dir));
        }
        if let Some(ref format) = env.format {
            self.format = format.clone();
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.timeout_secs == 0 {
            anyhow::bail!("Timeout must be at least 1 second");
        }
        if self.timeout_secs >= EXTERNAL_CEILING_SECS {
            anyhow::bail!(
                "Timeout of {}s must stay below the {}s external ceiling",
                self.timeout_secs,
                EXTERNAL_CEILING_SECS
            );
        }
        if self.workers == Some(0) {
            anyhow::bail!("Worker count must be at least 1");
        }
        if !["text", "json", "json-pretty"].contains(&self.format.as_str()) {
            anyhow::bail!("Unsupported report format: {}", self.format);
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Resolved worker count
    pub fn worker_count(&self) -> usize {
        self.workers.unwrap_or_else(default_workers).max(1)
    }
}

/// Half the logical processors, at least one
pub fn default_workers() -> usize {
    let cpus = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    (cpus / 2).max(1)
}
