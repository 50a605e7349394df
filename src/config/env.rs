//! Environment variable configuration
//!
//! Provides environment variable overrides for configuration.

use std::env;

/// Environment variable prefix
const ENV_PREFIX: &str = "DAF_HARNESS";

/// Overrides read from DAF_HARNESS_* variables
#[derive(Clone, Debug, Default)]
pub struct EnvConfig {
    /// Evaluator path from DAF_HARNESS_EVALUATOR
    pub evaluator: Option<String>,
    /// Worker count from DAF_HARNESS_WORKERS
    pub workers: Option<usize>,
    /// Timeout from DAF_HARNESS_TIMEOUT
    pub timeout: Option<u64>,
    /// Scratch directory from DAF_HARNESS_SCRATCH_DIR
    pub scratch_dir: Option<String>,
    /// Report format from DAF_HARNESS_FORMAT
    pub format: Option<String>,
    /// Config file from DAF_HARNESS_CONFIG
    pub config_file: Option<String>,
    /// Log filter from DAF_HARNESS_LOG
    pub log: Option<String>,
}

impl EnvConfig {
    /// Load configuration from environment variables
    pub fn load() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load using a custom variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |name: &str| lookup(&format!("{ENV_PREFIX}_{name}"));

        Self {
            evaluator: get("EVALUATOR"),
            workers: get("WORKERS").and_then(|v| v.parse().ok()),
            timeout: get("TIMEOUT").and_then(|v| v.parse().ok()),
            scratch_dir: get("SCRATCH_DIR"),
            format: get("FORMAT"),
            config_file: get("CONFIG"),
            log: get("LOG"),
        }
    }

    /// Check if any environment variables are set
    pub fn has_any(&self) -> bool {
        self.evaluator.is_some()
            || self.workers.is_some()
            || self.timeout.is_some()
            || self.scratch_dir.is_some()
            || self.format.is_some()
            || self.config_file.is_some()
            || self.log.is_some()
    }
}

/// Environment variable help shown after the CLI usage
pub const ENV_HELP: &str = "\
Environment Variables:
  DAF_HARNESS_EVALUATOR    Path to the evaluator executable
  DAF_HARNESS_WORKERS      Number of parallel workers
  DAF_HARNESS_TIMEOUT      Per-case timeout in seconds
  DAF_HARNESS_SCRATCH_DIR  Directory for temporary case files
  DAF_HARNESS_FORMAT       Report format (text, json, json-pretty)
  DAF_HARNESS_CONFIG       Path to configuration file
  DAF_HARNESS_LOG          Log filter (e.g. debug, daf_harness=trace)";

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_env_help_lists_every_variable() {
        for name in ["EVALUATOR", "WORKERS", "TIMEOUT", "SCRATCH_DIR", "FORMAT", "CONFIG", "LOG"] {
            assert!(ENV_HELP.contains(&format!("{ENV_PREFIX}_{name}")), "{name}");
        }
    }

    #[test]
    fn test_env_config_default() {
        let config = EnvConfig::default();
        assert!(config.evaluator.is_none());
        assert!(!config.has_any());
    }

    #[test]
    fn test_from_lookup() {
        let config = EnvConfig::from_lookup(lookup(&[
            ("DAF_HARNESS_EVALUATOR", "/bin/daf"),
            ("DAF_HARNESS_WORKERS", "6"),
            ("DAF_HARNESS_TIMEOUT", "90"),
            ("UNRELATED", "x"),
        ]));

        assert_eq!(config.evaluator.as_deref(), Some("/bin/daf"));
        assert_eq!(config.workers, Some(6));
        assert_eq!(config.timeout, Some(90));
        assert!(config.format.is_none());
        assert!(config.has_any());
    }

    #[test]
    fn test_unparseable_numbers_are_ignored() {
        let config = EnvConfig::from_lookup(lookup(&[
            ("DAF_HARNESS_WORKERS", "many"),
            ("DAF_HARNESS_TIMEOUT", "-1"),
        ]));
        assert!(config.workers.is_none());
        assert!(config.timeout.is_none());
    }
}
