//! CLI argument parsing
//!
//! Defines command-line interface using clap.

use clap::Parser;
use std::path::PathBuf;

use crate::config::ENV_HELP;

/// Parallel conformance and performance harness for the DAF evaluator
#[derive(Parser, Debug)]
#[command(name = "daf-harness")]
#[command(author = "hephaex@gmail.com")]
#[command(version = "0.1.4")]
#[command(about = "Run paired query/DAG cases through the DAF evaluator in parallel")]
#[command(long_about = None)]
#[command(after_help = ENV_HELP)]
pub struct Args {
    /// Data graph passed through to the evaluator (-d)
    pub database: PathBuf,

    /// Query corpus; each query starts with a `t` header line
    pub queries: PathBuf,

    /// DAG corpus; one DAG per line
    pub dags: PathBuf,

    /// Path to the evaluator executable
    #[arg(short, long)]
    pub evaluator: Option<PathBuf>,

    /// Number of parallel workers (default: half the logical CPUs)
    #[arg(short, long)]
    pub workers: Option<usize>,

    /// Per-case timeout in seconds (must stay below 120)
    #[arg(short, long)]
    pub timeout: Option<u64>,

    /// Directory for temporary case files
    #[arg(long)]
    pub scratch_dir: Option<PathBuf>,

    /// Report format (text, json, json-pretty)
    #[arg(short, long)]
    pub format: Option<String>,

    /// Configuration file (YAML or JSON)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Suppress the per-case progress markers
    #[arg(long)]
    pub no_progress: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}
