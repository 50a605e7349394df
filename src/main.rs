//! DAF Harness - parallel conformance and performance tester
//!
//! Feeds paired (query, DAG) test cases to the DAF subgraph-matching
//! evaluator, runs them on a fixed pool of workers, and reports how many
//! passed along with the mean search time and recursive call count.
//!
//! ## Usage
//!
//! ```bash
//! # Run a corpus with the evaluator in the current directory
//! daf-harness data/yeast.igraph query/yeast_q.igraph dag/yeast_dag.txt
//!
//! # Use a different evaluator and eight workers
//! daf-harness -e build/daf -w 8 data.igraph queries.igraph dags.txt
//!
//! # Machine-readable summary
//! daf-harness --format json --no-progress data.igraph queries.igraph dags.txt
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use tracing::{debug, info};

mod cli;
mod config;
mod corpus;
mod executor;
mod models;
mod output;
mod results;
mod utils;

use cli::Args;
use config::{EnvConfig, HarnessConfig};
use executor::{CaseRunner, ParallelExecutor};
use output::{OutputFormat, ResultFormatter};
use results::RunReport;
use utils::logger::{init_logger, LogLevel};
use utils::timer::Timer;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let env = EnvConfig::load();

    init_logger(LogLevel::from_verbose(args.verbose), env.log.as_deref());
    if env.has_any() {
        debug!("Environment overrides: {:?}", env);
    }

    let config = resolve_config(&args, &env)?;
    run(&args, &config).await
}

/// Layer defaults, config file, environment and CLI flags
fn resolve_config(args: &Args, env: &EnvConfig) -> Result<HarnessConfig> {
    let config_path = args
        .config
        .clone()
        .or_else(|| env.config_file.as_ref().map(Into::into));

    let mut config = HarnessConfig::discover(config_path.as_deref())?;
    config.merge_env(env);

    if let Some(ref evaluator) = args.evaluator {
        config.evaluator = evaluator.clone();
    }
    if let Some(workers) = args.workers {
        config.workers = Some(workers);
    }
    if let Some(timeout) = args.timeout {
        config.timeout_secs = timeout;
    }
    if let Some(ref dir) = args.scratch_dir {
        config.scratch_dir = Some(dir.clone());
    }
    if let Some(ref format) = args.format {
        config.format = format.clone();
    }
    if args.no_progress {
        config.progress = false;
    }

    config.validate().context("Invalid configuration")?;
    Ok(config)
}

async fn run(args: &Args, config: &HarnessConfig) -> Result<()> {
    let cases = corpus::load_cases(&args.queries, &args.dags)
        .context("Failed to load test corpus")?;

    let workers = config.worker_count();
    info!(
        "Evaluating {} cases with {} ({} workers, {}s timeout)",
        cases.len(),
        config.evaluator.display(),
        workers,
        config.timeout_secs
    );

    let runner = Arc::new(CaseRunner::from_config(config, &args.database));
    let executor = ParallelExecutor::new(workers).with_progress(config.progress);

    let timer = Timer::start("harness");
    let summary = executor.run(cases, runner).await?;
    if config.progress {
        output::finish_progress();
    }

    let report = RunReport::new(summary, &config.evaluator, &args.database)
        .with_workers(workers)
        .with_timeout(config.timeout())
        .with_wall_time(timer.stop());

    let format = OutputFormat::from_str(&config.format).unwrap_or(OutputFormat::Text);
    println!("{}", ResultFormatter::new(format).format_report(&report));

    Ok(())
}
