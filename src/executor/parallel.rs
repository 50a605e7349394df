//! Parallel case execution
//!
//! One dispatcher hands cases to a fixed pool of workers over a rendezvous
//! channel. Each worker reports on its own result stream and the streams are
//! merged into one before aggregation.

use anyhow::Result;
use futures::future::join_all;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::runner::CaseExecutor;
use crate::models::{CaseResult, Summary, WorkItem};
use crate::results::Aggregator;
use crate::utils::timer::Timer;

/// Capacity of each worker's private result stream
const RESULT_BUFFER: usize = 1;

/// Publish cases in corpus order, one hand-off per ready worker
///
/// The sender is dropped after the last case so workers see end-of-stream.
pub fn dispatch(items: Vec<WorkItem>) -> (flume::Receiver<WorkItem>, JoinHandle<usize>) {
    let (tx, rx) = flume::bounded(0);

    let handle = tokio::spawn(async move {
        let mut sent = 0;
        for item in items {
            if tx.send_async(item).await.is_err() {
                warn!("All workers exited before dispatch finished");
                break;
            }
            sent += 1;
        }
        debug!("Dispatched {} cases", sent);
        sent
    });

    (rx, handle)
}

/// Start one worker pulling from the shared channel
pub fn spawn_worker<E: CaseExecutor>(
    id: usize,
    work: flume::Receiver<WorkItem>,
    executor: Arc<E>,
) -> mpsc::Receiver<CaseResult> {
    let (tx, rx) = mpsc::channel(RESULT_BUFFER);

    tokio::spawn(async move {
        let mut handled = 0;
        while let Ok(item) = work.recv_async().await {
            let result = run_isolated(id, item, executor.clone()).await;
            handled += 1;
            if tx.send(result).await.is_err() {
                break;
            }
        }
        debug!("Worker {} finished after {} cases", id, handled);
    });

    rx
}

/// Run one case in its own task so a panic still yields a result
async fn run_isolated<E: CaseExecutor>(id: usize, item: WorkItem, executor: Arc<E>) -> CaseResult {
    let label = item.label().to_string();
    match tokio::spawn(async move { executor.execute(item).await }).await {
        Ok(result) => result,
        Err(e) => {
            warn!("Worker {} lost case {}: {}", id, label, e);
            CaseResult::failed()
        }
    }
}

/// Fan many result streams into one
///
/// The combined stream closes only after every input stream has closed.
pub fn merge(streams: Vec<mpsc::Receiver<CaseResult>>) -> mpsc::Receiver<CaseResult> {
    let (out, merged) = mpsc::channel(streams.len().max(1));

    let forwarders: Vec<_> = streams
        .into_iter()
        .map(|mut stream| {
            let out = out.clone();
            tokio::spawn(async move {
                while let Some(result) = stream.recv().await {
                    if out.send(result).await.is_err() {
                        break;
                    }
                }
            })
        })
        .collect();

    tokio::spawn(async move {
        join_all(forwarders).await;
        drop(out);
    });

    merged
}

/// Parallel corpus executor
pub struct ParallelExecutor {
    workers: usize,
    progress: bool,
}

impl ParallelExecutor {
    pub fn new(workers: usize) -> Self {
        Self {
            workers: workers.max(1),
            progress: false,
        }
    }

    /// Print a progress marker per completed case
    pub fn with_progress(mut self, progress: bool) -> Self {
        self.progress = progress;
        self
    }

    /// Run every case and aggregate the results
    pub async fn run<E: CaseExecutor>(
        &self,
        items: Vec<WorkItem>,
        executor: Arc<E>,
    ) -> Result<Summary> {
        let progress = self.progress;
        self.run_with(items, executor, |result| {
            if progress {
                crate::output::print_progress(result);
            }
        })
        .await
    }

    /// Run every case, calling `on_result` as each result arrives
    pub async fn run_with<E, F>(
        &self,
        items: Vec<WorkItem>,
        executor: Arc<E>,
        on_result: F,
    ) -> Result<Summary>
    where
        E: CaseExecutor,
        F: FnMut(&CaseResult),
    {
        let expected = items.len();
        info!("Running {} cases on {} workers", expected, self.workers);
        let timer = Timer::start("corpus run");

        let (work, dispatcher) = dispatch(items);
        let streams = (0..self.workers)
            .map(|id| spawn_worker(id, work.clone(), executor.clone()))
            .collect();
        drop(work);

        let summary = Aggregator::consume(merge(streams), on_result).await;
        let dispatched = dispatcher.await?;

        if summary.total_cases != expected || dispatched != expected {
            anyhow::bail!(
                "Lost cases: {} loaded, {} dispatched, {} results",
                expected,
                dispatched,
                summary.total_cases
            );
        }

        info!("Run completed in {}ms - {}", timer.stop().as_millis(), summary);
        Ok(summary)
    }
}

impl Default for ParallelExecutor {
    fn default() -> Self {
        Self::new(crate::config::default_workers())
    }
}
