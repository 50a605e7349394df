//! Result aggregation
//!
//! Folds the merged result stream into a [`Summary`]. Only counts and sums
//! are accumulated, so arrival order never changes the outcome.

use tokio::sync::mpsc;

use crate::models::{CaseResult, Summary};

/// Running totals over a stream of case results
#[derive(Clone, Debug, Default)]
pub struct Aggregator {
    total: usize,
    passed: usize,
    elapsed_sum: f64,
    operation_sum: f64,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one case result
    pub fn record(&mut self, result: &CaseResult) {
        self.total += 1;
        if result.passed {
            self.passed += 1;
            self.elapsed_sum += result.elapsed;
            self.operation_sum += result.operation_count;
        }
    }

    /// Compute the summary; means are `None` when nothing passed
    pub fn summary(&self) -> Summary {
        let mean = |sum: f64| (self.passed > 0).then(|| sum / self.passed as f64);

        Summary {
            total_cases: self.total,
            passed_cases: self.passed,
            mean_elapsed: mean(self.elapsed_sum),
            mean_operation_count: mean(self.operation_sum),
        }
    }

    /// Drain a result stream to exhaustion, notifying `on_result` per item
    pub async fn consume(
        mut results: mpsc::Receiver<CaseResult>,
        mut on_result: impl FnMut(&CaseResult),
    ) -> Summary {
        let mut aggregator = Self::new();
        while let Some(result) = results.recv().await {
            on_result(&result);
            aggregator.record(&result);
        }
        aggregator.summary()
    }
}

impl Extend<CaseResult> for Aggregator {
    fn extend<I: IntoIterator<Item = CaseResult>>(&mut self, iter: I) {
        for result in iter {
            self.record(&result);
        }
    }
}

impl FromIterator<CaseResult> for Aggregator {
    fn from_iter<I: IntoIterator<Item = CaseResult>>(iter: I) -> Self {
        let mut aggregator = Self::new();
        aggregator.extend(iter);
        aggregator
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::seq::SliceRandom;

    #[test]
    fn test_uniform_results() {
        let aggregator: Aggregator = std::iter::repeat(CaseResult::pass(4.0, 250.0))
            .take(7)
            .collect();
        let summary = aggregator.summary();

        assert_eq!(summary.total_cases, 7);
        assert_eq!(summary.passed_cases, 7);
        assert_eq!(summary.mean_elapsed, Some(4.0));
        assert_eq!(summary.mean_operation_count, Some(250.0));
    }

    #[test]
    fn test_failures_do_not_contribute() {
        let failed_with_noise = CaseResult {
            passed: false,
            elapsed: 1000.0,
            operation_count: 1000.0,
        };
        let aggregator: Aggregator = vec![
            CaseResult::pass(1.0, 10.0),
            failed_with_noise,
            CaseResult::pass(2.0, 20.0),
            CaseResult::failed(),
        ]
        .into_iter()
        .collect();
        let summary = aggregator.summary();

        assert_eq!(summary.total_cases, 4);
        assert_eq!(summary.passed_cases, 2);
        assert_eq!(summary.mean_elapsed, Some(1.5));
        assert_eq!(summary.mean_operation_count, Some(15.0));
    }

    #[test]
    fn test_zero_passes_has_no_means() {
        let aggregator: Aggregator = vec![CaseResult::failed(); 3].into_iter().collect();
        let summary = aggregator.summary();

        assert_eq!(summary.total_cases, 3);
        assert_eq!(summary.passed_cases, 0);
        assert!(summary.mean_elapsed.is_none());
        assert!(summary.mean_operation_count.is_none());

        let empty = Aggregator::new().summary();
        assert_eq!(empty.total_cases, 0);
        assert!(empty.mean_elapsed.is_none());
    }

    #[test]
    fn test_permutation_invariance() {
        // Dyadic values keep floating-point sums exact in any order.
        let mut results: Vec<CaseResult> = (0..64)
            .map(|i| match i % 3 {
                0 => CaseResult::failed(),
                1 => CaseResult::pass(0.5 * i as f64, 4.0 * i as f64),
                _ => CaseResult::pass(0.25, 1024.0),
            })
            .collect();
        let expected = results.iter().copied().collect::<Aggregator>().summary();

        let mut rng = rand::rng();
        for _ in 0..20 {
            results.shuffle(&mut rng);
            let summary = results.iter().copied().collect::<Aggregator>().summary();
            assert_eq!(summary, expected);
        }
    }

    #[tokio::test]
    async fn test_consume_drains_stream() {
        let (tx, rx) = mpsc::channel(4);
        tokio::spawn(async move {
            for result in [
                CaseResult::pass(3.0, 9.0),
                CaseResult::failed(),
                CaseResult::pass(5.0, 11.0),
            ] {
                tx.send(result).await.unwrap();
            }
        });

        let mut seen = 0;
        let summary = Aggregator::consume(rx, |_| seen += 1).await;

        assert_eq!(seen, 3);
        assert_eq!(summary.total_cases, 3);
        assert_eq!(summary.passed_cases, 2);
        assert_eq!(summary.mean_elapsed, Some(4.0));
        assert_eq!(summary.mean_operation_count, Some(10.0));
    }
}
