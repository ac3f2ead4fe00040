//! Sequential vs parallel benchmark run
//!
//! Generates one sample buffer, sums it with the sequential fold and with the
//! configured parallel reducer, times both independently, and checks that the
//! two sums agree. A disagreement is returned as [`ReduceError::Mismatch`].

use crate::error::{ReduceError, Result};
use crate::parallel::{Reducer, SequentialReducer};
use crate::sample::Sampler;
use crate::timing::{self, Timed};
use serde::Serialize;

/// One timed summation
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Measurement {
    pub sum: i64,
    pub seconds: f64,
}

impl From<Timed<i64>> for Measurement {
    fn from(timed: Timed<i64>) -> Self {
        Self {
            sum: timed.value,
            seconds: timed.secs(),
        }
    }
}

/// Outcome of a benchmark run
#[derive(Debug, Clone, Serialize)]
pub struct BenchmarkReport {
    pub count: usize,
    pub workers: usize,
    pub backend: &'static str,
    pub sequential: Measurement,
    pub parallel: Measurement,
    /// `sequential.seconds / parallel.seconds`, absent when the parallel run
    /// was too fast to measure
    pub speedup: Option<f64>,
}

impl BenchmarkReport {
    fn new(count: usize, reducer: &Reducer, sequential: Timed<i64>, parallel: Timed<i64>) -> Self {
        let speedup = if parallel.elapsed.is_zero() {
            None
        } else {
            Some(sequential.secs() / parallel.secs())
        };

        Self {
            count,
            workers: reducer.workers(),
            backend: reducer.name(),
            sequential: sequential.into(),
            parallel: parallel.into(),
            speedup,
        }
    }
}

pub struct Benchmark {
    sampler: Sampler,
    count: usize,
    reducer: Reducer,
}

impl Benchmark {
    pub fn new(sampler: Sampler, count: usize, reducer: Reducer) -> Self {
        Self {
            sampler,
            count,
            reducer,
        }
    }

    /// Generate a fresh buffer and benchmark it
    pub fn run(&self) -> Result<BenchmarkReport> {
        let samples = timing::measure(|| self.sampler.generate(self.count));
        tracing::info!(
            count = self.count,
            seconds = samples.secs(),
            "generated sample buffer"
        );

        self.run_on(&samples.value)
    }

    /// Benchmark an existing buffer
    pub fn run_on(&self, samples: &[i32]) -> Result<BenchmarkReport> {
        let sequential = timing::measure(|| SequentialReducer::sum(samples));
        tracing::info!(
            sum = sequential.value,
            seconds = sequential.secs(),
            "sequential reduction finished"
        );

        let parallel = timing::measure(|| self.reducer.sum(samples)).transpose()?;
        tracing::info!(
            sum = parallel.value,
            seconds = parallel.secs(),
            backend = self.reducer.name(),
            workers = self.reducer.workers(),
            "parallel reduction finished"
        );

        verify(sequential.value, parallel.value)?;

        Ok(BenchmarkReport::new(
            samples.len(),
            &self.reducer,
            sequential,
            parallel,
        ))
    }
}

/// Fail unless both strategies produced the same sum
pub fn verify(sequential: i64, parallel: i64) -> Result<()> {
    if sequential != parallel {
        tracing::error!(sequential, parallel, "sum mismatch");
        return Err(ReduceError::Mismatch {
            sequential,
            parallel,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parallel::ExecutionStrategy;

    fn benchmark(strategy: ExecutionStrategy, count: usize) -> Benchmark {
        Benchmark::new(
            Sampler::default().with_seed(Some(1)),
            count,
            strategy.build().unwrap(),
        )
    }

    #[test]
    fn test_scenario_buffer() {
        let bench = benchmark(ExecutionStrategy::Parallel { workers: 8 }, 0);
        let report = bench.run_on(&[3, -1, 4, 1, -5]).unwrap();

        assert_eq!(report.sequential.sum, 2);
        assert_eq!(report.parallel.sum, 2);
        assert_eq!(report.count, 5);
        assert_eq!(report.workers, 8);
        assert_eq!(report.backend, "scoped");
    }

    #[test]
    fn test_generated_buffer_sums_agree() {
        for strategy in [
            ExecutionStrategy::Parallel { workers: 4 },
            ExecutionStrategy::Rayon { workers: 4 },
        ] {
            let report = benchmark(strategy, 100_000).run().unwrap();
            assert_eq!(report.count, 100_000);
            assert_eq!(report.sequential.sum, report.parallel.sum);
            assert!(report.sequential.seconds >= 0.0);
            assert!(report.parallel.seconds >= 0.0);
        }
    }

    #[test]
    fn test_empty_buffer() {
        let report = benchmark(ExecutionStrategy::Rayon { workers: 2 }, 0)
            .run()
            .unwrap();
        assert_eq!(report.count, 0);
        assert_eq!(report.sequential.sum, 0);
        assert_eq!(report.parallel.sum, 0);
    }

    #[test]
    fn test_verify_detects_mismatch() {
        assert!(verify(2, 2).is_ok());

        let err = verify(2, 3).unwrap_err();
        assert!(matches!(
            err,
            ReduceError::Mismatch {
                sequential: 2,
                parallel: 3
            }
        ));
        assert_eq!(err.to_string(), "sum mismatch: sequential = 2, parallel = 3");
    }

    #[test]
    fn test_report_serializes() {
        let report = benchmark(ExecutionStrategy::Parallel { workers: 2 }, 0)
            .run_on(&[1, 2, 3])
            .unwrap();
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["count"], 3);
        assert_eq!(json["backend"], "scoped");
        assert_eq!(json["sequential"]["sum"], 6);
        assert_eq!(json["parallel"]["sum"], 6);
    }
}
