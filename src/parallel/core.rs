use crate::error::{ReduceError, Result};
use crate::parallel::partition::partition;
use crossbeam::channel::{Receiver, Sender, bounded};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Worker backend used for parallel reduction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Crossbeam scoped threads, one per contiguous slice
    #[default]
    Scoped,
    /// Dedicated rayon thread pool, built once and reused
    Rayon,
}

impl Backend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Backend::Scoped => "scoped",
            Backend::Rayon => "rayon",
        }
    }
}

/// Sum computed by one worker over its slice
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartialSum {
    pub worker_id: usize,
    pub range: Range<usize>,
    pub sum: i64,
}

/// Single-threaded left-to-right fold
pub struct SequentialReducer;

impl SequentialReducer {
    /// Sum with a 64-bit accumulator. Each element is widened before it is
    /// added, so the fold cannot overflow for any realistic input length.
    pub fn sum(items: &[i32]) -> i64 {
        items.iter().fold(0i64, |acc, &value| acc + i64::from(value))
    }
}

/// Context handed to each scoped worker
struct WorkerContext<'a> {
    worker_id: usize,
    range: Range<usize>,
    slice: &'a [i32],
    result_tx: Sender<PartialSum>,
}

/// Fixed-size set of scoped worker threads
///
/// Every call to [`ParallelReducer::sum`] partitions the input into at most
/// `workers` contiguous slices, spawns one crossbeam scoped thread per slice,
/// and merges the partial sums on the calling thread once every worker has
/// reported. The input is borrowed read-only by all workers.
#[derive(Debug, Clone)]
pub struct ParallelReducer {
    workers: usize,
}

impl ParallelReducer {
    pub fn new(workers: usize) -> Result<Self> {
        if workers == 0 {
            return Err(ReduceError::InvalidThreads);
        }
        Ok(Self { workers })
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    pub fn sum(&self, items: &[i32]) -> Result<i64> {
        let partials = self.partial_sums(items)?;
        Ok(Self::merge(&partials))
    }

    /// Run the workers and return their partial sums ordered by worker id
    pub fn partial_sums(&self, items: &[i32]) -> Result<Vec<PartialSum>> {
        let ranges = partition(items.len(), self.workers);
        if ranges.is_empty() {
            return Ok(Vec::new());
        }

        let expected = ranges.len();
        // One slot per worker, so no send ever blocks
        let (result_tx, result_rx): (Sender<PartialSum>, Receiver<PartialSum>) = bounded(expected);

        let mut partials = crossbeam::thread::scope(|s| {
            for (worker_id, range) in ranges.into_iter().enumerate() {
                let ctx = WorkerContext {
                    worker_id,
                    slice: &items[range.clone()],
                    range,
                    result_tx: result_tx.clone(),
                };
                s.spawn(move |_| Self::worker_thread(ctx));
            }

            // Drop the original sender so the collector stops once workers finish
            drop(result_tx);

            Self::collect_partials(result_rx, expected)
        })
        .map_err(|_| ReduceError::WorkerPanic)?;

        if partials.len() != expected {
            return Err(ReduceError::WorkerPanic);
        }

        partials.sort_by_key(|partial| partial.worker_id);
        for partial in &partials {
            tracing::debug!(
                worker = partial.worker_id,
                start = partial.range.start,
                end = partial.range.end,
                partial = partial.sum,
                "worker finished"
            );
        }

        Ok(partials)
    }

    /// Combine partial sums into the final result
    pub fn merge(partials: &[PartialSum]) -> i64 {
        partials.iter().map(|partial| partial.sum).sum()
    }

    fn worker_thread(ctx: WorkerContext<'_>) {
        let sum = SequentialReducer::sum(ctx.slice);
        let partial = PartialSum {
            worker_id: ctx.worker_id,
            range: ctx.range,
            sum,
        };
        if ctx.result_tx.send(partial).is_err() {
            tracing::warn!(worker = ctx.worker_id, "collector dropped before partial sum was sent");
        }
    }

    fn collect_partials(result_rx: Receiver<PartialSum>, expected: usize) -> Vec<PartialSum> {
        let mut partials = Vec::with_capacity(expected);

        while let Ok(partial) = result_rx.recv() {
            partials.push(partial);

            if partials.len() >= expected {
                break;
            }
        }

        partials
    }
}

/// Reduction on a dedicated rayon pool
///
/// The pool is sized once at construction and reused for every call.
pub struct RayonReducer {
    pool: rayon::ThreadPool,
    workers: usize,
}

impl RayonReducer {
    pub fn new(workers: usize) -> Result<Self> {
        if workers == 0 {
            return Err(ReduceError::InvalidThreads);
        }

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|index| format!("parsum-worker-{index}"))
            .build()
            .map_err(|e| ReduceError::Pool(e.to_string()))?;

        Ok(Self { pool, workers })
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    pub fn sum(&self, items: &[i32]) -> i64 {
        if items.is_empty() {
            return 0;
        }

        let chunk_size = items.len().div_ceil(self.workers);
        self.pool.install(|| {
            items
                .par_chunks(chunk_size)
                .map(SequentialReducer::sum)
                .sum()
        })
    }
}

impl std::fmt::Debug for RayonReducer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RayonReducer")
            .field("workers", &self.workers)
            .finish()
    }
}

/// Execution strategy for choosing how a buffer is reduced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionStrategy {
    Sequential,
    Parallel { workers: usize },
    Rayon { workers: usize },
}

impl ExecutionStrategy {
    /// Strategy for a backend at a fixed worker count
    pub fn for_backend(backend: Backend, workers: usize) -> Self {
        match backend {
            Backend::Scoped => ExecutionStrategy::Parallel { workers },
            Backend::Rayon => ExecutionStrategy::Rayon { workers },
        }
    }

    /// Threshold-based choice between sequential and parallel execution
    ///
    /// Below `min_items_for_parallel` elements the spawn overhead dominates,
    /// so the buffer is reduced on the calling thread.
    ///
    /// ```rust
    /// use parsum::parallel::{Backend, ExecutionStrategy};
    ///
    /// let strategy = ExecutionStrategy::auto(36, 50, 8, Backend::Scoped);
    /// assert!(matches!(strategy, ExecutionStrategy::Sequential));
    ///
    /// let strategy = ExecutionStrategy::auto(100, 50, 8, Backend::Scoped);
    /// assert!(matches!(strategy, ExecutionStrategy::Parallel { workers: 8 }));
    /// ```
    pub fn auto(
        work_items_count: usize,
        min_items_for_parallel: usize,
        optimal_workers: usize,
        backend: Backend,
    ) -> Self {
        if work_items_count >= min_items_for_parallel {
            Self::for_backend(backend, optimal_workers)
        } else {
            ExecutionStrategy::Sequential
        }
    }

    /// Calculate workers from available cores and a configured limit
    ///
    /// ```text
    /// 1. Detect available CPU cores: num_cpus::get()
    /// 2. Apply percentage: cores * thread_percentage / 100
    /// 3. Apply config limit: min(max_threads_config, percentage_result) if max_threads_config > 0
    /// 4. Ensure minimum: max(1, final_result)
    /// ```
    ///
    /// ```rust
    /// use parsum::parallel::ExecutionStrategy;
    ///
    /// let workers = ExecutionStrategy::calculate_optimal_workers(0, 100);
    /// assert!(workers >= 1);
    ///
    /// let workers = ExecutionStrategy::calculate_optimal_workers(2, 100);
    /// assert!(workers <= 2);
    /// ```
    pub fn calculate_optimal_workers(max_threads_config: usize, thread_percentage: u8) -> usize {
        let available_cores = num_cpus::get();

        let workers_by_percentage =
            std::cmp::max(1, (available_cores * thread_percentage as usize) / 100);

        if max_threads_config > 0 {
            std::cmp::min(max_threads_config, workers_by_percentage)
        } else {
            workers_by_percentage
        }
    }

    /// Worker count this strategy runs with
    pub fn workers(&self) -> usize {
        match self {
            ExecutionStrategy::Sequential => 1,
            ExecutionStrategy::Parallel { workers } | ExecutionStrategy::Rayon { workers } => {
                *workers
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ExecutionStrategy::Sequential => "sequential",
            ExecutionStrategy::Parallel { .. } => Backend::Scoped.as_str(),
            ExecutionStrategy::Rayon { .. } => Backend::Rayon.as_str(),
        }
    }

    /// Build the reducer once. Pools are sized here and never resized.
    pub fn build(&self) -> Result<Reducer> {
        match *self {
            ExecutionStrategy::Sequential => Ok(Reducer::Sequential),
            ExecutionStrategy::Parallel { workers } => {
                Ok(Reducer::Scoped(ParallelReducer::new(workers)?))
            }
            ExecutionStrategy::Rayon { workers } => Ok(Reducer::Rayon(RayonReducer::new(workers)?)),
        }
    }
}

/// A constructed reducer, ready to sum any number of buffers
#[derive(Debug)]
pub enum Reducer {
    Sequential,
    Scoped(ParallelReducer),
    Rayon(RayonReducer),
}

impl Reducer {
    pub fn sum(&self, items: &[i32]) -> Result<i64> {
        match self {
            Reducer::Sequential => Ok(SequentialReducer::sum(items)),
            Reducer::Scoped(reducer) => reducer.sum(items),
            Reducer::Rayon(reducer) => Ok(reducer.sum(items)),
        }
    }

    pub fn workers(&self) -> usize {
        match self {
            Reducer::Sequential => 1,
            Reducer::Scoped(reducer) => reducer.workers(),
            Reducer::Rayon(reducer) => reducer.workers(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Reducer::Sequential => "sequential",
            Reducer::Scoped(_) => Backend::Scoped.as_str(),
            Reducer::Rayon(_) => Backend::Rayon.as_str(),
        }
    }
}

/// Sequential sum of a buffer
pub fn sequential_sum(items: &[i32]) -> i64 {
    SequentialReducer::sum(items)
}

/// Parallel sum of a buffer on `workers` scoped threads
pub fn parallel_sum(items: &[i32], workers: usize) -> Result<i64> {
    ParallelReducer::new(workers)?.sum(items)
}
