use thiserror::Error;

/// Errors raised by the reduction library
#[derive(Debug, Error)]
pub enum ReduceError {
    /// Sequential and parallel sums disagree. This is a reduction bug, never
    /// a recoverable condition.
    #[error("sum mismatch: sequential = {sequential}, parallel = {parallel}")]
    Mismatch { sequential: i64, parallel: i64 },

    #[error("a worker thread panicked during parallel reduction")]
    WorkerPanic,

    #[error("failed to build worker pool: {0}")]
    Pool(String),

    #[error("invalid sample range: min ({min}) is greater than max ({max})")]
    InvalidRange { min: i32, max: i32 },

    #[error("worker count must be at least 1")]
    InvalidThreads,
}

pub type Result<T> = std::result::Result<T, ReduceError>;
