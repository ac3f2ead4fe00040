//! Sequential and parallel reduction
//!
//! This module owns every way `parsum` sums a buffer of `i32` samples into an
//! `i64`. The sequential fold is the reference; every parallel backend must
//! return a bit-identical result for the same input.
//!
//! # Architecture Responsibilities
//!
//! ## What This Module Does:
//! - **Partitioning**: Splits the buffer into contiguous, balanced slices (one per worker)
//! - **Execution Strategy**: Sequential vs scoped-thread vs rayon-pool reduction
//! - **Resource Calculation**: Derives a worker count from `num_cpus::get()` when none is configured
//! - **Combining**: Merges partial sums on a single thread so none is lost or counted twice
//!
//! ## What This Module Does NOT Do:
//! - **Sample Generation**: Buffers are produced by [`crate::sample`]
//! - **Timing**: Wall-clock measurement lives in [`crate::timing`]
//! - **Consistency Checks**: Comparing the two sums is the job of [`crate::bench`]
//!
//! ```text
//! ┌──────────────┐    ┌───────────────────────┐    ┌──────────────┐
//! │  &[i32]      │    │  worker 0..k          │    │  merge       │
//! │  (read-only) │───▶│  partial = Σ slice_i  │───▶│  Σ partials  │
//! │              │    │  (contiguous slices)  │    │  (1 thread)  │
//! └──────────────┘    └───────────────────────┘    └──────────────┘
//! ```
//!
//! # Example Usage
//!
//! ```rust
//! use parsum::parallel::{Backend, ExecutionStrategy, SequentialReducer};
//!
//! let items = [3, -1, 4, 1, -5];
//!
//! let reducer = ExecutionStrategy::for_backend(Backend::Scoped, 8).build()?;
//! assert_eq!(reducer.sum(&items)?, SequentialReducer::sum(&items));
//! # Ok::<(), parsum::ReduceError>(())
//! ```

pub mod core;
pub mod partition;

pub use core::{
    Backend, ExecutionStrategy, ParallelReducer, PartialSum, RayonReducer, Reducer,
    SequentialReducer, parallel_sum, sequential_sum,
};
pub use partition::partition;
