//! # parsum - sequential vs parallel integer reduction
//!
//! parsum generates a buffer of random `i32` samples, sums it once with a
//! single-threaded fold and once with a fixed-size set of workers, and checks
//! that both sums are identical while timing each independently.
//!
//! ## Quick Start
//!
//! ```bash
//! # 10,000,000 samples from [-100, 100] on 8 workers
//! parsum
//!
//! # Smaller run on a rayon pool, reproducible, as JSON
//! parsum -n 100000 --backend rayon --seed 42 --format json
//! ```
//!
//! ## Library Usage
//!
//! ```rust
//! use parsum::parallel::{ParallelReducer, SequentialReducer};
//! use parsum::sample::Sampler;
//!
//! let samples = Sampler::default().with_seed(Some(7)).generate(10_000);
//! let reducer = ParallelReducer::new(4)?;
//!
//! assert_eq!(reducer.sum(&samples)?, SequentialReducer::sum(&samples));
//! # Ok::<(), parsum::ReduceError>(())
//! ```

pub mod bench;
pub mod cli;
pub mod config;
pub mod error;
pub mod parallel;
pub mod sample;
pub mod timing;

pub use cli::{Cli, Output};
pub use config::ParsumConfig;
pub use error::ReduceError;

/// Result type alias for parsum operations
pub type Result<T> = anyhow::Result<T>;
