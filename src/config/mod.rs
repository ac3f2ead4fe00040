//! Configuration management for parsum
//!
//! Values are layered with figment: the embedded `default-config.toml`, then
//! `parsum.toml` in the working directory (or the file passed with
//! `--config`), then `PARSUM_*` environment variables, then command-line
//! flags. The merged result is extracted into [`ParsumConfig`].

pub mod core;
pub mod overrides;

pub use core::{ParsumConfig, ReduceConfig, SampleConfig};
pub use overrides::{ConfigOverrides, ReduceOverrides, SampleOverrides};
