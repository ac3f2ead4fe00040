use super::overrides::ConfigOverrides;
use crate::error::ReduceError;
use crate::parallel::{Backend, ExecutionStrategy};
use crate::sample::Sampler;
use anyhow::{Context, Result};
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::Path;

// Embed the default config at compile time
const DEFAULT_CONFIG: &str = include_str!("../../default-config.toml");

/// Repository-local config file picked up when no `--config` is given
pub const LOCAL_CONFIG_FILE: &str = "parsum.toml";

/// Prefix for environment overrides, e.g. `PARSUM_REDUCE__THREADS=4`
pub const ENV_PREFIX: &str = "PARSUM_";

/// Main configuration structure for parsum
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsumConfig {
    pub reduce: ReduceConfig,
    pub sample: SampleConfig,
}

/// Parallel reduction settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReduceConfig {
    /// Worker threads (0 = one per CPU core)
    pub threads: usize,

    #[serde(default)]
    pub backend: Backend,

    /// Buffers shorter than this are reduced sequentially
    #[serde(default)]
    pub min_items_for_parallel: usize,
}

/// Sample buffer settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleConfig {
    pub count: usize,
    pub min: i32,
    pub max: i32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl ParsumConfig {
    pub fn load_with_custom_config(custom_config: Option<&str>) -> Result<Self> {
        Self::load_with(custom_config, &ConfigOverrides::default())
    }

    /// Load the full configuration chain and extract it
    pub fn load_with(custom_config: Option<&str>, overrides: &ConfigOverrides) -> Result<Self> {
        tracing::trace!("CONFIG LOAD: Starting");

        if let Some(path) = custom_config
            && !Path::new(path).exists()
        {
            anyhow::bail!("Config file not found: {path}");
        }

        let config: Self = Self::figment(custom_config, overrides)
            .extract()
            .context("Failed to load parsum configuration")?;

        config.validate()?;
        tracing::trace!(?config, "CONFIG LOAD: Done");
        Ok(config)
    }

    /// Layered provider chain: defaults < file < environment < CLI
    pub fn figment(custom_config: Option<&str>, overrides: &ConfigOverrides) -> Figment {
        let file = custom_config.unwrap_or(LOCAL_CONFIG_FILE);

        let mut figment = Figment::new()
            .merge(Toml::string(DEFAULT_CONFIG))
            .merge(Toml::file(file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"));

        if !overrides.is_empty() {
            tracing::trace!("CONFIG LOAD: Applying CLI overrides");
            figment = figment.merge(Serialized::defaults(overrides));
        }

        figment
    }

    /// Reject configurations that cannot produce a valid run
    pub fn validate(&self) -> std::result::Result<(), ReduceError> {
        if self.sample.min > self.sample.max {
            return Err(ReduceError::InvalidRange {
                min: self.sample.min,
                max: self.sample.max,
            });
        }
        Ok(())
    }

    /// Worker count with `0` resolved to the number of CPU cores
    pub fn resolved_threads(&self) -> usize {
        if self.reduce.threads == 0 {
            ExecutionStrategy::calculate_optimal_workers(0, 100)
        } else {
            self.reduce.threads
        }
    }

    pub fn sampler(&self) -> std::result::Result<Sampler, ReduceError> {
        Ok(Sampler::new(self.sample.min, self.sample.max)?.with_seed(self.sample.seed))
    }

    pub fn strategy(&self) -> ExecutionStrategy {
        ExecutionStrategy::auto(
            self.sample.count,
            self.reduce.min_items_for_parallel,
            self.resolved_threads(),
            self.reduce.backend,
        )
    }
}

impl Default for ParsumConfig {
    fn default() -> Self {
        Self {
            reduce: ReduceConfig {
                threads: 8,
                backend: Backend::Scoped,
                min_items_for_parallel: 0,
            },
            sample: SampleConfig {
                count: 10_000_000,
                min: crate::sample::DEFAULT_MIN,
                max: crate::sample::DEFAULT_MAX,
                seed: None,
            },
        }
    }
}
