//! Random sample buffers

use crate::error::{ReduceError, Result};
use rand::distributions::{Distribution, Uniform};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub const DEFAULT_MIN: i32 = -100;
pub const DEFAULT_MAX: i32 = 100;

/// Uniform integer sampler over a closed range
#[derive(Debug, Clone)]
pub struct Sampler {
    min: i32,
    max: i32,
    seed: Option<u64>,
}

impl Default for Sampler {
    fn default() -> Self {
        Self {
            min: DEFAULT_MIN,
            max: DEFAULT_MAX,
            seed: None,
        }
    }
}

impl Sampler {
    /// Sampler over `[min, max]`, both ends inclusive
    pub fn new(min: i32, max: i32) -> Result<Self> {
        if min > max {
            return Err(ReduceError::InvalidRange { min, max });
        }
        Ok(Self {
            min,
            max,
            seed: None,
        })
    }

    /// Fix the seed so repeated runs produce the same buffer
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    pub fn range(&self) -> (i32, i32) {
        (self.min, self.max)
    }

    /// Generate `count` samples
    ///
    /// Without a seed the thread-local OS-seeded generator is used.
    pub fn generate(&self, count: usize) -> Vec<i32> {
        match self.seed {
            Some(seed) => {
                tracing::debug!(count, seed, "generating seeded samples");
                self.generate_with(&mut StdRng::seed_from_u64(seed), count)
            }
            None => {
                tracing::debug!(count, "generating samples");
                self.generate_with(&mut rand::thread_rng(), count)
            }
        }
    }

    /// Generate `count` samples from a caller-supplied generator
    pub fn generate_with<R: Rng + ?Sized>(&self, rng: &mut R, count: usize) -> Vec<i32> {
        let dist = Uniform::new_inclusive(self.min, self.max);
        dist.sample_iter(rng).take(count).collect()
    }
}

/// `count` samples from `[-100, 100]` with a non-deterministic seed
pub fn generate(count: usize) -> Vec<i32> {
    Sampler::default().generate(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_length() {
        assert_eq!(generate(0).len(), 0);
        assert_eq!(generate(1).len(), 1);
        assert_eq!(generate(1000).len(), 1000);
    }

    #[test]
    fn test_samples_stay_in_range() {
        let samples = generate(10_000);
        assert!(
            samples
                .iter()
                .all(|&v| (DEFAULT_MIN..=DEFAULT_MAX).contains(&v))
        );
    }

    #[test]
    fn test_range_endpoints_are_reachable() {
        let sampler = Sampler::new(-1, 1).unwrap().with_seed(Some(7));
        let samples = sampler.generate(1000);
        assert!(samples.contains(&-1));
        assert!(samples.contains(&1));
    }

    #[test]
    fn test_single_value_range() {
        let sampler = Sampler::new(5, 5).unwrap();
        assert!(sampler.generate(100).iter().all(|&v| v == 5));
    }

    #[test]
    fn test_seed_is_reproducible() {
        let sampler = Sampler::default().with_seed(Some(42));
        assert_eq!(sampler.generate(500), sampler.generate(500));

        let other = Sampler::default().with_seed(Some(43));
        assert_ne!(sampler.generate(500), other.generate(500));
    }

    #[test]
    fn test_invalid_range_rejected() {
        assert!(matches!(
            Sampler::new(10, -10),
            Err(ReduceError::InvalidRange { min: 10, max: -10 })
        ));
    }
}
