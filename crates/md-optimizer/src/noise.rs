//! Deterministic noise generation for the reverse process.

use ndarray::Array2;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, StandardNormal};

/// Seeded source of standard-normal draws.
///
/// Drawing consumes the source and returns its successor alongside the
/// samples, so one step's randomness can never be reused by the next and
/// replaying a seed reproduces every draw exactly.
#[derive(Debug, Clone)]
pub struct NoiseSource {
    rng: ChaCha8Rng,
}

impl NoiseSource {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Draw an `[n, d]` matrix of independent standard-normal samples.
    pub fn standard_normal(mut self, n: usize, d: usize) -> (Self, Array2<f64>) {
        let mut draws = Array2::zeros((n, d));
        for i in 0..n {
            for k in 0..d {
                draws[[i, k]] = StandardNormal.sample(&mut self.rng);
            }
        }
        (self, draws)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_reproduces_draws() {
        let (_, a) = NoiseSource::from_seed(7).standard_normal(4, 3);
        let (_, b) = NoiseSource::from_seed(7).standard_normal(4, 3);
        assert_eq!(a, b);
    }

    #[test]
    fn different_seeds_differ() {
        let (_, a) = NoiseSource::from_seed(0).standard_normal(4, 3);
        let (_, b) = NoiseSource::from_seed(1).standard_normal(4, 3);
        assert_ne!(a, b);
    }

    #[test]
    fn successive_draws_are_independent() {
        let source = NoiseSource::from_seed(0);
        let (source, first) = source.standard_normal(4, 3);
        let (_, second) = source.standard_normal(4, 3);
        assert_ne!(first, second);
    }

    #[test]
    fn draw_shape_matches_request() {
        let (_, draws) = NoiseSource::from_seed(0).standard_normal(64, 800);
        assert_eq!(draws.dim(), (64, 800));
        assert!(draws.iter().all(|x| x.is_finite()));
    }
}
