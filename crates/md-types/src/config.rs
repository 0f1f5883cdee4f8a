//! Run configuration for the diffusion optimizer.

use serde::{Deserialize, Serialize};

use crate::errors::OptimizerError;

/// Whether the raw objective value is maximized or minimized.
///
/// For `Minimize` the optimizer negates objective values into rewards, so the
/// weighted update always concentrates on high-reward lanes regardless of
/// direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectiveDirection {
    Maximize,
    Minimize,
}

impl Default for ObjectiveDirection {
    fn default() -> Self {
        Self::Minimize
    }
}

/// Top-level configuration for a single optimizer run.
///
/// Defaults follow the reference benchmark setup: 64 sample lanes, 100
/// diffusion steps, a linear beta schedule in `[1e-4, 1e-2]`, unit softmax
/// temperature, and a unit-spread random initial mean.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiffusionConfig {
    /// Problem dimensionality `D`.
    pub dim: usize,

    /// Population size `N`: independent sample lanes carried per step.
    pub samples: usize,

    /// Number of diffusion steps `T`.
    pub steps: usize,

    /// Lower bound of the linear beta schedule.
    pub beta_min: f64,

    /// Upper bound of the linear beta schedule.
    pub beta_max: f64,

    /// Softmax inverse temperature; lower values sharpen the concentration
    /// of selection weight on the best lanes.
    pub temp_sample: f64,

    /// RNG seed. Runs with the same seed and config are reproducible
    /// bit-for-bit.
    pub seed: u64,

    /// Spread of the random initial mean estimate.
    pub init_scale: f64,

    /// Direction of optimization.
    #[serde(default)]
    pub direction: ObjectiveDirection,
}

impl DiffusionConfig {
    pub fn new(dim: usize) -> Self {
        Self {
            dim,
            samples: 64,
            steps: 100,
            beta_min: 1e-4,
            beta_max: 1e-2,
            temp_sample: 1.0,
            seed: 0,
            init_scale: 1.0,
            direction: ObjectiveDirection::Minimize,
        }
    }

    pub fn with_samples(mut self, n: usize) -> Self {
        self.samples = n;
        self
    }

    pub fn with_steps(mut self, t: usize) -> Self {
        self.steps = t;
        self
    }

    pub fn with_beta_bounds(mut self, beta_min: f64, beta_max: f64) -> Self {
        self.beta_min = beta_min;
        self.beta_max = beta_max;
        self
    }

    pub fn with_temp_sample(mut self, temp: f64) -> Self {
        self.temp_sample = temp;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_init_scale(mut self, scale: f64) -> Self {
        self.init_scale = scale;
        self
    }

    pub fn with_direction(mut self, direction: ObjectiveDirection) -> Self {
        self.direction = direction;
        self
    }

    /// Check the configuration before any stepping happens.
    ///
    /// Beta bounds are re-validated by the schedule builder; checking here
    /// means a bad config fails before an optimizer is even constructed.
    pub fn validate(&self) -> Result<(), OptimizerError> {
        if self.dim == 0 {
            return Err(OptimizerError::InvalidConfig {
                message: "dim must be at least 1".to_string(),
            });
        }
        if self.samples == 0 {
            return Err(OptimizerError::InvalidConfig {
                message: "samples must be at least 1".to_string(),
            });
        }
        if self.steps < 2 {
            return Err(OptimizerError::InvalidConfig {
                message: format!("steps must be at least 2, got {}", self.steps),
            });
        }
        if !(self.beta_min > 0.0 && self.beta_min < self.beta_max && self.beta_max < 1.0) {
            return Err(OptimizerError::InvalidConfig {
                message: format!(
                    "beta bounds must satisfy 0 < beta_min < beta_max < 1, got [{}, {}]",
                    self.beta_min, self.beta_max
                ),
            });
        }
        if !(self.temp_sample > 0.0) || !self.temp_sample.is_finite() {
            return Err(OptimizerError::InvalidConfig {
                message: format!("temp_sample must be positive and finite, got {}", self.temp_sample),
            });
        }
        if !self.init_scale.is_finite() || self.init_scale < 0.0 {
            return Err(OptimizerError::InvalidConfig {
                message: format!("init_scale must be non-negative and finite, got {}", self.init_scale),
            });
        }
        Ok(())
    }
}

impl Default for DiffusionConfig {
    fn default() -> Self {
        Self::new(2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_chain_overrides_defaults() {
        let config = DiffusionConfig::new(800)
            .with_samples(64)
            .with_steps(100)
            .with_beta_bounds(1e-4, 1e-2)
            .with_temp_sample(0.5)
            .with_seed(3)
            .with_init_scale(1.0)
            .with_direction(ObjectiveDirection::Maximize);

        assert_eq!(config.dim, 800);
        assert_eq!(config.temp_sample, 0.5);
        assert_eq!(config.seed, 3);
        assert_eq!(config.direction, ObjectiveDirection::Maximize);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn default_config_is_valid() {
        assert!(DiffusionConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_degenerate_dimensions() {
        assert!(DiffusionConfig::new(0).validate().is_err());
        assert!(DiffusionConfig::new(2).with_samples(0).validate().is_err());
        assert!(DiffusionConfig::new(2).with_steps(1).validate().is_err());
    }

    #[test]
    fn rejects_bad_beta_bounds() {
        assert!(DiffusionConfig::new(2)
            .with_beta_bounds(1e-2, 1e-4)
            .validate()
            .is_err());
        assert!(DiffusionConfig::new(2)
            .with_beta_bounds(0.0, 1e-2)
            .validate()
            .is_err());
        assert!(DiffusionConfig::new(2)
            .with_beta_bounds(1e-4, 1.0)
            .validate()
            .is_err());
    }

    #[test]
    fn rejects_bad_temperature_and_scale() {
        assert!(DiffusionConfig::new(2).with_temp_sample(0.0).validate().is_err());
        assert!(DiffusionConfig::new(2)
            .with_temp_sample(f64::NAN)
            .validate()
            .is_err());
        assert!(DiffusionConfig::new(2).with_init_scale(-1.0).validate().is_err());
    }

    #[test]
    fn serde_round_trip() {
        let config = DiffusionConfig::new(10).with_seed(42);
        let json = serde_json::to_string(&config).unwrap();
        let back: DiffusionConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }

    #[test]
    fn direction_defaults_to_minimize_when_missing() {
        let json = r#"{
            "dim": 2, "samples": 8, "steps": 10,
            "beta_min": 1e-4, "beta_max": 1e-2,
            "temp_sample": 1.0, "seed": 0, "init_scale": 1.0
        }"#;
        let config: DiffusionConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.direction, ObjectiveDirection::Minimize);
    }
}
