//! Noise-schedule construction for the reverse process.

use md_types::ScheduleError;
use ndarray::Array1;

/// The fixed variance schedule driving the reverse process.
///
/// `beta[t]` is linearly spaced in `[beta_min, beta_max]`; `alpha_bar[t]` is
/// the running product of `1 - beta[0..=t]`; the per-step noise scale is
/// `sigma[t] = sqrt(1 - alpha_bar[t])`. Built once, immutable, and shared
/// read-only across all steps and trials.
#[derive(Debug, Clone, PartialEq)]
pub struct NoiseSchedule {
    betas: Array1<f64>,
    sigmas: Array1<f64>,
}

impl NoiseSchedule {
    /// Build and validate a schedule of `steps` entries.
    pub fn build(steps: usize, beta_min: f64, beta_max: f64) -> Result<Self, ScheduleError> {
        if steps < 2 {
            return Err(ScheduleError::TooFewSteps { steps });
        }
        if !(beta_min > 0.0 && beta_min < beta_max && beta_max < 1.0) {
            return Err(ScheduleError::InvalidBetaBounds { beta_min, beta_max });
        }

        let denom = (steps - 1) as f64;
        let betas =
            Array1::from_shape_fn(steps, |t| beta_min + (beta_max - beta_min) * t as f64 / denom);

        let mut sigmas = Array1::zeros(steps);
        let mut alpha_bar = 1.0;
        for t in 0..steps {
            alpha_bar *= 1.0 - betas[t];
            sigmas[t] = (1.0 - alpha_bar).sqrt();
        }

        let schedule = Self { betas, sigmas };
        schedule.check()?;
        Ok(schedule)
    }

    /// The sigma invariants follow from the beta bounds in exact arithmetic,
    /// but the sampler relies on them, so they are checked rather than
    /// assumed.
    fn check(&self) -> Result<(), ScheduleError> {
        for (t, &sigma) in self.sigmas.iter().enumerate() {
            if !sigma.is_finite() || !(0.0..1.0).contains(&sigma) {
                return Err(ScheduleError::Validation {
                    message: format!("sigma[{t}] = {sigma} is outside [0, 1)"),
                });
            }
            if t > 0 && sigma < self.sigmas[t - 1] {
                return Err(ScheduleError::Validation {
                    message: format!(
                        "sigma[{t}] = {sigma} decreases below sigma[{}] = {}",
                        t - 1,
                        self.sigmas[t - 1]
                    ),
                });
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.sigmas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sigmas.is_empty()
    }

    pub fn beta(&self, t: usize) -> f64 {
        self.betas[t]
    }

    pub fn sigma(&self, t: usize) -> f64 {
        self.sigmas[t]
    }
}
