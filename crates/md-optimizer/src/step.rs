//! A single reverse-diffusion step.

use md_types::{DiffusionConfig, OptimizerError};
use ndarray::{Array1, Array2};
use tracing::debug;

use crate::noise::NoiseSource;
use crate::objective::{reward_from, Objective};
use crate::schedule::NoiseSchedule;

/// Carried optimizer state: the step counter, the noise source, and the
/// `[N, D]` mean estimate (one row per sample lane).
///
/// Lanes carry independent means at initialization; every reward-weighted
/// update collapses them onto a single shared estimate broadcast across all
/// rows.
#[derive(Debug, Clone)]
pub struct OptimizerState {
    pub step: usize,
    pub noise: NoiseSource,
    pub mean: Array2<f64>,
}

/// What one reverse step produces: the successor state and the best reward
/// observed in the step's population.
#[derive(Debug)]
pub struct StepOutcome {
    pub state: OptimizerState,
    pub best_reward: f64,
}

/// Advance the state by exactly one reverse step.
///
/// Samples a population around the current mean at the step's noise level,
/// evaluates it, and re-estimates the mean as the softmax-weighted average
/// of the candidates. Only the rewards steer the update; no denoising
/// correction term from the generative formulation is applied.
///
/// A flat reward vector (zero variance across lanes) carries the mean
/// through unchanged instead of dividing by zero. Non-finite rewards are not
/// repaired here: they flow into the new mean, where the driving loop's
/// finite check turns them into a fatal [`OptimizerError::NumericInstability`].
///
/// The terminal call at step 0 is valid; its successor saturates at step 0
/// and callers stop iterating there.
pub fn reverse_once(
    state: OptimizerState,
    schedule: &NoiseSchedule,
    objective: &dyn Objective,
    config: &DiffusionConfig,
) -> Result<StepOutcome, OptimizerError> {
    let OptimizerState { step, noise, mean } = state;
    let (n, d) = mean.dim();

    let (noise, eps) = noise.standard_normal(n, d);
    let sigma = schedule.sigma(step);

    // The objective assumes bounded input, so clipping is not optional.
    let candidates = (eps * sigma + &mean).mapv(|x| x.clamp(-1.0, 1.0));

    let values = objective.evaluate_population(candidates.view());
    let rewards = values.mapv(|v| reward_from(v, config.direction));
    let best_reward = rewards.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

    let mean = if n == 1 {
        // A single lane gets all the weight: the candidate is the new mean.
        candidates
    } else {
        match standardize(&rewards, step) {
            Ok(z) => {
                let weights = softmax(&(z / config.temp_sample));
                let estimate = candidates.t().dot(&weights);
                Array2::from_shape_fn((n, d), |(_, k)| estimate[k])
            }
            Err(err @ OptimizerError::DegenerateReward { .. }) => {
                debug!(step, %err, "flat rewards across population, keeping mean estimate");
                mean
            }
            Err(other) => return Err(other),
        }
    };

    Ok(StepOutcome {
        state: OptimizerState {
            step: step.saturating_sub(1),
            noise,
            mean,
        },
        best_reward,
    })
}

/// Standardize rewards to zero mean and unit variance (population
/// statistics, matching the generative formulation's per-batch scaling).
///
/// Exactly-zero variance is reported as [`OptimizerError::DegenerateReward`]
/// so the caller can apply its documented fallback; a non-finite variance
/// (NaN rewards) is deliberately left to propagate.
fn standardize(rewards: &Array1<f64>, step: usize) -> Result<Array1<f64>, OptimizerError> {
    let mean = rewards.mean().unwrap_or(0.0);
    let std = rewards.std(0.0);
    if std == 0.0 {
        return Err(OptimizerError::DegenerateReward { step });
    }
    Ok(rewards.mapv(|r| (r - mean) / std))
}

/// Numerically stable softmax over the lane axis.
fn softmax(logits: &Array1<f64>) -> Array1<f64> {
    let max = logits.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let mut weights = logits.mapv(|l| (l - max).exp());
    let sum = weights.sum();
    if sum > 0.0 {
        weights /= sum;
    }
    weights
}
