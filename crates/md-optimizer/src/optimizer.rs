//! The reverse-diffusion driving loop.

use md_types::{DiffusionConfig, MdResult, OptimizerError, RunTrace};
use tracing::{debug, info};

use crate::noise::NoiseSource;
use crate::objective::Objective;
use crate::schedule::NoiseSchedule;
use crate::step::{reverse_once, OptimizerState};

/// Sampling-based optimizer that runs a reverse-diffusion process over a
/// fixed noise schedule.
///
/// Construction validates the configuration and builds the schedule once;
/// [`DiffusionOptimizer::run`] then executes steps `T-1, T-2, ..., 1`,
/// threading the state and collecting one trajectory point per step.
pub struct DiffusionOptimizer {
    config: DiffusionConfig,
    schedule: NoiseSchedule,
}

impl DiffusionOptimizer {
    pub fn new(config: DiffusionConfig) -> MdResult<Self> {
        config.validate()?;
        let schedule = NoiseSchedule::build(config.steps, config.beta_min, config.beta_max)?;
        Ok(Self { config, schedule })
    }

    pub fn config(&self) -> &DiffusionConfig {
        &self.config
    }

    pub fn schedule(&self) -> &NoiseSchedule {
        &self.schedule
    }

    /// Initial state: step `T-1`, a seeded noise source, and a random mean
    /// with one independent lane per sample.
    pub fn initial_state(&self) -> OptimizerState {
        let noise = NoiseSource::from_seed(self.config.seed);
        let (noise, init) = noise.standard_normal(self.config.samples, self.config.dim);
        OptimizerState {
            step: self.config.steps - 1,
            noise,
            mean: init * self.config.init_scale,
        }
    }

    /// Run the full reverse process and collect the trajectory.
    ///
    /// Aborts with [`OptimizerError::NumericInstability`] if any entry of the
    /// mean estimate stops being finite, reporting the step that produced it.
    pub fn run(&self, objective: &dyn Objective) -> MdResult<RunTrace> {
        let total_steps = self.config.steps - 1;
        info!(
            objective = objective.name(),
            steps = total_steps,
            samples = self.config.samples,
            dim = self.config.dim,
            seed = self.config.seed,
            "starting reverse-diffusion run"
        );

        let mut trace = RunTrace::new(self.config.seed);
        let mut state = self.initial_state();

        while state.step >= 1 {
            let outcome = reverse_once(state, &self.schedule, objective, &self.config)?;
            state = outcome.state;

            if let Some(bad) = state.mean.iter().copied().find(|x| !x.is_finite()) {
                return Err(OptimizerError::NumericInstability {
                    step: state.step + 1,
                    message: format!("mean estimate contains non-finite value {bad}"),
                }
                .into());
            }

            let evaluations = (total_steps - state.step) * self.config.samples;
            trace.push(evaluations, outcome.best_reward);
            debug!(
                step = state.step,
                evaluations,
                best_reward = outcome.best_reward,
                "reverse step complete"
            );
        }

        info!(
            final_best = ?trace.final_best_reward(),
            evaluations = trace.points.last().map(|p| p.evaluations).unwrap_or(0),
            "reverse-diffusion run finished"
        );
        Ok(trace)
    }
}
