//! Multi-seed benchmark experiments.
//!
//! A benchmark repeats the same optimizer configuration over consecutive
//! seeds and averages the per-seed trajectories into a single curve. Trials
//! are independent and run in parallel; each one is individually
//! deterministic.

use std::path::PathBuf;

use md_optimizer::DiffusionOptimizer;
use md_types::{BenchmarkResult, DiffusionConfig, MdError, MdResult, RunTrace, TrajectoryPoint};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::objectives;

/// Configuration for a multi-trial benchmark run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkConfig {
    /// Objective name: "sphere", "ackley", "rastrigin", or "levy".
    pub objective: String,

    /// Number of repeated trials; trial `i` runs with seed `seed + i`.
    pub trials: usize,

    /// Optimizer configuration shared by every trial (its `seed` is the
    /// base seed).
    pub diffusion: DiffusionConfig,

    /// Directory where result files are written.
    pub output_dir: PathBuf,
}

impl BenchmarkConfig {
    pub fn new(objective: &str, dim: usize) -> Self {
        Self {
            objective: objective.to_string(),
            trials: 6,
            diffusion: DiffusionConfig::new(dim),
            output_dir: PathBuf::from("results"),
        }
    }

    pub fn with_trials(mut self, trials: usize) -> Self {
        self.trials = trials;
        self
    }

    pub fn with_diffusion(mut self, diffusion: DiffusionConfig) -> Self {
        self.diffusion = diffusion;
        self
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn validate(&self) -> MdResult<()> {
        if self.trials == 0 {
            return Err(MdError::Config("trials must be at least 1".to_string()));
        }
        if objectives::by_name(&self.objective).is_none() {
            return Err(MdError::Config(format!(
                "unknown objective '{}'",
                self.objective
            )));
        }
        self.diffusion.validate()?;
        Ok(())
    }
}

/// Run every trial and average the trajectories.
pub fn run_benchmark(config: &BenchmarkConfig) -> MdResult<BenchmarkResult> {
    config.validate()?;
    let objective = objectives::by_name(&config.objective)
        .ok_or_else(|| MdError::Config(format!("unknown objective '{}'", config.objective)))?;

    info!(
        objective = %config.objective,
        trials = config.trials,
        dim = config.diffusion.dim,
        "starting benchmark"
    );

    let traces: Vec<RunTrace> = (0..config.trials as u64)
        .into_par_iter()
        .map(|i| -> MdResult<RunTrace> {
            let trial = config
                .diffusion
                .clone()
                .with_seed(config.diffusion.seed + i);
            DiffusionOptimizer::new(trial)?.run(objective.as_ref())
        })
        .collect::<MdResult<Vec<_>>>()?;

    let mean_trajectory = average_trajectories(&traces);
    let result = BenchmarkResult::new(
        config.objective.clone(),
        config.diffusion.clone(),
        traces,
        mean_trajectory,
    );

    info!(
        run_id = %result.id,
        mean_final_best = ?result.mean_final_best_reward(),
        "benchmark finished"
    );
    Ok(result)
}

/// Element-wise mean across trial trajectories. Every trial runs the same
/// step count and population size, so the evaluation grid is shared.
fn average_trajectories(traces: &[RunTrace]) -> Vec<TrajectoryPoint> {
    let Some(first) = traces.first() else {
        return Vec::new();
    };
    (0..first.len())
        .map(|k| {
            let sum: f64 = traces.iter().map(|t| t.points[k].best_reward).sum();
            TrajectoryPoint {
                evaluations: first.points[k].evaluations,
                best_reward: sum / traces.len() as f64,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config() -> BenchmarkConfig {
        BenchmarkConfig::new("sphere", 2)
            .with_trials(3)
            .with_diffusion(DiffusionConfig::new(2).with_samples(8).with_steps(6))
    }

    #[test]
    fn averaging_is_positional() {
        let mut a = RunTrace::new(0);
        a.push(8, -4.0);
        a.push(16, -2.0);
        let mut b = RunTrace::new(1);
        b.push(8, -2.0);
        b.push(16, -1.0);

        let mean = average_trajectories(&[a, b]);
        assert_eq!(mean.len(), 2);
        assert_eq!(mean[0].evaluations, 8);
        assert_eq!(mean[0].best_reward, -3.0);
        assert_eq!(mean[1].best_reward, -1.5);
    }

    #[test]
    fn averaging_empty_input_is_empty() {
        assert!(average_trajectories(&[]).is_empty());
    }

    #[test]
    fn benchmark_runs_all_trials_on_a_shared_grid() {
        let result = run_benchmark(&small_config()).unwrap();

        assert_eq!(result.trials.len(), 3);
        assert_eq!(result.mean_trajectory.len(), 5);
        for trace in &result.trials {
            assert_eq!(trace.len(), 5);
        }
        // Consecutive seeds from the base seed.
        assert_eq!(result.trials[0].seed, 0);
        assert_eq!(result.trials[1].seed, 1);
        assert_eq!(result.trials[2].seed, 2);
    }

    #[test]
    fn benchmark_is_reproducible() {
        let config = small_config();
        let first = run_benchmark(&config).unwrap();
        let second = run_benchmark(&config).unwrap();

        assert_eq!(first.mean_trajectory, second.mean_trajectory);
    }

    #[test]
    fn unknown_objective_is_rejected() {
        let config = BenchmarkConfig::new("rosenbrock", 2);
        assert!(matches!(config.validate(), Err(MdError::Config(_))));
    }

    #[test]
    fn zero_trials_is_rejected() {
        let config = small_config().with_trials(0);
        assert!(config.validate().is_err());
    }
}
