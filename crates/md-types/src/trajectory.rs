//! Trajectory records surfaced by optimizer runs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::DiffusionConfig;

/// One per-step observation: cumulative objective evaluations so far and the
/// best reward seen in that step's population.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryPoint {
    pub evaluations: usize,
    pub best_reward: f64,
}

/// The ordered trajectory of a single optimizer run, one point per reverse
/// step in decreasing-`t` order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunTrace {
    pub seed: u64,
    pub points: Vec<TrajectoryPoint>,
}

impl RunTrace {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            points: Vec::new(),
        }
    }

    pub fn push(&mut self, evaluations: usize, best_reward: f64) {
        self.points.push(TrajectoryPoint {
            evaluations,
            best_reward,
        });
    }

    /// Best reward of the final (least-noisy) step.
    pub fn final_best_reward(&self) -> Option<f64> {
        self.points.last().map(|p| p.best_reward)
    }

    /// Best reward observed anywhere along the trajectory.
    pub fn best_reward(&self) -> Option<f64> {
        self.points
            .iter()
            .map(|p| p.best_reward)
            .fold(None, |acc, r| match acc {
                None => Some(r),
                Some(best) => Some(best.max(r)),
            })
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Aggregate result of a multi-trial benchmark run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkResult {
    pub id: Uuid,
    pub objective: String,
    pub config: DiffusionConfig,

    /// Per-seed trajectories, in seed order.
    pub trials: Vec<RunTrace>,

    /// Element-wise mean of the trial trajectories. All trials share the
    /// same evaluation grid, so averaging is positional.
    pub mean_trajectory: Vec<TrajectoryPoint>,

    pub created_at: DateTime<Utc>,
}

impl BenchmarkResult {
    pub fn new(
        objective: String,
        config: DiffusionConfig,
        trials: Vec<RunTrace>,
        mean_trajectory: Vec<TrajectoryPoint>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            objective,
            config,
            trials,
            mean_trajectory,
            created_at: Utc::now(),
        }
    }

    /// Mean of the trials' final best rewards.
    pub fn mean_final_best_reward(&self) -> Option<f64> {
        self.mean_trajectory.last().map(|p| p.best_reward)
    }
}
