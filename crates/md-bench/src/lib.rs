//! # md-bench
//!
//! Benchmark objectives and multi-seed experiment orchestration for MoDiff.
//!
//! Provides the standard multimodal test functions (Sphere, Ackley,
//! Rastrigin, Levy) behind the optimizer's objective interface, a runner
//! that repeats trials over consecutive seeds and averages their
//! trajectories, and CSV/JSON persistence of the results.

mod experiment;
mod objectives;
mod report;

pub use experiment::{run_benchmark, BenchmarkConfig};
pub use objectives::{by_name, Ackley, Levy, Rastrigin, Sphere};
pub use report::{write_mean_trajectory_csv, write_result_json};
