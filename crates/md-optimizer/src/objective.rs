//! The objective-evaluation capability consumed by the optimizer.

use md_types::ObjectiveDirection;
use ndarray::parallel::prelude::*;
use ndarray::{Array1, ArrayView1, ArrayView2, Axis};

/// A scalar objective over the normalized search domain `[-1, 1]^D`.
///
/// Implementations must be pure: the optimizer evaluates one point per lane
/// per step with no ordering guarantees, possibly from multiple threads.
pub trait Objective: Send + Sync {
    /// Evaluate a single point in the normalized domain.
    fn evaluate(&self, point: ArrayView1<f64>) -> f64;

    /// Evaluate every row of a population. Lanes are independent, so the
    /// default maps rows in parallel.
    fn evaluate_population(&self, population: ArrayView2<f64>) -> Array1<f64> {
        let values: Vec<f64> = population
            .axis_iter(Axis(0))
            .into_par_iter()
            .map(|row| self.evaluate(row))
            .collect();
        Array1::from_vec(values)
    }

    /// Human-readable objective name.
    fn name(&self) -> &str;
}

/// Convert a raw objective value into a reward to be maximized.
pub fn reward_from(value: f64, direction: ObjectiveDirection) -> f64 {
    match direction {
        ObjectiveDirection::Maximize => value,
        ObjectiveDirection::Minimize => -value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    struct RowSum;

    impl Objective for RowSum {
        fn evaluate(&self, point: ArrayView1<f64>) -> f64 {
            point.sum()
        }

        fn name(&self) -> &str {
            "row_sum"
        }
    }

    #[test]
    fn population_evaluation_matches_per_row() {
        let population = array![[1.0, 2.0], [3.0, 4.0], [-1.0, 1.0]];
        let values = RowSum.evaluate_population(population.view());
        assert_eq!(values, array![3.0, 7.0, 0.0]);
    }

    #[test]
    fn reward_negates_only_for_minimize() {
        assert_eq!(reward_from(2.5, ObjectiveDirection::Maximize), 2.5);
        assert_eq!(reward_from(2.5, ObjectiveDirection::Minimize), -2.5);
    }
}
