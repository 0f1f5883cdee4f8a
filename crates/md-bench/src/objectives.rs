//! Benchmark objective functions over the normalized search domain.
//!
//! Each objective rescales its input from `[-1, 1]^D` to its native domain
//! before evaluating, so the optimizer always works on the normalized cube.
//! All of them are minimization problems with a known global optimum of 0.

use md_optimizer::Objective;
use ndarray::ArrayView1;
use std::f64::consts::{E, PI};

/// Map a normalized coordinate into `[lo, hi]`.
#[inline]
fn rescale(y: f64, lo: f64, hi: f64) -> f64 {
    lo + (hi - lo) * (y + 1.0) / 2.0
}

/// Quadratic bowl evaluated directly on the normalized cube; minimum 0 at
/// the origin. Mostly useful as a sanity check.
#[derive(Debug, Clone, Copy)]
pub struct Sphere;

impl Objective for Sphere {
    fn evaluate(&self, point: ArrayView1<f64>) -> f64 {
        point.iter().map(|y| y * y).sum()
    }

    fn name(&self) -> &str {
        "sphere"
    }
}

/// Ackley function over `[-5, 10]^D`; minimum 0 at the native origin.
#[derive(Debug, Clone, Copy)]
pub struct Ackley {
    a: f64,
    b: f64,
    c: f64,
}

impl Default for Ackley {
    fn default() -> Self {
        Self {
            a: 20.0,
            b: 0.2,
            c: 2.0 * PI,
        }
    }
}

impl Objective for Ackley {
    fn evaluate(&self, point: ArrayView1<f64>) -> f64 {
        let dim = point.len() as f64;
        let mut norm_sq = 0.0;
        let mut cos_sum = 0.0;
        for &y in point.iter() {
            let x = rescale(y, -5.0, 10.0);
            norm_sq += x * x;
            cos_sum += (self.c * x).cos();
        }
        let part1 = -self.a * (-self.b / dim.sqrt() * norm_sq.sqrt()).exp();
        let part2 = -(cos_sum / dim).exp();
        part1 + part2 + self.a + E
    }

    fn name(&self) -> &str {
        "ackley"
    }
}

/// Rastrigin function over `[-5, 5]^D`; minimum 0 at the native origin.
#[derive(Debug, Clone, Copy)]
pub struct Rastrigin;

impl Objective for Rastrigin {
    fn evaluate(&self, point: ArrayView1<f64>) -> f64 {
        let dim = point.len() as f64;
        let sum: f64 = point
            .iter()
            .map(|&y| {
                let x = rescale(y, -5.0, 5.0);
                x * x - 10.0 * (2.0 * PI * x).cos()
            })
            .sum();
        10.0 * dim + sum
    }

    fn name(&self) -> &str {
        "rastrigin"
    }
}

/// Levy function over `[-5, 5]^D`; minimum 0 where every native coordinate
/// is 1.
#[derive(Debug, Clone, Copy)]
pub struct Levy;

impl Objective for Levy {
    fn evaluate(&self, point: ArrayView1<f64>) -> f64 {
        let w: Vec<f64> = point
            .iter()
            .map(|&y| 1.0 + (rescale(y, -5.0, 5.0) - 1.0) / 4.0)
            .collect();
        let last = w.len() - 1;

        let part1 = (PI * w[0]).sin().powi(2);
        let part2: f64 = w[..last]
            .iter()
            .map(|&wi| (wi - 1.0).powi(2) * (1.0 + 10.0 * (PI * wi + 1.0).sin().powi(2)))
            .sum();
        let part3 = (w[last] - 1.0).powi(2) * (1.0 + (2.0 * PI * w[last]).sin().powi(2));

        part1 + part2 + part3
    }

    fn name(&self) -> &str {
        "levy"
    }
}

/// Look up an objective by its configuration name.
pub fn by_name(name: &str) -> Option<Box<dyn Objective>> {
    match name.to_ascii_lowercase().as_str() {
        "sphere" => Some(Box::new(Sphere)),
        "ackley" => Some(Box::new(Ackley::default())),
        "rastrigin" => Some(Box::new(Rastrigin)),
        "levy" => Some(Box::new(Levy)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array1;

    fn approx_eq(a: f64, b: f64, tolerance: f64) {
        assert!(
            (a - b).abs() < tolerance,
            "assertion failed: `(left ≈ right)`\n  left: `{a}`, right: `{b}`"
        );
    }

    #[test]
    fn sphere_minimum_at_origin() {
        let origin = Array1::zeros(4);
        approx_eq(Sphere.evaluate(origin.view()), 0.0, 1e-12);

        let off = Array1::from_elem(4, 0.5);
        approx_eq(Sphere.evaluate(off.view()), 1.0, 1e-12);
    }

    #[test]
    fn rastrigin_minimum_at_normalized_origin() {
        // y = 0 maps to the native origin of [-5, 5].
        let origin = Array1::zeros(10);
        approx_eq(Rastrigin.evaluate(origin.view()), 0.0, 1e-9);
    }

    #[test]
    fn rastrigin_known_value_at_native_ones() {
        // y = 0.2 maps to X = 1; each dimension contributes 1 - 10 + 10 = 1.
        let ones = Array1::from_elem(2, 0.2);
        approx_eq(Rastrigin.evaluate(ones.view()), 2.0, 1e-6);
    }

    #[test]
    fn ackley_minimum_at_native_origin() {
        // The native origin of [-5, 10] sits at y = -1/3.
        let origin = Array1::from_elem(6, -1.0 / 3.0);
        approx_eq(Ackley::default().evaluate(origin.view()), 0.0, 1e-9);
    }

    #[test]
    fn ackley_positive_away_from_origin() {
        let away = Array1::from_elem(6, 0.9);
        assert!(Ackley::default().evaluate(away.view()) > 1.0);
    }

    #[test]
    fn levy_minimum_at_native_ones() {
        // X = 1 sits at y = 0.2 in the [-5, 5] domain.
        let ones = Array1::from_elem(5, 0.2);
        approx_eq(Levy.evaluate(ones.view()), 0.0, 1e-9);
    }

    #[test]
    fn levy_positive_elsewhere() {
        let elsewhere = Array1::from_elem(5, -0.7);
        assert!(Levy.evaluate(elsewhere.view()) > 0.0);
    }

    #[test]
    fn lookup_is_case_insensitive_and_total() {
        assert_eq!(by_name("Sphere").unwrap().name(), "sphere");
        assert_eq!(by_name("ACKLEY").unwrap().name(), "ackley");
        assert_eq!(by_name("rastrigin").unwrap().name(), "rastrigin");
        assert_eq!(by_name("levy").unwrap().name(), "levy");
        assert!(by_name("rosenbrock").is_none());
    }
}
