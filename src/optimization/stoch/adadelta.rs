//! AdaDelta: learning-rate-free adaptive steps.
//!
//! Keeps exponential moving averages of the squared gradients and of the
//! squared parameter updates; each step rescales the gradient by
//! `sqrt(eps + avg_updates) / sqrt(eps + avg_gradients)` per dimension,
//! so the units of the update match the units of the parameters.
use ndarray::Array1;

use crate::optimization::{
    problem::Problem,
    stoch::{finite_update, StochOptions, StochSolver},
    types::{Point, Scalar},
};

pub(crate) struct AdaDeltaSolver {
    momentum: Scalar,
    epsilon: Scalar,
    gavg2: Array1<Scalar>,
    davg2: Array1<Scalar>,
}

impl AdaDeltaSolver {
    pub(crate) fn new(opts: &StochOptions, dimensions: usize) -> Self {
        Self {
            momentum: opts.momentum,
            epsilon: opts.epsilon,
            gavg2: Array1::zeros(dimensions),
            davg2: Array1::zeros(dimensions),
        }
    }
}

impl StochSolver for AdaDeltaSolver {
    fn iterate(&mut self, problem: &Problem, x: &mut Point, _k: usize) {
        let (f, g) = problem.eval_grad(x);
        if !finite_update(f, &g) {
            return;
        }

        let rho = self.momentum;
        let epsilon = self.epsilon;

        self.gavg2.zip_mut_with(&g, |avg, &gi| *avg = rho * *avg + (1.0 - rho) * gi * gi);

        let dx: Point = ndarray::Zip::from(&g)
            .and(&self.gavg2)
            .and(&self.davg2)
            .map_collect(|&gi, &ga, &da| gi * (epsilon + da).sqrt() / (epsilon + ga).sqrt());

        *x -= &dx;
        self.davg2
            .zip_mut_with(&dx, |avg, &di| *avg = rho * *avg + (1.0 - rho) * di * di);
    }
}

#[cfg(test)]
mod tests {
    use ndarray::array;

    use super::*;
    use crate::optimization::{stoch::StochOptimizer, types::Point};

    // Purpose: the first step matches the closed form and feeds the
    // update average.
    // Given: g = −6, rho = 0.9, eps = 1e-6, so gavg2 = 3.6 and
    //        dx = −6·sqrt(1e-6)/sqrt(1e-6 + 3.6).
    // Expect: x moves by −dx and davg2 becomes 0.1·dx².
    #[test]
    fn first_step_matches_closed_form() {
        let problem = Problem::with_gradient(
            || 1,
            |x: &Point| (x[0] - 3.0) * (x[0] - 3.0),
            |x: &Point| ((x[0] - 3.0) * (x[0] - 3.0), array![2.0 * (x[0] - 3.0)]),
        );
        let opts = StochOptions::new(StochOptimizer::AdaDelta, 1, 1, 0.1, 0.0).unwrap();
        let mut solver = AdaDeltaSolver::new(&opts, 1);
        let mut x = array![0.0];

        solver.iterate(&problem, &mut x, 0);

        let expected_dx = -6.0 * (1e-6_f64).sqrt() / (1e-6 + 3.6_f64).sqrt();
        assert!((x[0] + expected_dx).abs() < 1e-12);
        assert!((solver.davg2[0] - 0.1 * expected_dx * expected_dx).abs() < 1e-15);
    }

    // Purpose: the step has no global learning rate to tune.
    // Given: options with a (ignored) alpha0 of 123.
    // Expect: the step magnitude is unchanged by alpha0.
    #[test]
    fn ignores_alpha0() {
        let problem = Problem::with_gradient(
            || 1,
            |x: &Point| x[0] * x[0],
            |x: &Point| (x[0] * x[0], array![2.0 * x[0]]),
        );
        let small = StochOptions::new(StochOptimizer::AdaDelta, 1, 1, 1e-3, 0.0).unwrap();
        let large = StochOptions::new(StochOptimizer::AdaDelta, 1, 1, 123.0, 0.0).unwrap();

        let mut xa = array![1.0];
        let mut xb = array![1.0];
        AdaDeltaSolver::new(&small, 1).iterate(&problem, &mut xa, 0);
        AdaDeltaSolver::new(&large, 1).iterate(&problem, &mut xb, 0);

        assert_eq!(xa, xb);
    }
}
