//! Stochastic gradient descent, plain and averaged.
//!
//! Plain SGD uses the closed-form rate `gamma / (1 + gamma·lambda·k)`;
//! the averaged variant slows the decay to the 0.75 power and reports the
//! running average of the iterates collected over the second half of the
//! run.
use crate::optimization::{
    average::RunningVector,
    problem::Problem,
    stoch::{finite_update, StochOptions, StochSolver},
    types::{Point, Scalar},
};

pub(crate) struct SgSolver {
    gamma: Scalar,
    lambda: Scalar,
    averaged: bool,
    /// First global iteration that feeds the average (averaged mode).
    halfway: usize,
    xavg: RunningVector,
}

impl SgSolver {
    pub(crate) fn plain(opts: &StochOptions) -> Self {
        Self {
            gamma: opts.alpha0,
            lambda: opts.decay,
            averaged: false,
            halfway: 0,
            xavg: RunningVector::new(0),
        }
    }

    pub(crate) fn averaged(opts: &StochOptions, dimensions: usize) -> Self {
        Self {
            gamma: opts.alpha0,
            lambda: opts.decay,
            averaged: true,
            halfway: opts.total_iterations() / 2,
            xavg: RunningVector::new(dimensions),
        }
    }
}

impl StochSolver for SgSolver {
    fn iterate(&mut self, problem: &Problem, x: &mut Point, k: usize) {
        let (f, g) = problem.eval_grad(x);
        if !finite_update(f, &g) {
            return;
        }

        let base = 1.0 + self.gamma * self.lambda * k as Scalar;
        let alpha = if self.averaged {
            self.gamma / base.powf(0.75)
        } else {
            self.gamma / base
        };

        x.scaled_add(-alpha, &g);
        if self.averaged && k >= self.halfway {
            self.xavg.update(x, 1.0);
        }
    }

    fn monitored(&self, x: &Point) -> Point {
        if self.averaged && self.xavg.weights_sum() > 0.0 {
            self.xavg.average().clone()
        } else {
            x.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use ndarray::array;

    use super::*;
    use crate::optimization::{stoch::StochOptimizer, types::Point};

    fn parabola() -> Problem {
        Problem::with_gradient(
            || 1,
            |x: &Point| (x[0] - 3.0) * (x[0] - 3.0),
            |x: &Point| ((x[0] - 3.0) * (x[0] - 3.0), array![2.0 * (x[0] - 3.0)]),
        )
    }

    // Purpose: the plain rate follows gamma / (1 + gamma·lambda·k).
    // Given: gamma = 0.5, lambda = 2 and one step at k = 1 from a point
    //        with gradient −6.
    // Expect: x moves by alpha·6 with alpha = 0.5/(1 + 1) = 0.25.
    #[test]
    fn plain_rate_follows_closed_form() {
        let problem = parabola();
        let opts = StochOptions::new(StochOptimizer::Sg, 1, 1, 0.5, 2.0).unwrap();
        let mut solver = SgSolver::plain(&opts);
        let mut x = array![0.0];

        solver.iterate(&problem, &mut x, 1);
        assert!((x[0] - 0.25 * 6.0).abs() < 1e-12);
    }

    // Purpose: averaging only starts halfway through the run.
    // Given: a 4-iteration run.
    // Expect: no average before k = 2, a nonzero weight sum afterwards.
    #[test]
    fn averaging_starts_halfway() {
        let problem = parabola();
        let opts = StochOptions::new(StochOptimizer::Asg, 2, 2, 0.1, 0.0).unwrap();
        let mut solver = SgSolver::averaged(&opts, 1);
        let mut x = array![0.0];

        solver.iterate(&problem, &mut x, 0);
        solver.iterate(&problem, &mut x, 1);
        assert_eq!(solver.xavg.weights_sum(), 0.0);
        assert_eq!(solver.monitored(&x), x);

        solver.iterate(&problem, &mut x, 2);
        solver.iterate(&problem, &mut x, 3);
        assert_eq!(solver.xavg.weights_sum(), 2.0);
    }
}
