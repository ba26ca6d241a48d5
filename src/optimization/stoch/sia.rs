//! Stochastic iterate averaging: plain decayed-rate SGD steps, with the
//! running average of the iterates as the reported point.
use crate::optimization::{
    average::RunningVector,
    problem::Problem,
    stoch::{finite_update, lrate::LearningRate, StochOptions, StochSolver},
    types::Point,
};

pub(crate) struct SiaSolver {
    lrate: LearningRate,
    xavg: RunningVector,
}

impl SiaSolver {
    pub(crate) fn new(opts: &StochOptions, dimensions: usize) -> Self {
        Self {
            lrate: LearningRate::new(opts.alpha0, opts.schedule),
            xavg: RunningVector::new(dimensions),
        }
    }
}

impl StochSolver for SiaSolver {
    fn iterate(&mut self, problem: &Problem, x: &mut Point, _k: usize) {
        let (f, g) = problem.eval_grad(x);
        if !finite_update(f, &g) {
            return;
        }

        let alpha = self.lrate.next();
        x.scaled_add(-alpha, &g);
        self.xavg.update(x, 1.0);
    }

    fn monitored(&self, x: &Point) -> Point {
        if self.xavg.weights_sum() > 0.0 {
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

    // Purpose: the monitored point is the mean of the visited iterates.
    // Given: two steps on f(x) = x² from x = 1 with alpha0 = 0.25.
    // Expect: monitored = (x1 + x2)/2, not the raw iterate.
    #[test]
    fn monitored_point_is_iterate_mean() {
        let problem = Problem::with_gradient(
            || 1,
            |x: &Point| x[0] * x[0],
            |x: &Point| (x[0] * x[0], array![2.0 * x[0]]),
        );
        let opts = StochOptions::new(StochOptimizer::Sia, 1, 2, 0.25, 0.0).unwrap();
        let mut solver = SiaSolver::new(&opts, 1);
        let mut x = array![1.0];

        solver.iterate(&problem, &mut x, 0); // x1 = 1 − 0.25·2 = 0.5
        let x1 = x[0];
        solver.iterate(&problem, &mut x, 1); // x2 = x1 − (0.25/√2)·2·x1
        let x2 = x[0];

        let monitored = solver.monitored(&x);
        assert!((monitored[0] - 0.5 * (x1 + x2)).abs() < 1e-12);
        assert!(monitored[0] != x2);
    }
}
