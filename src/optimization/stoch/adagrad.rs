//! AdaGrad: per-dimension rates from accumulated squared gradients.
use crate::optimization::{
    average::RunningVector,
    problem::Problem,
    stoch::{finite_update, StochOptions, StochSolver},
    types::{Point, Scalar},
};

pub(crate) struct AdaGradSolver {
    alpha0: Scalar,
    epsilon: Scalar,
    gavg2: RunningVector,
}

impl AdaGradSolver {
    pub(crate) fn new(opts: &StochOptions, dimensions: usize) -> Self {
        Self { alpha0: opts.alpha0, epsilon: opts.epsilon, gavg2: RunningVector::new(dimensions) }
    }
}

impl StochSolver for AdaGradSolver {
    fn iterate(&mut self, problem: &Problem, x: &mut Point, _k: usize) {
        let (f, g) = problem.eval_grad(x);
        if !finite_update(f, &g) {
            return;
        }

        self.gavg2.update(&g.mapv(|value| value * value), 1.0);

        let epsilon = self.epsilon;
        let avg = self.gavg2.average();
        let step: Point = ndarray::Zip::from(&g)
            .and(avg)
            .map_collect(|&gi, &ai| gi / (epsilon + ai).sqrt());
        x.scaled_add(-self.alpha0, &step);
    }
}
