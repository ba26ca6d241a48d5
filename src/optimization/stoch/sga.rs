//! Stochastic gradient averaging: step along the running average of the
//! gradients with a decayed rate.
use crate::optimization::{
    average::RunningVector,
    problem::Problem,
    stoch::{finite_update, lrate::LearningRate, StochOptions, StochSolver},
    types::Point,
};

pub(crate) struct SgaSolver {
    lrate: LearningRate,
    gavg: RunningVector,
}

impl SgaSolver {
    pub(crate) fn new(opts: &StochOptions, dimensions: usize) -> Self {
        Self {
            lrate: LearningRate::new(opts.alpha0, opts.schedule),
            gavg: RunningVector::new(dimensions),
        }
    }
}

impl StochSolver for SgaSolver {
    fn iterate(&mut self, problem: &Problem, x: &mut Point, _k: usize) {
        let (f, g) = problem.eval_grad(x);
        if !finite_update(f, &g) {
            return;
        }

        self.gavg.update(&g, 1.0);
        let alpha = self.lrate.next();
        x.scaled_add(-alpha, self.gavg.average());
    }
}
