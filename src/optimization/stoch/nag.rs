//! Nesterov's accelerated gradient with optional restarts.
//!
//! The lookahead point is `y = x + m·(x − x_prev)` with momentum
//! coefficient `m = (t − 1)/(t + 2)` for the internal counter `t`; the
//! gradient is evaluated at `y` and the step taken from there. A restart
//! resets the momentum counter only — the iterate and the learning-rate
//! schedule keep going.
use std::str::FromStr;

use crate::optimization::{
    errors::{OptError, OptResult},
    problem::Problem,
    stoch::{finite_update, lrate::LearningRate, StochOptions, StochSolver},
    types::{Point, Scalar},
};

/// When the momentum counter is reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestartPolicy {
    /// Never restart.
    None,
    /// Restart when the lookahead value increases.
    Function,
    /// Restart when the momentum points against the gradient.
    Gradient,
}

impl std::fmt::Display for RestartPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RestartPolicy::None => write!(f, "none"),
            RestartPolicy::Function => write!(f, "function"),
            RestartPolicy::Gradient => write!(f, "gradient"),
        }
    }
}

impl FromStr for RestartPolicy {
    type Err = OptError;

    fn from_str(name: &str) -> OptResult<Self> {
        match name.to_ascii_lowercase().as_str() {
            "none" => Ok(RestartPolicy::None),
            "function" => Ok(RestartPolicy::Function),
            "gradient" => Ok(RestartPolicy::Gradient),
            _ => Err(OptError::InvalidName {
                name: name.to_string(),
                reason: "Expected 'none', 'function', or 'gradient'.",
            }),
        }
    }
}

pub(crate) struct NagSolver {
    lrate: LearningRate,
    restart: RestartPolicy,
    xprev: Option<Point>,
    /// Momentum counter; m = (t − 1)/(t + 2), so t = 1 means no momentum.
    t: usize,
    prev_f: Scalar,
}

impl NagSolver {
    pub(crate) fn new(opts: &StochOptions, restart: RestartPolicy) -> Self {
        Self {
            lrate: LearningRate::new(opts.alpha0, opts.schedule),
            restart,
            xprev: None,
            t: 1,
            prev_f: Scalar::INFINITY,
        }
    }
}

impl StochSolver for NagSolver {
    fn iterate(&mut self, problem: &Problem, x: &mut Point, _k: usize) {
        let xprev = self.xprev.get_or_insert_with(|| x.clone());

        let m = (self.t as Scalar - 1.0) / (self.t as Scalar + 2.0);
        let mut y = x.clone();
        y.zip_mut_with(xprev, |yi, &pi| *yi += m * (*yi - pi));

        let (f, g) = problem.eval_grad(&y);
        if !finite_update(f, &g) {
            return;
        }

        let alpha = self.lrate.next();
        let mut xnext = y;
        xnext.scaled_add(-alpha, &g);

        let restart = match self.restart {
            RestartPolicy::None => false,
            RestartPolicy::Function => f > self.prev_f,
            RestartPolicy::Gradient => g.dot(&(&xnext - &*x)) > 0.0,
        };
        self.t = if restart { 1 } else { self.t + 1 };
        self.prev_f = f;

        self.xprev = Some(x.clone());
        *x = xnext;
    }
}

#[cfg(test)]
mod tests {
    use ndarray::array;

    use super::*;
    use crate::optimization::{
        stoch::{DecaySchedule, StochOptimizer, StochOptions},
        types::Point,
    };

    fn parabola() -> Problem {
        Problem::with_gradient(
            || 1,
            |x: &Point| (x[0] - 3.0) * (x[0] - 3.0),
            |x: &Point| ((x[0] - 3.0) * (x[0] - 3.0), array![2.0 * (x[0] - 3.0)]),
        )
    }

    fn options() -> StochOptions {
        StochOptions::new(StochOptimizer::Nag(RestartPolicy::None), 1, 10, 0.1, 0.0)
            .unwrap()
            .with_schedule(DecaySchedule::Sqrt)
    }

    // Purpose: the first step has no momentum (m = 0 at t = 1).
    // Given: x = 0 on the parabola, gradient −6, alpha = 0.1.
    // Expect: x moves to 0.6 exactly.
    #[test]
    fn first_step_is_plain_gradient_step() {
        let problem = parabola();
        let mut solver = NagSolver::new(&options(), RestartPolicy::None);
        let mut x = array![0.0];

        solver.iterate(&problem, &mut x, 0);
        assert!((x[0] - 0.6).abs() < 1e-12);
        assert_eq!(solver.t, 2);
    }

    // Purpose: momentum builds after the first step.
    // Given: two iterations; the second lookahead is y = x1 + m·(x1 − x0)
    //        with m = 1/4.
    // Expect: the second iterate matches the hand-rolled recursion.
    #[test]
    fn momentum_extrapolates_from_previous_iterate() {
        let problem = parabola();
        let mut solver = NagSolver::new(&options(), RestartPolicy::None);
        let mut x = array![0.0];
        solver.iterate(&problem, &mut x, 0); // x1 = 0.6

        solver.iterate(&problem, &mut x, 1);
        let m = 0.25;
        let y = 0.6 + m * (0.6 - 0.0);
        let alpha = 0.1 / 2.0_f64.sqrt();
        let expected = y - alpha * 2.0 * (y - 3.0);
        assert!((x[0] - expected).abs() < 1e-12);
    }

    // Purpose: a function restart resets the momentum counter only.
    // Given: a solver whose second lookahead value increases (forced by
    //        stepping uphill with a huge rate).
    // Expect: t back at 1 while the learning-rate schedule keeps
    //         decaying.
    #[test]
    fn function_restart_resets_counter() {
        // f(x) = x² with an overshooting rate: alpha0 = 2 diverges, so f
        // at the lookahead grows every step.
        let problem = Problem::with_gradient(
            || 1,
            |x: &Point| x[0] * x[0],
            |x: &Point| (x[0] * x[0], array![2.0 * x[0]]),
        );
        let opts = StochOptions::new(StochOptimizer::Nag(RestartPolicy::Function), 1, 4, 2.0, 0.0)
            .unwrap()
            .with_schedule(DecaySchedule::Unit);
        let mut solver = NagSolver::new(&opts, RestartPolicy::Function);
        let mut x = array![1.0];

        solver.iterate(&problem, &mut x, 0); // f(y) = 1, no restart baseline
        solver.iterate(&problem, &mut x, 1);
        // |x| grew, so the second lookahead value exceeded the first.
        assert_eq!(solver.t, 1);
    }
}
