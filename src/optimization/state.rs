//! Iteration state shared by the batch and stochastic solvers.
//!
//! Purpose
//! -------
//! Bundle the current point, gradient, descent direction, and function
//! value with the bookkeeping every solver needs: iteration count,
//! evaluation counts, terminal status, a scale-invariant convergence
//! test, and an ordering by objective value.
//!
//! Conventions
//! -----------
//! - Convergence: `||g||_inf / (1 + |f|) < epsilon`.
//! - Ordering: states compare by `f`, with any non-finite `f` treated as
//!   `+inf` so poisoned states sort behind every finite one.
//! - The default status is [`Status::MaxIterations`]; loops overwrite it
//!   when they converge, fail a line search, or are cancelled.
use crate::optimization::{
    problem::Problem,
    types::{inf_norm, Grad, Point, Scalar},
};

/// Terminal condition of an optimization run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// The convergence criterion dropped below epsilon.
    Converged,
    /// The iteration / epoch budget ran out.
    MaxIterations,
    /// No acceptable step could be found along the search direction.
    LineSearchFailed,
    /// The update log requested cancellation.
    Stopped,
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Status::Converged => write!(f, "converged"),
            Status::MaxIterations => write!(f, "maximum iterations reached"),
            Status::LineSearchFailed => write!(f, "line-search failed"),
            Status::Stopped => write!(f, "stopped by caller"),
        }
    }
}

/// Current point `x`, gradient `g`, descent direction `d`, and value `f`,
/// plus run bookkeeping.
#[derive(Debug, Clone)]
pub struct State {
    pub x: Point,
    pub g: Grad,
    pub d: Point,
    pub f: Scalar,
    iterations: usize,
    fcalls: usize,
    gcalls: usize,
    status: Status,
}

impl State {
    /// Evaluate the problem at `x0` and build the initial state. The
    /// descent direction starts at zero.
    pub fn new(problem: &Problem, x0: &Point) -> Self {
        let (f, g) = problem.eval_grad(x0);
        Self {
            x: x0.clone(),
            d: Point::zeros(x0.len()),
            g,
            f,
            iterations: 0,
            fcalls: 0,
            gcalls: 0,
            status: Status::MaxIterations,
        }
    }

    /// Scale-invariant gradient norm: `||g||_inf / (1 + |f|)`.
    pub fn convergence_criterion(&self) -> Scalar {
        inf_norm(&self.g) / (1.0 + self.f.abs())
    }

    /// Whether the convergence criterion is below `epsilon`.
    pub fn converged(&self, epsilon: Scalar) -> bool {
        self.convergence_criterion() < epsilon
    }

    /// Directional derivative `dot(g, d)` along the current direction.
    pub fn descent(&self) -> Scalar {
        self.g.dot(&self.d)
    }

    /// Accept a line-search step of length `t` along `d`, with the value
    /// and gradient already evaluated at the new point.
    pub fn accept(
        &mut self, t: Scalar, f: Scalar, g: Grad,
    ) {
        self.x.scaled_add(t, &self.d);
        self.f = f;
        self.g = g;
        self.iterations += 1;
    }

    /// Re-evaluate the state at an arbitrary point (used by the epoch
    /// loops to monitor the current or averaged iterate).
    pub fn move_to(&mut self, problem: &Problem, x: &Point) {
        let (f, g) = problem.eval_grad(x);
        self.x.assign(x);
        self.f = f;
        self.g = g;
        self.iterations += 1;
    }

    /// Accepted iterations (batch) or monitored epochs (stochastic).
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Function evaluations recorded at the end of the run.
    pub fn fcalls(&self) -> usize {
        self.fcalls
    }

    /// Gradient evaluations recorded at the end of the run.
    pub fn gcalls(&self) -> usize {
        self.gcalls
    }

    /// Terminal status of the run that produced this state.
    pub fn status(&self) -> Status {
        self.status
    }

    pub(crate) fn set_status(&mut self, status: Status) {
        self.status = status;
    }

    pub(crate) fn record_evals(&mut self, problem: &Problem) {
        self.fcalls = problem.fcalls();
        self.gcalls = problem.gcalls();
    }

    fn sortable_f(&self) -> Scalar {
        if self.f.is_finite() {
            self.f
        } else {
            Scalar::INFINITY
        }
    }
}

impl PartialEq for State {
    fn eq(&self, other: &Self) -> bool {
        self.sortable_f() == other.sortable_f()
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        self.sortable_f().partial_cmp(&other.sortable_f())
    }
}
