//! One-dimensional step along a descent direction.
//!
//! `LsStep` tracks the restriction `phi(t) = f(x + t·d)` of the problem
//! to the current search line: the step length `alpha`, the value `phi`,
//! and the directional derivative `gphi`, against the line origin
//! `(phi0, gphi0)` captured at construction. The sufficient-decrease and
//! curvature predicates used by every strategy live here.
use crate::optimization::{
    problem::Problem,
    state::State,
    types::{Grad, Point, Scalar, EPS_MACHINE},
};

/// Evaluated candidate step along `state.d`, starting at `state.x`.
#[derive(Clone)]
pub struct LsStep<'a> {
    problem: &'a Problem,
    state: &'a State,
    phi0: Scalar,
    gphi0: Scalar,
    alpha: Scalar,
    phi: Scalar,
    gphi: Scalar,
    grad: Grad,
}

impl<'a> LsStep<'a> {
    /// Smallest usable step length.
    pub fn minimum() -> Scalar {
        10.0 * EPS_MACHINE
    }

    /// Largest usable step length.
    pub fn maximum() -> Scalar {
        1.0 / Self::minimum()
    }

    /// Step at the line origin (`alpha = 0`), capturing `phi0`/`gphi0`
    /// from the state's current value and direction.
    pub fn new(problem: &'a Problem, state: &'a State) -> Self {
        let gphi0 = state.descent();
        Self {
            problem,
            state,
            phi0: state.f,
            gphi0,
            alpha: 0.0,
            phi: state.f,
            gphi: gphi0,
            grad: state.g.clone(),
        }
    }

    /// Move the candidate to step length `t`, re-evaluating the problem.
    ///
    /// Returns `false` without touching the candidate when `t`, the value,
    /// or the directional derivative come out non-finite.
    pub fn reset(&mut self, t: Scalar) -> bool {
        if !t.is_finite() {
            return false;
        }
        let x: Point = &self.state.x + &(&self.state.d * t);
        let (f, g) = self.problem.eval_grad(&x);
        let gphi = g.dot(&self.state.d);
        if !f.is_finite() || !gphi.is_finite() {
            return false;
        }
        self.alpha = t;
        self.phi = f;
        self.gphi = gphi;
        self.grad = g;
        true
    }

    /// Sufficient decrease: `phi < phi0 + alpha·c1·gphi0`.
    pub fn has_armijo(&self, c1: Scalar) -> bool {
        self.phi < self.phi0 + self.alpha * c1 * self.gphi0
    }

    /// Curvature: `gphi >= c2·gphi0`.
    pub fn has_wolfe(&self, c2: Scalar) -> bool {
        self.gphi >= c2 * self.gphi0
    }

    /// Strong curvature: `|gphi| <= c2·|gphi0|`.
    pub fn has_strong_wolfe(&self, c2: Scalar) -> bool {
        self.gphi.abs() <= c2 * self.gphi0.abs()
    }

    pub fn alpha(&self) -> Scalar {
        self.alpha
    }

    pub fn phi(&self) -> Scalar {
        self.phi
    }

    pub fn gphi(&self) -> Scalar {
        self.gphi
    }

    pub fn phi0(&self) -> Scalar {
        self.phi0
    }

    pub fn gphi0(&self) -> Scalar {
        self.gphi0
    }

    /// Consume the step, yielding `(alpha, phi, gradient)` for acceptance
    /// into a [`State`].
    pub fn into_parts(self) -> (Scalar, Scalar, Grad) {
        (self.alpha, self.phi, self.grad)
    }
}
