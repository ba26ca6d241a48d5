//! Closure-based description of an unconstrained smooth problem.
//!
//! Purpose
//! -------
//! Wrap a user-supplied objective `f(x)` (and optionally its analytic
//! gradient) behind one evaluation surface with call counting and a
//! central finite-difference fallback, so the solver layer never cares
//! which flavor it was given.
//!
//! Key behaviors
//! -------------
//! - [`Problem::eval`] counts one function call per invocation.
//! - [`Problem::eval_grad`] uses the analytic gradient when present
//!   (counting one function and one gradient call); otherwise it falls
//!   back to central finite differences via `finitediff` and counts only
//!   the one monitored function call — the difference probes are not
//!   billed to the counters.
//! - [`Problem::grad_accuracy`] reports the relative mismatch between the
//!   analytic and finite-difference gradients, for checking hand-derived
//!   gradients before a long run.
//!
//! Invariants & assumptions
//! ------------------------
//! - The objective may return non-finite values; callers (line searches,
//!   stochastic loops) are responsible for treating those as rejections.
//! - Counters are interior-mutable so a `&Problem` can be shared freely
//!   by the solver layer.
use std::cell::Cell;

use finitediff::FiniteDiff;

use crate::optimization::types::{inf_norm, Grad, Point, Scalar};

/// Unconstrained smooth optimization problem described by closures.
pub struct Problem {
    op_size: Box<dyn Fn() -> usize>,
    op_fval: Box<dyn Fn(&Point) -> Scalar>,
    op_grad: Option<Box<dyn Fn(&Point) -> (Scalar, Grad)>>,
    fcalls: Cell<usize>,
    gcalls: Cell<usize>,
}

impl Problem {
    /// Problem with no analytic gradient; [`Problem::eval_grad`] falls
    /// back to central finite differences.
    pub fn new(
        op_size: impl Fn() -> usize + 'static, op_fval: impl Fn(&Point) -> Scalar + 'static,
    ) -> Self {
        Self {
            op_size: Box::new(op_size),
            op_fval: Box::new(op_fval),
            op_grad: None,
            fcalls: Cell::new(0),
            gcalls: Cell::new(0),
        }
    }

    /// Problem with an analytic gradient. The gradient closure returns the
    /// function value alongside the gradient so both come from one pass.
    pub fn with_gradient(
        op_size: impl Fn() -> usize + 'static, op_fval: impl Fn(&Point) -> Scalar + 'static,
        op_grad: impl Fn(&Point) -> (Scalar, Grad) + 'static,
    ) -> Self {
        Self {
            op_size: Box::new(op_size),
            op_fval: Box::new(op_fval),
            op_grad: Some(Box::new(op_grad)),
            fcalls: Cell::new(0),
            gcalls: Cell::new(0),
        }
    }

    /// Number of dimensions.
    pub fn size(&self) -> usize {
        (self.op_size)()
    }

    /// Whether an analytic gradient was supplied.
    pub fn has_gradient(&self) -> bool {
        self.op_grad.is_some()
    }

    /// Evaluate the objective at `x`. Counts one function call.
    pub fn eval(&self, x: &Point) -> Scalar {
        self.fcalls.set(self.fcalls.get() + 1);
        (self.op_fval)(x)
    }

    /// Evaluate the objective and its gradient at `x`.
    ///
    /// With an analytic gradient this counts one function and one gradient
    /// call; with the finite-difference fallback only the monitored
    /// function evaluation is counted.
    pub fn eval_grad(&self, x: &Point) -> (Scalar, Grad) {
        match &self.op_grad {
            Some(op) => {
                self.fcalls.set(self.fcalls.get() + 1);
                self.gcalls.set(self.gcalls.get() + 1);
                op(x)
            }
            None => {
                let g = self.fd_grad(x);
                (self.eval(x), g)
            }
        }
    }

    /// Relative mismatch between the analytic and central finite-difference
    /// gradients at `x`: `||g − g_fd||_inf / (1 + |f|)`.
    ///
    /// Returns 0.0 when no analytic gradient is available (there is nothing
    /// to compare against).
    pub fn grad_accuracy(&self, x: &Point) -> Scalar {
        match &self.op_grad {
            Some(op) => {
                let (f, g) = op(x);
                let g_fd = self.fd_grad(x);
                inf_norm(&(&g - &g_fd)) / (1.0 + f.abs())
            }
            None => 0.0,
        }
    }

    /// Function evaluations so far.
    pub fn fcalls(&self) -> usize {
        self.fcalls.get()
    }

    /// Gradient evaluations so far.
    pub fn gcalls(&self) -> usize {
        self.gcalls.get()
    }

    /// Reset both evaluation counters to zero.
    pub fn reset_calls(&self) {
        self.fcalls.set(0);
        self.gcalls.set(0);
    }

    fn fd_grad(&self, x: &Point) -> Grad {
        x.central_diff(&|probe: &Point| (self.op_fval)(probe))
    }
}
