//! Canonical numeric aliases shared across the optimizer surface.
use ndarray::Array1;

/// Scalar type used throughout the crate.
pub type Scalar = f64;

/// Point in parameter space.
pub type Point = Array1<f64>;

/// Gradient vector, same shape as [`Point`].
pub type Grad = Array1<f64>;

/// Machine epsilon for [`Scalar`].
pub const EPS_MACHINE: Scalar = f64::EPSILON;

/// Default numerical epsilon for the adaptive stochastic methods.
pub const DEFAULT_ADA_EPSILON: Scalar = 1e-6;

/// Default L-BFGS history size.
pub const DEFAULT_LBFGS_HISTORY: usize = 6;

/// Infinity norm of a vector; 0.0 for the empty vector.
pub(crate) fn inf_norm(v: &Array1<f64>) -> Scalar {
    v.iter().fold(0.0_f64, |acc, &value| acc.max(value.abs()))
}
