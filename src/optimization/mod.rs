//! optimization — unconstrained smooth solvers over closure problems.
//!
//! Purpose
//! -------
//! Minimize objectives described by closures ([`problem::Problem`])
//! with batch solvers (GD, CGD, L-BFGS behind [`batch::minimize_batch`])
//! or stochastic solvers (the SGD family behind
//! [`stoch::minimize_stoch`]), all reporting through one
//! [`state::State`] carrying the terminal status, iteration count, and
//! evaluation counters.
//!
//! Key behaviors
//! -------------
//! - Gradients are analytic when supplied, central finite differences
//!   otherwise; [`problem::Problem::grad_accuracy`] cross-checks the two.
//! - Batch runs iterate direction → line search → acceptance until the
//!   scale-invariant criterion `||g||_inf / (1 + |f|)` drops below
//!   epsilon, the line search fails, the caller cancels, or the budget
//!   runs out.
//! - Stochastic runs monitor once per epoch and never let a non-finite
//!   inner update poison the iterate.
//!
//! Conventions
//! -----------
//! - Vectors are `ndarray::Array1<f64>` behind the [`types`] aliases.
//! - Configuration is validated eagerly: every `Options::new` and
//!   builder-style setter returns [`errors::OptResult`].
//! - This module and its children never intentionally panic in non-test
//!   code and use no `unsafe`.
//!
//! Downstream usage
//! ----------------
//! Most callers only need the re-exports below (or the crate prelude):
//! build a `Problem`, pick `BatchOptions` or `StochOptions`, and call the
//! matching `minimize_*` function.
//!
//! Testing notes
//! -------------
//! Unit tests live next to each submodule; the integration test drives a
//! full pipeline (parallel loss accumulation feeding a batch solver).

pub mod average;
pub mod batch;
pub mod errors;
pub mod interpolation;
pub mod linesearch;
#[cfg(feature = "obs_slog")]
pub(crate) mod observer;
pub mod problem;
pub mod state;
pub mod stoch;
pub mod types;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::batch::{
    minimize_batch, minimize_batch_logged, BatchOptimizer, BatchOptions, CgdUpdate,
};
pub use self::errors::{OptError, OptResult};
pub use self::problem::Problem;
pub use self::state::{State, Status};
pub use self::stoch::{
    minimize_stoch, minimize_stoch_logged, DecaySchedule, RestartPolicy, StochOptimizer,
    StochOptions,
};
pub use self::types::{Grad, Point, Scalar};

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use descent::optimization::prelude::*;
//
// to import the solver surface in a single line.

pub mod prelude {
    pub use super::batch::{minimize_batch, minimize_batch_logged, BatchOptimizer, BatchOptions};
    pub use super::errors::{OptError, OptResult};
    pub use super::linesearch::{LsInitializer, LsStrategy};
    pub use super::problem::Problem;
    pub use super::state::{State, Status};
    pub use super::stoch::{minimize_stoch, minimize_stoch_logged, StochOptimizer, StochOptions};
    pub use super::types::{Grad, Point, Scalar};
}
