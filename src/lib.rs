//! descent — unconstrained smooth optimization over closure problems.
//!
//! The crate has two halves:
//!
//! - [`optimization`]: the solver core. A [`optimization::Problem`] wraps
//!   size/value/gradient closures; [`optimization::minimize_batch`] runs
//!   the line-search solvers (GD, CGD, L-BFGS) and
//!   [`optimization::minimize_stoch`] the epoch-based stochastic family
//!   (SGD, ASGD, AdaGrad, AdaDelta, SGA, SIA, NAG). Both report through
//!   one [`optimization::State`].
//! - [`parallel`]: a FIFO [`parallel::ThreadPool`] and a deterministic
//!   [`parallel::ParallelAccumulator`] for spreading per-sample loss
//!   accumulation across workers, typically feeding the `Problem`
//!   closures of a batch run.
//!
//! ```no_run
//! use descent::prelude::*;
//!
//! fn main() -> OptResult<()> {
//!     let problem = Problem::with_gradient(
//!         || 2,
//!         |x| x[0] * x[0] + 10.0 * x[1] * x[1],
//!         |x| {
//!             let f = x[0] * x[0] + 10.0 * x[1] * x[1];
//!             (f, ndarray::array![2.0 * x[0], 20.0 * x[1]])
//!         },
//!     );
//!     let opts = BatchOptions::new(BatchOptimizer::Lbfgs, 100, 1e-6)?;
//!     let state = minimize_batch(&problem, &ndarray::array![3.0, 4.0], &opts)?;
//!     println!("{}: f = {:.3e}", state.status(), state.f);
//!     Ok(())
//! }
//! ```

pub mod optimization;
pub mod parallel;

pub use crate::optimization::errors::{OptError, OptResult};

/// One-line import of the whole public surface.
pub mod prelude {
    pub use crate::optimization::prelude::*;
    pub use crate::parallel::prelude::*;
}
