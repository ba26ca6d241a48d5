//! parallel — thread pool and deterministic criterion accumulation.
//!
//! Purpose
//! -------
//! House the concurrency layer: a FIFO [`pool::ThreadPool`] over a mutex
//! and two condition variables, and a [`accumulator::ParallelAccumulator`]
//! that spreads per-sample [`accumulator::Criterion`] updates across the
//! pool without giving up reproducibility.
//!
//! Key behaviors
//! -------------
//! - Sample `i` always lands on worker `i mod nthreads`; worker caches
//!   merge in worker order, so a fixed worker count reproduces exactly.
//! - [`criterion::LossCriterion`] is the stock criterion: a per-sample
//!   loss closure with value/error statistics and L2 regularization.
//!
//! Conventions
//! -----------
//! - Poisoned locks are recovered, never propagated; a panicking task is
//!   documented as fatal to the batch being accumulated.
//! - Sample slices travel as `Arc<[Sample]>` so tasks share them without
//!   copies.
//!
//! Downstream usage
//! ----------------
//! Wrap a criterion in a `ParallelAccumulator` and expose its
//! `value`/`vgrad` through `Problem` closures to feed the batch solvers.
//!
//! Testing notes
//! -------------
//! Unit tests live next to each submodule; the determinism guarantee is
//! exercised end to end in the integration test.

pub mod accumulator;
pub mod criterion;
pub mod pool;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::accumulator::{Criterion, ParallelAccumulator};
pub use self::criterion::{EvalMode, LossCriterion, SampleLoss, Stats};
pub use self::pool::ThreadPool;

pub mod prelude {
    pub use super::accumulator::{Criterion, ParallelAccumulator};
    pub use super::criterion::{EvalMode, LossCriterion, SampleLoss, Stats};
    pub use super::pool::ThreadPool;
}
