//! Line-search strategies over a 1-D step abstraction.
//!
//! Purpose
//! -------
//! Given a state with a descent direction, find a step length that
//! satisfies the sufficient-decrease and curvature conditions the calling
//! solver asked for. [`LsStep`] carries the evaluated candidate,
//! [`StepInit`] proposes the first trial length, and [`LineSearch`]
//! dispatches to the backtracking or interpolation strategy.
//!
//! Downstream usage
//! ----------------
//! The batch loop owns one [`StepInit`] and one [`LineSearch`] per run;
//! per iteration it calls [`LineSearch::search`] and accepts the returned
//! step into its state, or stops with a line-search failure on `None`.
use std::str::FromStr;

use crate::optimization::{
    errors::{OptError, OptResult},
    problem::Problem,
    state::State,
    types::Scalar,
    validation::verify_ls_coefficients,
};

pub mod backtrack;
pub mod init;
pub mod interpolate;
pub mod step;

pub use self::init::{LsInitializer, StepInit};
pub use self::step::LsStep;

/// Which acceptance conditions the search enforces and how it hunts for
/// them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LsStrategy {
    /// Backtracking to sufficient decrease only.
    BacktrackArmijo,
    /// Backtracking to the (plain) Wolfe conditions.
    BacktrackWolfe,
    /// Backtracking to the strong Wolfe conditions.
    BacktrackStrongWolfe,
    /// Bracketing plus zoom to the strong Wolfe conditions.
    Interpolation,
}

impl FromStr for LsStrategy {
    type Err = OptError;

    fn from_str(name: &str) -> OptResult<Self> {
        match name.to_ascii_lowercase().as_str() {
            "backtrack_armijo" | "armijo" => Ok(LsStrategy::BacktrackArmijo),
            "backtrack_wolfe" | "wolfe" => Ok(LsStrategy::BacktrackWolfe),
            "backtrack_strong_wolfe" | "strong_wolfe" => Ok(LsStrategy::BacktrackStrongWolfe),
            "interpolation" => Ok(LsStrategy::Interpolation),
            _ => Err(OptError::InvalidName {
                name: name.to_string(),
                reason: "Expected 'backtrack_armijo', 'backtrack_wolfe', \
                         'backtrack_strong_wolfe', or 'interpolation'.",
            }),
        }
    }
}

/// Configured line search: strategy plus the (c1, c2) coefficient pair.
#[derive(Debug, Clone, Copy)]
pub struct LineSearch {
    strategy: LsStrategy,
    c1: Scalar,
    c2: Scalar,
}

impl LineSearch {
    /// # Errors
    /// Returns [`OptError::InvalidLsCoefficients`] unless 0 < c1 < c2 < 1.
    pub fn new(strategy: LsStrategy, c1: Scalar, c2: Scalar) -> OptResult<Self> {
        verify_ls_coefficients(c1, c2)?;
        Ok(Self { strategy, c1, c2 })
    }

    /// Search along `state.d` starting from trial length `t0`.
    ///
    /// Returns `None` when `d` is not a descent direction or no acceptable
    /// step exists within the strategy's trial budget.
    pub fn search<'a>(
        &self, problem: &'a Problem, state: &'a State, t0: Scalar,
    ) -> Option<LsStep<'a>> {
        let step = LsStep::new(problem, state);
        // NaN-aware: a poisoned direction must not pass as descent.
        if !(step.gphi0() < 0.0) {
            return None;
        }
        match self.strategy {
            LsStrategy::BacktrackArmijo
            | LsStrategy::BacktrackWolfe
            | LsStrategy::BacktrackStrongWolfe => {
                backtrack::search(step, self.strategy, self.c1, self.c2, t0)
            }
            LsStrategy::Interpolation => interpolate::search(step, self.c1, self.c2, t0),
        }
    }
}
