//! Batch (full-gradient) solvers sharing one descent loop.
//!
//! Purpose
//! -------
//! Run gradient descent, nonlinear conjugate gradient, or L-BFGS over a
//! [`Problem`] until convergence, a line-search failure, cancellation, or
//! an exhausted iteration budget. All three share the loop in
//! [`batch_loop`]: check convergence, ask the direction strategy for `d`,
//! verify descent (restarting to steepest descent once if needed),
//! line-search, accept, and report to the update log.
//!
//! Key behaviors
//! -------------
//! - [`BatchOptions::new`] validates eagerly and installs per-optimizer
//!   line-search defaults (GD: quadratic init + Wolfe backtracking;
//!   CGD: quadratic init + interpolation; L-BFGS: unit init +
//!   interpolation).
//! - The update log runs after every accepted step; returning `false`
//!   cancels the run with [`Status::Stopped`].
//! - The final state carries the terminal [`Status`], iteration count,
//!   and the problem's evaluation counters.
use std::str::FromStr;

use crate::optimization::{
    errors::{OptError, OptResult},
    linesearch::{LineSearch, LsInitializer, LsStrategy, StepInit},
    problem::Problem,
    state::{State, Status},
    types::{Point, Scalar, DEFAULT_LBFGS_HISTORY},
    validation::{
        validate_starting_point, verify_epsilon, verify_history_size, verify_ls_coefficients,
        verify_max_iterations,
    },
};

pub mod cgd;
pub mod gd;
pub mod lbfgs;

pub use self::cgd::CgdUpdate;

/// Which batch solver to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchOptimizer {
    /// Steepest descent.
    Gd,
    /// Nonlinear conjugate gradient with the given beta formula.
    Cgd(CgdUpdate),
    /// Limited-memory BFGS (history size set on the options).
    Lbfgs,
}

impl std::fmt::Display for BatchOptimizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BatchOptimizer::Gd => write!(f, "gd"),
            BatchOptimizer::Cgd(update) => write!(f, "cgd-{update}"),
            BatchOptimizer::Lbfgs => write!(f, "lbfgs"),
        }
    }
}

impl FromStr for BatchOptimizer {
    type Err = OptError;

    fn from_str(name: &str) -> OptResult<Self> {
        let lower = name.to_ascii_lowercase();
        if lower == "gd" {
            return Ok(BatchOptimizer::Gd);
        }
        if lower == "lbfgs" {
            return Ok(BatchOptimizer::Lbfgs);
        }
        if let Some(update) = lower.strip_prefix("cgd-") {
            return Ok(BatchOptimizer::Cgd(update.parse()?));
        }
        Err(OptError::InvalidName {
            name: name.to_string(),
            reason: "Expected 'gd', 'lbfgs', or 'cgd-<update>'.",
        })
    }
}

/// Validated configuration for the batch solvers.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    pub optimizer: BatchOptimizer,
    pub max_iterations: usize,
    pub epsilon: Scalar,
    pub ls_initializer: LsInitializer,
    pub ls_strategy: LsStrategy,
    pub c1: Scalar,
    pub c2: Scalar,
    pub history: usize,
    pub verbose: bool,
}

impl BatchOptions {
    /// Build options with per-optimizer line-search defaults.
    ///
    /// # Errors
    /// - [`OptError::InvalidMaxIterations`] for a zero budget.
    /// - [`OptError::InvalidEpsilon`] for a non-finite or non-positive
    ///   epsilon.
    pub fn new(
        optimizer: BatchOptimizer, max_iterations: usize, epsilon: Scalar,
    ) -> OptResult<Self> {
        verify_max_iterations(max_iterations)?;
        verify_epsilon(epsilon)?;

        let (ls_initializer, ls_strategy, c1, c2) = match optimizer {
            BatchOptimizer::Gd => {
                (LsInitializer::Quadratic, LsStrategy::BacktrackWolfe, 1e-4, 0.1)
            }
            BatchOptimizer::Cgd(_) => {
                (LsInitializer::Quadratic, LsStrategy::Interpolation, 1e-4, 0.1)
            }
            BatchOptimizer::Lbfgs => (LsInitializer::Unit, LsStrategy::Interpolation, 1e-4, 0.9),
        };

        Ok(Self {
            optimizer,
            max_iterations,
            epsilon,
            ls_initializer,
            ls_strategy,
            c1,
            c2,
            history: DEFAULT_LBFGS_HISTORY,
            verbose: false,
        })
    }

    /// Override the line-search initializer and strategy.
    pub fn with_line_search(
        mut self, initializer: LsInitializer, strategy: LsStrategy,
    ) -> Self {
        self.ls_initializer = initializer;
        self.ls_strategy = strategy;
        self
    }

    /// Override the (c1, c2) coefficients.
    ///
    /// # Errors
    /// Returns [`OptError::InvalidLsCoefficients`] unless 0 < c1 < c2 < 1.
    pub fn with_coefficients(mut self, c1: Scalar, c2: Scalar) -> OptResult<Self> {
        verify_ls_coefficients(c1, c2)?;
        self.c1 = c1;
        self.c2 = c2;
        Ok(self)
    }

    /// Override the L-BFGS history size.
    ///
    /// # Errors
    /// Returns [`OptError::InvalidHistorySize`] for a zero history.
    pub fn with_history(mut self, history: usize) -> OptResult<Self> {
        verify_history_size(history)?;
        self.history = history;
        Ok(self)
    }

    /// Emit per-iteration progress records (requires the `obs_slog`
    /// feature to have any effect).
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}

/// Produces the next descent direction and records accepted steps.
pub(crate) trait DirectionStrategy {
    /// Write the next direction into `state.d`.
    fn direction(&mut self, state: &mut State);

    /// Observe an accepted step from `prev` to `state`.
    fn record(&mut self, _prev: &State, _state: &State) {}
}

/// Minimize `problem` from `x0` with the configured batch solver.
///
/// # Errors
/// - Starting-point validation errors.
/// - [`OptError::InvalidLsCoefficients`] when the options carry a bad
///   coefficient pair.
pub fn minimize_batch(
    problem: &Problem, x0: &Point, opts: &BatchOptions,
) -> OptResult<State> {
    minimize_batch_logged(problem, x0, opts, |_: &State| true)
}

/// Like [`minimize_batch`], invoking `ulog` after every accepted step;
/// returning `false` cancels the run with [`Status::Stopped`].
pub fn minimize_batch_logged(
    problem: &Problem, x0: &Point, opts: &BatchOptions,
    ulog: impl FnMut(&State) -> bool,
) -> OptResult<State> {
    validate_starting_point(problem, x0)?;
    if problem.size() == 0 {
        return Err(OptError::EmptyProblem);
    }
    let ls = LineSearch::new(opts.ls_strategy, opts.c1, opts.c2)?;

    match opts.optimizer {
        BatchOptimizer::Gd => batch_loop(problem, x0, opts, &ls, gd::GdDirection, ulog),
        BatchOptimizer::Cgd(update) => {
            batch_loop(problem, x0, opts, &ls, cgd::CgdDirection::new(update), ulog)
        }
        BatchOptimizer::Lbfgs => {
            batch_loop(problem, x0, opts, &ls, lbfgs::LbfgsDirection::new(opts.history), ulog)
        }
    }
}

fn batch_loop(
    problem: &Problem, x0: &Point, opts: &BatchOptions, ls: &LineSearch,
    mut strategy: impl DirectionStrategy, mut ulog: impl FnMut(&State) -> bool,
) -> OptResult<State> {
    let mut cstate = State::new(problem, x0);
    let mut init = StepInit::new(opts.ls_initializer);

    #[cfg(feature = "obs_slog")]
    let logger = opts.verbose.then(crate::optimization::observer::term_logger);

    for _ in 0..opts.max_iterations {
        if cstate.converged(opts.epsilon) {
            cstate.set_status(Status::Converged);
            break;
        }

        strategy.direction(&mut cstate);
        if !(cstate.descent() < 0.0) {
            // One steepest-descent restart; a second failure is terminal.
            cstate.d = -cstate.g.clone();
            if !(cstate.descent() < 0.0) {
                cstate.set_status(Status::LineSearchFailed);
                break;
            }
        }

        let t0 = init.t0(&cstate);
        let accepted = ls.search(problem, &cstate, t0).map(|step| step.into_parts());
        match accepted {
            Some((t, f, g)) => {
                let pstate = cstate.clone();
                cstate.accept(t, f, g);
                strategy.record(&pstate, &cstate);

                #[cfg(feature = "obs_slog")]
                if let Some(logger) = &logger {
                    slog::info!(logger, "batch step";
                        "iteration" => cstate.iterations(),
                        "f" => cstate.f,
                        "criterion" => cstate.convergence_criterion(),
                        "step" => t,
                    );
                }

                if !ulog(&cstate) {
                    cstate.set_status(Status::Stopped);
                    break;
                }
            }
            None => {
                cstate.set_status(Status::LineSearchFailed);
                break;
            }
        }
    }

    // Budget exhausted exactly at the solution still counts as converged.
    if cstate.status() == Status::MaxIterations && cstate.converged(opts.epsilon) {
        cstate.set_status(Status::Converged);
    }
    cstate.record_evals(problem);
    Ok(cstate)
}
