//! Stochastic solvers sharing one epoch-driven loop.
//!
//! Purpose
//! -------
//! Run the SGD family over a [`Problem`] whose evaluations are typically
//! noisy (mini-batch or per-sample losses behind the closures). Each
//! solver implements [`StochSolver`]: an inner iteration that advances
//! the iterate, and a mapping from the raw iterate to the monitored point
//! (identity for most, the running average for the averaging methods).
//!
//! Key behaviors
//! -------------
//! - [`stoch_loop`] runs `epochs × epoch_size` inner iterations; after
//!   each epoch it fully evaluates the monitored point and invokes the
//!   update log, which can cancel the run ([`Status::Stopped`]).
//! - Inner updates whose value or gradient come out non-finite are
//!   skipped as no-ops; the iterate is never poisoned.
//! - Exhausting the epoch budget reports [`Status::MaxIterations`];
//!   convergence checking is left to the caller's update log.
//!
//! Invariants & assumptions
//! ------------------------
//! - `alpha0 > 0` finite, `decay >= 0` finite, `momentum` in (0, 1),
//!   `epsilon > 0` finite, enforced by [`StochOptions::new`] and the
//!   builder-style setters.
use std::str::FromStr;

use crate::optimization::{
    errors::{OptError, OptResult},
    problem::Problem,
    state::{State, Status},
    types::{Grad, Point, Scalar, DEFAULT_ADA_EPSILON},
    validation::{
        validate_starting_point, verify_decay, verify_epoch_size, verify_epochs, verify_epsilon,
        verify_learning_rate, verify_momentum,
    },
};

pub mod adadelta;
pub mod adagrad;
pub mod lrate;
pub mod nag;
pub mod sg;
pub mod sga;
pub mod sia;

pub use self::lrate::DecaySchedule;
pub use self::nag::RestartPolicy;

/// Which stochastic solver to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StochOptimizer {
    /// Plain stochastic gradient descent.
    Sg,
    /// SGD with iterate averaging over the second half of the run.
    Asg,
    /// Per-dimension adaptive rates from accumulated squared gradients.
    AdaGrad,
    /// AdaGrad plus squared-update rescaling; no learning rate.
    AdaDelta,
    /// Stochastic gradient averaging: steps along the averaged gradient.
    Sga,
    /// Stochastic iterate averaging: plain steps, averaged report.
    Sia,
    /// Nesterov's accelerated gradient with a restart policy.
    Nag(RestartPolicy),
}

impl std::fmt::Display for StochOptimizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StochOptimizer::Sg => write!(f, "sg"),
            StochOptimizer::Asg => write!(f, "asg"),
            StochOptimizer::AdaGrad => write!(f, "adagrad"),
            StochOptimizer::AdaDelta => write!(f, "adadelta"),
            StochOptimizer::Sga => write!(f, "sga"),
            StochOptimizer::Sia => write!(f, "sia"),
            StochOptimizer::Nag(policy) => write!(f, "nag-{policy}"),
        }
    }
}

impl FromStr for StochOptimizer {
    type Err = OptError;

    fn from_str(name: &str) -> OptResult<Self> {
        let lower = name.to_ascii_lowercase();
        match lower.as_str() {
            "sg" => return Ok(StochOptimizer::Sg),
            "asg" => return Ok(StochOptimizer::Asg),
            "adagrad" => return Ok(StochOptimizer::AdaGrad),
            "adadelta" => return Ok(StochOptimizer::AdaDelta),
            "sga" => return Ok(StochOptimizer::Sga),
            "sia" => return Ok(StochOptimizer::Sia),
            _ => {}
        }
        if let Some(policy) = lower.strip_prefix("nag-") {
            return Ok(StochOptimizer::Nag(policy.parse()?));
        }
        if lower == "nag" {
            return Ok(StochOptimizer::Nag(RestartPolicy::None));
        }
        Err(OptError::InvalidName {
            name: name.to_string(),
            reason: "Expected 'sg', 'asg', 'adagrad', 'adadelta', 'sga', 'sia', \
                     or 'nag[-<restart>]'.",
        })
    }
}

/// Validated configuration for the stochastic solvers.
#[derive(Debug, Clone)]
pub struct StochOptions {
    pub optimizer: StochOptimizer,
    pub epochs: usize,
    pub epoch_size: usize,
    /// Initial learning rate (gamma for the SGD family).
    pub alpha0: Scalar,
    /// Regularization/decay factor lambda for SGD/ASGD.
    pub decay: Scalar,
    /// Momentum for AdaDelta's moving averages.
    pub momentum: Scalar,
    /// Numerical floor for the adaptive denominators.
    pub epsilon: Scalar,
    /// Decay schedule for SGA/SIA/NAG.
    pub schedule: DecaySchedule,
    pub verbose: bool,
}

impl StochOptions {
    /// # Errors
    /// One of the stochastic-option variants of [`OptError`] when a value
    /// is out of range.
    pub fn new(
        optimizer: StochOptimizer, epochs: usize, epoch_size: usize, alpha0: Scalar,
        decay: Scalar,
    ) -> OptResult<Self> {
        verify_epochs(epochs)?;
        verify_epoch_size(epoch_size)?;
        verify_learning_rate(alpha0)?;
        verify_decay(decay)?;

        Ok(Self {
            optimizer,
            epochs,
            epoch_size,
            alpha0,
            decay,
            momentum: 0.9,
            epsilon: DEFAULT_ADA_EPSILON,
            schedule: DecaySchedule::Sqrt,
            verbose: false,
        })
    }

    /// Override AdaDelta's momentum.
    ///
    /// # Errors
    /// Returns [`OptError::InvalidMomentum`] outside (0, 1).
    pub fn with_momentum(mut self, momentum: Scalar) -> OptResult<Self> {
        verify_momentum(momentum)?;
        self.momentum = momentum;
        Ok(self)
    }

    /// Override the adaptive-denominator floor.
    ///
    /// # Errors
    /// Returns [`OptError::InvalidEpsilon`] for a non-finite or
    /// non-positive value.
    pub fn with_epsilon(mut self, epsilon: Scalar) -> OptResult<Self> {
        verify_epsilon(epsilon)?;
        self.epsilon = epsilon;
        Ok(self)
    }

    /// Override the decay schedule used by SGA/SIA/NAG.
    pub fn with_schedule(mut self, schedule: DecaySchedule) -> Self {
        self.schedule = schedule;
        self
    }

    /// Emit per-epoch progress records (requires the `obs_slog` feature
    /// to have any effect).
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Total inner iterations across the whole run.
    pub fn total_iterations(&self) -> usize {
        self.epochs * self.epoch_size
    }
}

/// One stochastic solver: the inner iteration plus the monitored-point
/// mapping.
pub(crate) trait StochSolver {
    /// Advance the iterate by one inner step; `k` is the global iteration
    /// index. Implementations must leave `x` untouched when the
    /// evaluation comes out non-finite.
    fn iterate(&mut self, problem: &Problem, x: &mut Point, k: usize);

    /// Point reported to the monitor; the raw iterate by default.
    fn monitored(&self, x: &Point) -> Point {
        x.clone()
    }
}

/// Whether an evaluated pair is safe to fold into the iterate.
pub(crate) fn finite_update(f: Scalar, g: &Grad) -> bool {
    f.is_finite() && g.iter().all(|value| value.is_finite())
}

/// Minimize `problem` from `x0` with the configured stochastic solver.
///
/// # Errors
/// Starting-point validation errors.
pub fn minimize_stoch(
    problem: &Problem, x0: &Point, opts: &StochOptions,
) -> OptResult<State> {
    minimize_stoch_logged(problem, x0, opts, |_: &State| true)
}

/// Like [`minimize_stoch`], invoking `ulog` after every epoch on the
/// monitored point; returning `false` cancels the run with
/// [`Status::Stopped`].
pub fn minimize_stoch_logged(
    problem: &Problem, x0: &Point, opts: &StochOptions,
    ulog: impl FnMut(&State) -> bool,
) -> OptResult<State> {
    validate_starting_point(problem, x0)?;
    if problem.size() == 0 {
        return Err(OptError::EmptyProblem);
    }

    let state = match opts.optimizer {
        StochOptimizer::Sg => {
            stoch_loop(problem, x0, opts, &mut sg::SgSolver::plain(opts), ulog)
        }
        StochOptimizer::Asg => {
            stoch_loop(problem, x0, opts, &mut sg::SgSolver::averaged(opts, x0.len()), ulog)
        }
        StochOptimizer::AdaGrad => {
            stoch_loop(problem, x0, opts, &mut adagrad::AdaGradSolver::new(opts, x0.len()), ulog)
        }
        StochOptimizer::AdaDelta => {
            stoch_loop(problem, x0, opts, &mut adadelta::AdaDeltaSolver::new(opts, x0.len()), ulog)
        }
        StochOptimizer::Sga => {
            stoch_loop(problem, x0, opts, &mut sga::SgaSolver::new(opts, x0.len()), ulog)
        }
        StochOptimizer::Sia => {
            stoch_loop(problem, x0, opts, &mut sia::SiaSolver::new(opts, x0.len()), ulog)
        }
        StochOptimizer::Nag(policy) => {
            stoch_loop(problem, x0, opts, &mut nag::NagSolver::new(opts, policy), ulog)
        }
    };
    Ok(state)
}

fn stoch_loop(
    problem: &Problem, x0: &Point, opts: &StochOptions, solver: &mut impl StochSolver,
    mut ulog: impl FnMut(&State) -> bool,
) -> State {
    let mut x = x0.clone();
    let mut fstate = State::new(problem, x0);
    let mut k = 0usize;

    #[cfg(feature = "obs_slog")]
    let logger = opts.verbose.then(crate::optimization::observer::term_logger);

    for _ in 0..opts.epochs {
        for _ in 0..opts.epoch_size {
            solver.iterate(problem, &mut x, k);
            k += 1;
        }

        let monitored = solver.monitored(&x);
        fstate.move_to(problem, &monitored);

        #[cfg(feature = "obs_slog")]
        if let Some(logger) = &logger {
            slog::info!(logger, "epoch";
                "epoch" => fstate.iterations(),
                "f" => fstate.f,
                "criterion" => fstate.convergence_criterion(),
            );
        }

        if !ulog(&fstate) {
            fstate.set_status(Status::Stopped);
            break;
        }
    }

    fstate.record_evals(problem);
    fstate
}

#[cfg(test)]
mod tests {
    //! Scope
    //! -----
    //! These tests cover option validation, loop mechanics (epoch counts,
    //! cancellation, non-finite skipping), and rough convergence of each
    //! solver on a smooth 1-D problem. They intentionally DO NOT assert
    //! tight tolerances: stochastic methods only have to make consistent
    //! progress here, since the closures are deterministic.
    use ndarray::array;

    use super::*;
    use crate::optimization::types::Point;

    fn parabola() -> Problem {
        // f(x) = (x − 3)², minimum at 3.
        Problem::with_gradient(
            || 1,
            |x: &Point| (x[0] - 3.0) * (x[0] - 3.0),
            |x: &Point| ((x[0] - 3.0) * (x[0] - 3.0), array![2.0 * (x[0] - 3.0)]),
        )
    }

    fn options(optimizer: StochOptimizer) -> StochOptions {
        StochOptions::new(optimizer, 20, 50, 0.1, 0.0).unwrap()
    }

    // Purpose: option validation rejects out-of-range values.
    #[test]
    fn option_validation() {
        assert!(StochOptions::new(StochOptimizer::Sg, 0, 10, 0.1, 0.0).is_err());
        assert!(StochOptions::new(StochOptimizer::Sg, 10, 0, 0.1, 0.0).is_err());
        assert!(StochOptions::new(StochOptimizer::Sg, 10, 10, 0.0, 0.0).is_err());
        assert!(StochOptions::new(StochOptimizer::Sg, 10, 10, 0.1, -1.0).is_err());
        let opts = options(StochOptimizer::Sg);
        assert!(opts.clone().with_momentum(1.5).is_err());
        assert!(opts.with_epsilon(0.0).is_err());
    }

    // Purpose: every solver makes progress on a smooth parabola.
    // Given: f(x) = (x − 3)² from x = 0.
    // Expect: the final value is well below the initial f = 9.
    #[test]
    fn all_solvers_descend_on_parabola() {
        let optimizers = [
            StochOptimizer::Sg,
            StochOptimizer::Asg,
            StochOptimizer::AdaGrad,
            StochOptimizer::AdaDelta,
            StochOptimizer::Sga,
            StochOptimizer::Sia,
            StochOptimizer::Nag(RestartPolicy::None),
            StochOptimizer::Nag(RestartPolicy::Function),
            StochOptimizer::Nag(RestartPolicy::Gradient),
        ];
        for optimizer in optimizers {
            let problem = parabola();
            let opts = options(optimizer);
            let state = minimize_stoch(&problem, &array![0.0], &opts).unwrap();

            assert_eq!(state.status(), Status::MaxIterations, "{optimizer}");
            assert!(state.f < 1.0, "{optimizer}: f = {} at x = {}", state.f, state.x[0]);
        }
    }

    // Purpose: the monitor sees one state per epoch and can cancel.
    // Given: a ulog cancelling after 3 epochs.
    // Expect: Status::Stopped with 3 monitored epochs.
    #[test]
    fn ulog_cancels_after_epochs() {
        let problem = parabola();
        let opts = options(StochOptimizer::Sg);
        let mut epochs_seen = 0usize;
        let state = minimize_stoch_logged(&problem, &array![0.0], &opts, |_s: &State| {
            epochs_seen += 1;
            epochs_seen < 3
        })
        .unwrap();

        assert_eq!(state.status(), Status::Stopped);
        assert_eq!(epochs_seen, 3);
    }

    // Purpose: non-finite evaluations never poison the iterate.
    // Given: an objective that always returns NaN gradients.
    // Expect: the iterate stays at the start after the full run.
    #[test]
    fn non_finite_updates_are_skipped() {
        let problem = Problem::with_gradient(
            || 1,
            |_x: &Point| Scalar::NAN,
            |_x: &Point| (Scalar::NAN, array![Scalar::NAN]),
        );
        let opts = StochOptions::new(StochOptimizer::Sg, 2, 10, 0.1, 0.0).unwrap();
        let state = minimize_stoch(&problem, &array![1.5], &opts).unwrap();

        assert_eq!(state.x, array![1.5]);
    }

    // Purpose: optimizer names parse, including the NAG restart suffix.
    #[test]
    fn optimizer_names_parse() {
        assert_eq!("sg".parse::<StochOptimizer>().unwrap(), StochOptimizer::Sg);
        assert_eq!(
            "nag-function".parse::<StochOptimizer>().unwrap(),
            StochOptimizer::Nag(RestartPolicy::Function)
        );
        assert_eq!(
            "NAG".parse::<StochOptimizer>().unwrap(),
            StochOptimizer::Nag(RestartPolicy::None)
        );
        assert!("adam".parse::<StochOptimizer>().is_err());
    }
}
