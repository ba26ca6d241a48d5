//! Validation helpers for optimizer configuration and inputs.
//!
//! This module centralizes the consistency checks used across the solver
//! surface:
//!
//! - **Scalar checks**: [`verify_epsilon`], [`verify_learning_rate`],
//!   [`verify_decay`], [`verify_momentum`], [`verify_regularization`]
//!   enforce finiteness and the sign/range each option requires.
//! - **Count checks**: [`verify_max_iterations`], [`verify_epochs`],
//!   [`verify_epoch_size`], [`verify_history_size`] reject zero budgets.
//! - **Line-search coefficients**: [`verify_ls_coefficients`] enforces
//!   0 < c1 < c2 < 1.
//! - **Starting points**: [`validate_starting_point`] enforces the problem
//!   dimension and finite entries.
//!
//! These helpers standardize error reporting by returning domain-specific
//! [`OptError`] variants, so option constructors stay uniform.
use crate::optimization::{
    errors::{OptError, OptResult},
    problem::Problem,
    types::{Point, Scalar},
};

/// Validate the convergence epsilon: finite and strictly positive.
///
/// # Errors
/// Returns [`OptError::InvalidEpsilon`] if the value is non-finite or ≤ 0.0.
pub fn verify_epsilon(epsilon: Scalar) -> OptResult<()> {
    if !epsilon.is_finite() {
        return Err(OptError::InvalidEpsilon { value: epsilon, reason: "Epsilon must be finite." });
    }
    if epsilon <= 0.0 {
        return Err(OptError::InvalidEpsilon {
            value: epsilon,
            reason: "Epsilon must be positive.",
        });
    }
    Ok(())
}

/// Validate the iteration budget: at least 1.
///
/// # Errors
/// Returns [`OptError::InvalidMaxIterations`] for a zero budget.
pub fn verify_max_iterations(max_iterations: usize) -> OptResult<()> {
    if max_iterations == 0 {
        return Err(OptError::InvalidMaxIterations {
            value: max_iterations,
            reason: "At least one iteration is required.",
        });
    }
    Ok(())
}

/// Validate the epoch count: at least 1.
///
/// # Errors
/// Returns [`OptError::InvalidEpochs`] for a zero count.
pub fn verify_epochs(epochs: usize) -> OptResult<()> {
    if epochs == 0 {
        return Err(OptError::InvalidEpochs {
            value: epochs,
            reason: "At least one epoch is required.",
        });
    }
    Ok(())
}

/// Validate the epoch size: at least 1 inner iteration per epoch.
///
/// # Errors
/// Returns [`OptError::InvalidEpochSize`] for a zero size.
pub fn verify_epoch_size(epoch_size: usize) -> OptResult<()> {
    if epoch_size == 0 {
        return Err(OptError::InvalidEpochSize {
            value: epoch_size,
            reason: "At least one iteration per epoch is required.",
        });
    }
    Ok(())
}

/// Validate the initial learning rate: finite and strictly positive.
///
/// # Errors
/// Returns [`OptError::InvalidLearningRate`] if non-finite or ≤ 0.0.
pub fn verify_learning_rate(alpha0: Scalar) -> OptResult<()> {
    if !alpha0.is_finite() {
        return Err(OptError::InvalidLearningRate {
            value: alpha0,
            reason: "Learning rate must be finite.",
        });
    }
    if alpha0 <= 0.0 {
        return Err(OptError::InvalidLearningRate {
            value: alpha0,
            reason: "Learning rate must be positive.",
        });
    }
    Ok(())
}

/// Validate a decay / regularization factor: finite and non-negative.
///
/// # Errors
/// Returns [`OptError::InvalidDecay`] if non-finite or < 0.0.
pub fn verify_decay(decay: Scalar) -> OptResult<()> {
    if !decay.is_finite() {
        return Err(OptError::InvalidDecay { value: decay, reason: "Decay must be finite." });
    }
    if decay < 0.0 {
        return Err(OptError::InvalidDecay { value: decay, reason: "Decay must be non-negative." });
    }
    Ok(())
}

/// Validate a momentum factor: strictly inside (0, 1).
///
/// # Errors
/// Returns [`OptError::InvalidMomentum`] if non-finite or outside (0, 1).
pub fn verify_momentum(momentum: Scalar) -> OptResult<()> {
    if !momentum.is_finite() || momentum <= 0.0 || momentum >= 1.0 {
        return Err(OptError::InvalidMomentum {
            value: momentum,
            reason: "Momentum must lie strictly inside (0, 1).",
        });
    }
    Ok(())
}

/// Validate an L2 regularization weight: finite and non-negative.
///
/// # Errors
/// Returns [`OptError::InvalidRegularization`] if non-finite or < 0.0.
pub fn verify_regularization(lambda: Scalar) -> OptResult<()> {
    if !lambda.is_finite() || lambda < 0.0 {
        return Err(OptError::InvalidRegularization {
            value: lambda,
            reason: "Regularization weight must be finite and non-negative.",
        });
    }
    Ok(())
}

/// Validate the Armijo/curvature coefficient pair: 0 < c1 < c2 < 1.
///
/// # Errors
/// Returns [`OptError::InvalidLsCoefficients`] when the ordering fails.
pub fn verify_ls_coefficients(c1: Scalar, c2: Scalar) -> OptResult<()> {
    if !c1.is_finite() || !c2.is_finite() || c1 <= 0.0 || c1 >= c2 || c2 >= 1.0 {
        return Err(OptError::InvalidLsCoefficients {
            c1,
            c2,
            reason: "Coefficients must satisfy 0 < c1 < c2 < 1.",
        });
    }
    Ok(())
}

/// Validate the L-BFGS history size: at least 1 correction pair.
///
/// # Errors
/// Returns [`OptError::InvalidHistorySize`] for a zero history.
pub fn verify_history_size(history: usize) -> OptResult<()> {
    if history == 0 {
        return Err(OptError::InvalidHistorySize {
            value: history,
            reason: "At least one correction pair is required.",
        });
    }
    Ok(())
}

/// Validate a starting point against a problem: matching dimension and
/// finite entries.
///
/// # Errors
/// - [`OptError::StartingPointDimMismatch`] if the length differs from
///   `problem.size()`.
/// - [`OptError::InvalidStartingPoint`] with the index/value of the first
///   non-finite entry.
pub fn validate_starting_point(problem: &Problem, x0: &Point) -> OptResult<()> {
    if x0.len() != problem.size() {
        return Err(OptError::StartingPointDimMismatch {
            expected: problem.size(),
            found: x0.len(),
        });
    }
    for (index, &value) in x0.iter().enumerate() {
        if !value.is_finite() {
            return Err(OptError::InvalidStartingPoint {
                index,
                value,
                reason: "Starting point coordinates must be finite.",
            });
        }
    }
    Ok(())
}
