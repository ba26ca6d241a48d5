//! Decayed learning-rate schedules: `alpha_k = alpha0 / (k + 1)^p`.
use std::str::FromStr;

use crate::optimization::{
    errors::{OptError, OptResult},
    types::Scalar,
};

/// Decay exponent family for the averaging/accelerated solvers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecaySchedule {
    /// p = 1.0
    Unit,
    /// p = 0.75
    Qrt3,
    /// p = 0.5
    Sqrt,
}

impl DecaySchedule {
    pub fn exponent(self) -> Scalar {
        match self {
            DecaySchedule::Unit => 1.0,
            DecaySchedule::Qrt3 => 0.75,
            DecaySchedule::Sqrt => 0.5,
        }
    }
}

impl FromStr for DecaySchedule {
    type Err = OptError;

    fn from_str(name: &str) -> OptResult<Self> {
        match name.to_ascii_lowercase().as_str() {
            "unit" => Ok(DecaySchedule::Unit),
            "qrt3" => Ok(DecaySchedule::Qrt3),
            "sqrt" => Ok(DecaySchedule::Sqrt),
            _ => Err(OptError::InvalidName {
                name: name.to_string(),
                reason: "Expected 'unit', 'qrt3', or 'sqrt'.",
            }),
        }
    }
}

/// Stateful rate generator; `next()` yields `alpha0 / (k + 1)^p` for
/// k = 0, 1, 2, ...
#[derive(Debug, Clone)]
pub(crate) struct LearningRate {
    alpha0: Scalar,
    exponent: Scalar,
    k: usize,
}

impl LearningRate {
    pub(crate) fn new(alpha0: Scalar, schedule: DecaySchedule) -> Self {
        Self { alpha0, exponent: schedule.exponent(), k: 0 }
    }

    pub(crate) fn next(&mut self) -> Scalar {
        let alpha = self.alpha0 / ((self.k + 1) as Scalar).powf(self.exponent);
        self.k += 1;
        alpha
    }
}
