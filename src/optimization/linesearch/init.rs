//! Initial step-length policies for the line searches.
use std::str::FromStr;

use crate::optimization::{
    errors::{OptError, OptResult},
    linesearch::step::LsStep,
    state::State,
    types::Scalar,
};

/// How the first trial step of each line search is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LsInitializer {
    /// Always 1.0 (natural for quasi-Newton directions).
    Unit,
    /// Keep the previous directional decrease: `t_prev · gphi_prev / gphi`.
    Consistent,
    /// One-step quadratic model of the previous decrease:
    /// `min(1, 1.01 · 2(f − f_prev) / gphi)`.
    Quadratic,
}

impl FromStr for LsInitializer {
    type Err = OptError;

    fn from_str(name: &str) -> OptResult<Self> {
        match name.to_ascii_lowercase().as_str() {
            "unit" => Ok(LsInitializer::Unit),
            "consistent" => Ok(LsInitializer::Consistent),
            "quadratic" => Ok(LsInitializer::Quadratic),
            _ => Err(OptError::InvalidName {
                name: name.to_string(),
                reason: "Expected 'unit', 'consistent', or 'quadratic'.",
            }),
        }
    }
}

/// Stateful initial-step generator; the first call always yields 1.0.
#[derive(Debug, Clone)]
pub struct StepInit {
    kind: LsInitializer,
    first: bool,
    prev_f: Scalar,
    prev_gphi: Scalar,
    prev_t: Scalar,
}

impl StepInit {
    pub fn new(kind: LsInitializer) -> Self {
        Self { kind, first: true, prev_f: 0.0, prev_gphi: 0.0, prev_t: 1.0 }
    }

    /// Propose the initial trial step for the current state. Non-finite or
    /// out-of-range proposals fall back to 1.0 before clamping into
    /// `[LsStep::minimum(), LsStep::maximum()]`.
    pub fn t0(&mut self, state: &State) -> Scalar {
        let gphi = state.descent();
        let mut t = if self.first {
            1.0
        } else {
            match self.kind {
                LsInitializer::Unit => 1.0,
                LsInitializer::Consistent => self.prev_t * self.prev_gphi / gphi,
                LsInitializer::Quadratic => {
                    (1.01 * 2.0 * (state.f - self.prev_f) / gphi).min(1.0)
                }
            }
        };
        if !t.is_finite() || t <= 0.0 {
            t = 1.0;
        }
        t = t.clamp(LsStep::minimum(), LsStep::maximum());

        self.first = false;
        self.prev_f = state.f;
        self.prev_gphi = gphi;
        self.prev_t = t;
        t
    }
}
