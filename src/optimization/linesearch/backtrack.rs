//! Backtracking line searches (Armijo, Wolfe, strong Wolfe).
//!
//! The candidate step shrinks by 0.5 while sufficient decrease fails,
//! grows by 2.1 while the (plain Wolfe) curvature condition fails, and
//! shrinks again while the strong curvature bound fails. The search gives
//! up once the step leaves `[LsStep::minimum(), LsStep::maximum()]` or
//! the trial budget runs out.
use crate::optimization::{
    linesearch::{step::LsStep, LsStrategy},
    types::Scalar,
};

const MAX_TRIALS: usize = 64;
const DECREMENT: Scalar = 0.5;
const INCREMENT: Scalar = 2.1;

pub(super) fn search<'a>(
    mut step: LsStep<'a>, strategy: LsStrategy, c1: Scalar, c2: Scalar, t0: Scalar,
) -> Option<LsStep<'a>> {
    let mut t = t0;
    for _ in 0..MAX_TRIALS {
        if t < LsStep::minimum() || t > LsStep::maximum() {
            return None;
        }
        if !step.reset(t) {
            return None;
        }

        if !step.has_armijo(c1) {
            t *= DECREMENT;
            continue;
        }
        if strategy == LsStrategy::BacktrackArmijo {
            return Some(step);
        }

        if !step.has_wolfe(c2) {
            t *= INCREMENT;
            continue;
        }
        if strategy == LsStrategy::BacktrackWolfe {
            return Some(step);
        }

        if !step.has_strong_wolfe(c2) {
            t *= DECREMENT;
            continue;
        }
        return Some(step);
    }
    None
}
