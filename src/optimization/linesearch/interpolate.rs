//! Interpolation line search: bracketing plus zoom.
//!
//! Purpose
//! -------
//! Find a step satisfying the strong Wolfe conditions by first growing a
//! bracket around an acceptable region (t ← min(max, 3t)) and then
//! shrinking it with `zoom`, which proposes trial points from bisection,
//! quadratic and cubic fits, and a secant step, keeping the valid
//! candidate closest to the current low end.
//!
//! Invariants & assumptions
//! ------------------------
//! - The caller guarantees a descent direction (`gphi0 < 0`).
//! - Trial points are only accepted strictly inside the shrunken bracket
//!   `(tmin + teps, tmax − teps)` with `teps = (tmax − tmin)/20`;
//!   bisection always qualifies, so zoom never stalls for lack of a
//!   candidate.
//! - Zoom gives up once the bracket collapses below `LsStep::minimum()`
//!   or its trial budget runs out.
use crate::optimization::{
    interpolation::{bisection, secant, Cubic, Quadratic},
    linesearch::step::LsStep,
    types::Scalar,
};

const MAX_BRACKET_TRIALS: usize = 64;
const MAX_ZOOM_TRIALS: usize = 64;
const BRACKET_GROWTH: Scalar = 3.0;

pub(super) fn search<'a>(
    step: LsStep<'a>, c1: Scalar, c2: Scalar, t0: Scalar,
) -> Option<LsStep<'a>> {
    let mut prev = step.clone();
    let mut step = step;
    let mut t = t0;

    for trial in 0..MAX_BRACKET_TRIALS {
        if !step.reset(t) {
            return None;
        }

        // The acceptable region lies between `prev` and `step` once the
        // value stops decreasing or overshoots the Armijo bound.
        if !step.has_armijo(c1) || (trial > 0 && step.phi() >= prev.phi()) {
            return zoom(prev, step, c1, c2);
        }
        if step.has_strong_wolfe(c2) {
            return Some(step);
        }
        if step.gphi() >= 0.0 {
            return zoom(step.clone(), prev, c1, c2);
        }

        prev = step.clone();
        t = (t * BRACKET_GROWTH).min(LsStep::maximum());
    }
    None
}

/// Shrink the bracket `[lo, hi]` (function value at `lo` is the smaller
/// one) until a strong-Wolfe point is found.
fn zoom<'a>(
    mut lo: LsStep<'a>, mut hi: LsStep<'a>, c1: Scalar, c2: Scalar,
) -> Option<LsStep<'a>> {
    let mut candidate = lo.clone();

    for _ in 0..MAX_ZOOM_TRIALS {
        let tmin = lo.alpha().min(hi.alpha());
        let tmax = lo.alpha().max(hi.alpha());
        if tmax - tmin < LsStep::minimum() {
            return None;
        }

        let t = trial_step(&lo, &hi, tmin, tmax);
        if !candidate.reset(t) {
            return None;
        }

        if !candidate.has_armijo(c1) || candidate.phi() >= lo.phi() {
            hi = candidate.clone();
        } else {
            if candidate.has_strong_wolfe(c2) {
                return Some(candidate);
            }
            if candidate.gphi() * (hi.alpha() - lo.alpha()) >= 0.0 {
                hi = lo.clone();
            }
            lo = candidate.clone();
        }
    }
    None
}

/// Propose the next zoom trial: among bisection, the quadratic extremum,
/// both cubic extrema, and the secant step, keep the candidates strictly
/// inside the shrunken bracket and pick the one closest to `lo`.
fn trial_step(
    lo: &LsStep<'_>, hi: &LsStep<'_>, tmin: Scalar, tmax: Scalar,
) -> Scalar {
    let teps = (tmax - tmin) / 20.0;
    let inside = |t: Scalar| t > tmin + teps && t < tmax - teps;

    let mut trials: Vec<Scalar> = Vec::with_capacity(5);
    trials.push(bisection(lo.alpha(), hi.alpha()));

    let quad = Quadratic::fit(lo.alpha(), lo.phi(), lo.gphi(), hi.alpha(), hi.phi());
    if let Some(t) = quad.extremum() {
        trials.push(t);
    }

    let cubic = Cubic::fit(lo.alpha(), lo.phi(), lo.gphi(), hi.alpha(), hi.phi(), hi.gphi());
    if let Some((t1, t2)) = cubic.extrema() {
        trials.push(t1);
        trials.push(t2);
    }

    if let Some(t) = secant(lo.alpha(), lo.gphi(), hi.alpha(), hi.gphi()) {
        trials.push(t);
    }

    // Bisection is always inside the shrunken bracket, so a best trial
    // exists.
    trials
        .into_iter()
        .filter(|&t| inside(t))
        .min_by(|a, b| {
            let da = (a - lo.alpha()).abs();
            let db = (b - lo.alpha()).abs();
            da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
        })
        .unwrap_or_else(|| bisection(tmin, tmax))
}

#[cfg(test)]
mod tests {
    //! Scope
    //! -----
    //! These tests cover bracket/zoom acceptance on 1-D restrictions with
    //! known minimizers. They intentionally DO NOT cover the batch loops
    //! built on top of the search.
    use ndarray::array;

    use super::*;
    use crate::optimization::{problem::Problem, state::State, types::Point};

    fn restriction(x0: f64, d: f64) -> (Problem, State) {
        let problem = Problem::with_gradient(
            || 1,
            |x: &Point| x[0] * x[0],
            |x: &Point| (x[0] * x[0], array![2.0 * x[0]]),
        );
        let mut state = State::new(&problem, &array![x0]);
        state.d = array![d];
        (problem, state)
    }

    // Purpose: the search lands near the exact line minimizer.
    // Given: phi(t) = (5 − t)² with t0 = 1 and tight c2.
    // Expect: a strong-Wolfe step close to t = 5.
    #[test]
    fn finds_strong_wolfe_step_on_parabola() {
        let (problem, state) = restriction(5.0, -1.0);
        let step = LsStep::new(&problem, &state);

        let found = search(step, 1e-4, 0.1, 1.0).expect("search should succeed");
        assert!(found.has_armijo(1e-4));
        assert!(found.has_strong_wolfe(0.1));
        assert!((found.alpha() - 5.0).abs() < 1.0);
    }

    // Purpose: an immediately acceptable unit step is returned as-is.
    // Given: phi(t) = (1 − t)² with t0 = 1 (the minimizer).
    #[test]
    fn accepts_exact_unit_step() {
        let (problem, state) = restriction(1.0, -1.0);
        let step = LsStep::new(&problem, &state);

        let found = search(step, 1e-4, 0.9, 1.0).expect("search should succeed");
        assert_eq!(found.alpha(), 1.0);
    }

    // Purpose: trial proposals stay strictly inside the bracket.
    // Given: a lo/hi pair on phi(t) = (5 − t)².
    // Expect: the proposal lies in (tmin + teps, tmax − teps).
    #[test]
    fn trial_step_stays_inside_bracket() {
        let (problem, state) = restriction(5.0, -1.0);
        let mut lo = LsStep::new(&problem, &state);
        let mut hi = lo.clone();
        assert!(lo.reset(2.0));
        assert!(hi.reset(9.0));

        let t = trial_step(&lo, &hi, 2.0, 9.0);
        let teps = 7.0 / 20.0;
        assert!(t > 2.0 + teps && t < 9.0 - teps);
        // The quadratic/cubic fits should pull the proposal toward the
        // true minimizer at 5.
        assert!((t - 5.0).abs() < 1.5);
    }
}
