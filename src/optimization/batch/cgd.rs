//! Nonlinear conjugate gradient directions.
//!
//! The direction is `d = −g + beta·d_prev`, with `beta` chosen by one of
//! the classic update formulas. The first iteration (and any restart
//! forced by the shared loop's descent check) falls back to steepest
//! descent.
use std::str::FromStr;

use crate::optimization::{
    batch::DirectionStrategy,
    errors::{OptError, OptResult},
    state::State,
    types::{Grad, Point, Scalar},
};

/// Beta formula for the conjugate-gradient update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CgdUpdate {
    /// Hestenes–Stiefel.
    Hs,
    /// Fletcher–Reeves.
    Fr,
    /// Polak–Ribière–Polyak, clamped at zero (PRP+).
    Prp,
    /// Conjugate descent (Fletcher).
    Cd,
    /// Liu–Storey.
    Ls,
    /// Dai–Yuan.
    Dy,
    /// Hager–Zhang.
    N,
    /// Hybrid Dai–Yuan / conjugate descent.
    DyCd,
    /// Hybrid Dai–Yuan / Hestenes–Stiefel.
    DyHs,
}

impl std::fmt::Display for CgdUpdate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            CgdUpdate::Hs => "hs",
            CgdUpdate::Fr => "fr",
            CgdUpdate::Prp => "prp",
            CgdUpdate::Cd => "cd",
            CgdUpdate::Ls => "ls",
            CgdUpdate::Dy => "dy",
            CgdUpdate::N => "n",
            CgdUpdate::DyCd => "dycd",
            CgdUpdate::DyHs => "dyhs",
        };
        write!(f, "{name}")
    }
}

impl FromStr for CgdUpdate {
    type Err = OptError;

    fn from_str(name: &str) -> OptResult<Self> {
        match name.to_ascii_lowercase().as_str() {
            "hs" => Ok(CgdUpdate::Hs),
            "fr" => Ok(CgdUpdate::Fr),
            "prp" => Ok(CgdUpdate::Prp),
            "cd" => Ok(CgdUpdate::Cd),
            "ls" => Ok(CgdUpdate::Ls),
            "dy" => Ok(CgdUpdate::Dy),
            "n" => Ok(CgdUpdate::N),
            "dycd" => Ok(CgdUpdate::DyCd),
            "dyhs" => Ok(CgdUpdate::DyHs),
            _ => Err(OptError::InvalidName {
                name: name.to_string(),
                reason: "Expected one of 'hs', 'fr', 'prp', 'cd', 'ls', 'dy', 'n', \
                         'dycd', 'dyhs'.",
            }),
        }
    }
}

impl CgdUpdate {
    /// Beta from the previous gradient/direction pair and the current
    /// gradient.
    pub fn beta(
        &self, pg: &Grad, pd: &Point, cg: &Grad,
    ) -> Scalar {
        let y = cg - pg;
        match self {
            CgdUpdate::Hs => cg.dot(&y) / pd.dot(&y),
            CgdUpdate::Fr => cg.dot(cg) / pg.dot(pg),
            CgdUpdate::Prp => (cg.dot(&y) / pg.dot(pg)).max(0.0),
            CgdUpdate::Cd => -cg.dot(cg) / pd.dot(pg),
            CgdUpdate::Ls => -cg.dot(&y) / pd.dot(pg),
            CgdUpdate::Dy => cg.dot(cg) / pd.dot(&y),
            CgdUpdate::N => {
                let div = pd.dot(&y);
                let scaled: Grad = &y - &(pd * (2.0 * y.dot(&y) / div));
                scaled.dot(cg) / div
            }
            CgdUpdate::DyCd => cg.dot(cg) / pd.dot(&y).max(-pd.dot(pg)),
            CgdUpdate::DyHs => {
                let dy = CgdUpdate::Dy.beta(pg, pd, cg);
                let hs = CgdUpdate::Hs.beta(pg, pd, cg);
                dy.min(hs).max(0.0)
            }
        }
    }
}

pub(crate) struct CgdDirection {
    update: CgdUpdate,
    prev: Option<(Grad, Point)>,
}

impl CgdDirection {
    pub(crate) fn new(update: CgdUpdate) -> Self {
        Self { update, prev: None }
    }
}

impl DirectionStrategy for CgdDirection {
    fn direction(&mut self, state: &mut State) {
        match &self.prev {
            None => state.d = -state.g.clone(),
            Some((pg, pd)) => {
                let beta = self.update.beta(pg, pd, &state.g);
                state.d = -&state.g + &(pd * beta);
            }
        }
    }

    fn record(&mut self, prev: &State, _state: &State) {
        // prev.d is the direction the accepted step walked along.
        self.prev = Some((prev.g.clone(), prev.d.clone()));
    }
}

#[cfg(test)]
mod tests {
    //! Scope
    //! -----
    //! These tests cover the beta formulas on hand-computed vectors and
    //! the first-iteration fallback. Convergence of the full CGD solver is
    //! covered by the batch-loop tests.
    use ndarray::array;

    use super::*;
    use crate::optimization::{problem::Problem, types::Point};

    // pg = (1, 0), pd = (−1, 0), cg = (0, 1) ⇒ y = (−1, 1).
    fn fixtures() -> (Grad, Point, Grad) {
        (array![1.0, 0.0], array![-1.0, 0.0], array![0.0, 1.0])
    }

    // Purpose: each formula matches its hand-computed value.
    #[test]
    fn beta_formulas_match_hand_computation() {
        let (pg, pd, cg) = fixtures();

        // HS: cg·y / pd·y = 1 / 1 = 1
        assert_eq!(CgdUpdate::Hs.beta(&pg, &pd, &cg), 1.0);
        // FR: |cg|² / |pg|² = 1
        assert_eq!(CgdUpdate::Fr.beta(&pg, &pd, &cg), 1.0);
        // PRP: cg·y / |pg|² = 1 (positive, no clamping)
        assert_eq!(CgdUpdate::Prp.beta(&pg, &pd, &cg), 1.0);
        // CD: −|cg|² / pd·pg = −1 / −1 = 1
        assert_eq!(CgdUpdate::Cd.beta(&pg, &pd, &cg), 1.0);
        // LS: −cg·y / pd·pg = −1 / −1 = 1
        assert_eq!(CgdUpdate::Ls.beta(&pg, &pd, &cg), 1.0);
        // DY: |cg|² / pd·y = 1
        assert_eq!(CgdUpdate::Dy.beta(&pg, &pd, &cg), 1.0);
        // DYCD and DYHS reduce to DY/HS here.
        assert_eq!(CgdUpdate::DyCd.beta(&pg, &pd, &cg), 1.0);
        assert_eq!(CgdUpdate::DyHs.beta(&pg, &pd, &cg), 1.0);
    }

    // Purpose: PRP clamps negative beta to zero (automatic restart).
    // Given: cg·y < 0.
    #[test]
    fn prp_clamps_to_zero() {
        let pg = array![1.0, 0.0];
        let pd = array![-1.0, 0.0];
        let cg = array![0.9, 0.0]; // y = (−0.1, 0) ⇒ cg·y < 0
        assert_eq!(CgdUpdate::Prp.beta(&pg, &pd, &cg), 0.0);
    }

    // Purpose: the Hager–Zhang formula matches its expansion.
    #[test]
    fn hager_zhang_matches_expansion() {
        let (pg, pd, cg) = fixtures();
        let y = &cg - &pg;
        let div = pd.dot(&y);
        let expected = (&y - &(&pd * (2.0 * y.dot(&y) / div))).dot(&cg) / div;
        assert_eq!(CgdUpdate::N.beta(&pg, &pd, &cg), expected);
    }

    // Purpose: the first direction is steepest descent.
    #[test]
    fn first_direction_is_steepest_descent() {
        let problem = Problem::with_gradient(
            || 2,
            |x: &Point| x.dot(x),
            |x: &Point| (x.dot(x), 2.0 * x),
        );
        let mut state = State::new(&problem, &array![1.0, 1.0]);
        let mut cgd = CgdDirection::new(CgdUpdate::Fr);

        cgd.direction(&mut state);
        assert_eq!(state.d, -state.g.clone());
    }
}
