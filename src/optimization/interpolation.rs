//! Quadratic and cubic interpolation through value/derivative data.
//!
//! Purpose
//! -------
//! Fit the unique low-order polynomial matching function values and
//! derivatives at one or two points, and expose its value, derivative,
//! validity, and interior extrema. The interpolation line search builds
//! its trial steps from these fits, plus the bisection and secant helpers
//! at the bottom of the module.
//!
//! Conventions
//! -----------
//! Both fits are stored shifted: the polynomial is evaluated in
//! `t = x − x0`, which keeps the coefficients well-scaled when the
//! abscissae are far from the origin. A fit is *valid* when all
//! coefficients are finite, the leading coefficient is nonzero, and (for
//! the cubic) the extrema are real.
use crate::optimization::types::Scalar;

/// Quadratic `p(x) = a·t² + g0·t + f0` with `t = x − x0`, matching
/// `p(x0) = f0`, `p'(x0) = g0`, `p(x1) = f1`.
#[derive(Debug, Clone, Copy)]
pub struct Quadratic {
    x0: Scalar,
    a: Scalar,
    b: Scalar,
    c: Scalar,
}

impl Quadratic {
    pub fn fit(
        x0: Scalar, f0: Scalar, g0: Scalar, x1: Scalar, f1: Scalar,
    ) -> Self {
        let h = x1 - x0;
        let a = (f1 - f0 - g0 * h) / (h * h);
        Self { x0, a, b: g0, c: f0 }
    }

    pub fn value(&self, x: Scalar) -> Scalar {
        let t = x - self.x0;
        (self.a * t + self.b) * t + self.c
    }

    pub fn gradient(&self, x: Scalar) -> Scalar {
        2.0 * self.a * (x - self.x0) + self.b
    }

    /// Finite coefficients with a nonzero leading term.
    pub fn is_valid(&self) -> bool {
        self.a.is_finite() && self.b.is_finite() && self.c.is_finite() && self.a != 0.0
    }

    /// Stationary point, when the fit is valid.
    pub fn extremum(&self) -> Option<Scalar> {
        if !self.is_valid() {
            return None;
        }
        let t = -self.b / (2.0 * self.a);
        t.is_finite().then(|| self.x0 + t)
    }
}

/// Cubic `p(x) = a·t³ + b·t² + g0·t + f0` with `t = x − x0`, matching
/// values and derivatives at both `x0` and `x1`.
#[derive(Debug, Clone, Copy)]
pub struct Cubic {
    x0: Scalar,
    a: Scalar,
    b: Scalar,
    c: Scalar,
    d: Scalar,
}

impl Cubic {
    pub fn fit(
        x0: Scalar, f0: Scalar, g0: Scalar, x1: Scalar, f1: Scalar, g1: Scalar,
    ) -> Self {
        let h = x1 - x0;
        let u = f1 - f0 - g0 * h;
        let v = g1 - g0;
        let a = (v * h - 2.0 * u) / (h * h * h);
        let b = (3.0 * u - v * h) / (h * h);
        Self { x0, a, b, c: g0, d: f0 }
    }

    pub fn value(&self, x: Scalar) -> Scalar {
        let t = x - self.x0;
        ((self.a * t + self.b) * t + self.c) * t + self.d
    }

    pub fn gradient(&self, x: Scalar) -> Scalar {
        let t = x - self.x0;
        (3.0 * self.a * t + 2.0 * self.b) * t + self.c
    }

    fn discriminant(&self) -> Scalar {
        self.b * self.b - 3.0 * self.a * self.c
    }

    /// Finite coefficients, nonzero leading term, real extrema.
    pub fn is_valid(&self) -> bool {
        self.a.is_finite()
            && self.b.is_finite()
            && self.c.is_finite()
            && self.d.is_finite()
            && self.a != 0.0
            && self.discriminant() >= 0.0
    }

    /// Both stationary points, when the fit is valid.
    pub fn extrema(&self) -> Option<(Scalar, Scalar)> {
        if !self.is_valid() {
            return None;
        }
        let root = self.discriminant().sqrt();
        let t1 = (-self.b - root) / (3.0 * self.a);
        let t2 = (-self.b + root) / (3.0 * self.a);
        (t1.is_finite() && t2.is_finite()).then(|| (self.x0 + t1, self.x0 + t2))
    }
}

/// Midpoint of two abscissae.
pub fn bisection(x0: Scalar, x1: Scalar) -> Scalar {
    0.5 * (x0 + x1)
}

/// Secant step through two derivative samples: the zero of the linear
/// interpolant of `g`. `None` when the derivatives coincide or the step
/// is not finite.
pub fn secant(
    x0: Scalar, g0: Scalar, x1: Scalar, g1: Scalar,
) -> Option<Scalar> {
    let t = (x0 * g1 - x1 * g0) / (g1 - g0);
    t.is_finite().then_some(t)
}

#[cfg(test)]
mod tests {
    //! Scope
    //! -----
    //! These tests cover fit correctness, validity flags, and extrema on
    //! known polynomials. They intentionally DO NOT cover the line search
    //! that consumes the fits.
    use super::*;

    // Purpose: the quadratic fit reproduces p(x) = (x − 2)² exactly.
    // Given: samples at x0 = 0 (f = 4, g = −4) and x1 = 1 (f = 1).
    // Expect: matching values/derivative and the extremum at 2.
    #[test]
    fn quadratic_recovers_parabola() {
        let q = Quadratic::fit(0.0, 4.0, -4.0, 1.0, 1.0);

        assert!(q.is_valid());
        assert!((q.value(3.0) - 1.0).abs() < 1e-12);
        assert!((q.gradient(2.0)).abs() < 1e-12);
        assert!((q.extremum().unwrap() - 2.0).abs() < 1e-12);
    }

    // Purpose: a degenerate (linear) sample set is flagged invalid.
    // Given: points on the line f(x) = 3x.
    // Expect: leading coefficient 0, no extremum.
    #[test]
    fn quadratic_rejects_linear_data() {
        let q = Quadratic::fit(0.0, 0.0, 3.0, 1.0, 3.0);
        assert!(!q.is_valid());
        assert!(q.extremum().is_none());
    }

    // Purpose: the cubic fit reproduces p(x) = x³ − 3x exactly.
    // Given: values/derivatives at x = 0 and x = 2.
    // Expect: correct interior values and extrema at ±1.
    #[test]
    fn cubic_recovers_known_cubic() {
        // f(0) = 0, f'(0) = −3, f(2) = 2, f'(2) = 9
        let c = Cubic::fit(0.0, 0.0, -3.0, 2.0, 2.0, 9.0);

        assert!(c.is_valid());
        assert!((c.value(1.0) + 2.0).abs() < 1e-12);
        assert!((c.gradient(1.0)).abs() < 1e-12);

        let (lo, hi) = c.extrema().unwrap();
        assert!((lo + 1.0).abs() < 1e-12);
        assert!((hi - 1.0).abs() < 1e-12);
    }

    // Purpose: a monotone cubic has no real extrema and is invalid.
    // Given: samples from f(x) = x³ + 3x (discriminant < 0).
    #[test]
    fn cubic_without_real_extrema_is_invalid() {
        let c = Cubic::fit(0.0, 0.0, 3.0, 1.0, 4.0, 6.0);
        assert!(!c.is_valid());
        assert!(c.extrema().is_none());
    }

    // Purpose: the secant helper finds the root of the derivative line.
    // Given: g(1) = −2, g(3) = 2.
    // Expect: step at 2; equal derivatives yield None.
    #[test]
    fn secant_and_bisection_steps() {
        assert_eq!(secant(1.0, -2.0, 3.0, 2.0), Some(2.0));
        assert_eq!(secant(1.0, 1.0, 3.0, 1.0), None);
        assert_eq!(bisection(1.0, 3.0), 2.0);
    }
}
