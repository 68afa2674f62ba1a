//! Brent's method root-finding solver.

use super::SolverConfig;
use crate::types::SolverError;
use num_traits::Float;
use tracing::trace;

/// Brent's method root finder.
///
/// Combines bisection, secant, and inverse quadratic interpolation for
/// robust root finding without requiring derivatives. Converges for any
/// continuous function with a valid bracket.
///
/// Used for bond yields, z-spreads and as the fallback of the implied
/// volatility search.
///
/// # Example
///
/// ```
/// use pricer_core::math::solvers::{BrentSolver, SolverConfig};
///
/// let solver = BrentSolver::new(SolverConfig::default());
///
/// // Solve x³ - x - 2 = 0 in bracket [1, 2]
/// let f = |x: f64| x * x * x - x - 2.0;
///
/// let root = solver.find_root(f, 1.0, 2.0).unwrap();
/// assert!((f(root)).abs() < 1e-9);
/// ```
#[derive(Debug, Clone)]
pub struct BrentSolver<T: Float> {
    config: SolverConfig<T>,
}

impl<T: Float> BrentSolver<T> {
    /// Create a new Brent solver with the given configuration.
    pub fn new(config: SolverConfig<T>) -> Self {
        Self { config }
    }

    /// Create a solver with default configuration.
    pub fn with_defaults() -> Self {
        Self {
            config: SolverConfig::default(),
        }
    }

    /// Returns a reference to the solver configuration.
    pub fn config(&self) -> &SolverConfig<T> {
        &self.config
    }

    /// Find a root of `f` in the bracket [a, b].
    ///
    /// Requires that `f(a)` and `f(b)` have opposite signs (a valid bracket).
    ///
    /// # Returns
    ///
    /// * `Ok(x)` - Root located within `tolerance`
    /// * `Err(SolverError::NoBracket)` - `f(a)` and `f(b)` have same sign
    /// * `Err(SolverError::NumericalInstability)` - `f` returned a non-finite value
    /// * `Err(SolverError::MaxIterationsExceeded)` - Failed to converge
    pub fn find_root<F>(&self, f: F, a: T, b: T) -> Result<T, SolverError>
    where
        F: Fn(T) -> T,
    {
        let fa = f(a);
        let fb = f(b);
        self.solve_bracketed(&f, a, fa, b, fb)
    }

    /// Find a root of `f`, widening `[a, b]` geometrically until it brackets
    /// a sign change.
    ///
    /// The endpoint with the smaller absolute function value is pushed
    /// outward by a factor 1.6 of the bracket width, at most
    /// `max_bracket_expansions` times.
    ///
    /// # Example
    ///
    /// ```
    /// use pricer_core::math::solvers::BrentSolver;
    ///
    /// let solver = BrentSolver::<f64>::with_defaults();
    /// let root = solver.find_root_expanding(|x| x - 7.5, 0.0, 1.0).unwrap();
    /// assert!((root - 7.5).abs() < 1e-9);
    /// ```
    pub fn find_root_expanding<F>(&self, f: F, a: T, b: T) -> Result<T, SolverError>
    where
        F: Fn(T) -> T,
    {
        let factor = T::from(1.6).unwrap();
        let (mut a, mut b) = if a < b { (a, b) } else { (b, a) };
        let mut fa = f(a);
        let mut fb = f(b);
        let mut expansions = 0;
        while fa * fb > T::zero() {
            if expansions >= self.config.max_bracket_expansions {
                return Err(SolverError::NoBracket {
                    a: a.to_f64().unwrap_or(f64::NAN),
                    b: b.to_f64().unwrap_or(f64::NAN),
                });
            }
            if fa.abs() < fb.abs() {
                a = a + factor * (a - b);
                fa = f(a);
            } else {
                b = b + factor * (b - a);
                fb = f(b);
            }
            expansions += 1;
        }
        trace!(expansions, "bracket found");
        self.solve_bracketed(&f, a, fa, b, fb)
    }

    fn solve_bracketed<F>(&self, f: &F, a: T, fa: T, b: T, fb: T) -> Result<T, SolverError>
    where
        F: Fn(T) -> T,
    {
        if !fa.is_finite() || !fb.is_finite() {
            return Err(SolverError::NumericalInstability(
                "non-finite function value at bracket endpoint".to_string(),
            ));
        }
        if fa == T::zero() {
            return Ok(a);
        }
        if fb == T::zero() {
            return Ok(b);
        }
        if fa * fb > T::zero() {
            return Err(SolverError::NoBracket {
                a: a.to_f64().unwrap_or(f64::NAN),
                b: b.to_f64().unwrap_or(f64::NAN),
            });
        }

        let two = T::from(2.0).unwrap();
        let three = T::from(3.0).unwrap();
        let half = T::from(0.5).unwrap();

        let (mut a, mut fa, mut b, mut fb) = (a, fa, b, fb);
        let mut c = b;
        let mut fc = fb;
        let mut d = b - a;
        let mut e = d;

        for iteration in 0..self.config.max_iterations {
            if (fb > T::zero()) == (fc > T::zero()) {
                c = a;
                fc = fa;
                d = b - a;
                e = d;
            }
            if fc.abs() < fb.abs() {
                a = b;
                b = c;
                c = a;
                fa = fb;
                fb = fc;
                fc = fa;
            }

            let tol = two * T::epsilon() * b.abs() + half * self.config.tolerance;
            let xm = half * (c - b);
            if xm.abs() <= tol || fb == T::zero() {
                trace!(iteration, "brent converged");
                return Ok(b);
            }

            if e.abs() >= tol && fa.abs() > fb.abs() {
                let s = fb / fa;
                let (mut p, mut q) = if a == c {
                    (two * xm * s, T::one() - s)
                } else {
                    let q = fa / fc;
                    let r = fb / fc;
                    (
                        s * (two * xm * q * (q - r) - (b - a) * (r - T::one())),
                        (q - T::one()) * (r - T::one()) * (s - T::one()),
                    )
                };
                if p > T::zero() {
                    q = -q;
                }
                p = p.abs();
                let min1 = three * xm * q - (tol * q).abs();
                let min2 = (e * q).abs();
                if two * p < min1.min(min2) {
                    e = d;
                    d = p / q;
                } else {
                    d = xm;
                    e = d;
                }
            } else {
                d = xm;
                e = d;
            }

            a = b;
            fa = fb;
            b = if d.abs() > tol {
                b + d
            } else if xm > T::zero() {
                b + tol
            } else {
                b - tol
            };
            fb = f(b);
            if !fb.is_finite() {
                return Err(SolverError::NumericalInstability(
                    "non-finite function value during Brent iteration".to_string(),
                ));
            }
        }

        Err(SolverError::MaxIterationsExceeded {
            iterations: self.config.max_iterations,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_find_sqrt_2() {
        let solver = BrentSolver::new(SolverConfig::default());
        let root = solver.find_root(|x: f64| x * x - 2.0, 0.0, 2.0).unwrap();
        assert_abs_diff_eq!(root, std::f64::consts::SQRT_2, epsilon = 1e-10);
    }

    #[test]
    fn test_root_at_endpoint() {
        let solver = BrentSolver::<f64>::with_defaults();
        assert_eq!(solver.find_root(|x| x - 1.0, 1.0, 3.0).unwrap(), 1.0);
    }

    #[test]
    fn test_no_bracket() {
        let solver = BrentSolver::<f64>::with_defaults();
        let result = solver.find_root(|x| x * x + 1.0, -1.0, 1.0);
        assert!(matches!(result, Err(SolverError::NoBracket { .. })));
    }

    #[test]
    fn test_expanding_bracket_finds_far_root() {
        let solver = BrentSolver::new(SolverConfig::new(1e-12, 200));
        let root = solver
            .find_root_expanding(|x: f64| (x + 3.0).exp() - 1.0, 0.0, 1.0)
            .unwrap();
        assert_abs_diff_eq!(root, -3.0, epsilon = 1e-10);
    }

    #[test]
    fn test_expanding_gives_up() {
        let solver = BrentSolver::new(SolverConfig::<f64>::default().with_bracket_expansions(3));
        let result = solver.find_root_expanding(|x| x * x + 1.0, 0.0, 1.0);
        assert!(matches!(result, Err(SolverError::NoBracket { .. })));
    }

    #[test]
    fn test_discontinuous_sign_change() {
        let solver = BrentSolver::new(SolverConfig::new(1e-12, 200));
        let root = solver
            .find_root(|x: f64| if x < 0.3 { -1.0 } else { 1.0 }, 0.0, 1.0)
            .unwrap();
        assert_abs_diff_eq!(root, 0.3, epsilon = 1e-10);
    }

    #[test]
    fn test_bond_like_price_function() {
        // price(y) = sum of 10 semi-annual coupons of 2.5 plus 100 at maturity
        let price = |y: f64| {
            let v = 1.0 / (1.0 + y / 2.0);
            (1..=10).map(|i| 2.5 * v.powi(i)).sum::<f64>() + 100.0 * v.powi(10)
        };
        let solver = BrentSolver::new(SolverConfig::high_precision());
        let y = solver
            .find_root_expanding(|y| price(y) - 100.0, -0.5, 1.0)
            .unwrap();
        assert_abs_diff_eq!(y, 0.05, epsilon = 1e-11);
    }
}
