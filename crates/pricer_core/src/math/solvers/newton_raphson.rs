//! Newton-Raphson root-finding solver with an optional bisection safeguard.

use super::SolverConfig;
use crate::types::SolverError;
use num_traits::Float;

/// Newton-Raphson root finder.
///
/// Uses `x_{n+1} = x_n - f(x_n) / f'(x_n)` with quadratic convergence near
/// the root. [`NewtonRaphsonSolver::find_root_bracketed`] keeps the iterate
/// inside a sign-change bracket and bisects whenever a Newton step would
/// leave it, which is how implied volatilities are searched.
///
/// # Example
///
/// ```
/// use pricer_core::math::solvers::{NewtonRaphsonSolver, SolverConfig};
///
/// let solver = NewtonRaphsonSolver::new(SolverConfig::default());
///
/// let f = |x: f64| x * x - 2.0;
/// let f_prime = |x: f64| 2.0 * x;
///
/// let root = solver.find_root(f, f_prime, 1.0).unwrap();
/// assert!((root - std::f64::consts::SQRT_2).abs() < 1e-10);
/// ```
#[derive(Debug, Clone)]
pub struct NewtonRaphsonSolver<T: Float> {
    config: SolverConfig<T>,
}

impl<T: Float> NewtonRaphsonSolver<T> {
    /// Create a new Newton-Raphson solver with the given configuration.
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

    /// Find a root of `f` using explicit derivative `f_prime`.
    ///
    /// # Returns
    ///
    /// * `Ok(x)` - Root where `|f(x)| < tolerance`
    /// * `Err(SolverError::MaxIterationsExceeded)` - Failed to converge
    /// * `Err(SolverError::DerivativeNearZero)` - Derivative too small
    pub fn find_root<F, G>(&self, f: F, f_prime: G, x0: T) -> Result<T, SolverError>
    where
        F: Fn(T) -> T,
        G: Fn(T) -> T,
    {
        let mut x = x0;
        let epsilon = T::from(1e-30).unwrap();

        for _ in 0..self.config.max_iterations {
            let f_val = f(x);
            if f_val.abs() < self.config.tolerance {
                return Ok(x);
            }
            let f_prime_val = f_prime(x);
            if f_prime_val.abs() < epsilon {
                return Err(SolverError::DerivativeNearZero {
                    x: x.to_f64().unwrap_or(f64::NAN),
                });
            }
            x = x - f_val / f_prime_val;
            if !x.is_finite() {
                return Err(SolverError::NumericalInstability(
                    "Newton iteration produced non-finite value".to_string(),
                ));
            }
        }

        Err(SolverError::MaxIterationsExceeded {
            iterations: self.config.max_iterations,
        })
    }

    /// Safeguarded Newton iteration inside `[lower, upper]`.
    ///
    /// `f(lower)` and `f(upper)` must have opposite signs. The bracket is
    /// shrunk after every evaluation; a Newton step that falls outside it
    /// (or a vanishing derivative) is replaced by bisection.
    ///
    /// # Example
    ///
    /// ```
    /// use pricer_core::math::solvers::NewtonRaphsonSolver;
    ///
    /// let solver = NewtonRaphsonSolver::<f64>::with_defaults();
    /// // atan has a tiny derivative far from zero; plain Newton diverges from x0 = 5
    /// let root = solver
    ///     .find_root_bracketed(|x| x.atan(), |x| 1.0 / (1.0 + x * x), 5.0, -10.0, 10.0)
    ///     .unwrap();
    /// assert!(root.abs() < 1e-10);
    /// ```
    pub fn find_root_bracketed<F, G>(
        &self,
        f: F,
        f_prime: G,
        x0: T,
        lower: T,
        upper: T,
    ) -> Result<T, SolverError>
    where
        F: Fn(T) -> T,
        G: Fn(T) -> T,
    {
        let two = T::from(2.0).unwrap();
        let f_lower = f(lower);
        let f_upper = f(upper);
        if f_lower * f_upper > T::zero() {
            return Err(SolverError::NoBracket {
                a: lower.to_f64().unwrap_or(f64::NAN),
                b: upper.to_f64().unwrap_or(f64::NAN),
            });
        }
        if f_lower == T::zero() {
            return Ok(lower);
        }
        if f_upper == T::zero() {
            return Ok(upper);
        }
        // Orient so that f(low) < 0 < f(high).
        let (mut low, mut high) = if f_lower < T::zero() {
            (lower, upper)
        } else {
            (upper, lower)
        };
        let mut x = if x0 > lower.min(upper) && x0 < lower.max(upper) {
            x0
        } else {
            (lower + upper) / two
        };

        for _ in 0..self.config.max_iterations {
            let f_val = f(x);
            if f_val.abs() < self.config.tolerance || (high - low).abs() < self.config.tolerance {
                return Ok(x);
            }
            if f_val < T::zero() {
                low = x;
            } else {
                high = x;
            }
            let slope = f_prime(x);
            let newton = x - f_val / slope;
            let inside = newton.is_finite()
                && (newton - low) * (newton - high) < T::zero();
            x = if inside { newton } else { (low + high) / two };
        }

        Err(SolverError::MaxIterationsExceeded {
            iterations: self.config.max_iterations,
        })
    }
}
