//! Solver configuration types.

use num_traits::Float;

/// Configuration for root-finding algorithms.
///
/// Settings shared by [`BrentSolver`](super::BrentSolver) and
/// [`NewtonRaphsonSolver`](super::NewtonRaphsonSolver): the convergence
/// tolerance on the abscissa, the iteration limit, and how many times an
/// initial bracket may be widened before giving up.
///
/// # Example
///
/// ```
/// use pricer_core::math::solvers::SolverConfig;
///
/// let config: SolverConfig<f64> = SolverConfig::default();
/// assert!(config.tolerance < 1e-8);
///
/// let yield_config = SolverConfig::new(1e-12, 200).with_bracket_expansions(20);
/// assert_eq!(yield_config.max_bracket_expansions, 20);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolverConfig<T: Float> {
    /// Convergence tolerance on the root location.
    pub tolerance: T,

    /// Maximum number of iterations before giving up.
    pub max_iterations: usize,

    /// Maximum number of times a bracket is widened by
    /// [`BrentSolver::find_root_expanding`](super::BrentSolver::find_root_expanding).
    pub max_bracket_expansions: usize,
}

impl<T: Float> Default for SolverConfig<T> {
    /// Default values: tolerance 1e-10, 100 iterations, 50 bracket expansions.
    fn default() -> Self {
        Self {
            tolerance: T::from(1e-10).unwrap(),
            max_iterations: 100,
            max_bracket_expansions: 50,
        }
    }
}

impl<T: Float> SolverConfig<T> {
    /// Create a new configuration with specified values.
    ///
    /// # Panics
    ///
    /// Panics if `tolerance <= 0` or `max_iterations == 0`.
    pub fn new(tolerance: T, max_iterations: usize) -> Self {
        assert!(tolerance > T::zero(), "tolerance must be positive");
        assert!(max_iterations > 0, "max_iterations must be > 0");
        Self {
            tolerance,
            max_iterations,
            max_bracket_expansions: 50,
        }
    }

    /// Returns a copy with a different bracket expansion limit.
    pub fn with_bracket_expansions(mut self, expansions: usize) -> Self {
        self.max_bracket_expansions = expansions;
        self
    }

    /// Configuration used for yield and z-spread solves: tolerance 1e-12,
    /// 200 iterations.
    pub fn high_precision() -> Self {
        Self::new(T::from(1e-12).unwrap(), 200)
    }
}
