//! Root-finding solvers.
//!
//! - [`BrentSolver`]: bracketing method without derivatives, with geometric
//!   bracket expansion; used for bond yields and z-spreads
//! - [`NewtonRaphsonSolver`]: derivative-based iteration with a bisection
//!   safeguard; used for implied volatilities
//!
//! Both take a [`SolverConfig`] value; there are no global solver settings.
//!
//! ## Examples
//!
//! ```
//! use pricer_core::math::solvers::{BrentSolver, SolverConfig};
//!
//! let solver = BrentSolver::new(SolverConfig::high_precision());
//! let root = solver.find_root_expanding(|x: f64| x.exp() - 2.0, -0.5, 0.1).unwrap();
//! assert!((root - 2.0_f64.ln()).abs() < 1e-11);
//! ```

mod brent;
mod config;
mod newton_raphson;

pub use brent::BrentSolver;
pub use config::SolverConfig;
pub use newton_raphson::NewtonRaphsonSolver;
