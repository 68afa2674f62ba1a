//! Interpolation methods used by curves and volatility surfaces.
//!
//! - [`LinearInterpolator`]: piecewise linear, with flat or linear
//!   extrapolation and node weights for sensitivity projection
//! - [`BilinearInterpolator`]: 2D grid interpolation for swaption
//!   volatility surfaces (expiry x tenor)
//!
//! ## Example
//!
//! ```
//! use pricer_core::math::interpolators::{Interpolator, LinearInterpolator};
//!
//! let interp: LinearInterpolator<f64> = LinearInterpolator::new(&[0.0, 1.0, 2.0, 3.0], &[0.0, 1.0, 4.0, 9.0]).unwrap();
//! assert_eq!(interp.domain(), (0.0, 3.0));
//! assert!((interp.interpolate(1.5).unwrap() - 2.5).abs() < 1e-10);
//! ```

mod bilinear;
mod linear;
mod traits;

pub use bilinear::BilinearInterpolator;
pub use linear::LinearInterpolator;
pub use traits::Interpolator;
