//! Yield curve abstractions.
//!
//! - [`YieldCurve`]: discount factor, zero rate and forward rate
//! - [`FlatCurve`]: constant rate curve
//! - [`InterpolatedCurve`]: pillar-based curve (linear zero rates or
//!   log-linear discount factors)
//! - [`CurveEnum`]: static dispatch over the above, plus parallel spreads

mod curve_enum;
mod flat;
mod interpolated;
mod traits;

pub use curve_enum::CurveEnum;
pub use flat::FlatCurve;
pub use interpolated::{CurveInterpolation, InterpolatedCurve};
pub use traits::YieldCurve;
