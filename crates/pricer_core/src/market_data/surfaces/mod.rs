//! Swaption volatility surfaces.
//!
//! - [`SwaptionVolatilitySurface`]: Black volatility by (expiry, tenor)
//! - [`FlatSwaptionVolatility`]: constant volatility
//! - [`InterpolatedSwaptionVolatility`]: bilinear expiry by tenor grid
//! - [`SwaptionVolatilityEnum`]: static dispatch over the above

mod flat;
mod interpolated;
mod surface_enum;
mod traits;

pub use flat::FlatSwaptionVolatility;
pub use interpolated::InterpolatedSwaptionVolatility;
pub use surface_enum::SwaptionVolatilityEnum;
pub use traits::SwaptionVolatilitySurface;
