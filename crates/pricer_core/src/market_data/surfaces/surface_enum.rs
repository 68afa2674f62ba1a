//! Static dispatch over swaption volatility surfaces.

use super::{FlatSwaptionVolatility, InterpolatedSwaptionVolatility, SwaptionVolatilitySurface};
use crate::market_data::error::MarketDataError;
use num_traits::Float;

/// Enum wrapping the concrete swaption volatility surfaces.
#[derive(Debug, Clone)]
pub enum SwaptionVolatilityEnum<T: Float> {
    /// Constant volatility
    Flat(FlatSwaptionVolatility<T>),
    /// Expiry by tenor grid
    Interpolated(InterpolatedSwaptionVolatility<T>),
}

impl<T: Float> SwaptionVolatilityEnum<T> {
    /// Create a flat surface variant.
    pub fn flat(sigma: T) -> Self {
        SwaptionVolatilityEnum::Flat(FlatSwaptionVolatility::new(sigma))
    }
}

impl<T: Float> SwaptionVolatilitySurface<T> for SwaptionVolatilityEnum<T> {
    #[inline]
    fn volatility(&self, expiry: T, tenor: T) -> Result<T, MarketDataError> {
        match self {
            SwaptionVolatilityEnum::Flat(s) => s.volatility(expiry, tenor),
            SwaptionVolatilityEnum::Interpolated(s) => s.volatility(expiry, tenor),
        }
    }
}

impl<T: Float> From<FlatSwaptionVolatility<T>> for SwaptionVolatilityEnum<T> {
    fn from(s: FlatSwaptionVolatility<T>) -> Self {
        SwaptionVolatilityEnum::Flat(s)
    }
}

impl<T: Float> From<InterpolatedSwaptionVolatility<T>> for SwaptionVolatilityEnum<T> {
    fn from(s: InterpolatedSwaptionVolatility<T>) -> Self {
        SwaptionVolatilityEnum::Interpolated(s)
    }
}
