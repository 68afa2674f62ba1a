//! Flat swaption volatility.

use super::traits::check_coordinates;
use super::SwaptionVolatilitySurface;
use crate::market_data::error::MarketDataError;
use num_traits::Float;

/// Constant Black volatility for every expiry and tenor.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FlatSwaptionVolatility<T: Float> {
    sigma: T,
}

impl<T: Float> FlatSwaptionVolatility<T> {
    /// Create a flat surface.
    #[inline]
    pub fn new(sigma: T) -> Self {
        Self { sigma }
    }

    /// The constant volatility.
    #[inline]
    pub fn sigma(&self) -> T {
        self.sigma
    }
}

impl<T: Float> SwaptionVolatilitySurface<T> for FlatSwaptionVolatility<T> {
    #[inline]
    fn volatility(&self, expiry: T, tenor: T) -> Result<T, MarketDataError> {
        check_coordinates(expiry, tenor)?;
        Ok(self.sigma)
    }
}
