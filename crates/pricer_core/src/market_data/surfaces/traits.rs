//! Swaption volatility surface trait definition.

use crate::market_data::error::MarketDataError;
use num_traits::Float;

/// Black volatility of European swaptions indexed by option expiry and
/// underlying swap tenor.
///
/// # Contract
///
/// - `volatility(expiry, tenor)` returns the lognormal Black volatility
///   for an option expiring in `expiry` years on a swap of `tenor` years
/// - `expiry >= 0` and `tenor > 0`; other inputs are rejected
///
/// # Example
///
/// ```
/// use pricer_core::market_data::surfaces::{FlatSwaptionVolatility, SwaptionVolatilitySurface};
///
/// let surface = FlatSwaptionVolatility::new(0.20_f64);
/// assert_eq!(surface.volatility(1.0, 5.0).unwrap(), 0.20);
/// ```
pub trait SwaptionVolatilitySurface<T: Float> {
    /// Return the Black volatility for the given expiry and tenor.
    ///
    /// # Arguments
    ///
    /// * `expiry` - Time to option expiry in years
    /// * `tenor` - Underlying swap tenor in years
    ///
    /// # Returns
    ///
    /// * `Ok(sigma)` - Black volatility
    /// * `Err(MarketDataError::InvalidExpiry)` - If expiry < 0 or not finite
    /// * `Err(MarketDataError::InvalidTenor)` - If tenor <= 0 or not finite
    /// * `Err(MarketDataError::OutOfBounds)` - If outside the grid without extrapolation
    fn volatility(&self, expiry: T, tenor: T) -> Result<T, MarketDataError>;
}

/// Shared argument validation for surface implementations.
pub(crate) fn check_coordinates<T: Float>(expiry: T, tenor: T) -> Result<(), MarketDataError> {
    if !expiry.is_finite() || expiry < T::zero() {
        return Err(MarketDataError::InvalidExpiry {
            expiry: expiry.to_f64().unwrap_or(f64::NAN),
        });
    }
    if !tenor.is_finite() || tenor <= T::zero() {
        return Err(MarketDataError::InvalidTenor {
            tenor: tenor.to_f64().unwrap_or(f64::NAN),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_coordinates() {
        assert!(check_coordinates(0.0_f64, 1.0).is_ok());
        assert!(matches!(
            check_coordinates(-0.1_f64, 1.0),
            Err(MarketDataError::InvalidExpiry { .. })
        ));
        assert!(matches!(
            check_coordinates(1.0_f64, 0.0),
            Err(MarketDataError::InvalidTenor { .. })
        ));
        assert!(check_coordinates(f64::NAN, 1.0).is_err());
    }
}
