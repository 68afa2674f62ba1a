//! Error types for analytical pricing operations.

use pricer_core::types::PricingError;
use thiserror::Error;

/// Analytical pricing errors.
///
/// # Variants
/// - `InvalidVolatility`: Negative or non-finite volatility
/// - `InvalidForward`: Non-positive or non-finite forward
/// - `InvalidExpiry`: Negative or non-finite time to expiry
/// - `PriceOutOfBounds`: Target price outside the arbitrage-free range
/// - `NumericalInstability`: Computation encountered numerical issues
///
/// # Examples
/// ```
/// use pricer_models::analytical::AnalyticalError;
///
/// let err = AnalyticalError::InvalidVolatility { volatility: -0.2 };
/// assert!(format!("{}", err).contains("volatility"));
/// ```
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AnalyticalError {
    /// Invalid volatility.
    #[error("Invalid volatility: σ = {volatility}")]
    InvalidVolatility {
        /// The invalid volatility value
        volatility: f64,
    },

    /// Invalid forward.
    #[error("Invalid forward: F = {forward}")]
    InvalidForward {
        /// The invalid forward value
        forward: f64,
    },

    /// Invalid time to expiry.
    #[error("Invalid expiry: T = {expiry}")]
    InvalidExpiry {
        /// The invalid expiry value
        expiry: f64,
    },

    /// Price below intrinsic value or above the upper bound.
    #[error("Price {price} outside arbitrage bounds [{lower}, {upper}]")]
    PriceOutOfBounds {
        /// Target price
        price: f64,
        /// Intrinsic value
        lower: f64,
        /// Upper bound (forward for calls, strike for puts)
        upper: f64,
    },

    /// Numerical instability during computation.
    #[error("Numerical instability: {message}")]
    NumericalInstability {
        /// Description of the numerical issue
        message: String,
    },
}

impl From<AnalyticalError> for PricingError {
    fn from(err: AnalyticalError) -> Self {
        match err {
            AnalyticalError::NumericalInstability { .. } => {
                PricingError::NumericalInstability(err.to_string())
            }
            other => PricingError::InvalidInput(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(
            AnalyticalError::InvalidVolatility { volatility: -0.2 }.to_string(),
            "Invalid volatility: σ = -0.2"
        );
        assert_eq!(
            AnalyticalError::PriceOutOfBounds {
                price: 2.0,
                lower: 0.0,
                upper: 1.0
            }
            .to_string(),
            "Price 2 outside arbitrage bounds [0, 1]"
        );
    }

    #[test]
    fn test_into_pricing_error() {
        let err: PricingError = AnalyticalError::InvalidExpiry { expiry: -1.0 }.into();
        assert!(matches!(err, PricingError::InvalidInput(_)));

        let err: PricingError = AnalyticalError::NumericalInstability {
            message: "no root".to_string(),
        }
        .into();
        assert!(matches!(err, PricingError::NumericalInstability(_)));
    }
}
