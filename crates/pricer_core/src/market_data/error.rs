//! Market data error types.
//!
//! Errors raised by yield curve and swaption volatility lookups, and by
//! provider queries for curves that were never supplied.

use crate::types::{InterpolationError, PricingError};
use thiserror::Error;

/// Market data operation errors.
///
/// # Variants
///
/// - `InvalidMaturity`: Negative or non-finite time to maturity
/// - `InvalidExpiry`: Negative or non-finite option expiry
/// - `InvalidTenor`: Non-positive underlying swap tenor
/// - `OutOfBounds`: Query outside the valid domain with extrapolation disabled
/// - `Interpolation`: Wrapped interpolation error
/// - `InsufficientData`: Not enough data points for construction
/// - `MissingCurve`: No curve of that kind registered in the provider
///
/// # Examples
///
/// ```
/// use pricer_core::market_data::MarketDataError;
///
/// let err = MarketDataError::InvalidMaturity { t: -1.0 };
/// assert!(format!("{}", err).contains("-1"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MarketDataError {
    /// Invalid maturity (negative time).
    #[error("Invalid maturity: t = {t}")]
    InvalidMaturity {
        /// The invalid maturity value
        t: f64,
    },

    /// Invalid option expiry.
    #[error("Invalid expiry: T = {expiry}")]
    InvalidExpiry {
        /// The invalid expiry value
        expiry: f64,
    },

    /// Invalid underlying tenor.
    #[error("Invalid tenor: {tenor}")]
    InvalidTenor {
        /// The invalid tenor in years
        tenor: f64,
    },

    /// Query point outside valid domain.
    #[error("Out of bounds: {x} not in [{min}, {max}]")]
    OutOfBounds {
        /// The query point that was out of bounds
        x: f64,
        /// Minimum valid value
        min: f64,
        /// Maximum valid value
        max: f64,
    },

    /// Interpolation error.
    #[error("Interpolation error: {0}")]
    Interpolation(#[from] InterpolationError),

    /// Insufficient data for construction.
    #[error("Insufficient data: got {got}, need {need}")]
    InsufficientData {
        /// Number of points provided
        got: usize,
        /// Minimum number of points required
        need: usize,
    },

    /// Curve absent from a provider.
    #[error("No {kind} curve for {key}")]
    MissingCurve {
        /// Curve family ("discounting", "forward", "issuer")
        kind: &'static str,
        /// Currency, index or issuer the curve was requested for
        key: String,
    },
}

impl From<MarketDataError> for PricingError {
    fn from(err: MarketDataError) -> Self {
        match err {
            MarketDataError::MissingCurve { .. } => {
                PricingError::MissingMarketData(err.to_string())
            }
            other => PricingError::InvalidInput(other.to_string()),
        }
    }
}
