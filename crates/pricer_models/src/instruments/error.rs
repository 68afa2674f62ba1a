//! Instrument error types.
//!
//! Construction of coupons, legs, swaps, swaptions, bonds and bills is
//! validated eagerly; every failure is reported through [`InstrumentError`].

use pricer_core::types::{Currency, PricingError};
use thiserror::Error;

use crate::schedules::ScheduleError;

/// Instrument-related errors.
///
/// # Variants
/// - `InvalidExpiry`: Time to expiry is negative or not finite
/// - `InvalidTime`: A payment, fixing or settlement time is invalid
/// - `InvalidNotional`: Notional amount is zero or not finite
/// - `EmptyLeg`: A leg or fixing list has no element
/// - `CurrencyMismatch`: Payments of one instrument are in different currencies
/// - `InvalidParameter`: General parameter validation failure
/// - `Schedule`: The coupon schedule could not be generated
///
/// # Examples
/// ```
/// use pricer_models::instruments::InstrumentError;
///
/// let err = InstrumentError::InvalidExpiry { expiry: -1.0 };
/// assert!(format!("{}", err).contains("-1"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InstrumentError {
    /// Invalid expiry time.
    #[error("Invalid expiry: T = {expiry}")]
    InvalidExpiry {
        /// The invalid expiry value
        expiry: f64,
    },

    /// Invalid time argument.
    #[error("Invalid {name} time: {time}")]
    InvalidTime {
        /// Which time was rejected
        name: &'static str,
        /// The rejected value
        time: f64,
    },

    /// Invalid notional amount.
    #[error("Invalid notional: N = {notional}")]
    InvalidNotional {
        /// The invalid notional value
        notional: f64,
    },

    /// A leg has no payment.
    #[error("Empty {leg}")]
    EmptyLeg {
        /// Description of the empty leg
        leg: &'static str,
    },

    /// Payments in different currencies.
    #[error("Currency mismatch: expected {expected}, found {found}")]
    CurrencyMismatch {
        /// Currency of the first payment
        expected: Currency,
        /// Offending currency
        found: Currency,
    },

    /// Invalid parameter (general validation failure).
    #[error("Invalid parameter: {message}")]
    InvalidParameter {
        /// Description of the parameter error
        message: String,
    },

    /// Schedule generation failed.
    #[error("Schedule error: {0}")]
    Schedule(#[from] ScheduleError),
}

impl From<pricer_core::types::DateError> for InstrumentError {
    fn from(err: pricer_core::types::DateError) -> Self {
        InstrumentError::Schedule(ScheduleError::Date(err))
    }
}

impl From<InstrumentError> for PricingError {
    fn from(err: InstrumentError) -> Self {
        PricingError::InvalidInput(err.to_string())
    }
}

/// Checks that `time` is finite and non-negative.
pub(crate) fn check_time(name: &'static str, time: f64) -> Result<(), InstrumentError> {
    if time.is_finite() && time >= 0.0 {
        Ok(())
    } else {
        Err(InstrumentError::InvalidTime { name, time })
    }
}

/// Checks that `notional` is finite and non-zero.
pub(crate) fn check_notional(notional: f64) -> Result<(), InstrumentError> {
    if notional.is_finite() && notional != 0.0 {
        Ok(())
    } else {
        Err(InstrumentError::InvalidNotional { notional })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(
            InstrumentError::InvalidNotional { notional: 0.0 }.to_string(),
            "Invalid notional: N = 0"
        );
        assert_eq!(
            InstrumentError::EmptyLeg { leg: "fixed leg" }.to_string(),
            "Empty fixed leg"
        );
        assert_eq!(
            InstrumentError::CurrencyMismatch {
                expected: Currency::EUR,
                found: Currency::USD
            }
            .to_string(),
            "Currency mismatch: expected EUR, found USD"
        );
    }

    #[test]
    fn test_conversion_to_pricing_error() {
        let err: PricingError = InstrumentError::InvalidExpiry { expiry: -0.5 }.into();
        assert_eq!(err, PricingError::InvalidInput("Invalid expiry: T = -0.5".into()));
    }

    #[test]
    fn test_checks() {
        assert!(check_time("payment", 0.0).is_ok());
        assert!(check_time("payment", f64::NAN).is_err());
        assert!(check_notional(-1.0).is_ok());
        assert!(check_notional(0.0).is_err());
    }
}
