//! Zero-coupon bill security in time-based form.

use pricer_core::types::Currency;

use super::yield_convention::YieldConvention;
use crate::instruments::error::{check_notional, check_time, InstrumentError};

/// Bill paying its notional at `end_time`, quoted per unit of notional.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BillSecurity {
    currency: Currency,
    settlement_time: f64,
    end_time: f64,
    notional: f64,
    accrual_factor: f64,
    yield_convention: YieldConvention,
    issuer: String,
}

impl BillSecurity {
    /// Creates a bill.
    ///
    /// # Arguments
    ///
    /// * `currency` - Currency of the bill
    /// * `settlement_time` - Settlement time in years
    /// * `end_time` - Maturity time in years
    /// * `notional` - Amount paid at maturity
    /// * `accrual_factor` - Accrual factor from settlement to maturity
    /// * `yield_convention` - `InterestAtMaturity` or `Discount`
    /// * `issuer` - Issuer name
    ///
    /// # Errors
    ///
    /// Returns an error for invalid times, a maturity before settlement, a
    /// zero notional or a bond yield convention.
    pub fn new(
        currency: Currency,
        settlement_time: f64,
        end_time: f64,
        notional: f64,
        accrual_factor: f64,
        yield_convention: YieldConvention,
        issuer: impl Into<String>,
    ) -> Result<Self, InstrumentError> {
        check_time("settlement", settlement_time)?;
        check_time("end", end_time)?;
        check_time("accrual factor", accrual_factor)?;
        check_notional(notional)?;
        if end_time < settlement_time {
            return Err(InstrumentError::InvalidTime {
                name: "end",
                time: end_time,
            });
        }
        if yield_convention.is_bond_convention() {
            return Err(InstrumentError::InvalidParameter {
                message: format!("{} is not a bill yield convention", yield_convention),
            });
        }
        Ok(Self {
            currency,
            settlement_time,
            end_time,
            notional,
            accrual_factor,
            yield_convention,
            issuer: issuer.into(),
        })
    }

    /// Currency.
    #[inline]
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Settlement time in years.
    #[inline]
    pub fn settlement_time(&self) -> f64 {
        self.settlement_time
    }

    /// Maturity time in years.
    #[inline]
    pub fn end_time(&self) -> f64 {
        self.end_time
    }

    /// Notional paid at maturity.
    #[inline]
    pub fn notional(&self) -> f64 {
        self.notional
    }

    /// Accrual factor between settlement and maturity.
    #[inline]
    pub fn accrual_factor(&self) -> f64 {
        self.accrual_factor
    }

    /// Yield convention.
    #[inline]
    pub fn yield_convention(&self) -> YieldConvention {
        self.yield_convention
    }

    /// Issuer name.
    #[inline]
    pub fn issuer(&self) -> &str {
        &self.issuer
    }
}
