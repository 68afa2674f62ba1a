//! European swaptions in time-based form.
//!
//! Three shapes exist:
//!
//! - [`SwaptionPhysicalFixedIbor`]: physical delivery of a fixed/term-rate swap
//! - [`SwaptionPhysicalFixedCompoundedOn`]: physical delivery of a compounded
//!   fixed/overnight swap
//! - [`SwaptionCashFixedCompoundedOn`]: cash settlement of a compounded
//!   fixed/overnight swap against a cash annuity
//!
//! The strike is the fixed rate of the underlying swap and the option is a
//! call on the swap rate exactly when the underlying is a payer swap.

use pricer_core::types::Currency;

use super::swap::{SwapFixedIbor, SwapFixedOnCompounded};
use crate::instruments::error::{check_time, InstrumentError};

/// Expiry, settlement, tenor and direction shared by every swaption shape.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SwaptionTerms {
    time_to_expiry: f64,
    settlement_time: f64,
    tenor: f64,
    is_long: bool,
}

impl SwaptionTerms {
    /// Creates validated swaption terms.
    ///
    /// # Arguments
    ///
    /// * `time_to_expiry` - Expiry in years from the reference date
    /// * `settlement_time` - Settlement (underlying start) in years
    /// * `tenor` - Underlying tenor in years, the volatility surface column
    /// * `is_long` - `true` when the option is bought
    ///
    /// # Errors
    ///
    /// Returns an error for a negative or non-finite expiry, a settlement
    /// before expiry or a non-positive tenor.
    pub fn new(
        time_to_expiry: f64,
        settlement_time: f64,
        tenor: f64,
        is_long: bool,
    ) -> Result<Self, InstrumentError> {
        if !time_to_expiry.is_finite() || time_to_expiry < 0.0 {
            return Err(InstrumentError::InvalidExpiry {
                expiry: time_to_expiry,
            });
        }
        check_time("settlement", settlement_time)?;
        if settlement_time < time_to_expiry {
            return Err(InstrumentError::InvalidTime {
                name: "settlement",
                time: settlement_time,
            });
        }
        if !(tenor.is_finite() && tenor > 0.0) {
            return Err(InstrumentError::InvalidTime {
                name: "tenor",
                time: tenor,
            });
        }
        Ok(Self {
            time_to_expiry,
            settlement_time,
            tenor,
            is_long,
        })
    }

    /// Expiry in years.
    #[inline]
    pub fn time_to_expiry(&self) -> f64 {
        self.time_to_expiry
    }

    /// Settlement in years.
    #[inline]
    pub fn settlement_time(&self) -> f64 {
        self.settlement_time
    }

    /// Underlying tenor in years.
    #[inline]
    pub fn tenor(&self) -> f64 {
        self.tenor
    }

    /// `true` when the option is bought.
    #[inline]
    pub fn is_long(&self) -> bool {
        self.is_long
    }

    /// `+1` when long, `−1` when short.
    #[inline]
    pub fn sign(&self) -> f64 {
        if self.is_long {
            1.0
        } else {
            -1.0
        }
    }
}

macro_rules! swaption_accessors {
    () => {
        /// Shared expiry, settlement, tenor and direction.
        #[inline]
        pub fn terms(&self) -> &SwaptionTerms {
            &self.terms
        }

        /// Expiry in years.
        #[inline]
        pub fn time_to_expiry(&self) -> f64 {
            self.terms.time_to_expiry
        }

        /// Settlement in years.
        #[inline]
        pub fn settlement_time(&self) -> f64 {
            self.terms.settlement_time
        }

        /// Underlying tenor in years.
        #[inline]
        pub fn tenor(&self) -> f64 {
            self.terms.tenor
        }

        /// `true` when the option is bought.
        #[inline]
        pub fn is_long(&self) -> bool {
            self.terms.is_long
        }

        /// `true` for a payer swaption (call on the swap rate).
        #[inline]
        pub fn is_call(&self) -> bool {
            self.underlying.is_payer()
        }

        /// Settlement currency.
        #[inline]
        pub fn currency(&self) -> Currency {
            self.underlying.currency()
        }

        /// Strike: the fixed rate of the underlying.
        #[inline]
        pub fn strike(&self) -> f64 {
            self.underlying.fixed_rate()
        }
    };
}

/// Physically settled swaption on a fixed/term-rate swap.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SwaptionPhysicalFixedIbor {
    underlying: SwapFixedIbor,
    terms: SwaptionTerms,
}

impl SwaptionPhysicalFixedIbor {
    /// Creates the swaption.
    pub fn new(underlying: SwapFixedIbor, terms: SwaptionTerms) -> Self {
        Self { underlying, terms }
    }

    /// Underlying swap.
    #[inline]
    pub fn underlying(&self) -> &SwapFixedIbor {
        &self.underlying
    }

    swaption_accessors!();
}

/// Physically settled swaption on a compounded fixed/overnight swap.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SwaptionPhysicalFixedCompoundedOn {
    underlying: SwapFixedOnCompounded,
    terms: SwaptionTerms,
}

impl SwaptionPhysicalFixedCompoundedOn {
    /// Creates the swaption.
    pub fn new(underlying: SwapFixedOnCompounded, terms: SwaptionTerms) -> Self {
        Self { underlying, terms }
    }

    /// Underlying swap.
    #[inline]
    pub fn underlying(&self) -> &SwapFixedOnCompounded {
        &self.underlying
    }

    swaption_accessors!();
}

/// Cash-settled swaption on a compounded fixed/overnight swap.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SwaptionCashFixedCompoundedOn {
    underlying: SwapFixedOnCompounded,
    terms: SwaptionTerms,
}

impl SwaptionCashFixedCompoundedOn {
    /// Creates the swaption.
    pub fn new(underlying: SwapFixedOnCompounded, terms: SwaptionTerms) -> Self {
        Self { underlying, terms }
    }

    /// Underlying swap.
    #[inline]
    pub fn underlying(&self) -> &SwapFixedOnCompounded {
        &self.underlying
    }

    swaption_accessors!();
}
