//! Fixed-versus-floating swaps in time-based form.

use pricer_core::types::Currency;

use super::annuity::Annuity;
use super::coupons::{
    Coupon, CouponFixed, CouponFixedAccruedCompounding, CouponIbor, CouponOnCompounded, Payment,
};
use crate::instruments::error::InstrumentError;

fn check_legs<A: Coupon, B: Coupon>(
    fixed: &Annuity<A>,
    floating: &Annuity<B>,
) -> Result<(), InstrumentError> {
    if fixed.currency() != floating.currency() {
        return Err(InstrumentError::CurrencyMismatch {
            expected: fixed.currency(),
            found: floating.currency(),
        });
    }
    if fixed.is_payer() == floating.is_payer() {
        return Err(InstrumentError::InvalidParameter {
            message: "fixed and floating legs must have opposite directions".to_string(),
        });
    }
    Ok(())
}

/// Swap of a fixed leg against a term-rate leg.
///
/// The swap is a payer swap when the fixed leg is paid.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SwapFixedIbor {
    fixed_leg: Annuity<CouponFixed>,
    ibor_leg: Annuity<CouponIbor>,
}

impl SwapFixedIbor {
    /// Creates the swap.
    ///
    /// # Errors
    ///
    /// Returns an error if the legs are in different currencies or have the
    /// same direction.
    pub fn new(
        fixed_leg: Annuity<CouponFixed>,
        ibor_leg: Annuity<CouponIbor>,
    ) -> Result<Self, InstrumentError> {
        check_legs(&fixed_leg, &ibor_leg)?;
        Ok(Self {
            fixed_leg,
            ibor_leg,
        })
    }

    /// Fixed leg.
    #[inline]
    pub fn fixed_leg(&self) -> &Annuity<CouponFixed> {
        &self.fixed_leg
    }

    /// Term-rate leg.
    #[inline]
    pub fn ibor_leg(&self) -> &Annuity<CouponIbor> {
        &self.ibor_leg
    }

    /// Currency of the swap.
    #[inline]
    pub fn currency(&self) -> Currency {
        self.fixed_leg.currency()
    }

    /// `true` when the fixed leg is paid.
    #[inline]
    pub fn is_payer(&self) -> bool {
        self.fixed_leg.is_payer()
    }

    /// Rate of the first fixed coupon.
    #[inline]
    pub fn fixed_rate(&self) -> f64 {
        self.fixed_leg.first().fixed_rate()
    }

    /// Last payment time of either leg.
    pub fn maturity_time(&self) -> f64 {
        self.fixed_leg
            .last()
            .payment_time()
            .max(self.ibor_leg.last().payment_time())
    }

    /// Same swap with every fixed coupon at `rate`.
    pub fn with_fixed_rate(&self, rate: f64) -> Result<Self, InstrumentError> {
        Ok(Self {
            fixed_leg: self.fixed_leg.map(|c| c.with_rate(rate))?,
            ibor_leg: self.ibor_leg.clone(),
        })
    }
}

/// Swap of a compounded fixed leg against a compounded overnight leg.
///
/// Each leg usually has a single coupon paid at maturity.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SwapFixedOnCompounded {
    fixed_leg: Annuity<CouponFixedAccruedCompounding>,
    on_leg: Annuity<CouponOnCompounded>,
}

impl SwapFixedOnCompounded {
    /// Creates the swap.
    ///
    /// # Errors
    ///
    /// Returns an error if the legs are in different currencies or have the
    /// same direction.
    pub fn new(
        fixed_leg: Annuity<CouponFixedAccruedCompounding>,
        on_leg: Annuity<CouponOnCompounded>,
    ) -> Result<Self, InstrumentError> {
        check_legs(&fixed_leg, &on_leg)?;
        Ok(Self { fixed_leg, on_leg })
    }

    /// Compounded fixed leg.
    #[inline]
    pub fn fixed_leg(&self) -> &Annuity<CouponFixedAccruedCompounding> {
        &self.fixed_leg
    }

    /// Compounded overnight leg.
    #[inline]
    pub fn on_leg(&self) -> &Annuity<CouponOnCompounded> {
        &self.on_leg
    }

    /// Currency of the swap.
    #[inline]
    pub fn currency(&self) -> Currency {
        self.fixed_leg.currency()
    }

    /// `true` when the fixed leg is paid.
    #[inline]
    pub fn is_payer(&self) -> bool {
        self.fixed_leg.is_payer()
    }

    /// Annual compounded rate of the first fixed coupon.
    #[inline]
    pub fn fixed_rate(&self) -> f64 {
        self.fixed_leg.first().fixed_rate()
    }
}
