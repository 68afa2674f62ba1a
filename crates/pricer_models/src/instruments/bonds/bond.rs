//! Fixed-coupon bond security in time-based form.

use pricer_core::types::Currency;

use super::yield_convention::YieldConvention;
use crate::instruments::error::{check_time, InstrumentError};
use crate::instruments::rates::{Annuity, CouponFixed, Payment, PaymentFixed};

/// Fixed-coupon bond as seen from a reference date.
///
/// The coupon annuity holds the coupons paid after settlement. When the bond
/// settles ex-coupon the first coupon is kept with a zero rate, the buyer does
/// not receive it, and the accrued interest is negative.
///
/// Prices and accrued interest are quoted per unit of notional.
///
/// # Examples
///
/// ```
/// use pricer_models::instruments::bonds::{BondFixedSecurity, YieldConvention};
/// use pricer_models::instruments::rates::{Annuity, CouponFixed, PaymentFixed};
/// use pricer_core::types::time::Date;
/// use pricer_core::types::Currency;
///
/// let start = Date::from_ymd(2024, 1, 15).unwrap();
/// let end = Date::from_ymd(2025, 1, 15).unwrap();
/// let bond = BondFixedSecurity::builder()
///     .nominal(Annuity::new(vec![PaymentFixed::new(Currency::EUR, 1.0, 100.0).unwrap()]).unwrap())
///     .coupon(Annuity::new(vec![
///         CouponFixed::new(Currency::EUR, 1.0, 1.0, 100.0, 0.03, start, end).unwrap(),
///     ]).unwrap())
///     .settlement_time(0.0)
///     .accrued_interest(0.0)
///     .factor_to_next_coupon(1.0)
///     .coupons_per_year(1)
///     .yield_convention(YieldConvention::GermanBond)
///     .issuer("DE GOVT")
///     .build()
///     .unwrap();
/// assert_eq!(bond.notional(), 100.0);
/// assert_eq!(bond.coupon_rate(), 0.03);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BondFixedSecurity {
    nominal: Annuity<PaymentFixed>,
    coupon: Annuity<CouponFixed>,
    settlement_time: f64,
    accrued_interest: f64,
    factor_to_next_coupon: f64,
    coupons_per_year: u32,
    is_ex_coupon: bool,
    yield_convention: YieldConvention,
    issuer: String,
}

impl BondFixedSecurity {
    /// Creates a builder.
    pub fn builder() -> BondFixedSecurityBuilder {
        BondFixedSecurityBuilder::default()
    }

    /// Principal repayments.
    #[inline]
    pub fn nominal(&self) -> &Annuity<PaymentFixed> {
        &self.nominal
    }

    /// Coupons paid after settlement.
    #[inline]
    pub fn coupon(&self) -> &Annuity<CouponFixed> {
        &self.coupon
    }

    /// Settlement time in years from the reference date.
    #[inline]
    pub fn settlement_time(&self) -> f64 {
        self.settlement_time
    }

    /// Accrued interest per unit of notional at settlement.
    #[inline]
    pub fn accrued_interest(&self) -> f64 {
        self.accrued_interest
    }

    /// Fraction of the current coupon period left at settlement.
    #[inline]
    pub fn factor_to_next_coupon(&self) -> f64 {
        self.factor_to_next_coupon
    }

    /// Coupon frequency.
    #[inline]
    pub fn coupons_per_year(&self) -> u32 {
        self.coupons_per_year
    }

    /// `true` when the settlement is in the ex-coupon period.
    #[inline]
    pub fn is_ex_coupon(&self) -> bool {
        self.is_ex_coupon
    }

    /// Yield convention.
    #[inline]
    pub fn yield_convention(&self) -> YieldConvention {
        self.yield_convention
    }

    /// Issuer name, the key of the issuer curve.
    #[inline]
    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    /// Currency of the bond.
    #[inline]
    pub fn currency(&self) -> Currency {
        self.nominal.currency()
    }

    /// Notional: the last principal repayment.
    #[inline]
    pub fn notional(&self) -> f64 {
        self.nominal.last().amount()
    }

    /// Coupon rate (of the last coupon, which is never zeroed).
    #[inline]
    pub fn coupon_rate(&self) -> f64 {
        self.coupon.last().fixed_rate()
    }

    /// Number of remaining coupons.
    #[inline]
    pub fn remaining_coupons(&self) -> usize {
        self.coupon.len()
    }
}

/// Builder for [`BondFixedSecurity`].
#[derive(Debug, Clone, Default)]
pub struct BondFixedSecurityBuilder {
    nominal: Option<Annuity<PaymentFixed>>,
    coupon: Option<Annuity<CouponFixed>>,
    settlement_time: Option<f64>,
    accrued_interest: f64,
    factor_to_next_coupon: Option<f64>,
    coupons_per_year: Option<u32>,
    is_ex_coupon: bool,
    yield_convention: Option<YieldConvention>,
    issuer: String,
}

impl BondFixedSecurityBuilder {
    /// Sets the principal repayments.
    pub fn nominal(mut self, nominal: Annuity<PaymentFixed>) -> Self {
        self.nominal = Some(nominal);
        self
    }

    /// Sets the coupons.
    pub fn coupon(mut self, coupon: Annuity<CouponFixed>) -> Self {
        self.coupon = Some(coupon);
        self
    }

    /// Sets the settlement time.
    pub fn settlement_time(mut self, time: f64) -> Self {
        self.settlement_time = Some(time);
        self
    }

    /// Sets the accrued interest per unit of notional (default 0).
    pub fn accrued_interest(mut self, accrued: f64) -> Self {
        self.accrued_interest = accrued;
        self
    }

    /// Sets the fraction of the current period left at settlement.
    pub fn factor_to_next_coupon(mut self, factor: f64) -> Self {
        self.factor_to_next_coupon = Some(factor);
        self
    }

    /// Sets the coupon frequency.
    pub fn coupons_per_year(mut self, n: u32) -> Self {
        self.coupons_per_year = Some(n);
        self
    }

    /// Marks the settlement as ex-coupon (default `false`).
    pub fn ex_coupon(mut self, is_ex_coupon: bool) -> Self {
        self.is_ex_coupon = is_ex_coupon;
        self
    }

    /// Sets the yield convention.
    pub fn yield_convention(mut self, convention: YieldConvention) -> Self {
        self.yield_convention = Some(convention);
        self
    }

    /// Sets the issuer name.
    pub fn issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = issuer.into();
        self
    }

    /// Builds the bond.
    ///
    /// # Errors
    ///
    /// Returns an error when a required field is missing, the legs are in
    /// different currencies, the factor is outside `[0, 1]`, the frequency
    /// is zero or the convention is not a bond convention.
    pub fn build(self) -> Result<BondFixedSecurity, InstrumentError> {
        let missing = |field: &str| InstrumentError::InvalidParameter {
            message: format!("missing bond field: {}", field),
        };
        let nominal = self.nominal.ok_or_else(|| missing("nominal"))?;
        let coupon = self.coupon.ok_or_else(|| missing("coupon"))?;
        let settlement_time = self
            .settlement_time
            .ok_or_else(|| missing("settlement_time"))?;
        let factor = self
            .factor_to_next_coupon
            .ok_or_else(|| missing("factor_to_next_coupon"))?;
        let coupons_per_year = self
            .coupons_per_year
            .ok_or_else(|| missing("coupons_per_year"))?;
        let yield_convention = self
            .yield_convention
            .ok_or_else(|| missing("yield_convention"))?;

        check_time("settlement", settlement_time)?;
        if nominal.currency() != coupon.currency() {
            return Err(InstrumentError::CurrencyMismatch {
                expected: nominal.currency(),
                found: coupon.currency(),
            });
        }
        if !(0.0..=1.0).contains(&factor) {
            return Err(InstrumentError::InvalidParameter {
                message: format!("factor to next coupon {} outside [0, 1]", factor),
            });
        }
        if coupons_per_year == 0 {
            return Err(InstrumentError::InvalidParameter {
                message: "coupons per year must be positive".to_string(),
            });
        }
        if !yield_convention.is_bond_convention() {
            return Err(InstrumentError::InvalidParameter {
                message: format!("{} is not a bond yield convention", yield_convention),
            });
        }
        if coupon.first().payment_time() < settlement_time {
            return Err(InstrumentError::InvalidTime {
                name: "first coupon payment",
                time: coupon.first().payment_time(),
            });
        }

        Ok(BondFixedSecurity {
            nominal,
            coupon,
            settlement_time,
            accrued_interest: self.accrued_interest,
            factor_to_next_coupon: factor,
            coupons_per_year,
            is_ex_coupon: self.is_ex_coupon,
            yield_convention,
            issuer: self.issuer,
        })
    }
}
