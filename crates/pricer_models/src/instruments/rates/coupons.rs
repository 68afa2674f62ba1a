//! Time-based payments and coupons.
//!
//! Every payment is expressed relative to a reference date: times are year
//! fractions (ACT/365) from that date. A negative notional is paid, a
//! positive notional is received.

use pricer_core::types::time::Date;
use pricer_core::types::{Currency, IborIndex, OvernightIndex};

use crate::instruments::error::{check_notional, check_time, InstrumentError};

/// Common view of anything paid at a single time.
pub trait Payment {
    /// Payment currency.
    fn currency(&self) -> Currency;

    /// Payment time in years from the reference date.
    fn payment_time(&self) -> f64;
}

/// A payment with an accrual period and a notional.
pub trait Coupon: Payment {
    /// Signed notional (negative when paid).
    fn notional(&self) -> f64;

    /// Accrual factor of the coupon period.
    fn payment_year_fraction(&self) -> f64;
}

/// Fixed amount paid at a given time (bond redemption).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PaymentFixed {
    currency: Currency,
    payment_time: f64,
    amount: f64,
}

impl PaymentFixed {
    /// Creates a fixed payment.
    ///
    /// # Errors
    ///
    /// Returns an error if `payment_time` is negative or not finite.
    pub fn new(
        currency: Currency,
        payment_time: f64,
        amount: f64,
    ) -> Result<Self, InstrumentError> {
        check_time("payment", payment_time)?;
        Ok(Self {
            currency,
            payment_time,
            amount,
        })
    }

    /// Signed amount paid.
    #[inline]
    pub fn amount(&self) -> f64 {
        self.amount
    }
}

impl Payment for PaymentFixed {
    fn currency(&self) -> Currency {
        self.currency
    }

    fn payment_time(&self) -> f64 {
        self.payment_time
    }
}

/// Coupon paying `notional · rate · δ`.
///
/// The accrual dates are kept so that the accrual factor can be recomputed
/// under another day count (annuity of a swaption generator).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CouponFixed {
    currency: Currency,
    payment_time: f64,
    payment_year_fraction: f64,
    notional: f64,
    fixed_rate: f64,
    accrual_start_date: Date,
    accrual_end_date: Date,
}

impl CouponFixed {
    /// Creates a fixed coupon.
    ///
    /// # Arguments
    ///
    /// * `currency` - Payment currency
    /// * `payment_time` - Payment time in years
    /// * `payment_year_fraction` - Accrual factor of the period
    /// * `notional` - Signed notional
    /// * `fixed_rate` - Coupon rate
    /// * `accrual_start_date` - Start of the accrual period
    /// * `accrual_end_date` - End of the accrual period
    ///
    /// # Errors
    ///
    /// Returns an error for a negative or non-finite time or accrual factor,
    /// a zero notional, or accrual dates out of order.
    pub fn new(
        currency: Currency,
        payment_time: f64,
        payment_year_fraction: f64,
        notional: f64,
        fixed_rate: f64,
        accrual_start_date: Date,
        accrual_end_date: Date,
    ) -> Result<Self, InstrumentError> {
        check_time("payment", payment_time)?;
        check_time("accrual factor", payment_year_fraction)?;
        check_notional(notional)?;
        if accrual_end_date < accrual_start_date {
            return Err(InstrumentError::InvalidParameter {
                message: format!(
                    "accrual end {} before start {}",
                    accrual_end_date, accrual_start_date
                ),
            });
        }
        Ok(Self {
            currency,
            payment_time,
            payment_year_fraction,
            notional,
            fixed_rate,
            accrual_start_date,
            accrual_end_date,
        })
    }

    /// Coupon rate.
    #[inline]
    pub fn fixed_rate(&self) -> f64 {
        self.fixed_rate
    }

    /// Start of the accrual period.
    #[inline]
    pub fn accrual_start_date(&self) -> Date {
        self.accrual_start_date
    }

    /// End of the accrual period.
    #[inline]
    pub fn accrual_end_date(&self) -> Date {
        self.accrual_end_date
    }

    /// Signed amount paid: `notional · rate · δ`.
    #[inline]
    pub fn amount(&self) -> f64 {
        self.notional * self.fixed_rate * self.payment_year_fraction
    }

    /// Same coupon with another rate.
    pub fn with_rate(&self, fixed_rate: f64) -> Self {
        Self { fixed_rate, ..*self }
    }

    /// Same coupon with another notional.
    pub fn with_notional(&self, notional: f64) -> Self {
        Self { notional, ..*self }
    }
}

impl Payment for CouponFixed {
    fn currency(&self) -> Currency {
        self.currency
    }

    fn payment_time(&self) -> f64 {
        self.payment_time
    }
}

impl Coupon for CouponFixed {
    fn notional(&self) -> f64 {
        self.notional
    }

    fn payment_year_fraction(&self) -> f64 {
        self.payment_year_fraction
    }
}

/// Fixing period of a term-rate coupon, in years from the reference date.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IborFixingPeriod {
    /// Fixing time.
    pub fixing_time: f64,
    /// Start of the forward period.
    pub start_time: f64,
    /// End of the forward period.
    pub end_time: f64,
    /// Accrual factor of the forward period in the index day count.
    pub accrual_factor: f64,
}

impl IborFixingPeriod {
    fn validate(&self) -> Result<(), InstrumentError> {
        check_time("fixing", self.fixing_time)?;
        check_time("fixing period start", self.start_time)?;
        check_time("fixing period end", self.end_time)?;
        if self.end_time <= self.start_time || self.accrual_factor <= 0.0 {
            return Err(InstrumentError::InvalidParameter {
                message: format!(
                    "empty fixing period [{}, {}]",
                    self.start_time, self.end_time
                ),
            });
        }
        Ok(())
    }
}

/// Coupon paying `notional · (F + spread) · δ` on a term-rate index.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CouponIbor {
    currency: Currency,
    payment_time: f64,
    payment_year_fraction: f64,
    notional: f64,
    index: IborIndex,
    fixing: IborFixingPeriod,
    spread: f64,
}

impl CouponIbor {
    /// Creates a term-rate coupon without spread.
    ///
    /// # Errors
    ///
    /// Returns an error for invalid times, a zero notional, an empty fixing
    /// period or an index in another currency.
    pub fn new(
        currency: Currency,
        payment_time: f64,
        payment_year_fraction: f64,
        notional: f64,
        index: IborIndex,
        fixing: IborFixingPeriod,
    ) -> Result<Self, InstrumentError> {
        check_time("payment", payment_time)?;
        check_time("accrual factor", payment_year_fraction)?;
        check_notional(notional)?;
        fixing.validate()?;
        if index.currency() != currency {
            return Err(InstrumentError::CurrencyMismatch {
                expected: currency,
                found: index.currency(),
            });
        }
        Ok(Self {
            currency,
            payment_time,
            payment_year_fraction,
            notional,
            index,
            fixing,
            spread: 0.0,
        })
    }

    /// Same coupon with a spread over the index.
    pub fn with_spread(self, spread: f64) -> Self {
        Self { spread, ..self }
    }

    /// Index the coupon fixes on.
    #[inline]
    pub fn index(&self) -> IborIndex {
        self.index
    }

    /// Fixing period.
    #[inline]
    pub fn fixing(&self) -> &IborFixingPeriod {
        &self.fixing
    }

    /// Spread over the index.
    #[inline]
    pub fn spread(&self) -> f64 {
        self.spread
    }

    /// Same coupon with another notional.
    pub fn with_notional(&self, notional: f64) -> Self {
        Self { notional, ..*self }
    }
}

impl Payment for CouponIbor {
    fn currency(&self) -> Currency {
        self.currency
    }

    fn payment_time(&self) -> f64 {
        self.payment_time
    }
}

impl Coupon for CouponIbor {
    fn notional(&self) -> f64 {
        self.notional
    }

    fn payment_year_fraction(&self) -> f64 {
        self.payment_year_fraction
    }
}

/// Fixed coupon compounded over its period: `notional · ((1+K)^δ − 1)`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CouponFixedAccruedCompounding {
    currency: Currency,
    payment_time: f64,
    payment_year_fraction: f64,
    notional: f64,
    fixed_rate: f64,
    accrual_start_date: Date,
    accrual_end_date: Date,
}

impl CouponFixedAccruedCompounding {
    /// Creates a compounded fixed coupon.
    ///
    /// # Errors
    ///
    /// Same validation as [`CouponFixed::new`], plus a rate above −100%.
    pub fn new(
        currency: Currency,
        payment_time: f64,
        payment_year_fraction: f64,
        notional: f64,
        fixed_rate: f64,
        accrual_start_date: Date,
        accrual_end_date: Date,
    ) -> Result<Self, InstrumentError> {
        CouponFixed::new(
            currency,
            payment_time,
            payment_year_fraction,
            notional,
            fixed_rate,
            accrual_start_date,
            accrual_end_date,
        )?;
        if fixed_rate <= -1.0 {
            return Err(InstrumentError::InvalidParameter {
                message: format!("compounded rate {} not above -100%", fixed_rate),
            });
        }
        Ok(Self {
            currency,
            payment_time,
            payment_year_fraction,
            notional,
            fixed_rate,
            accrual_start_date,
            accrual_end_date,
        })
    }

    /// Annual compounded rate.
    #[inline]
    pub fn fixed_rate(&self) -> f64 {
        self.fixed_rate
    }

    /// Rate over the whole period: `(1+K)^δ − 1`.
    #[inline]
    pub fn period_rate(&self) -> f64 {
        (1.0 + self.fixed_rate).powf(self.payment_year_fraction) - 1.0
    }

    /// Signed amount paid.
    #[inline]
    pub fn amount(&self) -> f64 {
        self.notional * self.period_rate()
    }

    /// Start of the accrual period.
    #[inline]
    pub fn accrual_start_date(&self) -> Date {
        self.accrual_start_date
    }

    /// End of the accrual period.
    #[inline]
    pub fn accrual_end_date(&self) -> Date {
        self.accrual_end_date
    }
}

impl Payment for CouponFixedAccruedCompounding {
    fn currency(&self) -> Currency {
        self.currency
    }

    fn payment_time(&self) -> f64 {
        self.payment_time
    }
}

impl Coupon for CouponFixedAccruedCompounding {
    fn notional(&self) -> f64 {
        self.notional
    }

    fn payment_year_fraction(&self) -> f64 {
        self.payment_year_fraction
    }
}

/// One compounding sub-period of an overnight coupon.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OvernightFixingPeriod {
    /// Start of the sub-period.
    pub start_time: f64,
    /// End of the sub-period.
    pub end_time: f64,
    /// Accrual factor in the index day count.
    pub accrual_factor: f64,
}

/// Coupon paying the compounded overnight rate:
/// `notional · (Π(1 + δ_j F_j) − 1)`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CouponOnCompounded {
    currency: Currency,
    payment_time: f64,
    payment_year_fraction: f64,
    notional: f64,
    index: OvernightIndex,
    fixing_periods: Vec<OvernightFixingPeriod>,
}

impl CouponOnCompounded {
    /// Creates a compounded overnight coupon.
    ///
    /// # Errors
    ///
    /// Returns an error for invalid times, a zero notional, no fixing
    /// period, an empty sub-period or an index in another currency.
    pub fn new(
        currency: Currency,
        payment_time: f64,
        payment_year_fraction: f64,
        notional: f64,
        index: OvernightIndex,
        fixing_periods: Vec<OvernightFixingPeriod>,
    ) -> Result<Self, InstrumentError> {
        check_time("payment", payment_time)?;
        check_time("accrual factor", payment_year_fraction)?;
        check_notional(notional)?;
        if fixing_periods.is_empty() {
            return Err(InstrumentError::EmptyLeg {
                leg: "overnight fixing periods",
            });
        }
        for period in &fixing_periods {
            check_time("fixing period start", period.start_time)?;
            if period.end_time <= period.start_time || period.accrual_factor <= 0.0 {
                return Err(InstrumentError::InvalidParameter {
                    message: format!(
                        "empty overnight period [{}, {}]",
                        period.start_time, period.end_time
                    ),
                });
            }
        }
        if index.currency() != currency {
            return Err(InstrumentError::CurrencyMismatch {
                expected: currency,
                found: index.currency(),
            });
        }
        Ok(Self {
            currency,
            payment_time,
            payment_year_fraction,
            notional,
            index,
            fixing_periods,
        })
    }

    /// Overnight index.
    #[inline]
    pub fn index(&self) -> OvernightIndex {
        self.index
    }

    /// Compounding sub-periods.
    #[inline]
    pub fn fixing_periods(&self) -> &[OvernightFixingPeriod] {
        &self.fixing_periods
    }
}

impl Payment for CouponOnCompounded {
    fn currency(&self) -> Currency {
        self.currency
    }

    fn payment_time(&self) -> f64 {
        self.payment_time
    }
}

impl Coupon for CouponOnCompounded {
    fn notional(&self) -> f64 {
        self.notional
    }

    fn payment_year_fraction(&self) -> f64 {
        self.payment_year_fraction
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    #[test]
    fn test_fixed_coupon_amount() {
        let cpn = CouponFixed::new(
            Currency::EUR,
            1.0,
            0.5,
            -1_000_000.0,
            0.03,
            d(2024, 1, 15),
            d(2024, 7, 15),
        )
        .unwrap();
        assert_relative_eq!(cpn.amount(), -15_000.0, epsilon = 1e-9);
        assert_relative_eq!(cpn.with_rate(0.0).amount(), 0.0);
        assert_eq!(cpn.with_notional(1.0).notional(), 1.0);
    }

    #[test]
    fn test_fixed_coupon_validation() {
        let err = CouponFixed::new(
            Currency::EUR,
            -1.0,
            0.5,
            1.0,
            0.03,
            d(2024, 1, 15),
            d(2024, 7, 15),
        );
        assert!(matches!(err, Err(InstrumentError::InvalidTime { .. })));
        let err = CouponFixed::new(
            Currency::EUR,
            1.0,
            0.5,
            1.0,
            0.03,
            d(2024, 7, 15),
            d(2024, 1, 15),
        );
        assert!(matches!(err, Err(InstrumentError::InvalidParameter { .. })));
    }

    #[test]
    fn test_compounded_fixed_amount() {
        let cpn = CouponFixedAccruedCompounding::new(
            Currency::EUR,
            2.0,
            2.0,
            100.0,
            0.10,
            d(2024, 1, 15),
            d(2026, 1, 15),
        )
        .unwrap();
        assert_relative_eq!(cpn.period_rate(), 0.21, epsilon = 1e-14);
        assert_relative_eq!(cpn.amount(), 21.0, epsilon = 1e-12);
    }

    #[test]
    fn test_ibor_coupon_currency_check() {
        let fixing = IborFixingPeriod {
            fixing_time: 0.5,
            start_time: 0.51,
            end_time: 1.01,
            accrual_factor: 0.5,
        };
        let coupon = CouponIbor::new(Currency::EUR, 1.01, 0.5, 1.0, IborIndex::Euribor6M, fixing);
        assert!(coupon.is_ok());
        assert!(matches!(
            CouponIbor::new(Currency::USD, 1.01, 0.5, 1.0, IborIndex::Euribor6M, fixing),
            Err(InstrumentError::CurrencyMismatch { .. })
        ));
    }

    #[test]
    fn test_overnight_coupon_rejects_empty_fixings() {
        assert!(matches!(
            CouponOnCompounded::new(Currency::EUR, 1.0, 1.0, 1.0, OvernightIndex::Estr, vec![]),
            Err(InstrumentError::EmptyLeg { .. })
        ));
    }
}
