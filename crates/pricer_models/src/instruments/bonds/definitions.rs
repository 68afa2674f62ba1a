//! Date-based bond and bill definitions.
//!
//! Bond coupon schedules roll backwards from maturity without adjusting the
//! accrual dates; only payment dates follow the business-day convention.

use pricer_core::types::time::{
    time_to_maturity_dates, BusinessDayConvention, Calendar, Date, DayCountConvention,
};
use pricer_core::types::Currency;

use super::bill::BillSecurity;
use super::bond::BondFixedSecurity;
use super::yield_convention::YieldConvention;
use crate::instruments::error::{check_notional, InstrumentError};
use crate::instruments::rates::{Annuity, CouponFixed, PaymentFixed};
use crate::schedules::{Frequency, Schedule, ScheduleBuilder};

/// Fixed-coupon bond as issued.
///
/// # Examples
///
/// ```
/// use pricer_models::instruments::bonds::{BondFixedSecurityDefinition, YieldConvention};
/// use pricer_models::schedules::Frequency;
/// use pricer_core::types::time::{BusinessDayConvention, Calendar, Date, DayCountConvention};
/// use pricer_core::types::Currency;
///
/// let definition = BondFixedSecurityDefinition {
///     currency: Currency::USD,
///     start_date: Date::from_ymd(2006, 11, 15).unwrap(),
///     maturity_date: Date::from_ymd(2016, 11, 15).unwrap(),
///     frequency: Frequency::SemiAnnual,
///     coupon_rate: 0.04625,
///     notional: 1.0,
///     day_count: DayCountConvention::ActualActualIcma,
///     business_day_convention: BusinessDayConvention::Following,
///     calendar: Calendar::weekends_only(),
///     settlement_days: 3,
///     ex_coupon_days: 0,
///     yield_convention: YieldConvention::UsStreet,
///     issuer: "US GOVT".to_string(),
/// };
/// let bond = definition
///     .to_derivative(Date::from_ymd(2011, 8, 18).unwrap())
///     .unwrap();
/// assert_eq!(bond.remaining_coupons(), 11);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BondFixedSecurityDefinition {
    /// Currency.
    pub currency: Currency,
    /// First accrual start date.
    pub start_date: Date,
    /// Maturity date (unadjusted).
    pub maturity_date: Date,
    /// Coupon frequency.
    pub frequency: Frequency,
    /// Annual coupon rate.
    pub coupon_rate: f64,
    /// Notional repaid at maturity.
    pub notional: f64,
    /// Coupon day count.
    pub day_count: DayCountConvention,
    /// Payment date adjustment.
    pub business_day_convention: BusinessDayConvention,
    /// Business-day calendar; weekends only when omitted.
    #[cfg_attr(feature = "serde", serde(default))]
    pub calendar: Calendar,
    /// Business days between trade and settlement.
    pub settlement_days: u32,
    /// Business days before a coupon date when the bond goes ex-coupon.
    pub ex_coupon_days: u32,
    /// Yield quotation convention.
    pub yield_convention: YieldConvention,
    /// Issuer name.
    pub issuer: String,
}

impl BondFixedSecurityDefinition {
    /// Coupon schedule from start to maturity.
    pub fn schedule(&self) -> Result<Schedule, InstrumentError> {
        Ok(ScheduleBuilder::new()
            .start(self.start_date)
            .end(self.maturity_date)
            .frequency(self.frequency)
            .day_count(self.day_count)
            .calendar(self.calendar.clone())
            .business_day_convention(self.business_day_convention)
            .build()?)
    }

    /// Standard settlement date for a trade on `reference_date`.
    pub fn settlement_date(&self, reference_date: Date) -> Result<Date, InstrumentError> {
        Ok(self
            .calendar
            .add_business_days(reference_date, self.settlement_days as i32)?)
    }

    /// Converts to the time-based bond with standard settlement.
    pub fn to_derivative(
        &self,
        reference_date: Date,
    ) -> Result<BondFixedSecurity, InstrumentError> {
        let settlement_date = self.settlement_date(reference_date)?;
        self.to_derivative_with_settlement(reference_date, settlement_date)
    }

    /// Converts to the time-based bond settling on `settlement_date`.
    ///
    /// # Errors
    ///
    /// Returns an error if the bond has matured by the settlement date or
    /// the settlement date precedes the reference date.
    pub fn to_derivative_with_settlement(
        &self,
        reference_date: Date,
        settlement_date: Date,
    ) -> Result<BondFixedSecurity, InstrumentError> {
        check_notional(self.notional)?;
        if settlement_date < reference_date {
            return Err(InstrumentError::InvalidParameter {
                message: format!(
                    "settlement {} before reference date {}",
                    settlement_date, reference_date
                ),
            });
        }
        let schedule = self.schedule()?;
        let current = schedule
            .first_period_ending_after(settlement_date)
            .ok_or_else(|| InstrumentError::InvalidParameter {
                message: format!("bond matured on {}", self.maturity_date),
            })?;
        let periods = &schedule.periods()[current..];
        let current_period = &periods[0];

        let ex_date = self
            .calendar
            .add_business_days(current_period.end(), -(self.ex_coupon_days as i32))?;
        let is_ex_coupon = self.ex_coupon_days > 0 && settlement_date >= ex_date;

        let mut accrued =
            self.coupon_rate * current_period.accrued_fraction_to(settlement_date);
        if is_ex_coupon {
            accrued -= self.coupon_rate * current_period.year_fraction();
        }
        let factor = (current_period.end() - settlement_date) as f64
            / (current_period.end() - current_period.reference_start()) as f64;

        let time = |date: Date| time_to_maturity_dates(reference_date, date);
        let coupons = periods
            .iter()
            .enumerate()
            .map(|(i, p)| {
                let rate = if i == 0 && is_ex_coupon {
                    0.0
                } else {
                    self.coupon_rate
                };
                CouponFixed::new(
                    self.currency,
                    time(p.payment()),
                    p.year_fraction(),
                    self.notional,
                    rate,
                    p.start(),
                    p.end(),
                )
            })
            .collect::<Result<Vec<_>, _>>()?;
        let maturity_payment = schedule.end_date();
        let nominal = PaymentFixed::new(
            self.currency,
            time(self.calendar.adjust(maturity_payment, self.business_day_convention)?),
            self.notional,
        )?;

        tracing::debug!(
            issuer = %self.issuer,
            %settlement_date,
            coupons = coupons.len(),
            is_ex_coupon,
            "bond converted"
        );

        BondFixedSecurity::builder()
            .nominal(Annuity::new(vec![nominal])?)
            .coupon(Annuity::new(coupons)?)
            .settlement_time(time(settlement_date))
            .accrued_interest(accrued)
            .factor_to_next_coupon(factor.clamp(0.0, 1.0))
            .coupons_per_year(self.frequency.periods_per_year())
            .ex_coupon(is_ex_coupon)
            .yield_convention(self.yield_convention)
            .issuer(self.issuer.clone())
            .build()
    }
}

/// Bill as issued.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BillSecurityDefinition {
    /// Currency.
    pub currency: Currency,
    /// Maturity date.
    pub maturity_date: Date,
    /// Notional paid at maturity.
    pub notional: f64,
    /// Day count of the yield.
    pub day_count: DayCountConvention,
    /// Business-day calendar; weekends only when omitted.
    #[cfg_attr(feature = "serde", serde(default))]
    pub calendar: Calendar,
    /// Business days between trade and settlement.
    pub settlement_days: u32,
    /// Yield quotation convention.
    pub yield_convention: YieldConvention,
    /// Issuer name.
    pub issuer: String,
}

impl BillSecurityDefinition {
    /// Converts to the time-based bill with standard settlement.
    pub fn to_derivative(&self, reference_date: Date) -> Result<BillSecurity, InstrumentError> {
        let settlement_date = self
            .calendar
            .add_business_days(reference_date, self.settlement_days as i32)?;
        self.to_derivative_with_settlement(reference_date, settlement_date)
    }

    /// Converts to the time-based bill settling on `settlement_date`.
    pub fn to_derivative_with_settlement(
        &self,
        reference_date: Date,
        settlement_date: Date,
    ) -> Result<BillSecurity, InstrumentError> {
        if settlement_date >= self.maturity_date {
            return Err(InstrumentError::InvalidParameter {
                message: format!("bill matured on {}", self.maturity_date),
            });
        }
        BillSecurity::new(
            self.currency,
            time_to_maturity_dates(reference_date, settlement_date),
            time_to_maturity_dates(reference_date, self.maturity_date),
            self.notional,
            self.day_count
                .year_fraction_dates(settlement_date, self.maturity_date),
            self.yield_convention,
            self.issuer.clone(),
        )
    }
}
