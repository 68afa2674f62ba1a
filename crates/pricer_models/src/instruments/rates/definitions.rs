//! Date-based swap and swaption definitions.
//!
//! A definition is the trade as booked, with dates and conventions. Calling
//! `to_derivative(reference_date)` produces the time-based instrument the
//! pricing methods consume, with every date converted to an ACT/365 time
//! from the reference date.
//!
//! Schedules roll backwards from the maturity date with modified following
//! adjustment of both accrual and payment dates.
//!
//! # Examples
//!
//! ```
//! use pricer_models::instruments::rates::SwapFixedIborDefinition;
//! use pricer_models::schedules::Frequency;
//! use pricer_core::types::time::{Calendar, Date, DayCountConvention};
//! use pricer_core::types::IborIndex;
//!
//! let definition = SwapFixedIborDefinition {
//!     index: IborIndex::Euribor6M,
//!     start_date: Date::from_ymd(2025, 1, 15).unwrap(),
//!     tenor_years: 5,
//!     fixed_frequency: Frequency::Annual,
//!     fixed_day_count: DayCountConvention::Thirty360,
//!     notional: 1_000_000.0,
//!     fixed_rate: 0.025,
//!     is_payer: true,
//!     calendar: Calendar::weekends_only(),
//! };
//! let swap = definition
//!     .to_derivative(Date::from_ymd(2024, 1, 15).unwrap())
//!     .unwrap();
//! assert_eq!(swap.fixed_leg().len(), 5);
//! assert_eq!(swap.ibor_leg().len(), 10);
//! assert!(swap.is_payer());
//! ```

use pricer_core::types::time::{
    time_to_maturity_dates, BusinessDayConvention, Calendar, Date, DayCountConvention,
};
use pricer_core::types::{IborIndex, OvernightIndex};

use super::annuity::Annuity;
use super::coupons::{
    CouponFixed, CouponFixedAccruedCompounding, CouponIbor, CouponOnCompounded,
    IborFixingPeriod, OvernightFixingPeriod,
};
use super::swap::{SwapFixedIbor, SwapFixedOnCompounded};
use super::swaption::{
    SwaptionCashFixedCompoundedOn, SwaptionPhysicalFixedCompoundedOn, SwaptionPhysicalFixedIbor,
    SwaptionTerms,
};
use crate::instruments::derivative::InstrumentDerivative;
use crate::instruments::error::{check_notional, InstrumentError};
use crate::schedules::{Frequency, Schedule, ScheduleBuilder};

fn adjusted_schedule(
    start: Date,
    end: Date,
    frequency: Frequency,
    day_count: DayCountConvention,
    calendar: &Calendar,
) -> Result<Schedule, InstrumentError> {
    Ok(ScheduleBuilder::new()
        .start(start)
        .end(end)
        .frequency(frequency)
        .day_count(day_count)
        .calendar(calendar.clone())
        .business_day_convention(BusinessDayConvention::ModifiedFollowing)
        .adjust_accrual(true)
        .build()?)
}

fn leg_notionals(notional: f64, is_payer: bool) -> Result<(f64, f64), InstrumentError> {
    check_notional(notional)?;
    let fixed = if is_payer {
        -notional.abs()
    } else {
        notional.abs()
    };
    Ok((fixed, -fixed))
}

/// Fixed/term-rate swap as booked.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SwapFixedIborDefinition {
    /// Term-rate index of the floating leg.
    pub index: IborIndex,
    /// Effective date of the swap.
    pub start_date: Date,
    /// Tenor in whole years.
    pub tenor_years: u32,
    /// Fixed leg coupon frequency.
    pub fixed_frequency: Frequency,
    /// Fixed leg day count.
    pub fixed_day_count: DayCountConvention,
    /// Absolute notional.
    pub notional: f64,
    /// Fixed rate.
    pub fixed_rate: f64,
    /// `true` when the fixed leg is paid.
    pub is_payer: bool,
    /// Business-day calendar; weekends only when omitted.
    #[cfg_attr(feature = "serde", serde(default))]
    pub calendar: Calendar,
}

impl SwapFixedIborDefinition {
    /// Maturity date before adjustment.
    pub fn maturity_date(&self) -> Result<Date, InstrumentError> {
        Ok(self.start_date.add_years(self.tenor_years as i32)?)
    }

    /// Converts to the time-based swap.
    ///
    /// # Errors
    ///
    /// Returns an error if the index tenor has no matching frequency, the
    /// swap fixes before the reference date or any coupon is invalid.
    pub fn to_derivative(&self, reference_date: Date) -> Result<SwapFixedIbor, InstrumentError> {
        let currency = self.index.currency();
        let end = self.maturity_date()?;
        let (fixed_notional, ibor_notional) = leg_notionals(self.notional, self.is_payer)?;
        let time = |date: Date| time_to_maturity_dates(reference_date, date);

        let fixed_schedule = adjusted_schedule(
            self.start_date,
            end,
            self.fixed_frequency,
            self.fixed_day_count,
            &self.calendar,
        )?;
        let fixed_coupons = fixed_schedule
            .iter()
            .map(|p| {
                CouponFixed::new(
                    currency,
                    time(p.payment()),
                    p.year_fraction(),
                    fixed_notional,
                    self.fixed_rate,
                    p.start(),
                    p.end(),
                )
            })
            .collect::<Result<Vec<_>, _>>()?;

        let ibor_frequency = Frequency::from_periods_per_year(12 / self.index.tenor_months())
            .ok_or_else(|| InstrumentError::InvalidParameter {
                message: format!("no coupon frequency for index {}", self.index),
            })?;
        let ibor_schedule = adjusted_schedule(
            self.start_date,
            end,
            ibor_frequency,
            self.index.day_count(),
            &self.calendar,
        )?;
        let ibor_coupons = ibor_schedule
            .iter()
            .map(|p| {
                let fixing_date = self
                    .calendar
                    .add_business_days(p.start(), -(self.index.spot_lag() as i32))?;
                CouponIbor::new(
                    currency,
                    time(p.payment()),
                    p.year_fraction(),
                    ibor_notional,
                    self.index,
                    IborFixingPeriod {
                        fixing_time: time(fixing_date),
                        start_time: time(p.start()),
                        end_time: time(p.end()),
                        accrual_factor: p.year_fraction(),
                    },
                )
            })
            .collect::<Result<Vec<_>, InstrumentError>>()?;

        SwapFixedIbor::new(Annuity::new(fixed_coupons)?, Annuity::new(ibor_coupons)?)
    }
}

/// Compounded fixed/overnight swap as booked: one coupon per leg paid at
/// maturity.
///
/// The overnight coupon compounds over sub-periods of `fixing_frequency`.
/// The compounded forward telescopes over contiguous sub-periods, so the
/// granularity does not change the value.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SwapFixedOnCompoundedDefinition {
    /// Overnight index.
    pub index: OvernightIndex,
    /// Effective date.
    pub start_date: Date,
    /// Tenor in whole years.
    pub tenor_years: u32,
    /// Day count of the compounding exponent of the fixed leg.
    pub fixed_day_count: DayCountConvention,
    /// Sub-period frequency of the overnight leg.
    pub fixing_frequency: Frequency,
    /// Absolute notional.
    pub notional: f64,
    /// Annual compounded fixed rate.
    pub fixed_rate: f64,
    /// `true` when the fixed leg is paid.
    pub is_payer: bool,
    /// Business-day calendar; weekends only when omitted.
    #[cfg_attr(feature = "serde", serde(default))]
    pub calendar: Calendar,
}

impl SwapFixedOnCompoundedDefinition {
    /// Converts to the time-based swap.
    ///
    /// # Errors
    ///
    /// Returns an error if the swap starts before the reference date or any
    /// coupon is invalid.
    pub fn to_derivative(
        &self,
        reference_date: Date,
    ) -> Result<SwapFixedOnCompounded, InstrumentError> {
        let currency = self.index.currency();
        let end = self.start_date.add_years(self.tenor_years as i32)?;
        let payment_date = self
            .calendar
            .adjust(end, BusinessDayConvention::ModifiedFollowing)?;
        let (fixed_notional, on_notional) = leg_notionals(self.notional, self.is_payer)?;
        let time = |date: Date| time_to_maturity_dates(reference_date, date);
        let payment_time = time(payment_date);
        let accrual = self.fixed_day_count.year_fraction_dates(self.start_date, end);

        let fixed = CouponFixedAccruedCompounding::new(
            currency,
            payment_time,
            accrual,
            fixed_notional,
            self.fixed_rate,
            self.start_date,
            end,
        )?;

        let sub_periods = adjusted_schedule(
            self.start_date,
            end,
            self.fixing_frequency,
            self.index.day_count(),
            &self.calendar,
        )?;
        let fixing_periods = sub_periods
            .iter()
            .map(|p| OvernightFixingPeriod {
                start_time: time(p.start()),
                end_time: time(p.end()),
                accrual_factor: p.year_fraction(),
            })
            .collect();
        let on = CouponOnCompounded::new(
            currency,
            payment_time,
            accrual,
            on_notional,
            self.index,
            fixing_periods,
        )?;

        SwapFixedOnCompounded::new(Annuity::new(vec![fixed])?, Annuity::new(vec![on])?)
    }
}

fn swaption_terms(
    reference_date: Date,
    expiry_date: Date,
    start_date: Date,
    tenor_years: u32,
    is_long: bool,
) -> Result<SwaptionTerms, InstrumentError> {
    SwaptionTerms::new(
        time_to_maturity_dates(reference_date, expiry_date),
        time_to_maturity_dates(reference_date, start_date),
        tenor_years as f64,
        is_long,
    )
}

/// Physically settled swaption on a fixed/term-rate swap, as booked.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SwaptionFixedIborDefinition {
    /// Expiry date.
    pub expiry_date: Date,
    /// Swap delivered on exercise.
    pub underlying: SwapFixedIborDefinition,
    /// `true` when the option is bought.
    pub is_long: bool,
}

impl SwaptionFixedIborDefinition {
    /// Converts to the time-based swaption.
    pub fn to_derivative(
        &self,
        reference_date: Date,
    ) -> Result<SwaptionPhysicalFixedIbor, InstrumentError> {
        let terms = swaption_terms(
            reference_date,
            self.expiry_date,
            self.underlying.start_date,
            self.underlying.tenor_years,
            self.is_long,
        )?;
        Ok(SwaptionPhysicalFixedIbor::new(
            self.underlying.to_derivative(reference_date)?,
            terms,
        ))
    }
}

/// Swaption on a compounded fixed/overnight swap, physical or cash settled.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SwaptionFixedCompoundedOnDefinition {
    /// Expiry date.
    pub expiry_date: Date,
    /// Underlying swap.
    pub underlying: SwapFixedOnCompoundedDefinition,
    /// `true` when the option is bought.
    pub is_long: bool,
    /// `true` for cash settlement.
    pub is_cash: bool,
}

impl SwaptionFixedCompoundedOnDefinition {
    fn terms(&self, reference_date: Date) -> Result<SwaptionTerms, InstrumentError> {
        swaption_terms(
            reference_date,
            self.expiry_date,
            self.underlying.start_date,
            self.underlying.tenor_years,
            self.is_long,
        )
    }

    /// Converts to the physically settled swaption, ignoring `is_cash`.
    pub fn to_physical_derivative(
        &self,
        reference_date: Date,
    ) -> Result<SwaptionPhysicalFixedCompoundedOn, InstrumentError> {
        Ok(SwaptionPhysicalFixedCompoundedOn::new(
            self.underlying.to_derivative(reference_date)?,
            self.terms(reference_date)?,
        ))
    }

    /// Converts to the cash-settled swaption, ignoring `is_cash`.
    pub fn to_cash_derivative(
        &self,
        reference_date: Date,
    ) -> Result<SwaptionCashFixedCompoundedOn, InstrumentError> {
        Ok(SwaptionCashFixedCompoundedOn::new(
            self.underlying.to_derivative(reference_date)?,
            self.terms(reference_date)?,
        ))
    }

    /// Converts to the swaption selected by `is_cash`.
    pub fn to_derivative(
        &self,
        reference_date: Date,
    ) -> Result<InstrumentDerivative, InstrumentError> {
        if self.is_cash {
            Ok(self.to_cash_derivative(reference_date)?.into())
        } else {
            Ok(self.to_physical_derivative(reference_date)?.into())
        }
    }
}
