//! Schedule and ScheduleBuilder implementation.

use super::error::ScheduleError;
use super::frequency::Frequency;
use super::period::Period;
use pricer_core::types::time::{BusinessDayConvention, Calendar, Date, DayCountConvention};

/// Ordered, non-empty list of accrual periods.
///
/// # Examples
///
/// ```
/// use pricer_models::schedules::{Frequency, ScheduleBuilder};
/// use pricer_core::types::time::{Date, DayCountConvention};
///
/// let schedule = ScheduleBuilder::new()
///     .start(Date::from_ymd(2024, 1, 15).unwrap())
///     .end(Date::from_ymd(2026, 1, 15).unwrap())
///     .frequency(Frequency::SemiAnnual)
///     .day_count(DayCountConvention::ActualActual360)
///     .build()
///     .unwrap();
///
/// assert_eq!(schedule.len(), 4);
/// assert_eq!(schedule.payment_dates().len(), 4);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Schedule {
    periods: Vec<Period>,
    payment_dates: Vec<Date>,
}

impl Schedule {
    /// Creates a schedule from a list of periods.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::Empty`] if `periods` is empty and
    /// [`ScheduleError::InvalidDateRange`] if a period ends before it starts.
    pub fn new(periods: Vec<Period>) -> Result<Self, ScheduleError> {
        if periods.is_empty() {
            return Err(ScheduleError::Empty);
        }
        if let Some(p) = periods.iter().find(|p| p.start() >= p.end()) {
            return Err(ScheduleError::InvalidDateRange {
                start: p.start(),
                end: p.end(),
            });
        }
        let payment_dates = periods.iter().map(|p| p.payment()).collect();
        Ok(Self {
            periods,
            payment_dates,
        })
    }

    /// Returns the periods in the schedule.
    #[inline]
    pub fn periods(&self) -> &[Period] {
        &self.periods
    }

    /// Returns the payment dates.
    #[inline]
    pub fn payment_dates(&self) -> &[Date] {
        &self.payment_dates
    }

    /// Returns the number of periods.
    #[inline]
    pub fn len(&self) -> usize {
        self.periods.len()
    }

    /// Always `false`; kept for the `len`/`is_empty` convention.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }

    /// Start date of the first period.
    #[inline]
    pub fn start_date(&self) -> Date {
        self.periods[0].start()
    }

    /// End date of the last period.
    #[inline]
    pub fn end_date(&self) -> Date {
        self.periods[self.periods.len() - 1].end()
    }

    /// Iterates over the periods.
    pub fn iter(&self) -> impl Iterator<Item = &Period> {
        self.periods.iter()
    }

    /// Index of the first period ending strictly after `date`.
    ///
    /// This is the coupon period a trade settling on `date` accrues in.
    pub fn first_period_ending_after(&self, date: Date) -> Option<usize> {
        self.periods.iter().position(|p| p.end() > date)
    }

    /// Sum of the accrual factors of all periods.
    pub fn total_year_fraction(&self) -> f64 {
        self.periods.iter().map(Period::year_fraction).sum()
    }
}

/// Builder generating a schedule backwards from the end date.
///
/// Roll dates are `end - k·months` computed from the end date each time (so
/// month-end clamping does not drift). A roll date before the start date
/// produces a short first stub starting at `start` whose reference period is
/// the full regular period. Payment dates are adjusted with the calendar and
/// business-day convention; accrual dates stay unadjusted unless
/// [`ScheduleBuilder::adjust_accrual`] is set.
#[derive(Debug, Clone)]
pub struct ScheduleBuilder {
    start_date: Option<Date>,
    end_date: Option<Date>,
    frequency: Option<Frequency>,
    day_count: DayCountConvention,
    calendar: Calendar,
    business_day_convention: BusinessDayConvention,
    adjust_accrual: bool,
}

impl Default for ScheduleBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ScheduleBuilder {
    /// Creates a builder with ACT/365, a weekend-only calendar and unadjusted
    /// payment dates.
    pub fn new() -> Self {
        Self {
            start_date: None,
            end_date: None,
            frequency: None,
            day_count: DayCountConvention::ActualActual365,
            calendar: Calendar::weekends_only(),
            business_day_convention: BusinessDayConvention::Unadjusted,
            adjust_accrual: false,
        }
    }

    /// Sets the start date of the schedule.
    pub fn start(mut self, date: Date) -> Self {
        self.start_date = Some(date);
        self
    }

    /// Sets the end date of the schedule.
    pub fn end(mut self, date: Date) -> Self {
        self.end_date = Some(date);
        self
    }

    /// Sets the coupon frequency.
    pub fn frequency(mut self, freq: Frequency) -> Self {
        self.frequency = Some(freq);
        self
    }

    /// Sets the day count convention.
    pub fn day_count(mut self, dc: DayCountConvention) -> Self {
        self.day_count = dc;
        self
    }

    /// Sets the holiday calendar used for payment date adjustment.
    pub fn calendar(mut self, calendar: Calendar) -> Self {
        self.calendar = calendar;
        self
    }

    /// Sets the business-day convention for payment dates.
    pub fn business_day_convention(mut self, bdc: BusinessDayConvention) -> Self {
        self.business_day_convention = bdc;
        self
    }

    /// Adjusts accrual dates with the same convention as payment dates.
    pub fn adjust_accrual(mut self, adjust: bool) -> Self {
        self.adjust_accrual = adjust;
        self
    }

    /// Builds the schedule.
    ///
    /// # Errors
    ///
    /// Returns an error if a required field is missing, if the start date is
    /// not before the end date, or if date arithmetic overflows.
    pub fn build(self) -> Result<Schedule, ScheduleError> {
        let start = self
            .start_date
            .ok_or(ScheduleError::MissingField { field: "start" })?;
        let end = self
            .end_date
            .ok_or(ScheduleError::MissingField { field: "end" })?;
        let frequency = self
            .frequency
            .ok_or(ScheduleError::MissingField { field: "frequency" })?;

        if start >= end {
            return Err(ScheduleError::InvalidDateRange { start, end });
        }

        let months = frequency.months_between_payments() as i32;
        let periods_per_year = frequency.periods_per_year();

        // (accrual start, accrual end, reference start), latest first.
        let mut rolls = Vec::new();
        let mut period_end = end;
        let mut k = 1;
        loop {
            let roll = end.add_months(-k * months)?;
            if roll <= start {
                rolls.push((start, period_end, roll));
                break;
            }
            rolls.push((roll, period_end, roll));
            period_end = roll;
            k += 1;
        }
        rolls.reverse();

        let periods = rolls
            .into_iter()
            .map(|(accrual_start, accrual_end, reference_start)| {
                let payment = self
                    .calendar
                    .adjust(accrual_end, self.business_day_convention)?;
                let (accrual_start, accrual_end) = if self.adjust_accrual {
                    (
                        self.calendar
                            .adjust(accrual_start, self.business_day_convention)?,
                        payment,
                    )
                } else {
                    (accrual_start, accrual_end)
                };
                Ok(Period::new(
                    accrual_start,
                    accrual_end,
                    payment,
                    self.day_count,
                    periods_per_year,
                )
                .with_reference_start(reference_start))
            })
            .collect::<Result<Vec<_>, ScheduleError>>()?;

        Schedule::new(periods)
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
    fn test_schedule_new_rejects_empty() {
        assert_eq!(Schedule::new(vec![]), Err(ScheduleError::Empty));
    }

    #[test]
    fn test_builder_semi_annual_regular() {
        let schedule = ScheduleBuilder::new()
            .start(d(2006, 11, 15))
            .end(d(2016, 11, 15))
            .frequency(Frequency::SemiAnnual)
            .day_count(DayCountConvention::ActualActualIcma)
            .build()
            .unwrap();
        assert_eq!(schedule.len(), 20);
        assert_eq!(schedule.start_date(), d(2006, 11, 15));
        assert_eq!(schedule.periods()[1].start(), d(2007, 5, 15));
        for p in schedule.iter() {
            assert_relative_eq!(p.year_fraction(), 0.5, epsilon = 1e-15);
        }
        assert_relative_eq!(schedule.total_year_fraction(), 10.0, epsilon = 1e-12);
    }

    #[test]
    fn test_builder_short_first_stub() {
        let schedule = ScheduleBuilder::new()
            .start(d(2024, 3, 1))
            .end(d(2025, 1, 15))
            .frequency(Frequency::Quarterly)
            .build()
            .unwrap();
        assert_eq!(schedule.len(), 4);
        let stub = schedule.periods()[0];
        assert_eq!(stub.start(), d(2024, 3, 1));
        assert_eq!(stub.end(), d(2024, 4, 15));
        assert_eq!(stub.reference_start(), d(2024, 1, 15));
    }

    #[test]
    fn test_payment_dates_are_adjusted() {
        // 2011-05-15 is a Sunday.
        let schedule = ScheduleBuilder::new()
            .start(d(2010, 11, 15))
            .end(d(2011, 11, 15))
            .frequency(Frequency::SemiAnnual)
            .business_day_convention(BusinessDayConvention::Following)
            .build()
            .unwrap();
        assert_eq!(schedule.periods()[0].end(), d(2011, 5, 15));
        assert_eq!(schedule.payment_dates()[0], d(2011, 5, 16));
    }

    #[test]
    fn test_adjusted_accrual() {
        let schedule = ScheduleBuilder::new()
            .start(d(2010, 11, 15))
            .end(d(2011, 11, 15))
            .frequency(Frequency::SemiAnnual)
            .business_day_convention(BusinessDayConvention::ModifiedFollowing)
            .adjust_accrual(true)
            .build()
            .unwrap();
        assert_eq!(schedule.periods()[0].end(), d(2011, 5, 16));
        assert_eq!(schedule.periods()[1].start(), d(2011, 5, 16));
    }

    #[test]
    fn test_month_end_rolls_do_not_drift() {
        let schedule = ScheduleBuilder::new()
            .start(d(2023, 8, 31))
            .end(d(2024, 8, 31))
            .frequency(Frequency::Quarterly)
            .build()
            .unwrap();
        let ends: Vec<Date> = schedule.iter().map(|p| p.end()).collect();
        assert_eq!(
            ends,
            vec![d(2023, 11, 30), d(2024, 2, 29), d(2024, 5, 31), d(2024, 8, 31)]
        );
    }

    #[test]
    fn test_first_period_ending_after() {
        let schedule = ScheduleBuilder::new()
            .start(d(2024, 1, 15))
            .end(d(2026, 1, 15))
            .frequency(Frequency::SemiAnnual)
            .build()
            .unwrap();
        assert_eq!(schedule.first_period_ending_after(d(2024, 3, 1)), Some(0));
        assert_eq!(schedule.first_period_ending_after(d(2024, 7, 15)), Some(1));
        assert_eq!(schedule.first_period_ending_after(d(2026, 1, 15)), None);
    }

    #[test]
    fn test_builder_errors() {
        let missing = ScheduleBuilder::new()
            .end(d(2026, 1, 15))
            .frequency(Frequency::Annual)
            .build();
        assert_eq!(missing, Err(ScheduleError::MissingField { field: "start" }));

        let inverted = ScheduleBuilder::new()
            .start(d(2026, 1, 15))
            .end(d(2024, 1, 15))
            .frequency(Frequency::Annual)
            .build();
        assert!(matches!(
            inverted,
            Err(ScheduleError::InvalidDateRange { .. })
        ));
    }
}
