//! Accrual period of a coupon schedule.

use pricer_core::types::time::{Date, DayCountConvention};
use std::fmt;

/// A single accrual period in a schedule.
///
/// Accrual dates are the unadjusted roll dates unless the schedule was built
/// with adjusted accrual; the payment date is always business-day adjusted.
/// `reference_start` is the start of the regular period ending at `end`; it
/// differs from `start` only for a short first stub and drives the
/// reference-period day counts (ACT/ACT ICMA).
///
/// # Examples
///
/// ```
/// use pricer_models::schedules::Period;
/// use pricer_core::types::time::{Date, DayCountConvention};
///
/// let period = Period::new(
///     Date::from_ymd(2024, 1, 15).unwrap(),
///     Date::from_ymd(2024, 7, 15).unwrap(),
///     Date::from_ymd(2024, 7, 15).unwrap(),
///     DayCountConvention::ActualActualIcma,
///     2,
/// );
///
/// assert!((period.year_fraction() - 0.5).abs() < 1e-15);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Period {
    start: Date,
    end: Date,
    payment: Date,
    reference_start: Date,
    day_count: DayCountConvention,
    periods_per_year: u32,
}

impl Period {
    /// Creates a regular period (reference period equal to the accrual period).
    ///
    /// # Arguments
    ///
    /// * `start` - Start date of the accrual period
    /// * `end` - End date of the accrual period
    /// * `payment` - Payment date
    /// * `day_count` - Day count convention for the accrual factor
    /// * `periods_per_year` - Coupon frequency, used by reference-period day counts
    #[inline]
    pub fn new(
        start: Date,
        end: Date,
        payment: Date,
        day_count: DayCountConvention,
        periods_per_year: u32,
    ) -> Self {
        Self {
            start,
            end,
            payment,
            reference_start: start,
            day_count,
            periods_per_year,
        }
    }

    /// Returns the same period with a different reference period start.
    #[inline]
    pub fn with_reference_start(mut self, reference_start: Date) -> Self {
        self.reference_start = reference_start;
        self
    }

    /// Returns the start date of the accrual period.
    #[inline]
    pub fn start(&self) -> Date {
        self.start
    }

    /// Returns the end date of the accrual period.
    #[inline]
    pub fn end(&self) -> Date {
        self.end
    }

    /// Returns the payment date.
    #[inline]
    pub fn payment(&self) -> Date {
        self.payment
    }

    /// Returns the start of the regular reference period.
    #[inline]
    pub fn reference_start(&self) -> Date {
        self.reference_start
    }

    /// Returns the day count convention.
    #[inline]
    pub fn day_count(&self) -> DayCountConvention {
        self.day_count
    }

    /// Returns the coupon frequency the period belongs to.
    #[inline]
    pub fn periods_per_year(&self) -> u32 {
        self.periods_per_year
    }

    /// Accrual factor of the whole period under its own day count.
    #[inline]
    pub fn year_fraction(&self) -> f64 {
        self.year_fraction_with(self.day_count)
    }

    /// Accrual factor of the whole period under another day count.
    pub fn year_fraction_with(&self, day_count: DayCountConvention) -> f64 {
        day_count.accrual_factor(
            self.start,
            self.end,
            self.reference_start,
            self.end,
            self.periods_per_year,
        )
    }

    /// Accrual factor from the period start to `date`.
    ///
    /// Used for accrued interest; `date` is not clamped to the period.
    pub fn accrued_fraction_to(&self, date: Date) -> f64 {
        self.day_count.accrual_factor(
            self.start,
            date,
            self.reference_start,
            self.end,
            self.periods_per_year,
        )
    }

    /// Number of calendar days in the accrual period.
    #[inline]
    pub fn days(&self) -> i64 {
        self.end - self.start
    }

    /// Returns `true` if `start <= date < end`.
    #[inline]
    pub fn contains(&self, date: Date) -> bool {
        date >= self.start && date < self.end
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{} - {}] pay {} ({})",
            self.start, self.end, self.payment, self.day_count
        )
    }
}
