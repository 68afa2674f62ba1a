//! Time types, day count conventions and business-day calendars.
//!
//! This module provides:
//! - `Date`: Type-safe date wrapper around chrono::NaiveDate with month and
//!   business-day arithmetic
//! - `DayCountConvention`: Industry-standard day count conventions, including
//!   the ICMA reference-period form used for bond accrual
//! - `BusinessDayConvention` and `Calendar`: date adjustment rules
//! - `time_to_maturity_dates`: the ACT/365 time measure used to convert dated
//!   instruments into time-based ones
//!
//! # Examples
//!
//! ```
//! use pricer_core::types::time::{Date, DayCountConvention};
//!
//! let start = Date::from_ymd(2024, 1, 1).unwrap();
//! let end = Date::from_ymd(2024, 7, 1).unwrap();
//!
//! // Calculate year fraction using ACT/365
//! let yf = DayCountConvention::ActualActual365.year_fraction_dates(start, end);
//! assert!((yf - 0.4986).abs() < 0.001);
//! ```

use chrono::{Datelike, Duration, Months, NaiveDate, Weekday};
use std::collections::BTreeSet;
use std::fmt;
use std::ops::Sub;
use std::str::FromStr;

use super::error::DateError;

/// Type-safe date wrapper around chrono::NaiveDate.
///
/// Provides ISO 8601 serialisation and standard date arithmetic.
///
/// # Examples
///
/// ```
/// use pricer_core::types::time::Date;
///
/// let date = Date::from_ymd(2024, 6, 15).unwrap();
/// assert_eq!(date.year(), 2024);
///
/// let parsed: Date = "2024-06-15".parse().unwrap();
/// assert_eq!(date, parsed);
///
/// let end = date.add_months(6).unwrap();
/// assert_eq!(end, Date::from_ymd(2024, 12, 15).unwrap());
/// assert_eq!(end - date, 183);
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Date(NaiveDate);

impl Date {
    /// Creates a Date from year, month, and day components.
    ///
    /// # Returns
    /// `Ok(Date)` if the date is valid, `Err(DateError::InvalidDate)` otherwise.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self, DateError> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Date)
            .ok_or(DateError::InvalidDate { year, month, day })
    }

    /// Parses a date from ISO 8601 format string (YYYY-MM-DD).
    ///
    /// # Examples
    ///
    /// ```
    /// use pricer_core::types::time::Date;
    ///
    /// assert!(Date::parse("2011-08-18").is_ok());
    /// assert!(Date::parse("18/08/2011").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, DateError> {
        NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map(Date)
            .map_err(|e| DateError::ParseError(format!("{}: {}", s, e)))
    }

    /// Returns the underlying chrono::NaiveDate.
    #[inline]
    pub fn into_inner(self) -> NaiveDate {
        self.0
    }

    /// Returns the year component.
    #[inline]
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Returns the month component (1-12).
    #[inline]
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Returns the day-of-month component (1-31).
    #[inline]
    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Returns the day of the week.
    #[inline]
    pub fn weekday(&self) -> Weekday {
        self.0.weekday()
    }

    /// Returns `true` on Saturdays and Sundays.
    #[inline]
    pub fn is_weekend(&self) -> bool {
        matches!(self.0.weekday(), Weekday::Sat | Weekday::Sun)
    }

    /// Shifts the date by a signed number of calendar days.
    pub fn add_days(self, days: i64) -> Result<Self, DateError> {
        self.0
            .checked_add_signed(Duration::days(days))
            .map(Date)
            .ok_or_else(|| DateError::Overflow(format!("{} + {} days", self, days)))
    }

    /// Shifts the date by a signed number of months.
    ///
    /// The day of month is clamped to the last day of the target month, so
    /// 31 January plus one month is the last day of February.
    pub fn add_months(self, months: i32) -> Result<Self, DateError> {
        let shifted = if months >= 0 {
            self.0.checked_add_months(Months::new(months.unsigned_abs()))
        } else {
            self.0.checked_sub_months(Months::new(months.unsigned_abs()))
        };
        shifted
            .map(Date)
            .ok_or_else(|| DateError::Overflow(format!("{} + {} months", self, months)))
    }

    /// Shifts the date by a signed number of years.
    pub fn add_years(self, years: i32) -> Result<Self, DateError> {
        self.add_months(years.saturating_mul(12))
    }

    /// Returns `true` if the date is the last day of its month.
    pub fn is_end_of_month(&self) -> bool {
        self.0
            .succ_opt()
            .map(|next| next.month() != self.0.month())
            .unwrap_or(true)
    }
}

impl Sub for Date {
    type Output = i64;

    /// Returns the number of days between two dates.
    ///
    /// The result is positive if `self` is after `other`, negative otherwise.
    fn sub(self, other: Self) -> i64 {
        (self.0 - other.0).num_days()
    }
}

impl From<NaiveDate> for Date {
    fn from(date: NaiveDate) -> Self {
        Date(date)
    }
}

impl FromStr for Date {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, DateError> {
        Date::parse(s)
    }
}

impl fmt::Display for Date {
    /// Formats the date as ISO 8601 (YYYY-MM-DD).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

/// Day Count Convention (year fraction convention).
///
/// # Variants
/// - `ActualActual365`: Actual days / 365 (ACT/365 Fixed)
/// - `ActualActual360`: Actual days / 360 (money market)
/// - `Thirty360`: 30/360 US bond basis
/// - `ActualActualIsda`: Actual days split by calendar year over 365 or 366
/// - `ActualActualIcma`: Actual days over (frequency x days in the reference
///   coupon period), the bond market convention
///
/// # Usage
///
/// ```
/// use pricer_core::types::time::{Date, DayCountConvention};
///
/// let start = Date::from_ymd(2011, 5, 15).unwrap();
/// let end = Date::from_ymd(2011, 11, 15).unwrap();
///
/// // A full regular coupon period is exactly 1/frequency.
/// let icma = DayCountConvention::ActualActualIcma;
/// let yf = icma.accrual_factor(start, end, start, end, 2);
/// assert!((yf - 0.5).abs() < 1e-15);
/// ```
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DayCountConvention {
    /// Actual/365 Fixed: actual_days / 365.0
    ActualActual365,

    /// Actual/360: actual_days / 360.0
    ActualActual360,

    /// 30/360 US Bond Basis.
    ///
    /// Each month is treated as having 30 days, and the year as 360 days.
    Thirty360,

    /// Actual/Actual ISDA.
    ActualActualIsda,

    /// Actual/Actual ICMA (reference period based).
    ///
    /// Without a reference period, falls back to Actual/Actual ISDA.
    ActualActualIcma,
}

impl DayCountConvention {
    /// Returns the standard convention name.
    ///
    /// # Examples
    ///
    /// ```
    /// use pricer_core::types::time::DayCountConvention;
    ///
    /// assert_eq!(DayCountConvention::ActualActual365.name(), "ACT/365");
    /// assert_eq!(DayCountConvention::ActualActualIcma.name(), "ACT/ACT ICMA");
    /// ```
    pub fn name(&self) -> &'static str {
        match self {
            DayCountConvention::ActualActual365 => "ACT/365",
            DayCountConvention::ActualActual360 => "ACT/360",
            DayCountConvention::Thirty360 => "30/360",
            DayCountConvention::ActualActualIsda => "ACT/ACT ISDA",
            DayCountConvention::ActualActualIcma => "ACT/ACT ICMA",
        }
    }

    /// Calculates the year fraction between two dates.
    ///
    /// Returns negative values when `start > end`, so the sign indicates
    /// direction.
    ///
    /// # Examples
    ///
    /// ```
    /// use pricer_core::types::time::{Date, DayCountConvention};
    ///
    /// let start = Date::from_ymd(2024, 1, 1).unwrap();
    /// let end = Date::from_ymd(2024, 7, 1).unwrap();
    ///
    /// let yf = DayCountConvention::ActualActual360.year_fraction_dates(start, end);
    /// assert!((yf - 0.5056).abs() < 0.001);
    ///
    /// let yf_neg = DayCountConvention::ActualActual360.year_fraction_dates(end, start);
    /// assert!((yf_neg + 0.5056).abs() < 0.001);
    /// ```
    pub fn year_fraction_dates(&self, start: Date, end: Date) -> f64 {
        if start > end {
            return -self.year_fraction_dates(end, start);
        }
        let days = end - start;
        match self {
            DayCountConvention::ActualActual365 => days as f64 / 365.0,
            DayCountConvention::ActualActual360 => days as f64 / 360.0,
            DayCountConvention::Thirty360 => thirty_360_days(start, end) as f64 / 360.0,
            DayCountConvention::ActualActualIsda | DayCountConvention::ActualActualIcma => {
                actual_actual_isda(start, end)
            }
        }
    }

    /// Calculates the accrual factor of `[start, end]` inside the regular
    /// coupon period `[period_start, period_end]`.
    ///
    /// Only `ActualActualIcma` uses the reference period; other conventions
    /// delegate to [`DayCountConvention::year_fraction_dates`].
    ///
    /// # Arguments
    /// * `start` - Accrual start date
    /// * `end` - Accrual end date
    /// * `period_start` - Start of the reference coupon period
    /// * `period_end` - End of the reference coupon period
    /// * `periods_per_year` - Coupon frequency
    pub fn accrual_factor(
        &self,
        start: Date,
        end: Date,
        period_start: Date,
        period_end: Date,
        periods_per_year: u32,
    ) -> f64 {
        match self {
            DayCountConvention::ActualActualIcma => {
                let period_days = period_end - period_start;
                if period_days <= 0 || periods_per_year == 0 {
                    return actual_actual_isda(start.min(end), start.max(end));
                }
                (end - start) as f64 / (periods_per_year as f64 * period_days as f64)
            }
            _ => self.year_fraction_dates(start, end),
        }
    }
}

fn thirty_360_days(start: Date, end: Date) -> i64 {
    let d1 = if start.day() == 31 { 30 } else { start.day() };
    let d2 = if end.day() == 31 && d1 == 30 {
        30
    } else {
        end.day()
    };
    360 * (end.year() - start.year()) as i64
        + 30 * (end.month() as i64 - start.month() as i64)
        + (d2 as i64 - d1 as i64)
}

fn days_in_year(year: i32) -> f64 {
    if NaiveDate::from_ymd_opt(year, 2, 29).is_some() {
        366.0
    } else {
        365.0
    }
}

fn actual_actual_isda(start: Date, end: Date) -> f64 {
    if start.year() == end.year() {
        return (end - start) as f64 / days_in_year(start.year());
    }
    let mut fraction = 0.0;
    let mut cursor = start.into_inner();
    for year in start.year()..=end.year() {
        let year_end = if year == end.year() {
            end.into_inner()
        } else {
            match NaiveDate::from_ymd_opt(year + 1, 1, 1) {
                Some(d) => d,
                None => break,
            }
        };
        fraction += (year_end - cursor).num_days() as f64 / days_in_year(year);
        cursor = year_end;
    }
    fraction
}

impl FromStr for DayCountConvention {
    type Err = String;

    /// Parses day count convention from string (case-insensitive).
    ///
    /// Supports multiple aliases for each convention:
    /// - ACT/365: "ACT/365", "Actual/365", "A365", "ACT/365F"
    /// - ACT/360: "ACT/360", "Actual/360", "A360"
    /// - 30/360: "30/360", "Thirty360", "30U/360"
    /// - ACT/ACT ISDA: "ACT/ACT", "ACT/ACT ISDA"
    /// - ACT/ACT ICMA: "ACT/ACT ICMA", "ACT/ACT ISMA"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().replace(['/', ' ', '_', '-'], "").as_str() {
            "ACT365" | "ACTUAL365" | "A365" | "ACT365F" | "ACT365FIXED" => {
                Ok(DayCountConvention::ActualActual365)
            }
            "ACT360" | "ACTUAL360" | "A360" => Ok(DayCountConvention::ActualActual360),
            "30360" | "THIRTY360" | "30U360" => Ok(DayCountConvention::Thirty360),
            "ACTACT" | "ACTACTISDA" | "ACTUALACTUAL" => Ok(DayCountConvention::ActualActualIsda),
            "ACTACTICMA" | "ACTACTISMA" => Ok(DayCountConvention::ActualActualIcma),
            _ => Err(format!("Unknown day count convention: {}", s)),
        }
    }
}

impl fmt::Display for DayCountConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use super::{BusinessDayConvention, DayCountConvention};
    use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
    use std::str::FromStr;

    impl Serialize for DayCountConvention {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            serializer.serialize_str(self.name())
        }
    }

    impl<'de> Deserialize<'de> for DayCountConvention {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            let s = String::deserialize(deserializer)?;
            DayCountConvention::from_str(&s).map_err(de::Error::custom)
        }
    }

    impl Serialize for BusinessDayConvention {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            serializer.serialize_str(self.name())
        }
    }

    impl<'de> Deserialize<'de> for BusinessDayConvention {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            let s = String::deserialize(deserializer)?;
            BusinessDayConvention::from_str(&s).map_err(de::Error::custom)
        }
    }
}

/// Business Day Convention for date adjustments.
///
/// # Variants
///
/// - `Following`: Move to the next business day
/// - `ModifiedFollowing`: Move to the next business day, unless it crosses a month boundary
/// - `Preceding`: Move to the previous business day
/// - `ModifiedPreceding`: Move to the previous business day, unless it crosses a month boundary
/// - `Unadjusted`: Do not adjust the date
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BusinessDayConvention {
    /// Move to the next business day.
    Following,
    /// Move to the next business day, unless it crosses a month boundary.
    ModifiedFollowing,
    /// Move to the previous business day.
    Preceding,
    /// Move to the previous business day, unless it crosses a month boundary.
    ModifiedPreceding,
    /// Do not adjust the date.
    Unadjusted,
}

impl BusinessDayConvention {
    /// Returns the standard name for this convention.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            BusinessDayConvention::Following => "Following",
            BusinessDayConvention::ModifiedFollowing => "Modified Following",
            BusinessDayConvention::Preceding => "Preceding",
            BusinessDayConvention::ModifiedPreceding => "Modified Preceding",
            BusinessDayConvention::Unadjusted => "Unadjusted",
        }
    }

    /// Returns a short code for this convention.
    #[inline]
    pub fn code(&self) -> &'static str {
        match self {
            BusinessDayConvention::Following => "F",
            BusinessDayConvention::ModifiedFollowing => "MF",
            BusinessDayConvention::Preceding => "P",
            BusinessDayConvention::ModifiedPreceding => "MP",
            BusinessDayConvention::Unadjusted => "U",
        }
    }
}

impl fmt::Display for BusinessDayConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for BusinessDayConvention {
    type Err = String;

    /// Parses business day convention from string (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace([' ', '_', '-'], "").as_str() {
            "following" | "f" => Ok(BusinessDayConvention::Following),
            "modifiedfollowing" | "mf" => Ok(BusinessDayConvention::ModifiedFollowing),
            "preceding" | "p" => Ok(BusinessDayConvention::Preceding),
            "modifiedpreceding" | "mp" => Ok(BusinessDayConvention::ModifiedPreceding),
            "unadjusted" | "u" | "none" => Ok(BusinessDayConvention::Unadjusted),
            _ => Err(format!("Unknown business day convention: {}", s)),
        }
    }
}

/// Business-day calendar.
///
/// Weekends are always non-business days; additional holidays may be listed
/// explicitly.
///
/// # Examples
///
/// ```
/// use pricer_core::types::time::{BusinessDayConvention, Calendar, Date};
///
/// let calendar = Calendar::weekends_only();
/// let saturday = Date::from_ymd(2011, 8, 20).unwrap();
/// let monday = Date::from_ymd(2011, 8, 22).unwrap();
/// assert_eq!(
///     calendar.adjust(saturday, BusinessDayConvention::Following).unwrap(),
///     monday
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Calendar {
    holidays: BTreeSet<Date>,
}

impl Calendar {
    /// Calendar whose only non-business days are Saturdays and Sundays.
    pub fn weekends_only() -> Self {
        Self::default()
    }

    /// Calendar with weekends and the supplied holidays.
    pub fn with_holidays(holidays: impl IntoIterator<Item = Date>) -> Self {
        Self {
            holidays: holidays.into_iter().collect(),
        }
    }

    /// Returns `true` if `date` is neither a weekend nor a listed holiday.
    #[inline]
    pub fn is_business_day(&self, date: Date) -> bool {
        !date.is_weekend() && !self.holidays.contains(&date)
    }

    fn roll(&self, date: Date, step: i64) -> Result<Date, DateError> {
        let mut current = date;
        while !self.is_business_day(current) {
            current = current.add_days(step)?;
        }
        Ok(current)
    }

    /// Adjusts `date` according to the business-day convention.
    pub fn adjust(
        &self,
        date: Date,
        convention: BusinessDayConvention,
    ) -> Result<Date, DateError> {
        match convention {
            BusinessDayConvention::Unadjusted => Ok(date),
            BusinessDayConvention::Following => self.roll(date, 1),
            BusinessDayConvention::Preceding => self.roll(date, -1),
            BusinessDayConvention::ModifiedFollowing => {
                let adjusted = self.roll(date, 1)?;
                if adjusted.month() != date.month() {
                    self.roll(date, -1)
                } else {
                    Ok(adjusted)
                }
            }
            BusinessDayConvention::ModifiedPreceding => {
                let adjusted = self.roll(date, -1)?;
                if adjusted.month() != date.month() {
                    self.roll(date, 1)
                } else {
                    Ok(adjusted)
                }
            }
        }
    }

    /// Moves `date` by a signed number of business days.
    ///
    /// With `days == 0` the date is rolled forward to a business day.
    pub fn add_business_days(&self, date: Date, days: i32) -> Result<Date, DateError> {
        if days == 0 {
            return self.roll(date, 1);
        }
        let step = if days > 0 { 1 } else { -1 };
        let mut remaining = days.unsigned_abs();
        let mut current = date;
        while remaining > 0 {
            current = current.add_days(step)?;
            if self.is_business_day(current) {
                remaining -= 1;
            }
        }
        Ok(current)
    }
}

/// Calculate time to maturity using Date type and default convention (Act/365).
///
/// Returns a negative value when `start > end`. This is the time measure used
/// to convert dated instruments into their time-based representation.
///
/// # Examples
///
/// ```
/// use pricer_core::types::time::{Date, time_to_maturity_dates};
///
/// let valuation_date = Date::from_ymd(2024, 1, 1).unwrap();
/// let maturity_date = Date::from_ymd(2025, 1, 1).unwrap();
///
/// let ttm = time_to_maturity_dates(valuation_date, maturity_date);
/// assert!((ttm - 1.0027).abs() < 0.001);
/// ```
pub fn time_to_maturity_dates(start: Date, end: Date) -> f64 {
    DayCountConvention::ActualActual365.year_fraction_dates(start, end)
}
