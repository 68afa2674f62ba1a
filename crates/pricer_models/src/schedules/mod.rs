//! Coupon schedule generation.
//!
//! This module provides:
//! - [`Schedule`]: An ordered list of accrual periods
//! - [`Period`]: A single accrual period with start, end, and payment dates
//! - [`Frequency`]: Coupon frequency enumeration
//! - [`ScheduleBuilder`]: Backward generation from the end date with
//!   business-day adjusted payment dates
//!
//! # Examples
//!
//! ```
//! use pricer_models::schedules::{Frequency, ScheduleBuilder};
//! use pricer_core::types::time::{BusinessDayConvention, Date, DayCountConvention};
//!
//! let schedule = ScheduleBuilder::new()
//!     .start(Date::from_ymd(2024, 1, 15).unwrap())
//!     .end(Date::from_ymd(2026, 1, 15).unwrap())
//!     .frequency(Frequency::SemiAnnual)
//!     .day_count(DayCountConvention::Thirty360)
//!     .business_day_convention(BusinessDayConvention::ModifiedFollowing)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(schedule.len(), 4);
//! ```

mod error;
mod frequency;
mod period;
mod schedule;

pub use error::ScheduleError;
pub use frequency::Frequency;
pub use period::Period;
pub use schedule::{Schedule, ScheduleBuilder};
