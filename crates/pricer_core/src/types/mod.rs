//! Core time, currency, index and error types.
//!
//! This module provides:
//! - `time`: Date, day count conventions, business-day calendars
//! - `currency`: ISO 4217 currency codes with metadata
//! - `index`: Term and overnight rate benchmark indices
//! - `error`: Structured error types for pricing, date, currency,
//!   interpolation and solver operations
//!
//! # Re-exports
//!
//! For convenience, commonly used types are re-exported at this module level:
//! - [`Date`], [`DayCountConvention`], [`BusinessDayConvention`], [`Calendar`],
//!   [`time_to_maturity_dates`] from `time`
//! - [`Currency`] from `currency`
//! - [`IborIndex`], [`OvernightIndex`] from `index`
//! - [`PricingError`], [`DateError`], [`CurrencyError`], [`InterpolationError`],
//!   [`SolverError`] from `error`

pub mod currency;
pub mod error;
pub mod index;
pub mod time;

pub use currency::Currency;
pub use error::{CurrencyError, DateError, InterpolationError, PricingError, SolverError};
pub use index::{IborIndex, OvernightIndex};
pub use time::{time_to_maturity_dates, BusinessDayConvention, Calendar, Date, DayCountConvention};
