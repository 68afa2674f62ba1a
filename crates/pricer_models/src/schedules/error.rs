//! Schedule generation error types.

use pricer_core::types::time::Date;
use pricer_core::types::{DateError, PricingError};
use thiserror::Error;

/// Errors that can occur during schedule generation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    /// Start date must be before end date.
    #[error("Start date {start} must be before end date {end}")]
    InvalidDateRange {
        /// The start date.
        start: Date,
        /// The end date.
        end: Date,
    },

    /// Missing required field in builder.
    #[error("Missing required field: {field}")]
    MissingField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// A schedule needs at least one period.
    #[error("Schedule must have at least one period")]
    Empty,

    /// Date arithmetic or business-day adjustment failed.
    #[error("Date arithmetic failed: {0}")]
    Date(#[from] DateError),
}

impl From<ScheduleError> for PricingError {
    fn from(err: ScheduleError) -> Self {
        PricingError::InvalidInput(err.to_string())
    }
}
