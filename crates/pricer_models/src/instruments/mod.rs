//! Financial instrument definitions.
//!
//! Instruments come in two forms. Definitions carry dates and conventions
//! as booked; `to_derivative(reference_date)` turns them into time-based
//! instruments where every date is a year fraction from the reference date.
//! Pricing methods only see the time-based form.
//!
//! # Asset Class Modules
//!
//! - [`rates`]: Coupons, annuities, swaps and swaptions
//! - [`bonds`]: Fixed-coupon bonds and bills
//!
//! [`InstrumentDerivative`] wraps every time-based instrument for enum
//! dispatch in the calculators.

mod derivative;
mod error;

pub mod bonds;
pub mod rates;

pub use bonds::{
    BillSecurity, BillSecurityDefinition, BondFixedSecurity, BondFixedSecurityDefinition,
    YieldConvention,
};
pub use derivative::InstrumentDerivative;
pub use error::InstrumentError;
