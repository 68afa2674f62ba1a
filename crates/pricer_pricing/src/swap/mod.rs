//! Swap discounting methods.
//!
//! The swaption methods build on the quantities computed here: the PVBP and
//! par rate of fixed/term-rate swaps, and the compounded forward and cash
//! annuity of fixed/overnight swaps. Every quantity comes with its analytic
//! curve sensitivity.

mod fixed_ibor;
mod fixed_on;

pub(crate) use fixed_ibor::AccrualBasis;
pub use fixed_ibor::SwapFixedIborDiscountingMethod;
pub use fixed_on::SwapFixedOnCompoundedDiscountingMethod;
