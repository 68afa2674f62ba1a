//! Interest rate instruments.
//!
//! This module provides:
//! - [`coupons`]: Fixed, term-rate and overnight-compounded coupons
//! - [`Annuity`]: A single-currency leg of payments
//! - [`SwapFixedIbor`] and [`SwapFixedOnCompounded`]: Fixed versus floating swaps
//! - [`SwaptionPhysicalFixedIbor`], [`SwaptionPhysicalFixedCompoundedOn`] and
//!   [`SwaptionCashFixedCompoundedOn`]: European swaptions
//! - [`definitions`]: Date-based trades converted to the time-based form
//!
//! # Examples
//!
//! ```
//! use pricer_models::instruments::rates::{
//!     Annuity, CouponFixed, CouponIbor, IborFixingPeriod, SwapFixedIbor,
//!     SwaptionPhysicalFixedIbor, SwaptionTerms,
//! };
//! use pricer_core::types::time::Date;
//! use pricer_core::types::{Currency, IborIndex};
//!
//! let start = Date::from_ymd(2025, 1, 15).unwrap();
//! let end = Date::from_ymd(2026, 1, 15).unwrap();
//! let fixed = Annuity::new(vec![
//!     CouponFixed::new(Currency::EUR, 2.0, 1.0, -1.0e6, 0.02, start, end).unwrap(),
//! ])
//! .unwrap();
//! let ibor = Annuity::new(vec![CouponIbor::new(
//!     Currency::EUR,
//!     2.0,
//!     1.0,
//!     1.0e6,
//!     IborIndex::Euribor6M,
//!     IborFixingPeriod { fixing_time: 0.99, start_time: 1.0, end_time: 2.0, accrual_factor: 1.0 },
//! )
//! .unwrap()])
//! .unwrap();
//! let swap = SwapFixedIbor::new(fixed, ibor).unwrap();
//! let swaption = SwaptionPhysicalFixedIbor::new(
//!     swap,
//!     SwaptionTerms::new(0.99, 1.0, 1.0, true).unwrap(),
//! );
//! assert!(swaption.is_call());
//! ```

mod annuity;
pub mod coupons;
pub mod definitions;
mod swap;
mod swaption;

pub use annuity::Annuity;
pub use coupons::{
    Coupon, CouponFixed, CouponFixedAccruedCompounding, CouponIbor, CouponOnCompounded,
    IborFixingPeriod, OvernightFixingPeriod, Payment, PaymentFixed,
};
pub use definitions::{
    SwapFixedIborDefinition, SwapFixedOnCompoundedDefinition, SwaptionFixedCompoundedOnDefinition,
    SwaptionFixedIborDefinition,
};
pub use swap::{SwapFixedIbor, SwapFixedOnCompounded};
pub use swaption::{
    SwaptionCashFixedCompoundedOn, SwaptionPhysicalFixedCompoundedOn, SwaptionPhysicalFixedIbor,
    SwaptionTerms,
};
