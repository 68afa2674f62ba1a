//! # Pricer Models (L2: Business Logic)
//!
//! Closed-form option functions, instruments and term-structure models.
//!
//! This crate provides:
//! - The Black price function with its first and second order adjoints
//!   (`analytical`)
//! - Coupon schedules built from dates and conventions (`schedules`)
//! - Coupons, swaps, swaptions, bonds and bills, both as booked and in
//!   time-based form (`instruments`)
//! - G2++ model parameters (`models`)
//!
//! ## Design Principles
//!
//! - **Enum-based instruments** (`InstrumentDerivative`) for static dispatch
//! - **Validated constructors**: instruments are immutable once built
//! - **Builder pattern** for ergonomic API with sensible defaults
//!
//! ## Feature Flags
//!
//! - `serde` (default): Serialisation for instruments and definitions

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod analytical;
pub mod instruments;
pub mod models;
pub mod schedules;
