//! # pricer_core: Market Data and Numerical Foundation
//!
//! ## Layer 1 (Foundation) Role
//!
//! pricer_core is the bottom layer of the workspace, providing:
//! - Time types: `Date`, `DayCountConvention`, `Calendar` (`types::time`)
//! - Currency and benchmark index types (`types::currency`, `types::index`)
//! - Error types: `PricingError` and the lower-level errors converting into it (`types::error`)
//! - Yield curves, swaption volatility surfaces and read-only providers (`market_data`)
//! - Sensitivity containers and the FX matrix (`market_data::sensitivity`, `market_data::fx`)
//! - Root finders and interpolators (`math`)
//!
//! ## Dependencies
//!
//! Layer 1 has no dependencies on other pricer_* crates:
//! - num-traits: Generic floating-point curves, interpolators and solvers
//! - chrono: Date arithmetic
//! - thiserror: Error enums
//! - tracing: Solver and builder diagnostics
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use pricer_core::market_data::curves::{CurveEnum, YieldCurve};
//! use pricer_core::types::{Currency, Date, DayCountConvention};
//!
//! let start = Date::from_ymd(2024, 1, 1).unwrap();
//! let end = Date::from_ymd(2024, 7, 1).unwrap();
//! let t = DayCountConvention::ActualActual365.year_fraction_dates(start, end);
//!
//! let curve = CurveEnum::flat(0.02_f64);
//! let df = curve.discount_factor(t).unwrap();
//! assert!(df < 1.0);
//! assert_eq!(Currency::USD.code(), "USD");
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): Serialisation for dates, conventions, currencies and result types

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod market_data;
pub mod math;
pub mod types;
