//! # Pricer Pricing (Layer 3: Pricing Methods)
//!
//! Valuation of the time-based instruments of `pricer_models` against the
//! market data of `pricer_core`.
//!
//! ## Modules
//!
//! - [`discounting`]: present value and curve sensitivity of coupons and
//!   annuities by discounting
//! - [`swap`]: swap present values, PVBP, par rates and their sensitivities
//! - [`swaption`]: Black methods for physical and cash swaptions, and G2++
//!   pricing by approximation and by Monte Carlo
//! - [`cash_flow_equivalent`]: deterministic-spread replication of a swap by
//!   fixed payments
//! - [`bond`]: price, yield, duration, convexity and z-spread of bonds and
//!   bills
//! - [`calculators`]: one measure for any instrument by enum dispatch
//! - [`mc`], [`rng`]: simulation settings and seeded random streams
//!
//! Every method is a stateless value (or carries only its numerical
//! settings) and borrows market data immutably, so one provider can be
//! shared across threads.
//!
//! ## Usage Example
//!
//! ```rust
//! use pricer_core::market_data::curves::CurveEnum;
//! use pricer_core::market_data::MulticurveProvider;
//! use pricer_core::types::time::{Calendar, Date, DayCountConvention};
//! use pricer_core::types::{Currency, IborIndex};
//! use pricer_models::instruments::rates::SwapFixedIborDefinition;
//! use pricer_models::schedules::Frequency;
//! use pricer_pricing::calculators::{InstrumentCalculator, ParRateDiscountingCalculator};
//!
//! let multicurve = MulticurveProvider::builder()
//!     .discounting_curve(Currency::EUR, "EUR DSC", CurveEnum::flat(0.012))
//!     .ibor_curve(IborIndex::Euribor6M, "EUR EURIBOR6M", CurveEnum::flat(0.018))
//!     .build()
//!     .unwrap();
//! let swap = SwapFixedIborDefinition {
//!     index: IborIndex::Euribor6M,
//!     start_date: Date::from_ymd(2025, 1, 15).unwrap(),
//!     tenor_years: 5,
//!     fixed_frequency: Frequency::Annual,
//!     fixed_day_count: DayCountConvention::Thirty360,
//!     notional: 1_000_000.0,
//!     fixed_rate: 0.02,
//!     is_payer: true,
//!     calendar: Calendar::weekends_only(),
//! }
//! .to_derivative(Date::from_ymd(2024, 1, 15).unwrap())
//! .unwrap();
//!
//! let par = ParRateDiscountingCalculator
//!     .calculate(&swap.into(), &multicurve)
//!     .unwrap();
//! assert!(par > 0.01 && par < 0.03);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): Serialisation for Monte Carlo estimates and bond
//!   measures

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod bond;
pub mod calculators;
pub mod cash_flow_equivalent;
pub mod discounting;
pub mod mc;
pub mod rng;
pub mod swap;
pub mod swaption;

#[cfg(test)]
mod test_fixtures;

pub use calculators::{
    BondMeasure, BondQuote, InstrumentCalculator, ParRateDiscountingCalculator,
    PresentValueBlackSensitivityCalculator, PresentValueBlackSwaptionCalculator,
    PresentValueCurveSensitivityBlackSwaptionCalculator, PresentValueDiscountingCalculator,
};
pub use mc::MonteCarloConfig;
pub use swaption::MonteCarloEstimate;
