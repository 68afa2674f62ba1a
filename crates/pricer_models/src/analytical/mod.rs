//! Analytical option formulas on forward rates.
//!
//! - [`black`]: Black price function with first and second order adjoints
//! - [`black_formula`]: Undiscounted Black Greeks and implied volatility
//! - [`distributions`]: Standard normal CDF and PDF
//! - [`error`]: Analytical error types

pub mod black;
pub mod black_formula;
pub mod distributions;
pub mod error;

pub use black::{
    BlackFunctionData, BlackPriceDerivatives, BlackPriceFunction, EuropeanVanillaOption,
};
pub use distributions::{norm_cdf, norm_pdf};
pub use error::AnalyticalError;
