//! Term-structure models.
//!
//! - [`rates::g2pp`]: G2++ two-factor Gaussian short-rate model used by the
//!   swaption approximation and Monte Carlo methods

pub mod rates;

pub use rates::{G2ppParameters, G2ppProvider};
