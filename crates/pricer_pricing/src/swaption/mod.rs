//! Swaption pricing methods.
//!
//! | Instrument | Model | Method |
//! |------------|-------|--------|
//! | Physical fixed/Ibor | Black | [`SwaptionPhysicalFixedIborBlackMethod`] |
//! | Physical fixed/ON compounded | Black | [`SwaptionPhysicalFixedCompoundedOnBlackMethod`] |
//! | Cash fixed/ON compounded | Black | [`SwaptionCashFixedCompoundedOnBlackMethod`] |
//! | Physical fixed/Ibor | G2++ approximation | [`SwaptionPhysicalFixedIborG2ppApproximationMethod`] |
//! | Physical fixed/Ibor | G2++ Monte Carlo | [`SwaptionPhysicalFixedIborG2ppMonteCarloMethod`] |
//!
//! The Black methods are zero-sized and stateless; the Monte Carlo method
//! carries its simulation settings.

mod cash_on;
mod g2pp_approximation;
mod g2pp_monte_carlo;
mod physical_ibor;
mod physical_on;

pub use cash_on::SwaptionCashFixedCompoundedOnBlackMethod;
pub use g2pp_approximation::SwaptionPhysicalFixedIborG2ppApproximationMethod;
pub use g2pp_monte_carlo::{MonteCarloEstimate, SwaptionPhysicalFixedIborG2ppMonteCarloMethod};
pub use physical_ibor::SwaptionPhysicalFixedIborBlackMethod;
pub use physical_on::SwaptionPhysicalFixedCompoundedOnBlackMethod;
