//! Interest rate models.
//!
//! ## G2++
//!
//! Two correlated Gaussian factors with mean reversion:
//! ```text
//! r(t) = x_1(t) + x_2(t) + φ(t)
//! dx_k(t) = -a_k x_k(t) dt + σ_k(t) dW_k(t)
//! ```

pub mod g2pp;

pub use g2pp::{G2ppParameters, G2ppProvider};
