//! G2++ two-factor Gaussian short-rate model with piecewise-constant
//! volatilities.
//!
//! The short rate is `r(t) = x_1(t) + x_2(t) + φ(t)` with
//! ```text
//! dx_k(t) = -a_k x_k(t) dt + σ_k(t) dW_k(t),   d<W_1, W_2> = ρ dt
//! ```
//! and `φ` fitting the initial discount curve.
//!
//! Two quantities drive every pricing formula:
//! - `H_k(t_0, t) = (exp(-a_k t_0) - exp(-a_k t)) / a_k`, the bond loading
//!   of factor `k` relative to the numeraire date `t_0`
//! - `Γ_kl(s, e) = ρ_kl ∫_s^e σ_k(u) σ_l(u) exp((a_k + a_l) u) du`, the
//!   factor covariance accumulated up to expiry
//!
//! so that under the `t_0`-forward measure, at expiry `θ`,
//! ```text
//! P(θ, t_i) / P(θ, t_0) = P(0, t_i) / P(0, t_0) · exp(-H_i·X - ½ H_iᵀ Γ H_i),
//! X ~ N(0, Γ(0, θ))
//! ```
//!
//! ## Usage
//!
//! ```
//! use pricer_models::models::rates::g2pp::G2ppParameters;
//!
//! let params = G2ppParameters::new(
//!     [0.01, 0.30],
//!     [vec![0.01, 0.011, 0.012], vec![0.01, 0.009, 0.008]],
//!     vec![1.0, 5.0],
//!     -0.30,
//! )
//! .unwrap();
//!
//! let h = params.bond_loading(1.0, 1.0);
//! assert_eq!(h, [0.0, 0.0]);
//!
//! let gamma = params.gamma(0.0, 5.0);
//! assert!(gamma[0][1] < 0.0);
//! ```

use pricer_core::market_data::MulticurveProvider;
use pricer_core::types::{Currency, PricingError};

/// Piecewise-constant G2++ parameters.
///
/// `volatilities[k][j]` applies on `[volatility_times[j-1], volatility_times[j])`
/// with implicit bounds `0` and `+∞`; each factor therefore has one more
/// volatility than there are breakpoints.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct G2ppParameters {
    mean_reversion: [f64; 2],
    volatilities: [Vec<f64>; 2],
    volatility_times: Vec<f64>,
    correlation: f64,
}

impl G2ppParameters {
    /// Create validated parameters.
    ///
    /// # Arguments
    ///
    /// * `mean_reversion` - Mean reversion speeds `a_1`, `a_2`, non-zero
    /// * `volatilities` - Piecewise-constant volatilities per factor, non-negative
    /// * `volatility_times` - Shared breakpoints, strictly increasing and positive
    /// * `correlation` - Factor correlation in `(-1, 1)`
    ///
    /// # Errors
    ///
    /// `PricingError::InvalidInput` when any of the above does not hold.
    pub fn new(
        mean_reversion: [f64; 2],
        volatilities: [Vec<f64>; 2],
        volatility_times: Vec<f64>,
        correlation: f64,
    ) -> Result<Self, PricingError> {
        if mean_reversion.iter().any(|a| !a.is_finite() || *a == 0.0) {
            return Err(PricingError::InvalidInput(format!(
                "G2++ mean reversions must be finite and non-zero: {:?}",
                mean_reversion
            )));
        }
        if !(correlation > -1.0 && correlation < 1.0) {
            return Err(PricingError::InvalidInput(format!(
                "G2++ correlation {} outside (-1, 1)",
                correlation
            )));
        }
        if volatility_times.iter().any(|t| !(t.is_finite() && *t > 0.0))
            || volatility_times.windows(2).any(|w| w[1] <= w[0])
        {
            return Err(PricingError::InvalidInput(
                "G2++ volatility times must be positive and strictly increasing".to_string(),
            ));
        }
        for (k, vols) in volatilities.iter().enumerate() {
            if vols.len() != volatility_times.len() + 1 {
                return Err(PricingError::InvalidInput(format!(
                    "G2++ factor {} has {} volatilities for {} breakpoints",
                    k + 1,
                    vols.len(),
                    volatility_times.len()
                )));
            }
            if vols.iter().any(|v| !(v.is_finite() && *v >= 0.0)) {
                return Err(PricingError::InvalidInput(format!(
                    "G2++ factor {} volatilities must be non-negative",
                    k + 1
                )));
            }
        }
        Ok(Self {
            mean_reversion,
            volatilities,
            volatility_times,
            correlation,
        })
    }

    /// Constant volatilities.
    pub fn constant(
        mean_reversion: [f64; 2],
        volatility: [f64; 2],
        correlation: f64,
    ) -> Result<Self, PricingError> {
        Self::new(
            mean_reversion,
            [vec![volatility[0]], vec![volatility[1]]],
            Vec::new(),
            correlation,
        )
    }

    /// Mean reversion speeds.
    #[inline]
    pub fn mean_reversion(&self) -> [f64; 2] {
        self.mean_reversion
    }

    /// Volatilities of factor `k` (0 or 1).
    #[inline]
    pub fn volatilities(&self, k: usize) -> &[f64] {
        &self.volatilities[k]
    }

    /// Volatility breakpoints.
    #[inline]
    pub fn volatility_times(&self) -> &[f64] {
        &self.volatility_times
    }

    /// Factor correlation.
    #[inline]
    pub fn correlation(&self) -> f64 {
        self.correlation
    }

    /// Bond loadings `H_k(t0, t)` of both factors.
    pub fn bond_loading(&self, t0: f64, t: f64) -> [f64; 2] {
        let [a1, a2] = self.mean_reversion;
        [
            ((-a1 * t0).exp() - (-a1 * t).exp()) / a1,
            ((-a2 * t0).exp() - (-a2 * t).exp()) / a2,
        ]
    }

    /// Bond loadings for several maturities, as `[H_1, H_2]` per maturity.
    pub fn bond_loadings(&self, t0: f64, times: &[f64]) -> Vec<[f64; 2]> {
        times.iter().map(|&t| self.bond_loading(t0, t)).collect()
    }

    /// Factor covariance `Γ(s, e)` accumulated over `[s, e]`.
    ///
    /// The diagonal uses unit correlation, the off-diagonal terms `ρ`.
    pub fn gamma(&self, s: f64, e: f64) -> [[f64; 2]; 2] {
        let a = self.mean_reversion;
        let mut gamma = [[0.0; 2]; 2];
        if e <= s {
            return gamma;
        }

        // Interval boundaries of the piecewise-constant volatilities inside [s, e].
        let mut bounds = Vec::with_capacity(self.volatility_times.len() + 2);
        bounds.push(s);
        bounds.extend(self.volatility_times.iter().copied().filter(|&t| t > s && t < e));
        bounds.push(e);

        for window in bounds.windows(2) {
            let (u0, u1) = (window[0], window[1]);
            let j = self.volatility_index(u0);
            for k in 0..2 {
                for l in k..2 {
                    let rho = if k == l { 1.0 } else { self.correlation };
                    let sum_a = a[k] + a[l];
                    let integral = if sum_a.abs() < 1e-12 {
                        u1 - u0
                    } else {
                        ((sum_a * u1).exp() - (sum_a * u0).exp()) / sum_a
                    };
                    gamma[k][l] +=
                        rho * self.volatilities[k][j] * self.volatilities[l][j] * integral;
                }
            }
        }
        gamma[1][0] = gamma[0][1];
        gamma
    }

    /// Index of the volatility applying from `t` onwards.
    fn volatility_index(&self, t: f64) -> usize {
        self.volatility_times.partition_point(|&b| b <= t)
    }
}

/// Multicurve provider with G2++ dynamics for one currency.
#[derive(Clone, Debug)]
pub struct G2ppProvider {
    multicurve: MulticurveProvider,
    parameters: G2ppParameters,
    currency: Currency,
}

impl G2ppProvider {
    /// Create a provider.
    pub fn new(
        multicurve: MulticurveProvider,
        parameters: G2ppParameters,
        currency: Currency,
    ) -> Self {
        Self {
            multicurve,
            parameters,
            currency,
        }
    }

    /// Underlying curves.
    #[inline]
    pub fn multicurve(&self) -> &MulticurveProvider {
        &self.multicurve
    }

    /// Model parameters.
    #[inline]
    pub fn parameters(&self) -> &G2ppParameters {
        &self.parameters
    }

    /// Currency the dynamics apply to.
    #[inline]
    pub fn currency(&self) -> Currency {
        self.currency
    }
}
