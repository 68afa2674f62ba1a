//! Physical swaption in the G2++ model by the efficient approximation of
//! Henrard (2010).
//!
//! The underlying swap is replaced by its cash-flow equivalent, written in
//! receiver form `c_0 < 0 < c_1, …, c_n` on dates `t_0 < t_1 < … < t_n`.
//! Under the `t_0`-forward measure the receiver swaption pays
//!
//! ```text
//! ( Σ_{i≥1} c_i·p_i·exp(-H_i·X - ½ H_iᵀΓH_i) - k )⁺,   k = -c_0,
//! p_i = P(0, t_i)/P(0, t_0),   X ~ N(0, Γ(0, θ))
//! ```
//!
//! The bond `b(X)` is approximated as log-normal with loading `β̄`, the
//! average of the loadings at the forward (`X = 0`) and at the
//! exercise-boundary point `x̄` nearest to the origin. The price is then a
//! Black formula with unit expiry and volatility `σ̄ = √(β̄ᵀΓβ̄)`.

use pricer_core::market_data::CurrencyAmount;
use pricer_core::types::PricingError;
use pricer_models::analytical::black_formula;
use pricer_models::instruments::rates::{Payment, SwaptionPhysicalFixedIbor};
use pricer_models::models::rates::g2pp::G2ppProvider;

use crate::cash_flow_equivalent::CashFlowEquivalentCalculator;

/// Receiver-form cash-flow equivalent of a swaption underlying together
/// with its G2++ loadings and the factor covariance at expiry.
#[derive(Debug, Clone)]
pub(crate) struct G2ppSwaptionData {
    /// `P(0, t_0)`.
    pub(crate) discount_start: f64,
    /// Receiver-form amounts `c_i`.
    pub(crate) amounts: Vec<f64>,
    /// `P(0, t_i)/P(0, t_0)`.
    pub(crate) ratios: Vec<f64>,
    /// `H(t_0, t_i)` for both factors.
    pub(crate) loadings: Vec<[f64; 2]>,
    /// `Γ(0, θ)`.
    pub(crate) gamma: [[f64; 2]; 2],
}

impl G2ppSwaptionData {
    pub(crate) fn new(
        swaption: &SwaptionPhysicalFixedIbor,
        g2pp: &G2ppProvider,
    ) -> Result<Self, PricingError> {
        if swaption.currency() != g2pp.currency() {
            return Err(PricingError::InvalidInput(format!(
                "swaption in {} priced with G2++ dynamics for {}",
                swaption.currency(),
                g2pp.currency()
            )));
        }
        let expiry = swaption.time_to_expiry();
        if !(expiry.is_finite() && expiry >= 0.0) {
            return Err(PricingError::InvalidInput(format!(
                "invalid time to expiry {}",
                expiry
            )));
        }

        let multicurve = g2pp.multicurve();
        let cfe =
            CashFlowEquivalentCalculator.swap_fixed_ibor(swaption.underlying(), multicurve)?;
        let first = cfe.first().amount();
        if cfe.len() < 2 || first == 0.0 {
            return Err(PricingError::ModelFailure(
                "cash-flow equivalent has no exchange of notional".to_string(),
            ));
        }
        let orientation = -first.signum();

        let times: Vec<f64> = cfe.iter().map(|p| p.payment_time()).collect();
        let t0 = times[0];
        let discount_start = multicurve.discount_factor(swaption.currency(), t0)?;
        let ratios = times
            .iter()
            .map(|&t| -> Result<f64, PricingError> {
                Ok(multicurve.discount_factor(swaption.currency(), t)? / discount_start)
            })
            .collect::<Result<Vec<_>, _>>()?;
        let amounts: Vec<f64> = cfe.iter().map(|p| orientation * p.amount()).collect();
        if amounts[1..].iter().all(|&c| c <= 0.0) {
            return Err(PricingError::ModelFailure(
                "receiver-form cash flows are never positive".to_string(),
            ));
        }

        let parameters = g2pp.parameters();
        Ok(Self {
            discount_start,
            amounts,
            ratios,
            loadings: parameters.bond_loadings(t0, &times),
            gamma: parameters.gamma(0.0, expiry),
        })
    }

    /// Strike of the bond option, `k = -c_0`.
    pub(crate) fn strike(&self) -> f64 {
        -self.amounts[0]
    }

    /// Forward value of the bond `b_0 = Σ_{i≥1} c_i·p_i`.
    pub(crate) fn bond_forward(&self) -> f64 {
        self.amounts[1..]
            .iter()
            .zip(&self.ratios[1..])
            .map(|(c, p)| c * p)
            .sum()
    }

    /// `½ H_iᵀΓH_i` for every flow.
    pub(crate) fn convexity_terms(&self) -> Vec<f64> {
        self.loadings
            .iter()
            .map(|h| 0.5 * quadratic_form(&self.gamma, h, h))
            .collect()
    }
}

/// `xᵀ Γ y` for a 2×2 matrix.
pub(crate) fn quadratic_form(gamma: &[[f64; 2]; 2], x: &[f64; 2], y: &[f64; 2]) -> f64 {
    x[0] * (gamma[0][0] * y[0] + gamma[0][1] * y[1])
        + x[1] * (gamma[1][0] * y[0] + gamma[1][1] * y[1])
}

/// `Σ w_i·H_i / Σ w_i`.
fn weighted_loading(weights: &[f64], loadings: &[[f64; 2]]) -> [f64; 2] {
    let total: f64 = weights.iter().sum();
    let mut beta = [0.0; 2];
    for (w, h) in weights.iter().zip(loadings) {
        beta[0] += w * h[0];
        beta[1] += w * h[1];
    }
    [beta[0] / total, beta[1] / total]
}

/// G2++ pricing of physical fixed/term-rate swaptions by approximation.
#[derive(Debug, Clone, Copy, Default)]
pub struct SwaptionPhysicalFixedIborG2ppApproximationMethod;

impl SwaptionPhysicalFixedIborG2ppApproximationMethod {
    /// Present value, recomputed from the curves and parameters on every call.
    ///
    /// # Errors
    ///
    /// `InvalidInput` when the currencies differ or the expiry is invalid,
    /// `ModelFailure` when the cash-flow equivalent is degenerate.
    pub fn present_value(
        &self,
        swaption: &SwaptionPhysicalFixedIbor,
        g2pp: &G2ppProvider,
    ) -> Result<CurrencyAmount, PricingError> {
        let data = G2ppSwaptionData::new(swaption, g2pp)?;
        let strike = data.strike();
        let forward = data.bond_forward();

        let weights_forward: Vec<f64> = data.amounts[1..]
            .iter()
            .zip(&data.ratios[1..])
            .map(|(c, p)| c * p)
            .collect();
        let loadings = &data.loadings[1..];
        let u = {
            let mut u = [0.0; 2];
            for (w, h) in weights_forward.iter().zip(loadings) {
                u[0] += w * h[0];
                u[1] += w * h[1];
            }
            u
        };
        let variance_u = quadratic_form(&data.gamma, &u, &u);

        let volatility = if variance_u > 0.0 {
            // Linearised exercise boundary along Γu.
            let scale = (forward - strike) / variance_u;
            let gamma_u = [
                data.gamma[0][0] * u[0] + data.gamma[0][1] * u[1],
                data.gamma[1][0] * u[0] + data.gamma[1][1] * u[1],
            ];
            let x_bar = [scale * gamma_u[0], scale * gamma_u[1]];
            let weights_strike: Vec<f64> = weights_forward
                .iter()
                .zip(loadings)
                .map(|(w, h)| w * (-(h[0] * x_bar[0] + h[1] * x_bar[1])).exp())
                .collect();
            let beta_forward = weighted_loading(&weights_forward, loadings);
            let beta_strike = weighted_loading(&weights_strike, loadings);
            let beta = [
                0.5 * (beta_forward[0] + beta_strike[0]),
                0.5 * (beta_forward[1] + beta_strike[1]),
            ];
            quadratic_form(&data.gamma, &beta, &beta).max(0.0).sqrt()
        } else {
            0.0
        };

        // Receiver form: a receiver swaption is a call on the bond.
        let price = black_formula::price(forward, strike, 1.0, volatility, !swaption.is_call());
        tracing::trace!(forward, strike, volatility, "G2++ swaption approximation");
        Ok(CurrencyAmount::of(
            swaption.currency(),
            data.discount_start * price * swaption.terms().sign(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::swap::SwapFixedIborDiscountingMethod;
    use crate::test_fixtures::{g2pp, ibor_swaption};
    use approx::assert_relative_eq;
    use pricer_models::models::rates::g2pp::G2ppParameters;

    const METHOD: SwaptionPhysicalFixedIborG2ppApproximationMethod =
        SwaptionPhysicalFixedIborG2ppApproximationMethod;

    #[test]
    fn test_long_short_parity() {
        let provider = g2pp();
        let long = METHOD.present_value(&ibor_swaption(0.02, true, true), &provider).unwrap();
        let short = METHOD.present_value(&ibor_swaption(0.02, true, false), &provider).unwrap();
        assert!(long.amount > 0.0);
        assert_relative_eq!(long.amount, -short.amount, max_relative = 1e-12);
    }

    #[test]
    fn test_payer_receiver_parity() {
        let provider = g2pp();
        let payer = METHOD.present_value(&ibor_swaption(0.02, true, true), &provider).unwrap();
        let receiver = METHOD.present_value(&ibor_swaption(0.02, false, true), &provider).unwrap();
        let swaption = ibor_swaption(0.02, true, true);
        let swap = SwapFixedIborDiscountingMethod
            .present_value(swaption.underlying(), provider.multicurve())
            .unwrap();
        assert_relative_eq!(payer.amount - receiver.amount, swap.amount, epsilon = 1e-2);
    }

    #[test]
    fn test_zero_volatility_is_intrinsic() {
        let base = g2pp();
        let params = G2ppParameters::constant([0.01, 0.30], [0.0, 0.0], -0.30).unwrap();
        let provider = G2ppProvider::new(base.multicurve().clone(), params, base.currency());
        let swaption = ibor_swaption(0.01, true, true);
        let swap = SwapFixedIborDiscountingMethod
            .present_value(swaption.underlying(), provider.multicurve())
            .unwrap();
        let pv = METHOD.present_value(&swaption, &provider).unwrap();
        assert_relative_eq!(pv.amount, swap.amount.max(0.0), epsilon = 1e-6);
    }

    #[test]
    fn test_price_increases_with_volatility() {
        let base = g2pp();
        let swaption = ibor_swaption(0.02, false, true);
        let low = G2ppParameters::constant([0.01, 0.30], [0.005, 0.004], -0.30).unwrap();
        let high = G2ppParameters::constant([0.01, 0.30], [0.010, 0.008], -0.30).unwrap();
        let pv_low = METHOD
            .present_value(
                &swaption,
                &G2ppProvider::new(base.multicurve().clone(), low, base.currency()),
            )
            .unwrap();
        let pv_high = METHOD
            .present_value(
                &swaption,
                &G2ppProvider::new(base.multicurve().clone(), high, base.currency()),
            )
            .unwrap();
        assert!(pv_high.amount > pv_low.amount);
    }

    #[test]
    fn test_rejects_other_currency() {
        let base = g2pp();
        let provider = G2ppProvider::new(
            base.multicurve().clone(),
            base.parameters().clone(),
            pricer_core::types::Currency::USD,
        );
        let err = METHOD
            .present_value(&ibor_swaption(0.02, true, true), &provider)
            .unwrap_err();
        assert!(matches!(err, PricingError::InvalidInput(_)));
    }

    /// Normalised Gaussian weights and bond values `b(X)` on a product grid
    /// of the whitened factors, `X = L·z` with `LLᵀ = Γ`.
    fn bond_on_grid(data: &G2ppSwaptionData, n: usize) -> Vec<(f64, f64)> {
        let g = data.gamma;
        let l11 = g[0][0].sqrt();
        let l21 = if l11 > 0.0 { g[1][0] / l11 } else { 0.0 };
        let l22 = (g[1][1] - l21 * l21).max(0.0).sqrt();
        let step = 16.0 / (n - 1) as f64;
        let nodes: Vec<f64> = (0..n).map(|j| -8.0 + j as f64 * step).collect();
        let density: Vec<f64> = nodes.iter().map(|z| (-0.5 * z * z).exp()).collect();
        let convexity = data.convexity_terms();
        // exp(-H·X) = exp(-a·z_0)·exp(-b·z_1) per flow.
        let flows: Vec<(f64, Vec<f64>, Vec<f64>)> = (1..data.amounts.len())
            .map(|i| {
                let h = data.loadings[i];
                let a = h[0] * l11 + h[1] * l21;
                let b = h[1] * l22;
                let weight = data.amounts[i] * data.ratios[i] * (-convexity[i]).exp();
                (
                    weight,
                    nodes.iter().map(|z| (-a * z).exp()).collect(),
                    nodes.iter().map(|z| (-b * z).exp()).collect(),
                )
            })
            .collect();
        let mut grid = Vec::with_capacity(n * n);
        for j in 0..n {
            for l in 0..n {
                let bond: f64 = flows.iter().map(|(w, ea, eb)| w * ea[j] * eb[l]).sum();
                grid.push((density[j] * density[l], bond));
            }
        }
        let total: f64 = grid.iter().map(|(w, _)| w).sum();
        grid.iter_mut().for_each(|(w, _)| *w /= total);
        grid
    }

    #[test]
    fn test_bond_on_grid_recovers_forward() {
        let data = G2ppSwaptionData::new(&ibor_swaption(0.02, true, true), &g2pp()).unwrap();
        let mean: f64 = bond_on_grid(&data, 401).iter().map(|(w, b)| w * b).sum();
        assert_relative_eq!(mean, data.bond_forward(), max_relative = 1e-9);
    }

    #[test]
    fn test_matches_exact_integration_across_strikes() {
        let provider = g2pp();
        for is_payer in [true, false] {
            for rate in [0.005, 0.01, 0.02, 0.03, 0.04] {
                let swaption = ibor_swaption(rate, is_payer, true);
                let data = G2ppSwaptionData::new(&swaption, &provider).unwrap();
                let strike = data.strike();
                let expected = data.discount_start
                    * bond_on_grid(&data, 801)
                        .iter()
                        .map(|(w, b)| {
                            let payoff = if is_payer { strike - b } else { b - strike };
                            w * payoff.max(0.0)
                        })
                        .sum::<f64>();
                let pv = METHOD.present_value(&swaption, &provider).unwrap();
                assert!(
                    (pv.amount - expected).abs() < 2.0,
                    "payer {} at {}: approximation {} against integral {}",
                    is_payer,
                    rate,
                    pv.amount,
                    expected
                );
            }
        }
    }

    #[test]
    fn test_quadratic_form_symmetric() {
        let gamma = [[2.0, 0.5], [0.5, 1.0]];
        assert_relative_eq!(quadratic_form(&gamma, &[1.0, 2.0], &[1.0, 2.0]), 2.0 + 2.0 + 4.0);
    }
}
