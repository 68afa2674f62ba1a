//! Monte Carlo pricing of physical swaptions in the G2++ model.
//!
//! Under the `t_0`-forward measure the two factors at expiry are jointly
//! Gaussian, `X ~ N(0, Γ(0, θ))`, and every discount bond is an explicit
//! function of `X`. One exact draw of `X` per path is therefore enough; no
//! time stepping is involved. The method validates the approximation in
//! [`super::SwaptionPhysicalFixedIborG2ppApproximationMethod`].

use pricer_core::market_data::CurrencyAmount;
use pricer_core::types::PricingError;
use pricer_models::instruments::rates::SwaptionPhysicalFixedIbor;
use pricer_models::models::rates::g2pp::G2ppProvider;
use rayon::prelude::*;

use super::g2pp_approximation::G2ppSwaptionData;
use crate::mc::MonteCarloConfig;
use crate::rng::PricerRng;

/// Monte Carlo value with its standard error, both in currency units.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MonteCarloEstimate {
    /// Present value.
    pub value: CurrencyAmount,
    /// Standard error of the present value.
    pub standard_error: f64,
    /// Number of simulated paths.
    pub n_paths: usize,
}

/// Lower-triangular Cholesky factor of a 2×2 covariance matrix.
fn cholesky(gamma: &[[f64; 2]; 2]) -> [[f64; 2]; 2] {
    let l00 = gamma[0][0].max(0.0).sqrt();
    let l10 = if l00 > 0.0 { gamma[1][0] / l00 } else { 0.0 };
    let l11 = (gamma[1][1] - l10 * l10).max(0.0).sqrt();
    [[l00, 0.0], [l10, l11]]
}

/// Running sum and sum of squares of path payoffs.
#[derive(Debug, Clone, Copy, Default)]
struct Moments {
    sum: f64,
    sum_squares: f64,
}

impl Moments {
    fn merge(self, other: Self) -> Self {
        Self {
            sum: self.sum + other.sum,
            sum_squares: self.sum_squares + other.sum_squares,
        }
    }
}

/// G2++ Monte Carlo pricer for physical fixed/term-rate swaptions.
#[derive(Debug, Clone)]
pub struct SwaptionPhysicalFixedIborG2ppMonteCarloMethod {
    config: MonteCarloConfig,
}

impl SwaptionPhysicalFixedIborG2ppMonteCarloMethod {
    /// Pricer with the given simulation settings.
    pub fn new(config: MonteCarloConfig) -> Self {
        Self { config }
    }

    /// Simulation settings.
    #[inline]
    pub fn config(&self) -> &MonteCarloConfig {
        &self.config
    }

    /// Present value and standard error.
    ///
    /// Batches run in parallel, each on its own seeded stream, so the
    /// result is reproducible for a given configuration.
    pub fn present_value(
        &self,
        swaption: &SwaptionPhysicalFixedIbor,
        g2pp: &G2ppProvider,
    ) -> Result<MonteCarloEstimate, PricingError> {
        self.config.validate()?;
        let data = G2ppSwaptionData::new(swaption, g2pp)?;
        let weights: Vec<f64> = data
            .amounts
            .iter()
            .zip(&data.ratios)
            .map(|(c, p)| c * p)
            .collect();
        let convexity = data.convexity_terms();
        let chol = cholesky(&data.gamma);
        // Receiver form: the receiver swaption takes the positive part.
        let omega = if swaption.is_call() { -1.0 } else { 1.0 };

        let config = &self.config;
        let batches: Vec<Moments> = (0..config.n_batches())
            .into_par_iter()
            .map(|batch| {
                let mut rng = PricerRng::for_stream(config.seed(), batch as u64);
                let mut moments = Moments::default();
                for _ in 0..config.batch_len(batch) {
                    let z = [rng.gen_normal(), rng.gen_normal()];
                    let x = [chol[0][0] * z[0], chol[1][0] * z[0] + chol[1][1] * z[1]];
                    let value: f64 = weights
                        .iter()
                        .zip(&data.loadings)
                        .zip(&convexity)
                        .map(|((w, h), c)| w * (-(h[0] * x[0] + h[1] * x[1]) - c).exp())
                        .sum();
                    let payoff = (omega * value).max(0.0);
                    moments.sum += payoff;
                    moments.sum_squares += payoff * payoff;
                }
                moments
            })
            .collect();
        // Ordered merge keeps the estimate independent of thread scheduling.
        let moments = batches.into_iter().fold(Moments::default(), Moments::merge);

        let n = config.n_paths() as f64;
        let mean = moments.sum / n;
        let variance = (moments.sum_squares / n - mean * mean).max(0.0);
        let sign = swaption.terms().sign();
        let value = data.discount_start * mean * sign;
        let standard_error = data.discount_start * (variance / n).sqrt();
        tracing::debug!(
            n_paths = config.n_paths(),
            batches = config.n_batches(),
            seed = config.seed(),
            value,
            standard_error,
            "G2++ swaption Monte Carlo"
        );
        Ok(MonteCarloEstimate {
            value: CurrencyAmount::of(swaption.currency(), value),
            standard_error,
            n_paths: config.n_paths(),
        })
    }
}
