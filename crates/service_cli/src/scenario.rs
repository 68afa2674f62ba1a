//! Scenario files: market data and trades in one TOML document.
//!
//! ```toml
//! reference_date = "2024-01-15"
//! report_currency = "EUR"
//!
//! [[curves.discounting]]
//! currency = "EUR"
//! name = "EUR DSC"
//! rate = 0.012
//!
//! [[curves.ibor]]
//! index = "Euribor6M"
//! name = "EUR EURIBOR6M"
//! tenors = [1.0, 5.0, 10.0]
//! rates = [0.015, 0.018, 0.021]
//!
//! [black]
//! generator = "EUR1YEURIBOR6M"
//! fixed_day_count = "30/360"
//! fixed_payments_per_year = 1
//! volatility = 0.2
//!
//! [[instruments]]
//! id = "PAYER-5Y"
//! type = "swaption_fixed_ibor"
//! expiry_date = "2025-01-13"
//! is_long = true
//! [instruments.underlying]
//! ...
//! ```
//!
//! A curve is either flat (`rate`) or interpolated (`tenors` and `rates`,
//! with an optional `interpolation` of `Linear` or `LogLinear`). Dates are
//! quoted `YYYY-MM-DD` strings.

use std::collections::BTreeSet;
use std::path::Path;

use pricer_core::market_data::curves::CurveEnum;
use pricer_core::market_data::{
    BlackSwaptionProvider, CurveInterpolation, FxMatrix, InterpolatedCurve,
    InterpolatedSwaptionVolatility, IssuerProvider, MulticurveProvider, SwapGenerator,
    SwaptionVolatilityEnum,
};
use pricer_core::types::time::{Date, DayCountConvention};
use pricer_core::types::{Currency, IborIndex, OvernightIndex, PricingError};
use pricer_models::instruments::rates::{
    SwapFixedIborDefinition, SwapFixedOnCompoundedDefinition,
    SwaptionFixedCompoundedOnDefinition, SwaptionFixedIborDefinition,
};
use pricer_models::instruments::{
    BillSecurityDefinition, BondFixedSecurityDefinition, InstrumentDerivative, InstrumentError,
};
use pricer_models::models::rates::g2pp::{G2ppParameters, G2ppProvider};
use pricer_pricing::mc::MonteCarloConfig;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::{CliError, Result};

/// A complete pricing scenario.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    /// Valuation date; trades are converted to times from here.
    pub reference_date: Date,
    /// Currency of the book total, converted with the FX rates.
    #[serde(default)]
    pub report_currency: Option<Currency>,
    /// Yield curves.
    pub curves: CurvesSpec,
    /// FX spot rates.
    #[serde(default)]
    pub fx: Vec<FxSpec>,
    /// Black swaption volatilities.
    #[serde(default)]
    pub black: Option<BlackSpec>,
    /// G2++ parameters for the model check of physical swaptions.
    #[serde(default)]
    pub g2pp: Option<G2ppSpec>,
    /// Trades.
    #[serde(default)]
    pub instruments: Vec<TradeSpec>,
}

/// Curve sections of a scenario.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CurvesSpec {
    /// One discounting curve per currency.
    pub discounting: Vec<DiscountingCurveSpec>,
    /// Term-rate forward curves.
    #[serde(default)]
    pub ibor: Vec<IborCurveSpec>,
    /// Overnight forward curves.
    #[serde(default)]
    pub overnight: Vec<OvernightCurveSpec>,
    /// Issuer discounting curves for bonds and bills.
    #[serde(default)]
    pub issuer: Vec<IssuerCurveSpec>,
}

/// Flat or interpolated zero-rate curve.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CurveShape {
    /// Continuously compounded flat rate.
    #[serde(default)]
    pub rate: Option<f64>,
    /// Pillar times in years.
    #[serde(default)]
    pub tenors: Option<Vec<f64>>,
    /// Zero rates at the pillars.
    #[serde(default)]
    pub rates: Option<Vec<f64>>,
    /// Interpolation between pillars, `Linear` when omitted.
    #[serde(default)]
    pub interpolation: Option<CurveInterpolation>,
    /// Flat extrapolation beyond the pillars.
    #[serde(default = "default_true")]
    pub extrapolate: bool,
}

fn default_true() -> bool {
    true
}

impl CurveShape {
    fn build(&self, name: &str) -> Result<CurveEnum<f64>> {
        match (self.rate, &self.tenors, &self.rates) {
            (Some(rate), None, None) => Ok(CurveEnum::flat(rate)),
            (None, Some(tenors), Some(rates)) => Ok(InterpolatedCurve::new(
                tenors,
                rates,
                self.interpolation.unwrap_or(CurveInterpolation::Linear),
                self.extrapolate,
            )?
            .into()),
            _ => Err(CliError::invalid_scenario(format!(
                "curve '{}' needs either `rate` or both `tenors` and `rates`",
                name
            ))),
        }
    }
}

/// Discounting curve of a currency.
#[derive(Debug, Clone, Deserialize)]
pub struct DiscountingCurveSpec {
    /// Currency discounted.
    pub currency: Currency,
    /// Curve name, used in sensitivities.
    pub name: String,
    /// Curve data.
    #[serde(flatten)]
    pub shape: CurveShape,
}

/// Forward curve of a term-rate index.
#[derive(Debug, Clone, Deserialize)]
pub struct IborCurveSpec {
    /// Index projected.
    pub index: IborIndex,
    /// Curve name.
    pub name: String,
    /// Curve data.
    #[serde(flatten)]
    pub shape: CurveShape,
}

/// Forward curve of an overnight index.
#[derive(Debug, Clone, Deserialize)]
pub struct OvernightCurveSpec {
    /// Index projected.
    pub index: OvernightIndex,
    /// Curve name.
    pub name: String,
    /// Curve data.
    #[serde(flatten)]
    pub shape: CurveShape,
}

/// Discounting curve of a bond issuer.
#[derive(Debug, Clone, Deserialize)]
pub struct IssuerCurveSpec {
    /// Issuer name as it appears on the bonds.
    pub issuer: String,
    /// Curve name.
    pub name: String,
    /// Curve data.
    #[serde(flatten)]
    pub shape: CurveShape,
}

/// One FX spot: units of `quote` per unit of `base`.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FxSpec {
    /// Base currency.
    pub base: Currency,
    /// Quote currency.
    pub quote: Currency,
    /// Spot rate.
    pub rate: f64,
}

/// Black volatility surface and the swap convention it is quoted for.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BlackSpec {
    /// Generator name.
    pub generator: String,
    /// Fixed leg day count of the generator.
    pub fixed_day_count: DayCountConvention,
    /// Fixed leg payments per year of the generator.
    pub fixed_payments_per_year: u32,
    /// Flat volatility.
    #[serde(default)]
    pub volatility: Option<f64>,
    /// Grid expiries in years.
    #[serde(default)]
    pub expiries: Option<Vec<f64>>,
    /// Grid tenors in years.
    #[serde(default)]
    pub tenors: Option<Vec<f64>>,
    /// Volatilities, one row per expiry.
    #[serde(default)]
    pub volatilities: Option<Vec<Vec<f64>>>,
    /// Flat extrapolation beyond the grid.
    #[serde(default = "default_true")]
    pub extrapolate: bool,
}

impl BlackSpec {
    fn surface(&self) -> Result<SwaptionVolatilityEnum<f64>> {
        match (self.volatility, &self.expiries, &self.tenors, &self.volatilities) {
            (Some(sigma), None, None, None) => Ok(SwaptionVolatilityEnum::flat(sigma)),
            (None, Some(expiries), Some(tenors), Some(grid)) => {
                let rows: Vec<&[f64]> = grid.iter().map(Vec::as_slice).collect();
                Ok(InterpolatedSwaptionVolatility::new(expiries, tenors, &rows, self.extrapolate)?
                    .into())
            }
            _ => Err(CliError::invalid_scenario(
                "black volatility needs either `volatility` or \
                    `expiries`, `tenors` and `volatilities`",
            )),
        }
    }
}

/// Two-factor Gaussian model used to cross-check physical swaptions.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct G2ppSpec {
    /// Currency the model is calibrated to.
    pub currency: Currency,
    /// Mean reversion speeds of the two factors.
    pub mean_reversion: [f64; 2],
    /// Piecewise-constant volatilities of the two factors.
    pub volatilities: [Vec<f64>; 2],
    /// Volatility breakpoints.
    #[serde(default)]
    pub volatility_times: Vec<f64>,
    /// Factor correlation.
    pub correlation: f64,
    /// Monte Carlo settings; the approximation alone when omitted.
    #[serde(default)]
    pub monte_carlo: Option<MonteCarloSpec>,
}

/// Monte Carlo settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MonteCarloSpec {
    /// Number of paths.
    pub paths: usize,
    /// Paths per parallel batch.
    #[serde(default)]
    pub batch_size: Option<usize>,
    /// Seed of the random stream.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl MonteCarloSpec {
    fn config(&self) -> Result<MonteCarloConfig> {
        let mut builder = MonteCarloConfig::builder().n_paths(self.paths);
        if let Some(batch_size) = self.batch_size {
            builder = builder.batch_size(batch_size);
        }
        if let Some(seed) = self.seed {
            builder = builder.seed(seed);
        }
        Ok(builder.build().map_err(PricingError::from)?)
    }
}

/// A booked trade with its identifier.
#[derive(Debug, Clone, Deserialize)]
pub struct TradeSpec {
    /// Trade identifier, unique within the scenario.
    pub id: String,
    /// Trade terms.
    #[serde(flatten)]
    pub trade: Trade,
}

/// Trade terms, selected by the `type` key.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Trade {
    /// Fixed/term-rate swap.
    SwapFixedIbor(SwapFixedIborDefinition),
    /// Compounded fixed/overnight swap.
    SwapFixedOnCompounded(SwapFixedOnCompoundedDefinition),
    /// Physical swaption on a fixed/term-rate swap.
    SwaptionFixedIbor(SwaptionFixedIborDefinition),
    /// Physical or cash swaption on a compounded overnight swap.
    SwaptionFixedCompoundedOn(SwaptionFixedCompoundedOnDefinition),
    /// Fixed-coupon bond.
    BondFixed(BondFixedSecurityDefinition),
    /// Bill.
    Bill(BillSecurityDefinition),
}

impl Trade {
    /// Converts the trade at `reference_date`.
    pub fn to_derivative(
        &self,
        reference_date: Date,
    ) -> std::result::Result<InstrumentDerivative, InstrumentError> {
        Ok(match self {
            Trade::SwapFixedIbor(d) => d.to_derivative(reference_date)?.into(),
            Trade::SwapFixedOnCompounded(d) => d.to_derivative(reference_date)?.into(),
            Trade::SwaptionFixedIbor(d) => d.to_derivative(reference_date)?.into(),
            Trade::SwaptionFixedCompoundedOn(d) => d.to_derivative(reference_date)?,
            Trade::BondFixed(d) => d.to_derivative(reference_date)?.into(),
            Trade::Bill(d) => d.to_derivative(reference_date)?.into(),
        })
    }
}

/// Market data built from a scenario.
#[derive(Debug, Clone)]
pub struct Market {
    /// Valuation date.
    pub reference_date: Date,
    /// Curves, with issuer curves and the FX matrix.
    pub issuer: IssuerProvider,
    /// Black swaption provider, when volatilities are given.
    pub black: Option<BlackSwaptionProvider>,
    /// G2++ provider, when parameters are given.
    pub g2pp: Option<G2ppProvider>,
    /// Monte Carlo settings for the G2++ check.
    pub monte_carlo: Option<MonteCarloConfig>,
    /// Currency of the book total.
    pub report_currency: Option<Currency>,
}

impl Market {
    /// Curves without issuer curves.
    pub fn multicurve(&self) -> &MulticurveProvider {
        self.issuer.multicurve()
    }
}

/// A trade converted at the reference date.
#[derive(Debug, Clone)]
pub struct Position {
    /// Trade identifier.
    pub id: String,
    /// Time-based instrument.
    pub instrument: InstrumentDerivative,
}

impl Scenario {
    /// Loads a scenario from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CliError::FileNotFound(path.display().to_string()));
        }
        let content = std::fs::read_to_string(path)?;
        let scenario = Self::from_toml(&content)?;
        info!(
            path = %path.display(),
            reference_date = %scenario.reference_date,
            trades = scenario.instruments.len(),
            "Loaded scenario"
        );
        Ok(scenario)
    }

    /// Parses a scenario from TOML text.
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Builds the market data.
    pub fn market(&self) -> Result<Market> {
        let mut builder = MulticurveProvider::builder();
        for spec in &self.curves.discounting {
            debug!(currency = %spec.currency, name = %spec.name, "Discounting curve");
            let curve = spec.shape.build(&spec.name)?;
            builder = builder.discounting_curve(spec.currency, &spec.name, curve);
        }
        for spec in &self.curves.ibor {
            debug!(index = ?spec.index, name = %spec.name, "Ibor curve");
            builder = builder.ibor_curve(spec.index, &spec.name, spec.shape.build(&spec.name)?);
        }
        for spec in &self.curves.overnight {
            debug!(index = ?spec.index, name = %spec.name, "Overnight curve");
            let curve = spec.shape.build(&spec.name)?;
            builder = builder.overnight_curve(spec.index, &spec.name, curve);
        }
        if !self.fx.is_empty() {
            let fx = self
                .fx
                .iter()
                .fold(FxMatrix::builder(), |b, s| b.add_rate(s.base, s.quote, s.rate))
                .build()?;
            builder = builder.fx_matrix(fx);
        }
        let multicurve = builder.build()?;

        let mut issuer = IssuerProvider::new(multicurve.clone());
        for spec in &self.curves.issuer {
            debug!(issuer = %spec.issuer, name = %spec.name, "Issuer curve");
            let curve = spec.shape.build(&spec.name)?;
            issuer = issuer.with_issuer_curve(&spec.issuer, &spec.name, curve);
        }

        let black = self
            .black
            .as_ref()
            .map(|spec| -> Result<BlackSwaptionProvider> {
                let generator = SwapGenerator::new(
                    &spec.generator,
                    spec.fixed_day_count,
                    spec.fixed_payments_per_year,
                );
                Ok(BlackSwaptionProvider::new(multicurve.clone(), spec.surface()?, generator))
            })
            .transpose()?;

        let (g2pp, monte_carlo) = match &self.g2pp {
            Some(spec) => {
                let parameters = G2ppParameters::new(
                    spec.mean_reversion,
                    spec.volatilities.clone(),
                    spec.volatility_times.clone(),
                    spec.correlation,
                )?;
                let monte_carlo =
                    spec.monte_carlo.as_ref().map(MonteCarloSpec::config).transpose()?;
                (
                    Some(G2ppProvider::new(multicurve.clone(), parameters, spec.currency)),
                    monte_carlo,
                )
            }
            None => (None, None),
        };

        if let Some(currency) = self.report_currency {
            if !multicurve.currencies().any(|c| c == currency)
                && !multicurve.fx_matrix().contains(currency)
            {
                warn!(%currency, "Report currency has neither a curve nor an FX rate");
            }
        }

        Ok(Market {
            reference_date: self.reference_date,
            issuer,
            black,
            g2pp,
            monte_carlo,
            report_currency: self.report_currency,
        })
    }

    /// Converts every trade at the reference date.
    ///
    /// # Errors
    ///
    /// `InvalidScenario` on a duplicate trade identifier, and the conversion
    /// error of the first trade that fails, prefixed with its identifier.
    pub fn positions(&self) -> Result<Vec<Position>> {
        let mut seen = BTreeSet::new();
        self.instruments
            .iter()
            .map(|spec| {
                if !seen.insert(spec.id.as_str()) {
                    return Err(CliError::invalid_scenario(format!(
                        "duplicate trade id '{}'",
                        spec.id
                    )));
                }
                let instrument = spec
                    .trade
                    .to_derivative(self.reference_date)
                    .map_err(|e| {
                        CliError::invalid_scenario(format!("trade '{}': {}", spec.id, e))
                    })?;
                Ok(Position {
                    id: spec.id.clone(),
                    instrument,
                })
            })
            .collect()
    }
}
