//! Price command implementation
//!
//! Values every trade of a scenario in parallel and prints one row per
//! trade plus the book total.

use std::path::Path;

use pricer_core::market_data::MultipleCurrencyAmount;
use pricer_core::types::{Currency, PricingError};
use pricer_models::instruments::InstrumentDerivative;
use pricer_pricing::calculators::{
    BondMeasure, BondQuote, InstrumentCalculator, ParRateDiscountingCalculator,
    PresentValueBlackSensitivityCalculator, PresentValueBlackSwaptionCalculator,
    PresentValueCurveSensitivityBlackSwaptionCalculator, PresentValueDiscountingCalculator,
};
use pricer_pricing::swaption::{
    MonteCarloEstimate, SwaptionPhysicalFixedIborBlackMethod,
    SwaptionPhysicalFixedIborG2ppApproximationMethod, SwaptionPhysicalFixedIborG2ppMonteCarloMethod,
};
use rayon::prelude::*;
use serde::Serialize;
use tracing::{info, warn};

use crate::config::OutputFormat;
use crate::scenario::{Market, Position, Scenario};
use crate::{CliError, Result};

/// One bond or bill measure.
#[derive(Debug, Clone, Serialize)]
pub struct MeasureValue {
    /// Measure.
    pub measure: BondMeasure,
    /// Value per unit notional.
    pub value: f64,
}

/// G2++ cross-check of a physical swaption.
#[derive(Debug, Clone, Serialize)]
pub struct G2ppCheck {
    /// Present value by the efficient approximation.
    pub approximation: f64,
    /// Black volatility that reproduces the approximation price.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub implied_volatility: Option<f64>,
    /// Monte Carlo estimate, when simulation is configured.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monte_carlo: Option<MonteCarloEstimate>,
}

/// Valuation of one trade.
#[derive(Debug, Clone, Serialize)]
pub struct TradeReport {
    /// Trade identifier.
    pub id: String,
    /// Instrument type.
    pub instrument: &'static str,
    /// Settlement currency.
    pub currency: Currency,
    /// Present value in `currency`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub present_value: Option<f64>,
    /// Derivative of the present value to a parallel shift of every curve.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub curve_sensitivity: Option<f64>,
    /// Derivative of the present value to the Black volatility.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vega: Option<f64>,
    /// Par rate of a swap.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub par_rate: Option<f64>,
    /// Bond or bill measures from the issuer curves.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub measures: Vec<MeasureValue>,
    /// G2++ values.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub g2pp: Option<G2ppCheck>,
    /// Why the trade could not be valued.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TradeReport {
    fn new(position: &Position) -> Self {
        Self {
            id: position.id.clone(),
            instrument: position.instrument.name(),
            currency: position.instrument.currency(),
            present_value: None,
            curve_sensitivity: None,
            vega: None,
            par_rate: None,
            measures: Vec::new(),
            g2pp: None,
            error: None,
        }
    }
}

/// Book valuation.
#[derive(Debug, Clone, Serialize)]
pub struct BookReport {
    /// Valuation date.
    pub reference_date: String,
    /// Per-trade results, in scenario order.
    pub trades: Vec<TradeReport>,
    /// Present values summed by currency.
    pub total: Vec<(Currency, f64)>,
    /// Total converted to the report currency.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub converted_total: Option<(Currency, f64)>,
}

impl BookReport {
    /// Number of trades that could not be valued.
    pub fn failures(&self) -> usize {
        self.trades.iter().filter(|t| t.error.is_some()).count()
    }
}

/// Maps "not available for this instrument" to `None`.
fn optional<T>(
    result: std::result::Result<T, PricingError>,
) -> std::result::Result<Option<T>, PricingError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(PricingError::UnsupportedInstrument(_)) => Ok(None),
        Err(e) if e.is_unimplemented() => Ok(None),
        Err(e) => Err(e),
    }
}

fn value(
    report: &mut TradeReport,
    instrument: &InstrumentDerivative,
    market: &Market,
) -> std::result::Result<(), PricingError> {
    let ccy = report.currency;
    match instrument {
        InstrumentDerivative::SwapFixedIbor(_) | InstrumentDerivative::SwapFixedOnCompounded(_) => {
            report.present_value = Some(
                PresentValueDiscountingCalculator
                    .calculate(instrument, market.multicurve())?
                    .amount(ccy),
            );
            report.par_rate =
                Some(ParRateDiscountingCalculator.calculate(instrument, market.multicurve())?);
            if let Some(black) = &market.black {
                report.curve_sensitivity = Some(
                    PresentValueCurveSensitivityBlackSwaptionCalculator
                        .calculate(instrument, black)?
                        .totals()
                        .amount(ccy),
                );
            }
        }
        InstrumentDerivative::SwaptionPhysicalFixedIbor(_)
        | InstrumentDerivative::SwaptionPhysicalFixedCompoundedOn(_)
        | InstrumentDerivative::SwaptionCashFixedCompoundedOn(_) => {
            let black = market.black.as_ref().ok_or_else(|| {
                PricingError::MissingMarketData(format!(
                    "{} needs a [black] volatility section",
                    instrument.name()
                ))
            })?;
            report.present_value = Some(
                PresentValueBlackSwaptionCalculator
                    .calculate(instrument, black)?
                    .amount(ccy),
            );
            report.curve_sensitivity = optional(
                PresentValueCurveSensitivityBlackSwaptionCalculator.calculate(instrument, black),
            )?
            .map(|s| s.totals().amount(ccy));
            report.vega =
                optional(PresentValueBlackSensitivityCalculator.calculate(instrument, black))?
                    .map(|s| s.points().iter().map(|p| p.2).sum());
            if let InstrumentDerivative::SwaptionPhysicalFixedIbor(swaption) = instrument {
                if let Some(g2pp) = market.g2pp.as_ref().filter(|g| g.currency() == ccy) {
                    let approximation = SwaptionPhysicalFixedIborG2ppApproximationMethod
                        .present_value(swaption, g2pp)?
                        .amount;
                    let implied_volatility = match SwaptionPhysicalFixedIborBlackMethod
                        .implied_volatility_from_present_value(swaption, black, approximation)
                    {
                        Ok(volatility) => Some(volatility),
                        Err(e) => {
                            warn!(error = %e, "No Black volatility matches the G2++ price");
                            None
                        }
                    };
                    let monte_carlo = market
                        .monte_carlo
                        .as_ref()
                        .map(|config| {
                            SwaptionPhysicalFixedIborG2ppMonteCarloMethod::new(config.clone())
                                .present_value(swaption, g2pp)
                        })
                        .transpose()?;
                    report.g2pp = Some(G2ppCheck {
                        approximation,
                        implied_volatility,
                        monte_carlo,
                    });
                }
            }
        }
        InstrumentDerivative::BondFixedSecurity(_) | InstrumentDerivative::BillSecurity(_) => {
            report.present_value = Some(
                PresentValueDiscountingCalculator
                    .calculate(instrument, &market.issuer)?
                    .amount(ccy),
            );
            for measure in BondMeasure::ALL {
                if let Some(value) =
                    optional(measure.compute(instrument, BondQuote::Curves(&market.issuer)))?
                {
                    report.measures.push(MeasureValue { measure, value });
                }
            }
        }
    }
    Ok(())
}

/// Values one position; failures are recorded on the report.
pub fn price_position(position: &Position, market: &Market) -> TradeReport {
    let mut report = TradeReport::new(position);
    if let Err(e) = value(&mut report, &position.instrument, market) {
        warn!(id = %position.id, error = %e, "Trade could not be valued");
        report.error = Some(e.to_string());
    }
    report
}

/// Values a book in parallel.
pub fn price_book(positions: &[Position], market: &Market) -> Result<BookReport> {
    let trades: Vec<TradeReport> = positions
        .par_iter()
        .map(|p| price_position(p, market))
        .collect();

    let total = trades
        .iter()
        .filter_map(|t| t.present_value.map(|pv| MultipleCurrencyAmount::of(t.currency, pv)))
        .fold(MultipleCurrencyAmount::new(), |acc, pv| acc.plus(&pv));
    let converted_total = market
        .report_currency
        .map(|ccy| -> Result<(Currency, f64)> {
            Ok((ccy, market.multicurve().fx_matrix().convert(&total, ccy)?))
        })
        .transpose()?;

    Ok(BookReport {
        reference_date: market.reference_date.to_string(),
        trades,
        total: total.iter().map(|a| (a.currency, a.amount)).collect(),
        converted_total,
    })
}

fn fmt_opt(value: Option<f64>, decimals: usize) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{:.*}", decimals, v))
}

/// Short secondary figure shown in the table's last column.
fn detail(trade: &TradeReport) -> String {
    if let Some(error) = &trade.error {
        return format!("error: {}", error);
    }
    if let Some(rate) = trade.par_rate {
        return format!("par {:.4}%", rate * 100.0);
    }
    if let Some(g2pp) = &trade.g2pp {
        return match &g2pp.monte_carlo {
            Some(mc) => format!(
                "G2++ {:.2} / MC {:.2} ± {:.2}",
                g2pp.approximation, mc.value.amount, mc.standard_error
            ),
            None => format!("G2++ {:.2}", g2pp.approximation),
        };
    }
    let find = |m: BondMeasure| trade.measures.iter().find(|v| v.measure == m).map(|v| v.value);
    match (find(BondMeasure::CleanPrice), find(BondMeasure::Yield)) {
        (Some(price), Some(y)) => format!("clean {:.4}% yield {:.4}%", price * 100.0, y * 100.0),
        _ => String::new(),
    }
}

/// Renders the book as a box-drawn table.
pub fn render_table(book: &BookReport) -> String {
    let header = ["Trade ID", "Instrument", "Ccy", "PV", "PV01", "Vega 1%", "Detail"];
    let rows: Vec<[String; 7]> = book
        .trades
        .iter()
        .map(|t| {
            [
                t.id.clone(),
                t.instrument.to_string(),
                t.currency.to_string(),
                fmt_opt(t.present_value, 2),
                fmt_opt(t.curve_sensitivity.map(|s| s * 1.0e-4), 2),
                fmt_opt(t.vega.map(|v| v * 0.01), 2),
                detail(t),
            ]
        })
        .collect();

    let mut widths = header.map(|h| h.chars().count());
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row.iter()) {
            *w = (*w).max(cell.chars().count());
        }
    }
    let rule = |left: &str, mid: &str, right: &str| {
        let segments: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
        format!("{}{}{}\n", left, segments.join(mid), right)
    };
    let line = |cells: &[String]| {
        let padded: Vec<String> = cells
            .iter()
            .zip(widths.iter())
            .enumerate()
            .map(|(i, (c, w))| {
                // Numbers right-aligned
                if (3..6).contains(&i) {
                    format!(" {:>w$} ", c, w = *w)
                } else {
                    format!(" {:<w$} ", c, w = *w)
                }
            })
            .collect();
        format!("│{}│\n", padded.join("│"))
    };

    let mut out = String::new();
    out.push_str(&format!("Valuation date {}\n", book.reference_date));
    out.push_str(&rule("┌", "┬", "┐"));
    out.push_str(&line(&header.map(String::from)));
    out.push_str(&rule("├", "┼", "┤"));
    for row in &rows {
        out.push_str(&line(row));
    }
    out.push_str(&rule("└", "┴", "┘"));
    for (ccy, amount) in &book.total {
        out.push_str(&format!("Total {}: {:.2}\n", ccy, amount));
    }
    if let Some((ccy, amount)) = &book.converted_total {
        out.push_str(&format!("Total in {}: {:.2}\n", ccy, amount));
    }
    out
}

/// Run the price command
pub fn run(scenario_path: &Path, format: OutputFormat) -> Result<()> {
    info!(scenario = %scenario_path.display(), ?format, "Starting pricing");

    let scenario = Scenario::from_file(scenario_path)?;
    let market = scenario.market()?;
    let positions = scenario.positions()?;
    let book = price_book(&positions, &market)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&book)?),
        OutputFormat::Table => print!("{}", render_table(&book)),
    }

    let failures = book.failures();
    if failures > 0 {
        return Err(CliError::TradesFailed(failures));
    }
    info!(trades = book.trades.len(), "Pricing complete");
    Ok(())
}
