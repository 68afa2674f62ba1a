//! Check command implementation
//!
//! Loads a scenario, builds its market data and converts every trade
//! without pricing anything.

use std::path::Path;

use tracing::info;

use crate::scenario::Scenario;
use crate::Result;

/// Summary of a valid scenario.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioSummary {
    /// Number of discounting, forward and issuer curves.
    pub curves: usize,
    /// Number of trades.
    pub trades: usize,
    /// Whether Black volatilities are present.
    pub black: bool,
    /// Whether G2++ parameters are present.
    pub g2pp: bool,
}

/// Validates a parsed scenario.
pub fn check(scenario: &Scenario) -> Result<ScenarioSummary> {
    let market = scenario.market()?;
    let positions = scenario.positions()?;
    for position in &positions {
        info!(
            id = %position.id,
            instrument = position.instrument.name(),
            currency = %position.instrument.currency(),
            "Trade converted"
        );
    }
    let curves = &scenario.curves;
    Ok(ScenarioSummary {
        curves: curves.discounting.len()
            + curves.ibor.len()
            + curves.overnight.len()
            + curves.issuer.len(),
        trades: positions.len(),
        black: market.black.is_some(),
        g2pp: market.g2pp.is_some(),
    })
}

/// Run the check command
pub fn run(scenario_path: &Path) -> Result<()> {
    let scenario = Scenario::from_file(scenario_path)?;
    let summary = check(&scenario)?;
    println!(
        "Scenario OK: {} curve(s), {} trade(s), Black volatilities: {}, G2++: {}",
        summary.curves,
        summary.trades,
        if summary.black { "yes" } else { "no" },
        if summary.g2pp { "yes" } else { "no" },
    );
    Ok(())
}
