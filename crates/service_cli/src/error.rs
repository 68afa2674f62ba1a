//! Error types for the CLI.

use pricer_core::market_data::MarketDataError;
use pricer_core::types::{CurrencyError, PricingError};
use pricer_models::instruments::InstrumentError;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors raised while loading a scenario or running a command.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Input file does not exist
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Scenario file is not valid TOML or does not match the schema
    #[error("Scenario parse error: {0}")]
    ScenarioParse(#[from] toml::de::Error),

    /// Scenario content is inconsistent
    #[error("Invalid scenario: {0}")]
    InvalidScenario(String),

    /// Market data could not be built
    #[error("Market data error: {0}")]
    MarketData(#[from] MarketDataError),

    /// FX rates could not be assembled
    #[error("FX error: {0}")]
    Currency(#[from] CurrencyError),

    /// A trade could not be converted at the reference date
    #[error("Instrument error: {0}")]
    Instrument(#[from] InstrumentError),

    /// Pricing failed
    #[error("Pricing error: {0}")]
    Pricing(#[from] PricingError),

    /// Some trades could not be valued
    #[error("{0} trade(s) could not be valued")]
    TradesFailed(usize),

    /// JSON output failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Create an invalid scenario error
    pub fn invalid_scenario(msg: impl Into<String>) -> Self {
        Self::InvalidScenario(msg.into())
    }
}

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;
