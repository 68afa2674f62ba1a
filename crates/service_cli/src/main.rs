//! swaptionx - command-line pricing of swaption, swap and bond books
//!
//! # Commands
//!
//! - `swaptionx price --scenario <file.toml>` - value every trade of a scenario
//! - `swaptionx check --scenario <file.toml>` - validate a scenario without pricing
//!
//! Settings are read from `swaptionx.toml` (or `--config`), then the
//! `SWAPTION_CLI_LOG_LEVEL` and `SWAPTION_CLI_OUTPUT` environment variables,
//! then the flags below. `RUST_LOG` overrides the log filter entirely.

use std::path::PathBuf;
use std::str::FromStr;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;
mod scenario;

pub use error::{CliError, Result};

use config::{build_config, CliOverrides, LogLevel, OutputFormat};

/// Swaption, swap and bond pricing from scenario files
#[derive(Parser)]
#[command(name = "swaptionx")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable debug logging unless a log level is given
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "swaptionx.toml")]
    config: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Report format
    #[arg(short, long, global = true, value_enum)]
    output: Option<OutputFormat>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Value every trade of a scenario
    Price {
        /// Scenario file (TOML)
        #[arg(short, long)]
        scenario: PathBuf,
    },

    /// Validate a scenario: build the market data and convert the trades
    Check {
        /// Scenario file (TOML)
        #[arg(short, long)]
        scenario: PathBuf,
    },
}

fn init_tracing(level: LogLevel) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_filter_str()));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.log_level.as_deref() {
        Some(level) => Some(LogLevel::from_str(level)?),
        None if cli.verbose => Some(LogLevel::Debug),
        None => None,
    };
    let overrides = CliOverrides {
        log_level,
        output: cli.output,
    };
    let config = build_config(Some(&cli.config), &overrides)
        .with_context(|| format!("loading configuration from {}", cli.config.display()))?;

    init_tracing(config.log_level);
    debug!(?config, "Configuration loaded");

    match cli.command {
        Commands::Price { scenario } => commands::price::run(&scenario, config.output)
            .with_context(|| format!("pricing {}", scenario.display())),
        Commands::Check { scenario } => commands::check::run(&scenario)
            .with_context(|| format!("checking {}", scenario.display())),
    }
}
