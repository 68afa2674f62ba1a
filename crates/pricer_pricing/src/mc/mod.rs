//! Monte Carlo settings shared by the simulation-based pricers.
//!
//! The G2++ swaption check draws the two model factors at expiry exactly,
//! so a configuration only needs a path count, a batch size for `rayon`
//! and a seed.

mod config;
mod error;

pub use config::{
    MonteCarloConfig, MonteCarloConfigBuilder, DEFAULT_BATCH_SIZE, DEFAULT_SEED, MAX_PATHS,
};
pub use error::ConfigError;
