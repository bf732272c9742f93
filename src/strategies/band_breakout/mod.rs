//! Band-breakout intraday strategy
//!
//! Trades fresh breakouts through a volatility band drawn around a long
//! moving average of fixed-interval bars. A regime classifier suppresses
//! entries while the band is narrow, compressed, or flat; a stack of three
//! moving averages filters out unconfirmed breaks; protective stops attach
//! on fill and a tick-level rule takes profit when price reverses through
//! the latest bar's range. Duplicate-protection gates reset each interval.

pub mod config;
pub mod lifecycle;
pub mod regime;
pub mod signal;
pub mod snapshot;
pub mod state;
pub mod strategy;

pub use config::BandBreakoutConfig;
pub use regime::{classify, Regime};
pub use snapshot::IndicatorSnapshot;
pub use state::{CycleState, Latch};
pub use strategy::BandBreakoutStrategy;

use anyhow::Result;

use crate::config::Config;
use crate::strategies::Strategy;
use crate::Symbol;

/// Create a new band-breakout strategy from config
pub fn create(config: &Config) -> Result<Box<dyn Strategy>> {
    let strategy_config: BandBreakoutConfig = serde_json::from_value(config.strategy.clone())
        .map_err(|e| anyhow::anyhow!("Failed to parse band_breakout config: {}", e))?;
    strategy_config.validate()?;

    Ok(Box::new(BandBreakoutStrategy::new(
        Symbol::new(&config.symbol),
        strategy_config,
    )))
}
