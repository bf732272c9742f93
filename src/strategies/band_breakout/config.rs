//! Band-breakout strategy parameters

use anyhow::{ensure, Result};
use serde::{Deserialize, Serialize};

/// Parameters for the band-breakout strategy
///
/// Defaults are the production tuning for 15-minute futures bars.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BandBreakoutConfig {
    /// Fast moving-average window (bars)
    pub short_window: usize,

    /// Intermediate moving-average window (bars)
    pub medium_window: usize,

    /// Trend moving-average window (bars); also the band centerline
    pub long_window: usize,

    /// Rolling standard-deviation window (bars)
    pub std_window: usize,

    /// How many completed bars back the standard deviation is read
    pub std_offset: usize,

    /// Band half-width in standard deviations
    pub band_dev: f64,

    /// Minimum distance from the centerline to either band boundary;
    /// closer than this is a compressed (ranging) band
    pub band_tolerance: f64,

    /// Band width at or below this classifies as ranging
    pub band_width_threshold: f64,

    /// Standard deviation at or below this classifies as ranging
    pub volatility_floor: f64,

    /// Entries require standard deviation at or below this (fresh
    /// breakout, not a trend already extended)
    pub volatility_ceiling: f64,

    /// Price ticks added to (subtracted from) the trigger price on
    /// entry and exit submissions
    pub price_offset: f64,

    /// Lot size for every entry
    pub fixed_volume: f64,

    /// Target aggregation interval in minutes
    pub bar_window: u32,

    /// History buffer capacity in bars; warm-up completes when full
    pub history_size: usize,
}

impl Default for BandBreakoutConfig {
    fn default() -> Self {
        Self {
            short_window: 5,
            medium_window: 10,
            long_window: 20,
            std_window: 3,
            std_offset: 1,
            band_dev: 2.0,
            band_tolerance: 10.0,
            band_width_threshold: 20.0,
            volatility_floor: 2.0,
            volatility_ceiling: 10.0,
            price_offset: 2.0,
            fixed_volume: 1.0,
            bar_window: 15,
            history_size: 100,
        }
    }
}

impl BandBreakoutConfig {
    /// Validate parameter consistency at construction time
    pub fn validate(&self) -> Result<()> {
        ensure!(self.short_window > 0, "short_window must be positive");
        ensure!(self.medium_window > 0, "medium_window must be positive");
        ensure!(self.long_window > 0, "long_window must be positive");
        ensure!(self.std_window > 0, "std_window must be positive");
        ensure!(
            self.long_window < self.history_size,
            "long_window ({}) must be smaller than history_size ({}) so a prior average exists",
            self.long_window,
            self.history_size
        );
        ensure!(self.fixed_volume > 0.0, "fixed_volume must be positive");
        ensure!(self.price_offset >= 0.0, "price_offset must not be negative");
        ensure!(self.band_dev > 0.0, "band_dev must be positive");
        ensure!(
            self.bar_window > 0 && 60 % self.bar_window == 0,
            "bar_window ({}) must divide 60 so interval boundaries stay aligned",
            self.bar_window
        );
        ensure!(
            self.volatility_floor <= self.volatility_ceiling,
            "volatility_floor ({}) must not exceed volatility_ceiling ({})",
            self.volatility_floor,
            self.volatility_ceiling
        );
        Ok(())
    }
}
