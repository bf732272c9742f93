//! Ranging/trending regime classification

use super::config::BandBreakoutConfig;
use super::snapshot::IndicatorSnapshot;

/// Market regime for a single evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Regime {
    /// Band too narrow, centerline too close to a boundary, or volatility
    /// at the floor. Breakout entries are suppressed.
    Ranging,
    /// Wide, centered band with live volatility. Breakouts are tradeable.
    Trending,
}

impl Regime {
    pub fn is_tradeable(self) -> bool {
        self == Regime::Trending
    }
}

/// Classify the current indicator snapshot
///
/// Ranging when any of the following holds; the width comparison is
/// inclusive, so a band exactly at the threshold still counts as ranging:
/// - band width at or below `band_width_threshold`
/// - centerline within `band_tolerance` of either boundary
/// - standard deviation at or below `volatility_floor`
pub fn classify(snapshot: &IndicatorSnapshot, config: &BandBreakoutConfig) -> Regime {
    let narrow_band = snapshot.band_width() <= config.band_width_threshold;
    let compressed_below = snapshot.long_ma() - snapshot.band_down() < config.band_tolerance;
    let compressed_above = snapshot.band_up() - snapshot.long_ma() < config.band_tolerance;
    let flat_volatility = snapshot.std_dev() <= config.volatility_floor;

    if narrow_band || compressed_below || compressed_above || flat_volatility {
        Regime::Ranging
    } else {
        Regime::Trending
    }
}
