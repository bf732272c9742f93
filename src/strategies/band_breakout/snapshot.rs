//! Point-in-time indicator state

use crate::history::BarHistory;

use super::config::BandBreakoutConfig;

/// Indicator values recomputed once per completed interval
///
/// Holds the moving-average sequences (oldest first) for the three window
/// lengths, the rolling standard deviation, and the volatility band around
/// the long average. [`IndicatorSnapshot::compute`] guarantees the long
/// sequence has at least two values and the others at least one, so the
/// tail accessors are total.
#[derive(Debug, Clone)]
pub struct IndicatorSnapshot {
    short_ma: Vec<f64>,
    medium_ma: Vec<f64>,
    long_ma: Vec<f64>,
    std_dev: f64,
    band_up: f64,
    band_down: f64,
}

impl IndicatorSnapshot {
    /// Compute a snapshot from the history buffer
    ///
    /// Returns `None` while any component window (or the standard-deviation
    /// lookback) is not yet covered by the buffered bars.
    pub fn compute(history: &BarHistory, config: &BandBreakoutConfig) -> Option<Self> {
        let short_ma = valid_values(history.moving_average(config.short_window));
        let medium_ma = valid_values(history.moving_average(config.medium_window));
        let long_ma = valid_values(history.moving_average(config.long_window));
        let std_dev = history.std_dev(config.std_window, config.std_offset)?;

        if long_ma.len() < 2 || short_ma.is_empty() || medium_ma.is_empty() {
            return None;
        }

        let center = long_ma[long_ma.len() - 1];
        Some(Self {
            band_up: center + config.band_dev * std_dev,
            band_down: center - config.band_dev * std_dev,
            short_ma,
            medium_ma,
            long_ma,
            std_dev,
        })
    }

    /// Most recent fast moving average
    pub fn short_ma(&self) -> f64 {
        self.short_ma[self.short_ma.len() - 1]
    }

    /// Most recent intermediate moving average
    pub fn medium_ma(&self) -> f64 {
        self.medium_ma[self.medium_ma.len() - 1]
    }

    /// Most recent trend moving average (the band centerline)
    pub fn long_ma(&self) -> f64 {
        self.long_ma[self.long_ma.len() - 1]
    }

    /// Trend moving average one completed bar back
    pub fn prev_long_ma(&self) -> f64 {
        self.long_ma[self.long_ma.len() - 2]
    }

    /// Rolling standard deviation at the configured lookback offset
    pub fn std_dev(&self) -> f64 {
        self.std_dev
    }

    /// Upper band boundary
    pub fn band_up(&self) -> f64 {
        self.band_up
    }

    /// Lower band boundary
    pub fn band_down(&self) -> f64 {
        self.band_down
    }

    /// Distance between the band boundaries
    pub fn band_width(&self) -> f64 {
        self.band_up - self.band_down
    }

    /// Build a snapshot directly from component values, bypassing the
    /// history math. Lets regime and signal tests pin exact indicator
    /// states instead of reverse-engineering price series.
    #[cfg(test)]
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn from_parts(
        short_ma: f64,
        medium_ma: f64,
        long_ma: f64,
        prev_long_ma: f64,
        std_dev: f64,
        band_up: f64,
        band_down: f64,
    ) -> Self {
        Self {
            short_ma: vec![short_ma],
            medium_ma: vec![medium_ma],
            long_ma: vec![prev_long_ma, long_ma],
            std_dev,
            band_up,
            band_down,
        }
    }
}

fn valid_values(sequence: Vec<Option<f64>>) -> Vec<f64> {
    sequence.into_iter().flatten().collect()
}
