//! Rolling bar history and the indicator queries computed over it

use crate::indicators;
use crate::Bar;

/// Bounded high/low/close history for one strategy instance
///
/// Keeps the most recent `capacity` completed bars of the target interval.
/// `is_initialized` stays false until a full `capacity` of bars has been
/// seen; signal evaluation is suppressed until then so every indicator query
/// runs over a fully populated window.
#[derive(Debug, Clone)]
pub struct BarHistory {
    capacity: usize,
    count: usize,
    high: Vec<f64>,
    low: Vec<f64>,
    close: Vec<f64>,
}

impl BarHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            count: 0,
            high: Vec::with_capacity(capacity),
            low: Vec::with_capacity(capacity),
            close: Vec::with_capacity(capacity),
        }
    }

    /// Absorb a completed bar, evicting the oldest once at capacity
    pub fn update(&mut self, bar: &Bar) {
        self.high.push(bar.high);
        self.low.push(bar.low);
        self.close.push(bar.close);

        if self.high.len() > self.capacity {
            self.high.remove(0);
            self.low.remove(0);
            self.close.remove(0);
        }

        self.count = self.count.saturating_add(1);
    }

    /// True once warm-up is complete (a full window of bars seen)
    pub fn is_initialized(&self) -> bool {
        self.count >= self.capacity
    }

    pub fn len(&self) -> usize {
        self.close.len()
    }

    pub fn is_empty(&self) -> bool {
        self.close.is_empty()
    }

    /// Recent high prices, oldest first
    pub fn high(&self) -> &[f64] {
        &self.high
    }

    /// Recent low prices, oldest first
    pub fn low(&self) -> &[f64] {
        &self.low
    }

    /// Recent close prices, oldest first
    pub fn close(&self) -> &[f64] {
        &self.close
    }

    /// High of the most recently absorbed bar
    pub fn latest_high(&self) -> Option<f64> {
        self.high.last().copied()
    }

    /// Low of the most recently absorbed bar
    pub fn latest_low(&self) -> Option<f64> {
        self.low.last().copied()
    }

    /// Close of the most recently absorbed bar
    pub fn latest_close(&self) -> Option<f64> {
        self.close.last().copied()
    }

    /// Moving-average sequence over the close prices
    pub fn moving_average(&self, window: usize) -> Vec<Option<f64>> {
        indicators::sma(&self.close, window)
    }

    /// Rolling standard deviation of the close prices, read `lookback_offset`
    /// completed bars back from the end of the sequence
    pub fn std_dev(&self, window: usize, lookback_offset: usize) -> Option<f64> {
        let sequence = indicators::std_dev(&self.close, window);
        let idx = sequence.len().checked_sub(1 + lookback_offset)?;
        sequence[idx]
    }
}
