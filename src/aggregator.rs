//! Tick-to-bar aggregation
//!
//! Two-stage adapter: incoming ticks are folded into 1-minute bars, and
//! completed 1-minute bars are merged into N-minute window bars. A 1-minute
//! bar completes when a tick arrives in a later minute; a window bar
//! completes on the last constituent minute of its window, i.e. when
//! `(minute + 1) % N == 0` (minutes 14, 29, 44, 59 for N = 15). The window
//! size must divide 60 for those boundaries to stay aligned within the hour.

use chrono::{DateTime, Timelike, Utc};

use crate::{Bar, Interval, Tick};

/// Builds target-interval bars from a raw tick stream
#[derive(Debug)]
pub struct BarAggregator {
    window: u32,
    current: Option<Bar>,
    window_bar: Option<Bar>,
}

impl BarAggregator {
    /// Create an aggregator targeting `window`-minute bars
    pub fn new(window: u32) -> Self {
        Self {
            window,
            current: None,
            window_bar: None,
        }
    }

    /// The target interval this aggregator emits from [`feed_bar`](Self::feed_bar)
    pub fn interval(&self) -> Interval {
        Interval::minutes(self.window)
    }

    /// Absorb a tick; returns the completed 1-minute bar on a minute rollover
    pub fn feed_tick(&mut self, tick: &Tick) -> Option<Bar> {
        // Empty ticks (no traded price yet) carry no information
        if tick.last_price == 0.0 {
            return None;
        }

        let minute = floor_to_minute(tick.datetime);
        let mut finished = None;

        if let Some(bar) = &self.current {
            if bar.datetime != minute {
                finished = self.current.take();
            }
        }

        match &mut self.current {
            Some(bar) => {
                bar.high = bar.high.max(tick.last_price);
                bar.low = bar.low.min(tick.last_price);
                bar.close = tick.last_price;
                bar.open_interest = tick.open_interest;
            }
            None => {
                self.current = Some(Bar {
                    symbol: tick.symbol.clone(),
                    interval: Interval::MINUTE,
                    datetime: minute,
                    open: tick.last_price,
                    high: tick.last_price,
                    low: tick.last_price,
                    close: tick.last_price,
                    open_interest: tick.open_interest,
                });
            }
        }

        finished
    }

    /// Absorb a completed 1-minute bar; returns the completed window bar on
    /// the window boundary
    pub fn feed_bar(&mut self, bar: &Bar) -> Option<Bar> {
        match &mut self.window_bar {
            Some(window_bar) => {
                window_bar.high = window_bar.high.max(bar.high);
                window_bar.low = window_bar.low.min(bar.low);
                window_bar.close = bar.close;
                window_bar.open_interest = bar.open_interest;
            }
            None => {
                self.window_bar = Some(Bar {
                    symbol: bar.symbol.clone(),
                    interval: Interval::minutes(self.window),
                    datetime: bar.datetime,
                    open: bar.open,
                    high: bar.high,
                    low: bar.low,
                    close: bar.close,
                    open_interest: bar.open_interest,
                });
            }
        }

        if (bar.datetime.minute() + 1) % self.window == 0 {
            self.window_bar.take()
        } else {
            None
        }
    }
}

fn floor_to_minute(dt: DateTime<Utc>) -> DateTime<Utc> {
    dt.with_second(0)
        .and_then(|d| d.with_nanosecond(0))
        .unwrap_or(dt)
}
