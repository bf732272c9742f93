//! Band-breakout strategy controller

use crate::aggregator::BarAggregator;
use crate::history::BarHistory;
use crate::oms::{Fill, TradingRuntime};
use crate::strategies::Strategy;
use crate::{Bar, Symbol, Tick};

use super::config::BandBreakoutConfig;
use super::lifecycle;
use super::signal;
use super::snapshot::IndicatorSnapshot;
use super::state::CycleState;

/// Controller tying aggregation, indicators, signals, and order lifecycle
/// into one strategy instance
///
/// Owns all mutable state; the host delivers ticks, bars, and fills from a
/// single thread and supplies the [`TradingRuntime`] with each callback.
/// While `trading` is false (warm-up replay, or after a stop) market data
/// still flows into the aggregator and history, but nothing is submitted
/// or cancelled. The same holds before the history buffer first fills,
/// whatever the trading flag says.
pub struct BandBreakoutStrategy {
    config: BandBreakoutConfig,
    symbol: Symbol,
    aggregator: BarAggregator,
    history: BarHistory,
    snapshot: Option<IndicatorSnapshot>,
    state: CycleState,
    trading: bool,
}

impl BandBreakoutStrategy {
    pub fn new(symbol: Symbol, config: BandBreakoutConfig) -> Self {
        let aggregator = BarAggregator::new(config.bar_window);
        let history = BarHistory::new(config.history_size);
        Self {
            config,
            symbol,
            aggregator,
            history,
            snapshot: None,
            state: CycleState::default(),
            trading: false,
        }
    }

    /// Handle a completed bar of the target interval
    ///
    /// Order matters: the cycle state resets and the history absorbs the
    /// bar before anything else; outstanding orders are cancelled before
    /// the fresh snapshot is computed; evaluation runs against prior-bar
    /// values that already include this bar.
    fn on_interval_close(&mut self, bar: &Bar, runtime: &mut dyn TradingRuntime) {
        self.state.begin_cycle();
        self.history.update(bar);

        if !self.history.is_initialized() {
            return;
        }

        if self.trading {
            runtime.cancel_all();
        }

        self.snapshot = IndicatorSnapshot::compute(&self.history, &self.config);

        if !self.trading {
            return;
        }

        if let Some(snapshot) = &self.snapshot {
            signal::evaluate_entry(
                bar,
                &self.symbol,
                snapshot,
                &self.history,
                &self.config,
                &mut self.state,
                runtime,
            );
        }

        runtime.publish_state();
    }

    /// Run entry evaluation against a single tick using the cached snapshot
    fn evaluate_tick_entry(&mut self, tick: &Tick, runtime: &mut dyn TradingRuntime) {
        if let Some(snapshot) = &self.snapshot {
            signal::evaluate_entry(
                tick,
                &self.symbol,
                snapshot,
                &self.history,
                &self.config,
                &mut self.state,
                runtime,
            );
        }
    }
}

impl Strategy for BandBreakoutStrategy {
    fn name(&self) -> &'static str {
        "band_breakout"
    }

    fn on_start(&mut self, runtime: &mut dyn TradingRuntime) {
        self.trading = true;
        tracing::info!(
            symbol = %self.symbol,
            interval = %self.aggregator.interval(),
            "Strategy started"
        );
        runtime.publish_state();
    }

    fn on_stop(&mut self, runtime: &mut dyn TradingRuntime) {
        self.trading = false;
        for position in runtime.positions() {
            if position.symbol == self.symbol {
                tracing::info!(
                    symbol = %position.symbol,
                    side = ?position.side,
                    volume = position.volume,
                    entry_price = position.entry_price,
                    "Position still open at stop"
                );
            }
        }
        tracing::info!(symbol = %self.symbol, "Strategy stopped");
        runtime.publish_state();
    }

    fn on_tick(&mut self, tick: &Tick, runtime: &mut dyn TradingRuntime) {
        if let Some(minute_bar) = self.aggregator.feed_tick(tick) {
            if let Some(window_bar) = self.aggregator.feed_bar(&minute_bar) {
                self.on_interval_close(&window_bar, runtime);
            }
        }

        // No live evaluation off an unfilled history buffer, even when the
        // host reports a carried-in position.
        if self.trading && self.history.is_initialized() {
            self.evaluate_tick_entry(tick, runtime);
            lifecycle::evaluate_take_profit(
                tick,
                &self.history,
                &self.config,
                &mut self.state,
                runtime,
            );
        }
    }

    fn on_bar(&mut self, bar: &Bar, runtime: &mut dyn TradingRuntime) {
        if let Some(window_bar) = self.aggregator.feed_bar(bar) {
            self.on_interval_close(&window_bar, runtime);
        }
    }

    fn on_fill(&mut self, fill: &Fill, runtime: &mut dyn TradingRuntime) {
        if !self.trading {
            return;
        }
        lifecycle::on_fill(fill, &self.history, &mut self.state, runtime);
    }
}
