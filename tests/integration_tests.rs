//! Integration tests for the strategy engine
//!
//! Drive a full band-breakout strategy instance through warm-up replay,
//! live ticks, fills, and interval boundaries using scripted market data,
//! and verify every order action it takes against a recording runtime.

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde_json::json;

use cta_strategies::oms::{Fill, Order, OrderSnapshot, Position, TradingRuntime};
use cta_strategies::strategies::band_breakout::{BandBreakoutConfig, BandBreakoutStrategy};
use cta_strategies::strategies::{self, Strategy};
use cta_strategies::{Bar, Config, Interval, Offset, Side, Symbol, Tick};

// =============================================================================
// Test Utilities
// =============================================================================

/// Runtime double that records every order action and plays back scripted
/// position and order state
#[derive(Debug, Default)]
struct RecordingRuntime {
    position: f64,
    orders: Vec<Order>,
    held_positions: Vec<Position>,
    submitted_opens: Vec<(Side, f64, f64)>,
    submitted_closes: Vec<(Side, f64, f64, bool)>,
    cancel_all_calls: usize,
    publish_calls: usize,
}

impl TradingRuntime for RecordingRuntime {
    fn submit_open(&mut self, side: Side, price: f64, volume: f64) {
        self.submitted_opens.push((side, price, volume));
    }

    fn submit_close(&mut self, side: Side, price: f64, volume: f64, stop: bool) {
        self.submitted_closes.push((side, price, volume, stop));
    }

    fn cancel_all(&mut self) {
        self.cancel_all_calls += 1;
    }

    fn net_position(&self) -> f64 {
        self.position
    }

    fn live_orders(&self) -> OrderSnapshot {
        OrderSnapshot::new(self.orders.clone())
    }

    fn positions(&self) -> Vec<Position> {
        self.held_positions.clone()
    }

    fn publish_state(&mut self) {
        self.publish_calls += 1;
    }
}

fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 2, 9, 0, 0).unwrap()
}

fn symbol() -> Symbol {
    Symbol::new("rb2410")
}

/// 1-minute bar `index` minutes into the session; high/low bracket the
/// close by one point
fn minute_bar(index: i64, close: f64) -> Bar {
    Bar {
        symbol: symbol(),
        interval: Interval::MINUTE,
        datetime: base_time() + Duration::minutes(index),
        open: close,
        high: close + 1.0,
        low: close - 1.0,
        close,
        open_interest: 10_000.0,
    }
}

fn tick_at(minute_index: i64, seconds: i64, price: f64) -> Tick {
    Tick {
        symbol: symbol(),
        last_price: price,
        datetime: base_time() + Duration::minutes(minute_index) + Duration::seconds(seconds),
        open_interest: 10_000.0,
    }
}

/// Replay each close as one 15-minute window of identical 1-minute bars,
/// starting at window number `start`
fn replay_windows(
    strategy: &mut BandBreakoutStrategy,
    runtime: &mut RecordingRuntime,
    start: i64,
    closes: &[f64],
) {
    for (w, &close) in closes.iter().enumerate() {
        for minute in 0..15 {
            let index = (start + w as i64) * 15 + minute;
            strategy.on_bar(&minute_bar(index, close), runtime);
        }
    }
}

/// Warm-up closes ending in a coil that leaves the market tradeable and
/// primed for a long breakout: standard deviation at the configured
/// lookback is sqrt(98/3) ~ 5.72, the 20-bar average 100.45, and the last
/// window closed at 99 (below the prior average of 100.5) with high 100
fn long_setup_closes() -> Vec<f64> {
    let mut closes = vec![100.0; 95];
    closes.extend([104.0, 107.0, 105.0, 94.0, 99.0]);
    closes
}

/// Mirror of the long setup: last window closed at 101 (above the prior
/// average of 99.5) with low 100, averages stacked downward
fn short_setup_closes() -> Vec<f64> {
    let mut closes = vec![100.0; 95];
    closes.extend([96.0, 93.0, 95.0, 106.0, 101.0]);
    closes
}

fn default_strategy() -> BandBreakoutStrategy {
    BandBreakoutStrategy::new(symbol(), BandBreakoutConfig::default())
}

/// Warm a strategy through the given window closes and start trading
fn warmed_and_started(closes: &[f64]) -> (BandBreakoutStrategy, RecordingRuntime) {
    let mut strategy = default_strategy();
    let mut runtime = RecordingRuntime::default();
    replay_windows(&mut strategy, &mut runtime, 0, closes);
    strategy.on_start(&mut runtime);
    (strategy, runtime)
}

// =============================================================================
// Warm-up Behaviour
// =============================================================================

#[test]
fn test_no_signals_before_warm_up_completes() {
    let mut strategy = default_strategy();
    let mut runtime = RecordingRuntime::default();

    // Trading is live from the first tick, but the history buffer needs 100
    // windows; 50 windows of oscillating ticks must produce no orders.
    strategy.on_start(&mut runtime);
    for minute in 0..750 {
        let price = if minute % 2 == 0 { 100.0 } else { 110.0 };
        strategy.on_tick(&tick_at(minute, 10, price), &mut runtime);
        strategy.on_tick(&tick_at(minute, 40, price + 1.0), &mut runtime);
    }

    assert!(runtime.submitted_opens.is_empty());
    assert!(runtime.submitted_closes.is_empty());
    assert_eq!(runtime.cancel_all_calls, 0);
}

#[test]
fn test_carried_position_is_not_managed_before_warm_up() {
    let mut strategy = default_strategy();
    let mut runtime = RecordingRuntime::default();

    // Ten of the hundred required windows, each with low 99.0; the host
    // reports a position carried in from a previous session.
    strategy.on_start(&mut runtime);
    replay_windows(&mut strategy, &mut runtime, 0, &[100.0; 10]);
    runtime.position = 1.0;

    strategy.on_tick(&tick_at(150, 10, 98.0), &mut runtime);

    assert!(runtime.submitted_opens.is_empty());
    assert!(runtime.submitted_closes.is_empty());
    assert_eq!(runtime.cancel_all_calls, 0);
}

#[test]
fn test_warm_up_replay_without_start_never_touches_runtime() {
    let mut strategy = default_strategy();
    let mut runtime = RecordingRuntime::default();

    replay_windows(&mut strategy, &mut runtime, 0, &long_setup_closes());

    assert!(runtime.submitted_opens.is_empty());
    assert!(runtime.submitted_closes.is_empty());
    assert_eq!(runtime.cancel_all_calls, 0);
    assert_eq!(runtime.publish_calls, 0);
}

// =============================================================================
// Entry Signals
// =============================================================================

#[test]
fn test_long_breakout_entry_fires_on_tick() {
    let (mut strategy, mut runtime) = warmed_and_started(&long_setup_closes());

    // Last window: high 100, close 99, 20-bar average 100.45. A tick at 105
    // clears the average and the prior high; entry goes in at 105 + 2.
    strategy.on_tick(&tick_at(1500, 30, 105.0), &mut runtime);

    assert_eq!(runtime.submitted_opens, vec![(Side::Buy, 107.0, 1.0)]);
    assert!(runtime.submitted_closes.is_empty());
}

#[test]
fn test_short_breakout_entry_fires_on_tick() {
    let (mut strategy, mut runtime) = warmed_and_started(&short_setup_closes());

    // Last window: low 100, close 101, 20-bar average 99.55. A tick at 95
    // breaks the average and the prior low; entry goes in at 95 - 2.
    strategy.on_tick(&tick_at(1500, 30, 95.0), &mut runtime);

    assert_eq!(runtime.submitted_opens, vec![(Side::Sell, 93.0, 1.0)]);
}

#[test]
fn test_entry_submitted_once_per_interval() {
    let (mut strategy, mut runtime) = warmed_and_started(&long_setup_closes());

    // Breakout keeps extending within the same interval; only the first
    // qualifying tick may submit.
    strategy.on_tick(&tick_at(1500, 10, 105.0), &mut runtime);
    strategy.on_tick(&tick_at(1500, 40, 105.5), &mut runtime);
    strategy.on_tick(&tick_at(1501, 10, 106.0), &mut runtime);

    assert_eq!(runtime.submitted_opens.len(), 1);
}

#[test]
fn test_ranging_market_stays_flat() {
    // A dead-flat warm-up leaves the band collapsed onto its centerline;
    // even a clean break above every prior high must be ignored.
    let flat = vec![100.0; 100];
    let (mut strategy, mut runtime) = warmed_and_started(&flat);

    strategy.on_tick(&tick_at(1500, 30, 105.0), &mut runtime);

    assert!(runtime.submitted_opens.is_empty());
}

#[test]
fn test_breakout_window_bar_does_not_enter_by_itself() {
    // Warm up to one window short of initialization, then deliver a final
    // window that itself breaks out. The history absorbs the window before
    // evaluation, so the bar cannot exceed its own high: interval closes
    // alone never open a position, only a fresh tick can.
    let mut strategy = default_strategy();
    let mut runtime = RecordingRuntime::default();

    let mut closes = vec![100.0; 95];
    closes.extend([104.0, 107.0, 105.0, 94.0]);
    replay_windows(&mut strategy, &mut runtime, 0, &closes);
    strategy.on_start(&mut runtime);

    // Window 100: fourteen quiet minutes, then a surge into the close
    for minute in 0..14 {
        strategy.on_bar(&minute_bar(99 * 15 + 15 + minute, 99.0), &mut runtime);
    }
    let surge = Bar {
        symbol: symbol(),
        interval: Interval::MINUTE,
        datetime: base_time() + Duration::minutes(99 * 15 + 29),
        open: 99.0,
        high: 106.0,
        low: 98.0,
        close: 105.0,
        open_interest: 10_000.0,
    };
    strategy.on_bar(&surge, &mut runtime);

    assert_eq!(runtime.cancel_all_calls, 1);
    assert!(runtime.submitted_opens.is_empty());
}

// =============================================================================
// Order Lifecycle
// =============================================================================

#[test]
fn test_full_long_round_trip() {
    let (mut strategy, mut runtime) = warmed_and_started(&long_setup_closes());

    // Entry
    strategy.on_tick(&tick_at(1500, 30, 105.0), &mut runtime);
    assert_eq!(runtime.submitted_opens, vec![(Side::Buy, 107.0, 1.0)]);

    // Fill arrives: protective sell stop at the last window's low (98),
    // sized exactly to the fill
    let fill = Fill {
        symbol: symbol(),
        side: Side::Buy,
        offset: Offset::Open,
        price: 107.0,
        volume: 1.0,
        timestamp: base_time() + Duration::minutes(1500),
    };
    strategy.on_fill(&fill, &mut runtime);
    assert_eq!(runtime.submitted_closes, vec![(Side::Sell, 98.0, 1.0, true)]);

    // Price reverses below the last window's low: take-profit for the
    // full position at 97 - 2
    runtime.position = 1.0;
    strategy.on_tick(&tick_at(1501, 10, 97.0), &mut runtime);
    assert_eq!(runtime.submitted_closes.len(), 2);
    assert_eq!(runtime.submitted_closes[1], (Side::Sell, 95.0, 1.0, false));

    // Further downticks in the same interval must not stack more exits
    strategy.on_tick(&tick_at(1501, 40, 96.0), &mut runtime);
    assert_eq!(runtime.submitted_closes.len(), 2);
}

#[test]
fn test_short_fill_attaches_buy_stop_at_prior_high() {
    let (mut strategy, mut runtime) = warmed_and_started(&short_setup_closes());

    strategy.on_tick(&tick_at(1500, 30, 95.0), &mut runtime);
    assert_eq!(runtime.submitted_opens, vec![(Side::Sell, 93.0, 1.0)]);

    let fill = Fill {
        symbol: symbol(),
        side: Side::Sell,
        offset: Offset::Open,
        price: 93.0,
        volume: 1.0,
        timestamp: base_time() + Duration::minutes(1500),
    };
    strategy.on_fill(&fill, &mut runtime);

    // Last window's high was 102
    assert_eq!(runtime.submitted_closes, vec![(Side::Buy, 102.0, 1.0, true)]);

    // Rally back through the high: cover the short at 103 + 2
    runtime.position = -1.0;
    strategy.on_tick(&tick_at(1501, 10, 103.0), &mut runtime);
    assert_eq!(runtime.submitted_closes[1], (Side::Buy, 105.0, 1.0, false));
}

#[test]
fn test_live_close_order_blocks_duplicate_take_profit() {
    let (mut strategy, mut runtime) = warmed_and_started(&long_setup_closes());

    runtime.position = 1.0;
    runtime.orders = vec![Order::new(7, symbol(), Side::Sell, Offset::Close, 95.5, 1.0)];

    strategy.on_tick(&tick_at(1500, 30, 97.0), &mut runtime);

    assert!(runtime.submitted_closes.is_empty());
}

#[test]
fn test_interval_close_cancels_outstanding_orders() {
    let (mut strategy, mut runtime) = warmed_and_started(&long_setup_closes());
    assert_eq!(runtime.cancel_all_calls, 0);

    replay_windows(&mut strategy, &mut runtime, 100, &[99.0]);
    assert_eq!(runtime.cancel_all_calls, 1);

    replay_windows(&mut strategy, &mut runtime, 101, &[99.0]);
    assert_eq!(runtime.cancel_all_calls, 2);

    // One state notification per evaluated interval plus the one at start
    assert_eq!(runtime.publish_calls, 3);
}

// =============================================================================
// Registry
// =============================================================================

#[test]
fn test_registry_creates_band_breakout() {
    let config = Config {
        symbol: "rb2410".to_string(),
        strategy: json!({ "name": "band_breakout", "fixed_volume": 1.0 }),
    };

    let strategy = strategies::create_strategy(&config).unwrap();
    assert_eq!(strategy.name(), "band_breakout");
    assert!(strategies::available_strategies().contains(&"band_breakout"));
}

#[test]
fn test_registry_rejects_unknown_strategy() {
    let config = Config {
        symbol: "rb2410".to_string(),
        strategy: json!({ "name": "no_such_strategy" }),
    };

    let err = match strategies::create_strategy(&config) {
        Ok(_) => panic!("unknown strategy name must be rejected"),
        Err(err) => err,
    };
    assert!(err.to_string().contains("Unknown strategy"));
}
