//! Position lifecycle: protective stops on entry fills, tick take-profit

use crate::history::BarHistory;
use crate::oms::{Fill, TradingRuntime};
use crate::{Side, Tick};

use super::config::BandBreakoutConfig;
use super::state::CycleState;

/// React to a fill notification
///
/// An opening fill gets a protective stop attached immediately: a sell stop
/// at the latest completed bar's low for a long, a buy stop at its high for
/// a short, sized to the fill. Closing fills only log and notify.
pub fn on_fill(
    fill: &Fill,
    history: &BarHistory,
    state: &mut CycleState,
    runtime: &mut dyn TradingRuntime,
) {
    if fill.opens_position() {
        let stop = match fill.side {
            Side::Buy => history.latest_low(),
            Side::Sell => history.latest_high(),
        };
        if let Some(stop) = stop {
            match fill.side {
                Side::Buy => state.stop_long_price = stop,
                Side::Sell => state.stop_short_price = stop,
            }
            let stop_side = fill.side.opposite();
            runtime.submit_close(stop_side, stop, fill.volume, true);
            tracing::info!(
                symbol = %fill.symbol,
                side = ?stop_side,
                stop,
                volume = fill.volume,
                "Opening fill, protective stop placed"
            );
        } else {
            tracing::warn!(
                symbol = %fill.symbol,
                side = ?fill.side,
                "Opening fill before any bar history, no stop placed"
            );
        }
    } else {
        tracing::info!(
            symbol = %fill.symbol,
            side = ?fill.side,
            price = fill.price,
            volume = fill.volume,
            "Position closed"
        );
    }

    runtime.publish_state();
}

/// Evaluate the tick-level take-profit rule
///
/// A long exits when the tick trades below the latest completed bar's low;
/// a short exits when it trades above the latest bar's high. The exit is
/// submitted once per cycle for the full position, and only if no close
/// order in that direction is already live.
pub fn evaluate_take_profit(
    tick: &Tick,
    history: &BarHistory,
    config: &BandBreakoutConfig,
    state: &mut CycleState,
    runtime: &mut dyn TradingRuntime,
) {
    let position = runtime.net_position();
    if position == 0.0 {
        return;
    }

    if position > 0.0 {
        let Some(trigger) = history.latest_low() else {
            return;
        };
        if tick.last_price < trigger {
            submit_exit(
                tick,
                Side::Sell,
                tick.last_price - config.price_offset,
                position.abs(),
                state,
                runtime,
            );
        }
    } else {
        let Some(trigger) = history.latest_high() else {
            return;
        };
        if tick.last_price > trigger {
            submit_exit(
                tick,
                Side::Buy,
                tick.last_price + config.price_offset,
                position.abs(),
                state,
                runtime,
            );
        }
    }
}

/// Submit a closing order unless one is already in flight this cycle
///
/// Two gates, checked against fresh state at the moment of submission: the
/// live-order snapshot must hold no active close in this direction, and the
/// per-cycle exit latch must still be open. An empty snapshot passes.
fn submit_exit(
    tick: &Tick,
    side: Side,
    price: f64,
    volume: f64,
    state: &mut CycleState,
    runtime: &mut dyn TradingRuntime,
) {
    let live = runtime.live_orders();
    if live.has_live_close(&tick.symbol, side) {
        tracing::debug!(
            symbol = %tick.symbol,
            side = ?side,
            "Close order already live, skipping exit"
        );
        return;
    }
    if state.exit_latch.is_tripped() {
        tracing::debug!(
            symbol = %tick.symbol,
            "Exit already requested this cycle, skipping"
        );
        return;
    }

    tracing::info!(
        symbol = %tick.symbol,
        side = ?side,
        price,
        volume,
        "Take-profit triggered, closing position"
    );
    for position in runtime.positions() {
        if position.symbol == tick.symbol {
            tracing::debug!(
                symbol = %position.symbol,
                side = ?position.side,
                volume = position.volume,
                entry_price = position.entry_price,
                "Closing against reported position"
            );
        }
    }

    runtime.submit_close(side, price, volume, false);
    state.exit_latch.trip();
}
