//! Breakout entry evaluation
//!
//! One shared routine runs on interval close and on every intervening tick:
//! anything implementing [`PriceContext`] can trigger an entry. A tick
//! collapses high/low/close onto the last traded price, so the same
//! comparisons serve both paths.

use crate::history::BarHistory;
use crate::oms::TradingRuntime;
use crate::{PriceContext, Side, Symbol};

use super::config::BandBreakoutConfig;
use super::regime;
use super::snapshot::IndicatorSnapshot;
use super::state::CycleState;

/// Evaluate breakout entry conditions against the current prices
///
/// Submits at most one opening order per interval cycle: the entry latch
/// trips on submission and stays tripped until the next interval begins.
/// When a single evaluation satisfies both directions, the long side wins
/// and the short side is not considered.
#[allow(clippy::too_many_arguments)]
pub fn evaluate_entry(
    prices: &impl PriceContext,
    symbol: &Symbol,
    snapshot: &IndicatorSnapshot,
    history: &BarHistory,
    config: &BandBreakoutConfig,
    state: &mut CycleState,
    runtime: &mut dyn TradingRuntime,
) {
    if !regime::classify(snapshot, config).is_tradeable() {
        tracing::debug!(
            symbol = %symbol,
            band_width = snapshot.band_width(),
            std_dev = snapshot.std_dev(),
            "Ranging regime, entries suppressed"
        );
        return;
    }

    let (Some(prior_high), Some(prior_low), Some(prior_close)) = (
        history.latest_high(),
        history.latest_low(),
        history.latest_close(),
    ) else {
        return;
    };

    if prices.high() > snapshot.long_ma()
        && prices.high() > prior_high
        && prior_close <= snapshot.prev_long_ma()
        && snapshot.std_dev() <= config.volatility_ceiling
    {
        // Fresh upside break: price cleared the centerline and the prior
        // high after closing at or below the prior centerline. Require the
        // fast averages stacked above the slow one, else treat it as a
        // false breakout.
        if snapshot.short_ma() < snapshot.long_ma()
            || snapshot.medium_ma() < snapshot.long_ma()
            || snapshot.short_ma() < snapshot.medium_ma()
        {
            tracing::debug!(
                symbol = %symbol,
                short_ma = snapshot.short_ma(),
                medium_ma = snapshot.medium_ma(),
                long_ma = snapshot.long_ma(),
                "Upside break without aligned averages, skipping"
            );
            return;
        }

        if runtime.net_position() == 0.0 && state.entry_latch.is_open() {
            let price = prices.high() + config.price_offset;
            runtime.submit_open(Side::Buy, price, config.fixed_volume);
            state.entry_latch.trip();
            tracing::info!(
                symbol = %symbol,
                price,
                volume = config.fixed_volume,
                long_ma = snapshot.long_ma(),
                "Upside breakout, buying to open"
            );
        }
    } else if prices.low() < snapshot.long_ma()
        && prices.low() < prior_low
        && prior_close >= snapshot.prev_long_ma()
        && snapshot.std_dev() <= config.volatility_ceiling
    {
        // Mirror of the long side: downside break after closing at or
        // above the prior centerline, fast averages stacked below.
        if snapshot.short_ma() > snapshot.long_ma()
            || snapshot.medium_ma() > snapshot.long_ma()
            || snapshot.short_ma() > snapshot.medium_ma()
        {
            tracing::debug!(
                symbol = %symbol,
                short_ma = snapshot.short_ma(),
                medium_ma = snapshot.medium_ma(),
                long_ma = snapshot.long_ma(),
                "Downside break without aligned averages, skipping"
            );
            return;
        }

        if runtime.net_position() == 0.0 && state.entry_latch.is_open() {
            let price = prices.low() - config.price_offset;
            runtime.submit_open(Side::Sell, price, config.fixed_volume);
            state.entry_latch.trip();
            tracing::info!(
                symbol = %symbol,
                price,
                volume = config.fixed_volume,
                long_ma = snapshot.long_ma(),
                "Downside breakout, selling to open"
            );
        }
    }
}
