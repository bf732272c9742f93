//! Strategy framework
//!
//! The event-driven strategy contract plus a dynamic name registry, so a
//! host constructs strategies from configuration without hardcoding types.

pub mod band_breakout;

use crate::oms::{Fill, Order, TradingRuntime};
use crate::{Bar, Config, Tick};
use anyhow::Result;
use std::collections::HashMap;
use std::sync::{OnceLock, RwLock};

// =============================================================================
// Strategy Trait - The contract all strategies must implement
// =============================================================================

/// Event-driven strategy contract
///
/// The host delivers events sequentially from a single thread: ticks,
/// completed 1-minute bars (live aggregation or warm-up replay), fills, and
/// order updates. Callbacks receive the runtime so the strategy can act
/// immediately; none of them block.
pub trait Strategy: Send + Sync {
    /// Strategy identifier (must match the config's strategy name)
    fn name(&self) -> &'static str;

    /// Host signals trading may begin (warm-up replay is done)
    fn on_start(&mut self, runtime: &mut dyn TradingRuntime);

    /// Host signals trading must stop
    fn on_stop(&mut self, runtime: &mut dyn TradingRuntime);

    /// New market tick
    fn on_tick(&mut self, tick: &Tick, runtime: &mut dyn TradingRuntime);

    /// Completed 1-minute bar, live or replayed
    fn on_bar(&mut self, bar: &Bar, runtime: &mut dyn TradingRuntime);

    /// Trade fill notification
    fn on_fill(&mut self, fill: &Fill, runtime: &mut dyn TradingRuntime);

    /// Order status update (advisory; default implementation just logs)
    fn on_order(&mut self, order: &Order, _runtime: &mut dyn TradingRuntime) {
        tracing::debug!(
            symbol = %order.symbol,
            side = ?order.side,
            offset = ?order.offset,
            state = ?order.state,
            "Order update"
        );
    }
}

// =============================================================================
// Strategy Factory - Type alias for strategy constructor functions
// =============================================================================

/// Factory function type for creating strategies from config
pub type StrategyFactory = fn(&Config) -> Result<Box<dyn Strategy>>;

// =============================================================================
// Strategy Registry - Dynamic registration without hardcoding
// =============================================================================

/// Global strategy registry
static REGISTRY: OnceLock<RwLock<HashMap<&'static str, StrategyFactory>>> = OnceLock::new();

fn get_registry() -> &'static RwLock<HashMap<&'static str, StrategyFactory>> {
    REGISTRY.get_or_init(|| {
        let mut map = HashMap::new();
        map.insert("band_breakout", band_breakout::create as StrategyFactory);
        RwLock::new(map)
    })
}

/// Create a strategy from configuration
pub fn create_strategy(config: &Config) -> Result<Box<dyn Strategy>> {
    let registry = get_registry().read().unwrap();

    let strategy_name = config.strategy_name()?;
    let factory = registry.get(strategy_name.as_str()).ok_or_else(|| {
        let available: Vec<_> = registry.keys().copied().collect();
        anyhow::anyhow!(
            "Unknown strategy: '{}'. Available: {}",
            strategy_name,
            available.join(", ")
        )
    })?;

    factory(config)
}

/// Get list of available strategy names
pub fn available_strategies() -> Vec<&'static str> {
    get_registry().read().unwrap().keys().copied().collect()
}

/// Register a new strategy (for plugins or testing)
pub fn register_strategy(name: &'static str, factory: StrategyFactory) {
    get_registry().write().unwrap().insert(name, factory);
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn config_for(name: &str) -> Config {
        Config {
            symbol: "rb2410".to_string(),
            strategy: json!({ "name": name }),
        }
    }

    #[test]
    fn band_breakout_is_registered() {
        assert!(available_strategies().contains(&"band_breakout"));
    }

    #[test]
    fn create_strategy_builds_from_name() {
        let strategy = create_strategy(&config_for("band_breakout")).unwrap();
        assert_eq!(strategy.name(), "band_breakout");
    }

    #[test]
    fn unknown_name_lists_available_strategies() {
        let err = match create_strategy(&config_for("no_such_strategy")) {
            Ok(_) => panic!("unknown strategy name must be rejected"),
            Err(err) => err,
        };
        let msg = err.to_string();
        assert!(msg.contains("Unknown strategy"));
        assert!(msg.contains("band_breakout"));
    }

    #[test]
    fn custom_strategies_can_be_registered() {
        struct NullStrategy;

        impl Strategy for NullStrategy {
            fn name(&self) -> &'static str {
                "null"
            }
            fn on_start(&mut self, _runtime: &mut dyn TradingRuntime) {}
            fn on_stop(&mut self, _runtime: &mut dyn TradingRuntime) {}
            fn on_tick(&mut self, _tick: &Tick, _runtime: &mut dyn TradingRuntime) {}
            fn on_bar(&mut self, _bar: &Bar, _runtime: &mut dyn TradingRuntime) {}
            fn on_fill(&mut self, _fill: &Fill, _runtime: &mut dyn TradingRuntime) {}
        }

        fn create_null(_config: &Config) -> Result<Box<dyn Strategy>> {
            Ok(Box::new(NullStrategy))
        }

        register_strategy("null", create_null);
        let strategy = create_strategy(&config_for("null")).unwrap();
        assert_eq!(strategy.name(), "null");
    }
}
