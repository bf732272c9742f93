//! Configuration management
//!
//! JSON configuration files: the instrument symbol plus a free-form
//! `strategy` section that each strategy parses into its own parameter
//! struct at construction.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Top-level configuration for one strategy instance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Instrument this strategy instance trades
    pub symbol: String,

    /// Strategy section: `name` plus per-strategy parameters
    pub strategy: serde_json::Value,
}

impl Config {
    /// Load configuration from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref()).context("Failed to read config file")?;
        let config: Config =
            serde_json::from_str(&contents).context("Failed to parse config JSON")?;
        Ok(config)
    }

    /// Strategy name from the strategy section
    pub fn strategy_name(&self) -> Result<String> {
        self.strategy
            .get("name")
            .and_then(|v| v.as_str())
            .map(|s| s.to_string())
            .context("'name' is required in the 'strategy' section of config")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn config_parses_from_json() {
        let config: Config = serde_json::from_value(json!({
            "symbol": "rb2410",
            "strategy": {
                "name": "band_breakout",
                "long_window": 20
            }
        }))
        .unwrap();

        assert_eq!(config.symbol, "rb2410");
        assert_eq!(config.strategy_name().unwrap(), "band_breakout");
    }

    #[test]
    fn missing_strategy_name_is_an_error() {
        let config = Config {
            symbol: "rb2410".to_string(),
            strategy: json!({ "long_window": 20 }),
        };

        assert!(config.strategy_name().is_err());
    }

    #[test]
    fn from_file_round_trips() {
        let path = std::env::temp_dir().join("cta_strategies_config_test.json");
        fs::write(
            &path,
            r#"{ "symbol": "rb2410", "strategy": { "name": "band_breakout" } }"#,
        )
        .unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.symbol, "rb2410");
        assert_eq!(config.strategy_name().unwrap(), "band_breakout");

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn unreadable_file_reports_context() {
        let err = Config::from_file("/nonexistent/config.json").unwrap_err();
        assert!(err.to_string().contains("read config file"));
    }
}
