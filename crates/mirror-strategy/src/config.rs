//! Mirror strategy configuration.
//!
//! Keys use the wire names of the strategy's TOML config format.
//! `MIN_BASE_VOLUME` is a deprecated alias for
//! `MIN_BASE_VOLUME_OVERRIDE`; [`MirrorConfig::resolve_deprecated`]
//! folds it into the override slot with a warning.

use serde::Deserialize;
use std::fmt;
use std::path::Path;
use tracing::warn;

use crate::error::{StrategyError, StrategyResult};

/// Configuration params for the mirror strategy.
#[derive(Clone, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct MirrorConfig {
    /// Backing venue identifier (e.g. "kraken", "binance").
    pub exchange: String,
    /// Backing-venue base asset string.
    pub exchange_base: String,
    /// Backing-venue quote asset string.
    pub exchange_quote: String,
    /// Depth of the backing book to fetch each cycle.
    pub orderbook_depth: u32,
    /// Divisor applied to every mirrored volume (>= 1).
    pub volume_divide_by: f64,
    /// Fractional spread applied to every level's price away from mid.
    pub per_level_spread: f64,
    /// Price precision override for the backing venue's constraints.
    #[serde(default)]
    pub price_precision_override: Option<u32>,
    /// Volume precision override for the backing venue's constraints.
    #[serde(default)]
    pub volume_precision_override: Option<u32>,
    /// Deprecated: use `MIN_BASE_VOLUME_OVERRIDE` instead.
    #[serde(default, rename = "MIN_BASE_VOLUME")]
    pub min_base_volume_deprecated: Option<f64>,
    /// Minimum base volume override for the backing venue's constraints.
    #[serde(default)]
    pub min_base_volume_override: Option<f64>,
    /// Minimum quote volume override for the backing venue's constraints.
    #[serde(default)]
    pub min_quote_volume_override: Option<f64>,
    /// Hedge primary-venue fills on the backing venue.
    #[serde(default)]
    pub offset_trades: bool,
    /// Backing venue credentials; opaque to the strategy.
    #[serde(default)]
    pub exchange_api_keys: Vec<toml::Table>,
    /// Backing venue parameters; opaque to the strategy.
    #[serde(default)]
    pub exchange_params: Vec<toml::Table>,
    /// Backing venue headers; opaque to the strategy.
    #[serde(default)]
    pub exchange_headers: Vec<toml::Table>,
}

impl MirrorConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> StrategyResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| StrategyError::Config(format!("failed to read config: {e}")))?;

        toml::from_str(&content)
            .map_err(|e| StrategyError::Config(format!("failed to parse config: {e}")))
    }

    /// Fold the deprecated `MIN_BASE_VOLUME` key into
    /// `MIN_BASE_VOLUME_OVERRIDE`; the override wins when both are set.
    pub fn resolve_deprecated(&mut self) {
        if self.min_base_volume_override.is_some() && self.min_base_volume_deprecated.is_some() {
            warn!(
                "deprecation warning: cannot set both 'MIN_BASE_VOLUME' (deprecated) and \
                 'MIN_BASE_VOLUME_OVERRIDE' in the mirror strategy config, using value from \
                 'MIN_BASE_VOLUME_OVERRIDE'"
            );
        } else if self.min_base_volume_deprecated.is_some() {
            warn!(
                "deprecation warning: 'MIN_BASE_VOLUME' is deprecated, use the field \
                 'MIN_BASE_VOLUME_OVERRIDE' in the mirror strategy config instead"
            );
        }
        if self.min_base_volume_override.is_none() {
            self.min_base_volume_override = self.min_base_volume_deprecated;
        }
    }

    /// Validate option values; fatal at strategy construction.
    pub fn validate(&self) -> StrategyResult<()> {
        if self.exchange_base.is_empty() || self.exchange_quote.is_empty() {
            return Err(StrategyError::Config(
                "need to specify EXCHANGE_BASE and EXCHANGE_QUOTE config params in mirror strategy config file".to_string(),
            ));
        }
        if self.orderbook_depth == 0 {
            return Err(StrategyError::Config(
                "need to specify positive ORDERBOOK_DEPTH config param in mirror strategy config file".to_string(),
            ));
        }
        if !self.volume_divide_by.is_finite() || self.volume_divide_by < 1.0 {
            return Err(StrategyError::Config(
                "need to specify VOLUME_DIVIDE_BY >= 1.0 config param in mirror strategy config file".to_string(),
            ));
        }
        if !self.per_level_spread.is_finite() || self.per_level_spread < 0.0 {
            return Err(StrategyError::Config(
                "need to specify non-negative PER_LEVEL_SPREAD config param in mirror strategy config file".to_string(),
            ));
        }
        if matches!(self.min_base_volume_override, Some(v) if v <= 0.0) {
            return Err(StrategyError::Config(
                "need to specify positive MIN_BASE_VOLUME_OVERRIDE config param in mirror strategy config file".to_string(),
            ));
        }
        if matches!(self.min_quote_volume_override, Some(v) if v <= 0.0) {
            return Err(StrategyError::Config(
                "need to specify positive MIN_QUOTE_VOLUME_OVERRIDE config param in mirror strategy config file".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for MirrorConfig {
    fn default() -> Self {
        Self {
            exchange: String::new(),
            exchange_base: String::new(),
            exchange_quote: String::new(),
            orderbook_depth: 20,
            volume_divide_by: 1.0,
            per_level_spread: 0.0,
            price_precision_override: None,
            volume_precision_override: None,
            min_base_volume_deprecated: None,
            min_base_volume_override: None,
            min_quote_volume_override: None,
            offset_trades: false,
            exchange_api_keys: Vec::new(),
            exchange_params: Vec::new(),
            exchange_headers: Vec::new(),
        }
    }
}

/// Credential bags are redacted; everything else prints as-is.
impl fmt::Debug for MirrorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MirrorConfig")
            .field("EXCHANGE", &self.exchange)
            .field("EXCHANGE_BASE", &self.exchange_base)
            .field("EXCHANGE_QUOTE", &self.exchange_quote)
            .field("ORDERBOOK_DEPTH", &self.orderbook_depth)
            .field("VOLUME_DIVIDE_BY", &self.volume_divide_by)
            .field("PER_LEVEL_SPREAD", &self.per_level_spread)
            .field("PRICE_PRECISION_OVERRIDE", &self.price_precision_override)
            .field("VOLUME_PRECISION_OVERRIDE", &self.volume_precision_override)
            .field("MIN_BASE_VOLUME", &self.min_base_volume_deprecated)
            .field("MIN_BASE_VOLUME_OVERRIDE", &self.min_base_volume_override)
            .field("MIN_QUOTE_VOLUME_OVERRIDE", &self.min_quote_volume_override)
            .field("OFFSET_TRADES", &self.offset_trades)
            .field("EXCHANGE_API_KEYS", &"<hidden>")
            .field("EXCHANGE_PARAMS", &"<hidden>")
            .field("EXCHANGE_HEADERS", &"<hidden>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> MirrorConfig {
        MirrorConfig {
            exchange: "kraken".to_string(),
            exchange_base: "XXLM".to_string(),
            exchange_quote: "ZUSD".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_parse_wire_names() {
        let config: MirrorConfig = toml::from_str(
            r#"
            EXCHANGE = "kraken"
            EXCHANGE_BASE = "XXLM"
            EXCHANGE_QUOTE = "ZUSD"
            ORDERBOOK_DEPTH = 20
            VOLUME_DIVIDE_BY = 2.0
            PER_LEVEL_SPREAD = 0.001
            MIN_BASE_VOLUME = 30.0
            OFFSET_TRADES = true

            [[EXCHANGE_API_KEYS]]
            KEY = "k"
            SECRET = "s"
            "#,
        )
        .unwrap();

        assert_eq!(config.exchange, "kraken");
        assert_eq!(config.orderbook_depth, 20);
        assert_eq!(config.min_base_volume_deprecated, Some(30.0));
        assert!(config.offset_trades);
        assert_eq!(config.exchange_api_keys.len(), 1);
    }

    #[test]
    fn test_deprecated_key_copied_into_override() {
        let mut config = valid_config();
        config.min_base_volume_deprecated = Some(30.0);

        config.resolve_deprecated();
        assert_eq!(config.min_base_volume_override, Some(30.0));
    }

    #[test]
    fn test_override_wins_over_deprecated_key() {
        let mut config = valid_config();
        config.min_base_volume_deprecated = Some(30.0);
        config.min_base_volume_override = Some(40.0);

        config.resolve_deprecated();
        assert_eq!(config.min_base_volume_override, Some(40.0));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = valid_config();
        config.volume_divide_by = 0.5;
        assert!(config.validate().is_err());

        let mut config = valid_config();
        config.per_level_spread = -0.01;
        assert!(config.validate().is_err());

        let mut config = valid_config();
        config.orderbook_depth = 0;
        assert!(config.validate().is_err());

        let mut config = valid_config();
        config.min_base_volume_override = Some(0.0);
        assert!(config.validate().is_err());

        let mut config = valid_config();
        config.min_quote_volume_override = Some(-1.0);
        assert!(config.validate().is_err());

        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn test_debug_redacts_credentials() {
        let mut config = valid_config();
        let mut keys = toml::Table::new();
        keys.insert("SECRET".to_string(), toml::Value::String("hunter2".to_string()));
        config.exchange_api_keys.push(keys);

        let debug = format!("{config:?}");
        assert!(debug.contains("<hidden>"));
        assert!(!debug.contains("hunter2"));
    }
}
