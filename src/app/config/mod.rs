//! Application configuration loading and validation.
//!
//! Configuration is loaded from a TOML file with environment variable overrides
//! for sensitive values like `WALLET_PRIVATE_KEY` and `PEERLYTICS_API_KEY`.

use std::path::Path;
use std::str::FromStr;

use alloy_primitives::Address;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::{ConfigError, Result};

mod chain;
mod logging;
mod market;
mod scan;

pub use chain::{ChainConfig, WalletConfig};
pub use logging::{LogFormat, LoggingConfig};
pub use market::{MarketConfig, StreamConfig};
pub use scan::{RunMode, ScanConfig};

/// Main application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub market: MarketConfig,
    #[serde(default)]
    pub scan: ScanConfig,
    #[serde(default)]
    pub stream: StreamConfig,
    #[serde(default)]
    pub chain: ChainConfig,
    #[serde(default)]
    pub wallet: WalletConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Upper bound for either rate threshold.
const MAX_THRESHOLD: Decimal = Decimal::from_parts(1000, 0, 0, false, 0);

impl Config {
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;

        let mut config = Self::parse(&content)?;
        config.apply_env();
        config.validate()?;

        Ok(config)
    }

    /// Defaults plus environment secrets, for running without a config file.
    #[allow(clippy::result_large_err)]
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    /// Secrets come from the environment only (never from the config file).
    fn apply_env(&mut self) {
        self.wallet.private_key = non_empty_env("WALLET_PRIVATE_KEY");
        self.market.api_key = non_empty_env("PEERLYTICS_API_KEY");
    }

    /// Parse TOML without touching the environment or validating.
    #[allow(clippy::result_large_err)]
    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content).map_err(ConfigError::Parse)?)
    }

    #[allow(clippy::result_large_err)]
    pub fn validate(&self) -> Result<()> {
        if self.market.base_url.is_empty() {
            return Err(ConfigError::MissingField { field: "base_url" }.into());
        }
        if self.market.page_size == 0 {
            return Err(invalid("page_size", "must be at least 1"));
        }
        if self.market.max_pages == 0 {
            return Err(invalid("max_pages", "must be at least 1"));
        }

        let thresholds = &self.scan.thresholds;
        if thresholds.buy <= Decimal::ZERO || thresholds.buy > MAX_THRESHOLD {
            return Err(invalid("buy_threshold", "must be in (0, 1000]"));
        }
        if thresholds.sell <= Decimal::ZERO || thresholds.sell > MAX_THRESHOLD {
            return Err(invalid("sell_threshold", "must be in (0, 1000]"));
        }
        if self.scan.filter.min_amount < Decimal::ZERO {
            return Err(invalid("min_amount", "cannot be negative"));
        }
        if self.scan.interval_secs == 0 {
            return Err(invalid("interval_secs", "must be at least 1"));
        }

        if self.chain.rpc_url.is_empty() {
            return Err(ConfigError::MissingField { field: "rpc_url" }.into());
        }
        Address::from_str(&self.chain.orchestrator)
            .map_err(|e| invalid("orchestrator", &e.to_string()))?;
        if let Some(recipient) = &self.wallet.recipient {
            Address::from_str(recipient).map_err(|e| invalid("recipient", &e.to_string()))?;
        }
        if self.chain.asset_decimals > 18 {
            return Err(invalid("asset_decimals", "must be at most 18"));
        }
        if self.chain.gas_margin_pct > 100 {
            return Err(invalid("gas_margin_pct", "must be at most 100"));
        }
        if self.chain.receipt_timeout_secs == 0 {
            return Err(invalid("receipt_timeout_secs", "must be at least 1"));
        }

        Ok(())
    }

    /// Initialize logging with the configured settings.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn invalid(field: &'static str, reason: &str) -> crate::error::Error {
    ConfigError::InvalidValue {
        field,
        reason: reason.to_string(),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn empty_file_uses_defaults() {
        let config = Config::parse("").unwrap();

        assert_eq!(config.scan.mode, RunMode::Poll);
        assert_eq!(config.scan.thresholds.buy, dec!(0.97));
        assert_eq!(config.scan.thresholds.sell, dec!(1.015));
        assert_eq!(config.scan.filter.min_amount, dec!(100));
        assert_eq!(config.scan.interval_secs, 60);
        assert_eq!(config.market.page_size, 100);
        assert_eq!(config.stream.interval_ms, 5000);
        assert_eq!(config.chain.chain_id, 8453);
        assert_eq!(config.chain.receipt_timeout_secs, 120);
        assert_eq!(config.chain.gas_margin_pct, 20);
        assert_eq!(config.chain.asset_decimals, 6);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn scan_section_overrides_thresholds_and_filters() {
        let config = Config::parse(
            r#"
[scan]
mode = "stream"
buy_threshold = 0.95
sell_threshold = 1.03
min_amount = 250
payment_methods = ["wise"]
currencies = []
"#,
        )
        .unwrap();

        assert_eq!(config.scan.mode, RunMode::Stream);
        assert_eq!(config.scan.thresholds.buy, dec!(0.95));
        assert_eq!(config.scan.thresholds.sell, dec!(1.03));
        assert_eq!(config.scan.filter.min_amount, dec!(250));
        assert_eq!(config.scan.filter.payment_methods, vec!["wise".to_string()]);
        assert!(config.scan.filter.currencies.is_empty());
    }

    #[test]
    fn rejects_non_positive_threshold() {
        let config = Config::parse("[scan]\nbuy_threshold = 0\n").unwrap();
        assert!(matches!(
            config.validate(),
            Err(crate::error::Error::Config(ConfigError::InvalidValue {
                field: "buy_threshold",
                ..
            }))
        ));
    }

    #[test]
    fn rejects_oversized_threshold() {
        let config = Config::parse("[scan]\nsell_threshold = 1e20\n").unwrap();
        assert!(matches!(
            config.validate(),
            Err(crate::error::Error::Config(ConfigError::InvalidValue {
                field: "sell_threshold",
                ..
            }))
        ));

        let config = Config::parse("[scan]\nsell_threshold = 1000\n").unwrap();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_bad_orchestrator_address() {
        let config = Config::parse("[chain]\norchestrator = \"not-an-address\"\n").unwrap();
        assert!(matches!(
            config.validate(),
            Err(crate::error::Error::Config(ConfigError::InvalidValue {
                field: "orchestrator",
                ..
            }))
        ));
    }

    #[test]
    fn rejects_empty_rpc_url() {
        let config = Config::parse("[chain]\nrpc_url = \"\"\n").unwrap();
        assert!(matches!(
            config.validate(),
            Err(crate::error::Error::Config(ConfigError::MissingField { field: "rpc_url" }))
        ));
    }

    #[test]
    fn malformed_toml_is_parse_error() {
        assert!(matches!(
            Config::parse("[scan\n"),
            Err(crate::error::Error::Config(ConfigError::Parse(_)))
        ));
    }
}
