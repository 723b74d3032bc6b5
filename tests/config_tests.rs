use std::io::Write;

use rust_decimal_macros::dec;
use tempfile::NamedTempFile;

use rampscout::app::{Config, LogFormat, RunMode};
use rampscout::error::{ConfigError, Error};

fn write_temp_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp config");
    file.write_all(contents.as_bytes()).expect("write temp config");
    file
}

#[test]
fn config_loads_full_file() {
    let file = write_temp_config(
        r#"
[market]
base_url = "https://api.example.test/v1"
page_size = 50
max_pages = 4

[scan]
mode = "stream"
interval_secs = 30
buy_threshold = 0.96
sell_threshold = 1.02
min_amount = 250
payment_methods = ["zelle", "wise"]
currencies = ["USD"]
show_summary = false

[stream]
interval_ms = 2500
event_types = ["intent_signaled"]

[chain]
rpc_url = "https://sepolia.base.org"
chain_id = 84532
gas_margin_pct = 30

[wallet]
recipient = "0x1111111111111111111111111111111111111111"

[logging]
level = "debug"
format = "json"
"#,
    );

    let config = Config::load(file.path()).expect("valid config");

    assert_eq!(config.market.base_url, "https://api.example.test/v1");
    assert_eq!(config.market.page_size, 50);
    assert_eq!(config.market.max_pages, 4);
    assert_eq!(config.scan.mode, RunMode::Stream);
    assert_eq!(config.scan.interval_secs, 30);
    assert_eq!(config.scan.thresholds.buy, dec!(0.96));
    assert_eq!(config.scan.thresholds.sell, dec!(1.02));
    assert_eq!(config.scan.filter.min_amount, dec!(250));
    assert_eq!(config.scan.filter.payment_methods, vec!["zelle", "wise"]);
    assert!(!config.scan.show_summary);
    assert_eq!(config.stream.interval_ms, 2500);
    assert_eq!(config.chain.chain_id, 84532);
    assert_eq!(config.chain.gas_margin_pct, 30);
    assert_eq!(config.logging.format, LogFormat::Json);
}

#[test]
fn empty_file_uses_defaults() {
    let file = write_temp_config("");

    let config = Config::load(file.path()).expect("defaults are valid");

    assert_eq!(config.scan.mode, RunMode::Poll);
    assert_eq!(config.scan.thresholds.buy, dec!(0.97));
    assert_eq!(config.scan.thresholds.sell, dec!(1.015));
    assert_eq!(config.scan.filter.min_amount, dec!(100));
    assert_eq!(config.chain.chain_id, 8453);
    assert_eq!(config.chain.asset_decimals, 6);
}

#[test]
fn config_rejects_non_positive_buy_threshold() {
    let file = write_temp_config("[scan]\nbuy_threshold = 0\n");

    match Config::load(file.path()) {
        Err(Error::Config(ConfigError::InvalidValue {
            field: "buy_threshold",
            ..
        })) => {}
        Err(err) => panic!("Expected invalid buy_threshold, got {err}"),
        Ok(_) => panic!("Expected zero buy_threshold to be rejected"),
    }
}

#[test]
fn config_rejects_bad_recipient() {
    let file = write_temp_config("[wallet]\nrecipient = \"not-an-address\"\n");

    assert!(matches!(
        Config::load(file.path()),
        Err(Error::Config(ConfigError::InvalidValue {
            field: "recipient",
            ..
        }))
    ));
}

#[test]
fn config_rejects_unknown_mode() {
    let file = write_temp_config("[scan]\nmode = \"sometimes\"\n");

    assert!(matches!(
        Config::load(file.path()),
        Err(Error::Config(ConfigError::Parse(_)))
    ));
}

#[test]
fn missing_file_is_read_error() {
    let dir = tempfile::tempdir().expect("temp dir");

    assert!(matches!(
        Config::load(dir.path().join("absent.toml")),
        Err(Error::Config(ConfigError::ReadFile(_)))
    ));
}

#[test]
fn private_key_in_file_is_ignored() {
    // Secrets only come from the environment.
    let file = write_temp_config("[wallet]\nprivate_key = \"0xabc\"\n");

    let config = Config::load(file.path()).expect("valid config");

    assert!(config
        .wallet
        .private_key
        .as_deref()
        .map_or(true, |key| key != "0xabc"));
}
