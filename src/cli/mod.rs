//! The `rampscout` command line: `run` and the `check` diagnostics.

pub mod banner;
pub mod check;
pub mod output;
pub mod run;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;

use crate::app::{Config, LogFormat, RunMode};
use crate::error::Result;

/// Config file used when `--config` is not given, if it exists.
pub const DEFAULT_CONFIG: &str = "config.toml";

/// Rampscout - on-ramp arbitrage monitor with operator-confirmed claims.
#[derive(Parser, Debug)]
#[command(name = "rampscout")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the monitor (foreground, interactive)
    Run(RunArgs),

    /// Diagnose configuration and connectivity without scanning
    #[command(subcommand)]
    Check(CheckCommand),
}

/// Subcommands for `rampscout check`
#[derive(Subcommand, Debug)]
pub enum CheckCommand {
    /// Load and validate the configuration
    Config(ConfigPathArg),
    /// Test market API and RPC connectivity
    Connection(ConfigPathArg),
}

/// `--config` for commands that take nothing else.
#[derive(Parser, Debug)]
pub struct ConfigPathArg {
    /// Path to configuration file (defaults to ./config.toml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Arguments for the `run` subcommand.
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Path to configuration file (defaults to ./config.toml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override run mode
    #[arg(long, value_enum)]
    pub mode: Option<RunMode>,

    /// Override buy threshold (flag rates at or below this)
    #[arg(long)]
    pub buy_threshold: Option<Decimal>,

    /// Override sell threshold (flag rates at or above this)
    #[arg(long)]
    pub sell_threshold: Option<Decimal>,

    /// Override minimum available amount in USD
    #[arg(long)]
    pub min_amount: Option<Decimal>,

    /// Override polling interval in seconds
    #[arg(long)]
    pub interval: Option<u64>,

    /// Log filter directive, e.g. `debug` or `rampscout=trace`
    #[arg(long)]
    pub log_level: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,

    /// Do not print the startup banner
    #[arg(long)]
    pub no_banner: bool,
}

impl RunArgs {
    /// Apply command-line overrides on top of the loaded config.
    pub fn apply(&self, config: &mut Config) {
        if let Some(mode) = self.mode {
            config.scan.mode = mode;
        }
        if let Some(buy) = self.buy_threshold {
            config.scan.thresholds.buy = buy;
        }
        if let Some(sell) = self.sell_threshold {
            config.scan.thresholds.sell = sell;
        }
        if let Some(min_amount) = self.min_amount {
            config.scan.filter.min_amount = min_amount;
        }
        if let Some(interval) = self.interval {
            config.scan.interval_secs = interval;
        }
        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }
        if self.json_logs {
            config.logging.format = LogFormat::Json;
        }
    }
}

/// Load the given config, or `config.toml` when present, or defaults.
#[allow(clippy::result_large_err)]
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load(path),
        None if Path::new(DEFAULT_CONFIG).exists() => Config::load(DEFAULT_CONFIG),
        None => Config::from_env(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn parses_run_overrides() {
        let cli = Cli::parse_from([
            "rampscout",
            "run",
            "--mode",
            "once",
            "--buy-threshold",
            "0.95",
            "--min-amount",
            "250",
            "--json-logs",
        ]);
        let Commands::Run(args) = cli.command else {
            panic!("expected run");
        };

        let mut config = Config::default();
        args.apply(&mut config);
        assert_eq!(config.scan.mode, RunMode::Once);
        assert_eq!(config.scan.thresholds.buy, dec!(0.95));
        assert_eq!(config.scan.thresholds.sell, dec!(1.015));
        assert_eq!(config.scan.filter.min_amount, dec!(250));
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn parses_check_subcommands() {
        let cli = Cli::parse_from(["rampscout", "check", "connection", "-c", "alt.toml"]);
        match cli.command {
            Commands::Check(CheckCommand::Connection(arg)) => {
                assert_eq!(arg.config, Some(PathBuf::from("alt.toml")));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_mode() {
        assert!(Cli::try_parse_from(["rampscout", "run", "--mode", "turbo"]).is_err());
    }
}
