//! Application layer: configuration, the scan cycle, streaming, execution
//! and the run-mode driver.

mod config;
mod executor;
mod runner;
mod scan;
mod shutdown;
mod stream;

pub use config::{
    ChainConfig, Config, LogFormat, LoggingConfig, MarketConfig, RunMode, ScanConfig, StreamConfig,
    WalletConfig,
};
pub use executor::{explorer_tx_url, gas_limit_with_margin, ExecutionSettings, TradeExecutor};
pub use runner::Runner;
pub use scan::{CycleOutcome, FetchedListings, ScanCycle, ScanPhase};
pub use shutdown::{listen_for_ctrl_c, Shutdown, ShutdownTrigger};
pub use stream::{StreamEnd, StreamIngestor, StreamStats};
