//! Configuration and connection validation commands.

use std::path::Path;

use crate::adapter::chain::{check_rpc, OrchestratorClient};
use crate::adapter::peerlytics::PeerlyticsClient;
use crate::cli::{load_config, output};
use crate::error::{Error, Result};
use crate::port::{ChainClient, MarketDataSource};

/// Validate configuration without starting the monitor.
pub fn execute_config(config_path: Option<&Path>) -> Result<()> {
    match config_path {
        Some(path) => output::note(&format!("Checking configuration: {}", path.display())),
        None => output::note("Checking configuration (default location)"),
    }

    let config = load_config(config_path)?;
    output::success("Configuration is valid");

    output::section("Summary");
    output::field("Mode", config.scan.mode);
    output::field("API", &config.market.base_url);
    output::field("RPC", &config.chain.rpc_url);
    output::field("Chain ID", config.chain.chain_id);
    output::field("Buy ≤", config.scan.thresholds.buy);
    output::field("Sell ≥", config.scan.thresholds.sell);
    output::field("Min amount", config.scan.filter.min_amount);
    println!();

    if config.market.has_api_key() {
        output::success("API key found (from PEERLYTICS_API_KEY env var)");
    } else {
        output::warning("No API key configured; requests may be rate limited");
    }

    if config.wallet.trading_requested() {
        output::success("Wallet private key found (from WALLET_PRIVATE_KEY env var)");
    } else {
        output::warning("No wallet private key configured; monitor-only mode");
    }

    if config.scan.thresholds.overlap() {
        output::warning("Buy and sell thresholds overlap");
    }

    Ok(())
}

/// Test market API and RPC connectivity.
pub async fn execute_connection(config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path)?;
    let mut failures = Vec::new();

    output::section("Connection");
    output::field("API", &config.market.base_url);
    output::field("RPC", &config.chain.rpc_url);
    println!();

    output::progress("Market API");
    let source = PeerlyticsClient::new(&config.market)?;
    match source.list_active_listings(0, 1).await {
        Ok(page) => {
            output::progress_done(true);
            if page.metadata.credits_remaining.is_some() {
                output::field("Credits", page.metadata.credit_status());
            }
        }
        Err(e) => {
            output::progress_done(false);
            output::error(&e.to_string());
            failures.push("market API");
        }
    }

    output::progress("RPC");
    match check_rpc(&config.chain.rpc_url).await {
        Ok(chain_id) => {
            output::progress_done(true);
            output::field("Chain ID", chain_id);
            if chain_id != config.chain.chain_id {
                output::warning(&format!(
                    "Expected chain {}, endpoint reports {chain_id}",
                    config.chain.chain_id
                ));
            }
        }
        Err(e) => {
            output::progress_done(false);
            output::error(&e.to_string());
            failures.push("rpc");
        }
    }

    if config.wallet.trading_requested() {
        output::progress("Wallet");
        match OrchestratorClient::new(&config.chain, &config.wallet) {
            Ok(client) => match client.native_balance().await {
                Ok(balance) => {
                    output::progress_done(true);
                    output::field("Address", client.operator_address());
                    output::field("Balance", format!("{:.4} ETH", balance));
                }
                Err(e) => {
                    output::progress_done(false);
                    output::error(&e.to_string());
                    failures.push("wallet");
                }
            },
            Err(e) => {
                output::progress_done(false);
                output::error(&e.to_string());
                failures.push("wallet");
            }
        }
    }

    println!();
    if failures.is_empty() {
        output::success("All connection tests passed");
        Ok(())
    } else {
        Err(Error::Connection(format!(
            "connection check failed: {}",
            failures.join(", ")
        )))
    }
}
