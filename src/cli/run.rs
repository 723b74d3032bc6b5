//! Handler for the `run` command.

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use alloy_primitives::Address;
use tracing::{info, warn};

use crate::adapter::chain::OrchestratorClient;
use crate::adapter::console::TerminalConsole;
use crate::adapter::peerlytics::PeerlyticsClient;
use crate::app::{
    listen_for_ctrl_c, Config, ExecutionSettings, Runner, ScanCycle, Shutdown, StreamIngestor,
    TradeExecutor,
};
use crate::cli::{banner, load_config, output, RunArgs};
use crate::domain::Detector;
use crate::error::{ConfigError, Result};
use crate::port::{ChainClient, FeedFilter, MarketDataSource};

/// Execute the run command.
pub async fn execute(args: &RunArgs) -> Result<()> {
    let mut config = load_config(args.config.as_deref())?;
    args.apply(&mut config);
    config.validate()?;

    config.init_logging();

    if !args.no_banner {
        banner::print_banner();
    }

    info!(
        mode = %config.scan.mode,
        buy_threshold = %config.scan.thresholds.buy,
        sell_threshold = %config.scan.thresholds.sell,
        min_amount = %config.scan.filter.min_amount,
        "rampscout starting"
    );

    let source: Arc<dyn MarketDataSource> = Arc::new(PeerlyticsClient::new(&config.market)?);
    let chain = connect_chain(&config).await?;

    print_startup(&config, chain.as_deref()).await;

    let recipient = config
        .wallet
        .recipient
        .as_deref()
        .map(Address::from_str)
        .transpose()
        .map_err(|e| ConfigError::InvalidValue {
            field: "recipient",
            reason: e.to_string(),
        })?;

    let executor = TradeExecutor::new(
        chain.map(|c| c as Arc<dyn ChainClient>),
        ExecutionSettings::from(&config.chain),
    );
    let console = Arc::new(
        TerminalConsole::new(config.scan.thresholds, config.chain.explorer_url.clone())
            .with_summary(config.scan.show_summary),
    );
    let detector = Detector::new(config.scan.filter.clone(), config.scan.thresholds);

    let cycle = ScanCycle::new(Arc::clone(&source), console, executor, detector)
        .with_paging(config.market.page_size, config.market.max_pages)
        .with_summary(config.scan.show_summary)
        .with_recipient(recipient);
    let ingestor = StreamIngestor::new(
        source,
        FeedFilter {
            event_types: config.stream.event_types.clone(),
            interval_ms: config.stream.interval_ms,
        },
    );
    let runner = Runner::new(
        cycle,
        ingestor,
        config.scan.mode,
        Duration::from_secs(config.scan.interval_secs),
    );

    let (trigger, shutdown) = Shutdown::channel();
    listen_for_ctrl_c(trigger);

    runner.run(shutdown).await;

    info!("rampscout stopped");
    Ok(())
}

/// Build the chain client when a key is configured.
///
/// A key that does not parse downgrades to monitor-only. A valid key with
/// an unreachable RPC endpoint is fatal.
async fn connect_chain(config: &Config) -> Result<Option<Arc<OrchestratorClient>>> {
    if !config.wallet.trading_requested() {
        info!("No wallet key configured; monitor-only mode");
        return Ok(None);
    }

    let client = match OrchestratorClient::new(&config.chain, &config.wallet) {
        Ok(client) => client,
        Err(e) => {
            warn!(error = %e, "Could not initialise trading; continuing in monitor-only mode");
            output::warning(&format!("Could not initialise trading: {e}"));
            return Ok(None);
        }
    };

    let chain_id = client.connect().await?;
    if chain_id != config.chain.chain_id {
        warn!(
            expected = config.chain.chain_id,
            actual = chain_id,
            "RPC endpoint reports a different chain id"
        );
    }

    info!(address = %client.operator_address(), chain_id, "Trading enabled");
    Ok(Some(Arc::new(client)))
}

async fn print_startup(config: &Config, chain: Option<&OrchestratorClient>) {
    output::section("Startup");

    if config.market.has_api_key() {
        output::success("API key configured");
    } else {
        output::warning("API key missing (set PEERLYTICS_API_KEY)");
    }

    match chain {
        Some(client) => {
            output::success("RPC connected, trading enabled");
            output::field("Wallet", client.operator_address());
            match client.native_balance().await {
                Ok(balance) => output::field("Balance", format!("{:.4} ETH", balance)),
                Err(e) => output::field("Balance", format!("unknown ({e})")),
            }
        }
        None => output::warning("Trading disabled (set WALLET_PRIVATE_KEY to enable)"),
    }

    let filter = &config.scan.filter;
    let thresholds = &config.scan.thresholds;
    let list = |items: &[String]| {
        if items.is_empty() {
            "any".to_string()
        } else {
            items.join(", ")
        }
    };

    output::section("Filters");
    output::field("Platforms", list(&filter.payment_methods));
    output::field("Currencies", list(&filter.currencies));
    output::field("Min amount", crate::adapter::console::usd(filter.min_amount));

    output::section("Targets");
    output::field(
        "Buy",
        format!(
            "≤ ${:.4} ({:.2}% discount)",
            thresholds.buy,
            thresholds.buy_discount_pct()
        ),
    );
    output::field(
        "Sell",
        format!(
            "≥ ${:.4} ({:.2}% premium)",
            thresholds.sell,
            thresholds.sell_premium_pct()
        ),
    );
    if thresholds.overlap() {
        output::warning("Thresholds overlap; some quotes will be listed as both buy and sell");
    }
    output::field("Mode", config.scan.mode);
    println!();
}
