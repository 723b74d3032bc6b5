use std::sync::Arc;
use std::time::Duration;

use rust_decimal_macros::dec;

use rampscout::app::{ExecutionSettings, ScanCycle, TradeExecutor};
use rampscout::domain::{Detector, ListingFilter, Thresholds};
use rampscout::port::ChainClient;
use rampscout::testkit::chain::ScriptedChain;
use rampscout::testkit::console::ScriptedConsole;
use rampscout::testkit::market::ScriptedMarket;

/// Default thresholds: buy at or below 0.97, sell at or above 1.015.
pub fn detector() -> Detector {
    Detector::new(ListingFilter::accept_all(dec!(100)), Thresholds::new(dec!(0.97), dec!(1.015)))
}

pub fn settings() -> ExecutionSettings {
    ExecutionSettings {
        gas_margin_pct: 20,
        receipt_timeout: Duration::from_secs(1),
        asset_decimals: 6,
        explorer_url: "https://basescan.org".to_string(),
    }
}

pub fn executor(chain: Option<Arc<ScriptedChain>>) -> TradeExecutor {
    TradeExecutor::new(chain.map(|c| c as Arc<dyn ChainClient>), settings())
}

/// A cycle over scripted ports, paging 3 at a time up to 5 pages, without
/// the rate summary.
pub fn cycle(
    market: &Arc<ScriptedMarket>,
    console: &Arc<ScriptedConsole>,
    chain: Option<Arc<ScriptedChain>>,
) -> ScanCycle {
    ScanCycle::new(
        market.clone(),
        console.clone(),
        executor(chain),
        detector(),
    )
    .with_paging(3, 5)
    .with_summary(false)
}
