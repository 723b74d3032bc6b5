//! Trade execution: turns a confirmed request into at most one submitted
//! transaction and reconciles its receipt.
//!
//! ```text
//! request ──▶ preflight ──▶ estimate gas ──▶ submit ──▶ await receipt
//!                │               │              │             │
//!                ▼               ▼              ▼             ├─▶ Confirmed
//!          FailedBefore…   FailedBefore…   FailedBefore…      ├─▶ Reverted
//!                                                             └─▶ Pending (timeout)
//! ```
//!
//! Nothing is retried. A [`TradeRequest`] is consumed, so the same request
//! can never be submitted twice.

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use alloy_primitives::{TxHash, U256};
use tracing::{error, info, warn};

use super::config::ChainConfig;
use crate::domain::money::to_base_units;
use crate::domain::{TradeRequest, TradeResult};
use crate::error::{ExecutionError, ValidationError};
use crate::port::{ChainClient, ClaimCall};

/// Link to a transaction on the block explorer.
pub fn explorer_tx_url(explorer_url: &str, tx_hash: &TxHash) -> String {
    format!("{}/tx/{tx_hash}", explorer_url.trim_end_matches('/'))
}

/// Gas limit with `margin_pct` headroom, never below the estimate.
pub fn gas_limit_with_margin(estimate: u64, margin_pct: u64) -> u64 {
    let padded = u128::from(estimate) * u128::from(100 + margin_pct) / 100;
    u64::try_from(padded).unwrap_or(u64::MAX).max(estimate)
}

/// Tunables for execution, taken from `[chain]`.
#[derive(Debug, Clone)]
pub struct ExecutionSettings {
    pub gas_margin_pct: u64,
    pub receipt_timeout: Duration,
    pub asset_decimals: u32,
    pub explorer_url: String,
}

impl Default for ExecutionSettings {
    fn default() -> Self {
        Self::from(&ChainConfig::default())
    }
}

impl From<&ChainConfig> for ExecutionSettings {
    fn from(config: &ChainConfig) -> Self {
        Self {
            gas_margin_pct: config.gas_margin_pct,
            receipt_timeout: Duration::from_secs(config.receipt_timeout_secs),
            asset_decimals: config.asset_decimals,
            explorer_url: config.explorer_url.clone(),
        }
    }
}

pub struct TradeExecutor {
    chain: Option<Arc<dyn ChainClient>>,
    settings: ExecutionSettings,
}

impl TradeExecutor {
    /// `chain: None` means monitor-only; every request fails before
    /// submission.
    pub fn new(chain: Option<Arc<dyn ChainClient>>, settings: ExecutionSettings) -> Self {
        Self { chain, settings }
    }

    pub fn trading_enabled(&self) -> bool {
        self.chain.is_some()
    }

    pub fn settings(&self) -> &ExecutionSettings {
        &self.settings
    }

    fn claim_call(
        &self,
        chain: &dyn ChainClient,
        request: &TradeRequest,
    ) -> Result<ClaimCall, ValidationError> {
        let listing_id = request.opportunity().quote().listing_id();
        let deposit_id = U256::from_str(listing_id.as_str())
            .map_err(|_| ValidationError::InvalidDepositId(listing_id.to_string()))?;

        let units = to_base_units(request.amount(), self.settings.asset_decimals)
            .filter(|units| *units > 0)
            .ok_or(ValidationError::NonPositiveAmount {
                amount: request.amount(),
            })?;

        Ok(ClaimCall {
            deposit_id,
            amount: U256::from(units),
            recipient: request.recipient().unwrap_or_else(|| chain.operator_address()),
        })
    }

    /// Run one request to a result. Never returns an error; every failure
    /// is a [`TradeResult`].
    pub async fn execute(&self, request: TradeRequest) -> TradeResult {
        let Some(chain) = self.chain.as_deref() else {
            let reason = ExecutionError::Preflight("trading disabled".into()).to_string();
            warn!(%reason, "Trade rejected");
            return TradeResult::failed(reason);
        };

        let call = match self.claim_call(chain, &request) {
            Ok(call) => call,
            Err(e) => {
                let reason = ExecutionError::Preflight(e.to_string()).to_string();
                warn!(%reason, "Trade rejected");
                return TradeResult::failed(reason);
            }
        };

        info!(
            deposit_id = %call.deposit_id,
            direction = %request.opportunity().direction(),
            amount = %request.amount(),
            units = %call.amount,
            decimals = self.settings.asset_decimals,
            recipient = %call.recipient,
            "Executing trade"
        );

        let estimate = match chain.estimate_gas(&call).await {
            Ok(gas) => gas,
            Err(e) => {
                warn!(error = %e, "Gas estimation failed; transaction would likely revert");
                return TradeResult::failed(e.to_string());
            }
        };
        let gas_limit = gas_limit_with_margin(estimate, self.settings.gas_margin_pct);

        let tx_hash = match chain.submit(&call, gas_limit).await {
            Ok(hash) => hash,
            Err(e) => {
                error!(error = %e, "Submission failed");
                return TradeResult::failed(e.to_string());
            }
        };

        let link = explorer_tx_url(&self.settings.explorer_url, &tx_hash);
        info!(tx_hash = %tx_hash, gas_limit, explorer = %link, "Transaction sent");

        // From here on the transaction is out; no path may submit again.
        match chain.await_receipt(tx_hash, self.settings.receipt_timeout).await {
            Ok(Some(receipt)) if receipt.success => {
                info!(
                    tx_hash = %receipt.tx_hash,
                    block = ?receipt.block_number,
                    gas_used = receipt.gas_used,
                    intent_hash = ?receipt.intent_hash,
                    "Transaction confirmed"
                );
                TradeResult::Confirmed {
                    tx_hash: receipt.tx_hash,
                    block_number: receipt.block_number,
                    gas_used: receipt.gas_used,
                    intent_hash: receipt.intent_hash,
                }
            }
            Ok(Some(receipt)) => {
                error!(tx_hash = %receipt.tx_hash, block = ?receipt.block_number, "Transaction reverted");
                TradeResult::Reverted {
                    tx_hash: receipt.tx_hash,
                    block_number: receipt.block_number,
                }
            }
            Ok(None) => {
                warn!(
                    tx_hash = %tx_hash,
                    timeout_secs = self.settings.receipt_timeout.as_secs(),
                    explorer = %link,
                    "No receipt before timeout; transaction may still confirm"
                );
                TradeResult::Pending { tx_hash }
            }
            Err(e) => {
                warn!(tx_hash = %tx_hash, error = %e, explorer = %link, "Receipt lookup failed");
                TradeResult::Pending { tx_hash }
            }
        }
    }
}
