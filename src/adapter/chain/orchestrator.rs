//! Orchestrator contract client on Base.
//!
//! Signs and submits `signalIntent` with a local private key. A fresh HTTP
//! provider is built per operation; nothing here keeps connection state.

use std::str::FromStr;
use std::time::Duration;

use alloy_primitives::{Address, TxHash, B256, U256};
use alloy_provider::{Provider, ProviderBuilder};
use alloy_signer_local::PrivateKeySigner;
use alloy_sol_types::sol;
use async_trait::async_trait;
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::app::{ChainConfig, WalletConfig};
use crate::domain::money::from_base_units;
use crate::error::{ConfigError, Error, ExecutionError, Result};
use crate::port::{ChainClient, ChainReceipt, ClaimCall};

const NATIVE_DECIMALS: u32 = 18;

sol! {
    #[sol(rpc)]
    contract Orchestrator {
        function signalIntent(uint256 depositId, uint256 amount, address to) external returns (bytes32 intentHash);
    }
}

/// Signing client for the orchestrator contract.
pub struct OrchestratorClient {
    signer: PrivateKeySigner,
    orchestrator: Address,
    rpc_url: url::Url,
    poll_interval: Duration,
}

impl OrchestratorClient {
    /// Build a client from config. Requires `WALLET_PRIVATE_KEY`.
    pub fn new(chain: &ChainConfig, wallet: &WalletConfig) -> Result<Self> {
        let private_key = wallet.normalized_key().ok_or(ConfigError::MissingField {
            field: "WALLET_PRIVATE_KEY",
        })?;

        let signer =
            PrivateKeySigner::from_str(&private_key).map_err(|e| ConfigError::InvalidValue {
                field: "WALLET_PRIVATE_KEY",
                reason: e.to_string(),
            })?;

        let orchestrator =
            Address::from_str(&chain.orchestrator).map_err(|e| ConfigError::InvalidValue {
                field: "orchestrator",
                reason: e.to_string(),
            })?;

        Ok(Self {
            signer,
            orchestrator,
            rpc_url: parse_rpc_url(&chain.rpc_url)?,
            poll_interval: Duration::from_millis(chain.receipt_poll_ms.max(100)),
        })
    }

    fn read_provider(&self) -> impl Provider {
        ProviderBuilder::new().connect_http(self.rpc_url.clone())
    }

    fn signing_provider(&self) -> impl Provider {
        let wallet = alloy_provider::network::EthereumWallet::from(self.signer.clone());
        ProviderBuilder::new()
            .wallet(wallet)
            .connect_http(self.rpc_url.clone())
    }

    /// Check the RPC endpoint answers and return its chain id.
    pub async fn connect(&self) -> Result<u64> {
        fetch_chain_id(&self.rpc_url).await
    }

    fn orchestrator_address(&self) -> Address {
        self.orchestrator
    }
}

fn parse_rpc_url(raw: &str) -> Result<url::Url> {
    raw.parse().map_err(|e: url::ParseError| {
        ConfigError::InvalidValue {
            field: "rpc_url",
            reason: e.to_string(),
        }
        .into()
    })
}

async fn fetch_chain_id(rpc_url: &url::Url) -> Result<u64> {
    let provider = ProviderBuilder::new().connect_http(rpc_url.clone());
    provider
        .get_chain_id()
        .await
        .map_err(|e| Error::Connection(format!("RPC {rpc_url} unreachable: {e}")))
}

/// Check an RPC endpoint without a wallet. Returns the chain id.
pub async fn check_rpc(rpc_url: &str) -> Result<u64> {
    fetch_chain_id(&parse_rpc_url(rpc_url)?).await
}

/// Pick the intent hash out of a receipt's logs: the first indexed topic of
/// the first log the orchestrator emitted.
pub fn intent_hash_from_logs<'a, I>(orchestrator: Address, logs: I) -> Option<B256>
where
    I: IntoIterator<Item = (Address, &'a [B256])>,
{
    logs.into_iter()
        .filter(|(emitter, _)| *emitter == orchestrator)
        .find_map(|(_, topics)| topics.get(1).copied())
}

#[async_trait]
impl ChainClient for OrchestratorClient {
    fn operator_address(&self) -> Address {
        self.signer.address()
    }

    async fn estimate_gas(&self, call: &ClaimCall) -> Result<u64> {
        let provider = self.read_provider();
        let contract = Orchestrator::new(self.orchestrator_address(), &provider);

        let gas = contract
            .signalIntent(call.deposit_id, call.amount, call.recipient)
            .from(self.operator_address())
            .estimate_gas()
            .await
            .map_err(|e| ExecutionError::GasEstimation(e.to_string()))?;

        debug!(gas, deposit_id = %call.deposit_id, "Gas estimated");
        Ok(gas)
    }

    async fn submit(&self, call: &ClaimCall, gas_limit: u64) -> Result<TxHash> {
        let provider = self.signing_provider();
        let contract = Orchestrator::new(self.orchestrator_address(), &provider);

        info!(
            deposit_id = %call.deposit_id,
            amount = %call.amount,
            recipient = %call.recipient,
            gas_limit,
            "Submitting signalIntent"
        );

        let pending = contract
            .signalIntent(call.deposit_id, call.amount, call.recipient)
            .from(self.operator_address())
            .gas(gas_limit)
            .send()
            .await
            .map_err(|e| ExecutionError::Submission(e.to_string()))?;

        Ok(*pending.tx_hash())
    }

    async fn await_receipt(
        &self,
        tx_hash: TxHash,
        timeout: Duration,
    ) -> Result<Option<ChainReceipt>> {
        let provider = self.read_provider();
        let orchestrator = self.orchestrator_address();

        let wait = async {
            loop {
                match provider.get_transaction_receipt(tx_hash).await {
                    Ok(Some(receipt)) => return receipt,
                    Ok(None) => {}
                    Err(e) => warn!(tx_hash = %tx_hash, error = %e, "Receipt poll failed"),
                }
                tokio::time::sleep(self.poll_interval).await;
            }
        };

        let Ok(receipt) = tokio::time::timeout(timeout, wait).await else {
            return Ok(None);
        };

        let intent_hash = intent_hash_from_logs(
            orchestrator,
            receipt
                .inner
                .logs()
                .iter()
                .map(|log| (log.address(), log.topics())),
        );

        Ok(Some(ChainReceipt {
            tx_hash: receipt.transaction_hash,
            success: receipt.inner.status(),
            block_number: receipt.block_number,
            gas_used: receipt.gas_used,
            intent_hash,
        }))
    }

    async fn native_balance(&self) -> Result<Decimal> {
        let provider = self.read_provider();
        let wei: U256 = provider
            .get_balance(self.operator_address())
            .await
            .map_err(|e| Error::Connection(format!("balance query failed: {e}")))?;

        let wei = u128::try_from(wei).unwrap_or(u128::MAX);
        Ok(from_base_units(wei, NATIVE_DECIMALS).unwrap_or(Decimal::MAX))
    }
}
