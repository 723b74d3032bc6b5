//! Chain port: everything the trade executor needs from an RPC endpoint
//! and a signer.

use std::time::Duration;

use alloy_primitives::{Address, TxHash, B256, U256};
use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::error::Result;

/// Arguments of the orchestrator's claim function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimCall {
    pub deposit_id: U256,
    /// Amount in the settlement asset's smallest unit.
    pub amount: U256,
    pub recipient: Address,
}

/// The parts of a mined receipt the executor looks at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainReceipt {
    pub tx_hash: TxHash,
    pub success: bool,
    pub block_number: Option<u64>,
    pub gas_used: u64,
    /// Intent hash from the claim event, if one was found in the logs.
    pub intent_hash: Option<B256>,
}

/// Signing chain client for the claim contract.
#[async_trait]
pub trait ChainClient: Send + Sync {
    /// Address of the configured signer.
    fn operator_address(&self) -> Address;

    /// Estimate gas units for the claim call.
    async fn estimate_gas(&self, call: &ClaimCall) -> Result<u64>;

    /// Sign and broadcast the claim call with an explicit gas limit.
    async fn submit(&self, call: &ClaimCall, gas_limit: u64) -> Result<TxHash>;

    /// Wait up to `timeout` for the receipt. `Ok(None)` means it timed out.
    async fn await_receipt(&self, tx_hash: TxHash, timeout: Duration) -> Result<Option<ChainReceipt>>;

    /// Native balance of the signer, in whole coins.
    async fn native_balance(&self) -> Result<Decimal>;
}
