//! Scripted chain client.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use alloy_primitives::{Address, TxHash, B256};
use async_trait::async_trait;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::{ExecutionError, Result};
use crate::port::{ChainClient, ChainReceipt, ClaimCall};

/// Gas estimate returned once the scripted estimates run out.
pub const DEFAULT_GAS_ESTIMATE: u64 = 100_000;

/// Call counters for a [`ScriptedChain`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainCounts {
    pub estimates: u32,
    pub submissions: u32,
    pub receipt_waits: u32,
}

/// A chain client that replays scripted results and records every call.
///
/// Unscripted calls succeed: estimates return [`DEFAULT_GAS_ESTIMATE`],
/// submissions return a hash derived from the submission count, and
/// receipts confirm the transaction they were asked about.
///
/// Best for: executor and scan-cycle tests that must prove exactly how
/// many transactions were broadcast.
pub struct ScriptedChain {
    operator: Address,
    balance: Decimal,
    estimates: Mutex<VecDeque<Result<u64>>>,
    submissions: Mutex<VecDeque<Result<TxHash>>>,
    receipts: Mutex<VecDeque<Result<Option<ChainReceipt>>>>,
    submitted: Mutex<Vec<(ClaimCall, u64)>>,
    estimate_count: Arc<AtomicU32>,
    submit_count: Arc<AtomicU32>,
    receipt_count: Arc<AtomicU32>,
}

impl Default for ScriptedChain {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptedChain {
    pub fn new() -> Self {
        Self {
            operator: Address::repeat_byte(0x11),
            balance: dec!(0.05),
            estimates: Mutex::new(VecDeque::new()),
            submissions: Mutex::new(VecDeque::new()),
            receipts: Mutex::new(VecDeque::new()),
            submitted: Mutex::new(Vec::new()),
            estimate_count: Arc::new(AtomicU32::new(0)),
            submit_count: Arc::new(AtomicU32::new(0)),
            receipt_count: Arc::new(AtomicU32::new(0)),
        }
    }

    #[must_use]
    pub fn with_operator(mut self, operator: Address) -> Self {
        self.operator = operator;
        self
    }

    #[must_use]
    pub fn with_estimate(self, estimate: Result<u64>) -> Self {
        lock(&self.estimates).push_back(estimate);
        self
    }

    #[must_use]
    pub fn with_gas_failure(self, reason: &str) -> Self {
        self.with_estimate(Err(ExecutionError::GasEstimation(reason.to_string()).into()))
    }

    #[must_use]
    pub fn with_submission(self, result: Result<TxHash>) -> Self {
        lock(&self.submissions).push_back(result);
        self
    }

    #[must_use]
    pub fn with_receipt(self, result: Result<Option<ChainReceipt>>) -> Self {
        lock(&self.receipts).push_back(result);
        self
    }

    /// The next receipt wait times out.
    #[must_use]
    pub fn with_receipt_timeout(self) -> Self {
        self.with_receipt(Ok(None))
    }

    pub fn counts(&self) -> ChainCounts {
        ChainCounts {
            estimates: self.estimate_count.load(Ordering::SeqCst),
            submissions: self.submit_count.load(Ordering::SeqCst),
            receipt_waits: self.receipt_count.load(Ordering::SeqCst),
        }
    }

    /// Every submitted call with the gas limit it was sent with.
    pub fn submitted(&self) -> Vec<(ClaimCall, u64)> {
        lock(&self.submitted).clone()
    }
}

/// A successful receipt for `tx_hash`.
pub fn confirmed_receipt(tx_hash: TxHash, intent_hash: Option<B256>) -> ChainReceipt {
    ChainReceipt {
        tx_hash,
        success: true,
        block_number: Some(1_000),
        gas_used: 85_000,
        intent_hash,
    }
}

/// A reverted receipt for `tx_hash`.
pub fn reverted_receipt(tx_hash: TxHash) -> ChainReceipt {
    ChainReceipt {
        tx_hash,
        success: false,
        block_number: Some(1_000),
        gas_used: 40_000,
        intent_hash: None,
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

#[async_trait]
impl ChainClient for ScriptedChain {
    fn operator_address(&self) -> Address {
        self.operator
    }

    async fn estimate_gas(&self, _call: &ClaimCall) -> Result<u64> {
        self.estimate_count.fetch_add(1, Ordering::SeqCst);
        lock(&self.estimates)
            .pop_front()
            .unwrap_or(Ok(DEFAULT_GAS_ESTIMATE))
    }

    async fn submit(&self, call: &ClaimCall, gas_limit: u64) -> Result<TxHash> {
        let n = self.submit_count.fetch_add(1, Ordering::SeqCst) + 1;
        lock(&self.submitted).push((call.clone(), gas_limit));
        lock(&self.submissions)
            .pop_front()
            .unwrap_or_else(|| Ok(TxHash::with_last_byte(n as u8)))
    }

    async fn await_receipt(&self, tx_hash: TxHash, _timeout: Duration) -> Result<Option<ChainReceipt>> {
        self.receipt_count.fetch_add(1, Ordering::SeqCst);
        lock(&self.receipts)
            .pop_front()
            .unwrap_or_else(|| Ok(Some(confirmed_receipt(tx_hash, None))))
    }

    async fn native_balance(&self) -> Result<Decimal> {
        Ok(self.balance)
    }
}
