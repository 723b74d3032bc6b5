//! Trade requests and their outcomes.
//!
//! A [`TradeRequest`] is the only way into execution and can only be built
//! from an explicit operator choice. It is deliberately not `Clone`:
//! executing it consumes it, so a request that timed out waiting for its
//! receipt cannot be submitted a second time.

use alloy_primitives::{Address, TxHash, B256};
use rust_decimal::Decimal;

use super::money::Amount;
use super::opportunity::Opportunity;
use crate::error::ValidationError;

/// Operator-confirmed intent to claim part of one opportunity.
#[derive(Debug)]
pub struct TradeRequest {
    opportunity: Opportunity,
    amount: Amount,
    recipient: Option<Address>,
}

impl TradeRequest {
    /// Validate `0 < amount <= available` and build the request.
    pub fn new(opportunity: Opportunity, amount: Amount) -> Result<Self, ValidationError> {
        if amount <= Decimal::ZERO {
            return Err(ValidationError::NonPositiveAmount { amount });
        }
        let available = opportunity.available();
        if amount > available {
            return Err(ValidationError::AmountExceedsAvailable { amount, available });
        }
        Ok(Self {
            opportunity,
            amount,
            recipient: None,
        })
    }

    /// Send the claimed funds somewhere other than the operator wallet.
    #[must_use]
    pub fn with_recipient(mut self, recipient: Address) -> Self {
        self.recipient = Some(recipient);
        self
    }

    pub fn opportunity(&self) -> &Opportunity {
        &self.opportunity
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn recipient(&self) -> Option<Address> {
        self.recipient
    }
}

/// Outcome of executing a [`TradeRequest`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TradeResult {
    /// Submitted, but no receipt arrived before the wait timed out.
    /// The transaction may still be mined.
    Pending { tx_hash: TxHash },
    /// Mined with a success status.
    Confirmed {
        tx_hash: TxHash,
        block_number: Option<u64>,
        gas_used: u64,
        /// Intent hash from the emitted event, when it could be decoded.
        intent_hash: Option<B256>,
    },
    /// Mined, but execution failed on-chain.
    Reverted {
        tx_hash: TxHash,
        block_number: Option<u64>,
    },
    /// Nothing was broadcast.
    FailedBeforeSubmission { reason: String },
}

impl TradeResult {
    pub fn failed(reason: impl Into<String>) -> Self {
        Self::FailedBeforeSubmission {
            reason: reason.into(),
        }
    }

    /// Whether the outcome is final. Only `Pending` is not.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending { .. })
    }

    #[must_use]
    pub const fn is_confirmed(&self) -> bool {
        matches!(self, Self::Confirmed { .. })
    }

    /// Transaction hash, if anything was broadcast.
    #[must_use]
    pub const fn tx_hash(&self) -> Option<&TxHash> {
        match self {
            Self::Pending { tx_hash }
            | Self::Confirmed { tx_hash, .. }
            | Self::Reverted { tx_hash, .. } => Some(tx_hash),
            Self::FailedBeforeSubmission { .. } => None,
        }
    }

    /// Short lowercase label for logs.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Pending { .. } => "pending",
            Self::Confirmed { .. } => "confirmed",
            Self::Reverted { .. } => "reverted",
            Self::FailedBeforeSubmission { .. } => "failed_before_submission",
        }
    }
}
