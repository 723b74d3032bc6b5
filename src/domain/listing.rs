//! Raw listings as fetched from the market data source.

use rust_decimal::Decimal;

use super::id::ListingId;
use super::money::{Amount, Rate};

/// One tradeable facet of a listing: a payment method, a fiat currency,
/// and the rate the owner asks for it.
#[derive(Debug, Clone, PartialEq)]
pub struct MarketEntry {
    pub payment_method: String,
    pub currency: String,
    pub rate: Rate,
}

impl MarketEntry {
    pub fn new(payment_method: impl Into<String>, currency: impl Into<String>, rate: Rate) -> Self {
        Self {
            payment_method: payment_method.into(),
            currency: currency.into(),
            rate,
        }
    }
}

/// A funded offer on the market, immutable for the lifetime of one scan.
///
/// Raw on-chain amounts are kept as the 6-decimal integer strings the
/// source reports; they are shown to the operator but never used for
/// classification.
#[derive(Debug, Clone, PartialEq)]
pub struct RawListing {
    pub id: ListingId,
    /// Fiat-equivalent amount still claimable. Zero when the source omits it.
    pub available: Amount,
    pub owner: String,
    /// Historical success ratio in `[0, 1]`.
    pub success_ratio: Decimal,
    /// Number of intents previously signalled against this listing.
    pub fulfillments: u64,
    pub markets: Vec<MarketEntry>,
    pub remaining_raw: String,
    pub intent_min_raw: String,
    pub intent_max_raw: String,
}

impl RawListing {
    /// Create a listing with the given amount and markets and empty
    /// metadata. Mostly useful for tests and fixtures.
    pub fn new(id: impl Into<ListingId>, available: Amount, markets: Vec<MarketEntry>) -> Self {
        Self {
            id: id.into(),
            available,
            owner: String::new(),
            success_ratio: Decimal::ZERO,
            fulfillments: 0,
            markets,
            remaining_raw: String::new(),
            intent_min_raw: String::new(),
            intent_max_raw: String::new(),
        }
    }

    #[must_use]
    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = owner.into();
        self
    }

    #[must_use]
    pub fn with_track_record(mut self, success_ratio: Decimal, fulfillments: u64) -> Self {
        self.success_ratio = success_ratio;
        self.fulfillments = fulfillments;
        self
    }
}
