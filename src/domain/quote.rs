//! Canonical per-market rate quotes.

use rust_decimal::Decimal;

use super::id::ListingId;
use super::listing::{MarketEntry, RawListing};
use super::money::{Amount, Rate};

/// One `(listing, market entry)` pair in canonical form.
///
/// Only constructible from a listing entry with a strictly positive rate.
#[derive(Debug, Clone, PartialEq)]
pub struct RateQuote {
    listing_id: ListingId,
    payment_method: String,
    currency: String,
    rate: Rate,
    available: Amount,
    owner: String,
    success_ratio: Decimal,
    fulfillments: u64,
    remaining_raw: String,
    intent_min_raw: String,
    intent_max_raw: String,
}

impl RateQuote {
    /// Derive a quote from one market entry of a listing.
    ///
    /// Returns `None` when the entry's rate is zero or negative.
    pub fn from_entry(listing: &RawListing, entry: &MarketEntry) -> Option<Self> {
        if entry.rate <= Decimal::ZERO {
            return None;
        }
        Some(Self {
            listing_id: listing.id.clone(),
            payment_method: entry.payment_method.clone(),
            currency: entry.currency.clone(),
            rate: entry.rate,
            available: listing.available,
            owner: listing.owner.clone(),
            success_ratio: listing.success_ratio,
            fulfillments: listing.fulfillments,
            remaining_raw: listing.remaining_raw.clone(),
            intent_min_raw: listing.intent_min_raw.clone(),
            intent_max_raw: listing.intent_max_raw.clone(),
        })
    }

    pub fn listing_id(&self) -> &ListingId {
        &self.listing_id
    }

    pub fn payment_method(&self) -> &str {
        &self.payment_method
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn rate(&self) -> Rate {
        self.rate
    }

    pub fn available(&self) -> Amount {
        self.available
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn success_ratio(&self) -> Decimal {
        self.success_ratio
    }

    pub fn fulfillments(&self) -> u64 {
        self.fulfillments
    }

    pub fn remaining_raw(&self) -> &str {
        &self.remaining_raw
    }

    /// Raw `(min, max)` intent bounds in the asset's smallest unit.
    pub fn intent_bounds_raw(&self) -> (&str, &str) {
        (&self.intent_min_raw, &self.intent_max_raw)
    }
}
