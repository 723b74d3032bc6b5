//! Builders for domain primitives used across tests.

use rust_decimal::Decimal;

use crate::domain::{Direction, MarketEntry, Opportunity, RateQuote, RawListing, RequestMetadata};
use crate::error::ValidationError;
use crate::port::{ListingPage, ListingRecord};

/// A listing with one market entry per `(method, currency, rate)`.
pub fn listing(id: &str, available: Decimal, markets: &[(&str, &str, Decimal)]) -> RawListing {
    RawListing::new(
        id,
        available,
        markets
            .iter()
            .map(|(method, currency, rate)| MarketEntry::new(*method, *currency, *rate))
            .collect(),
    )
}

/// A single-entry USD listing paid by Wise.
pub fn wise_listing(id: &str, available: Decimal, rate: Decimal) -> RawListing {
    listing(id, available, &[("wise", "USD", rate)])
}

/// A page of well-formed listings.
pub fn page(listings: Vec<RawListing>, has_more: bool) -> ListingPage {
    ListingPage {
        records: listings.into_iter().map(Ok).collect(),
        has_more,
        metadata: RequestMetadata::default(),
    }
}

/// A page with explicit records, including rejected ones.
pub fn page_of(records: Vec<ListingRecord>, has_more: bool) -> ListingPage {
    ListingPage {
        records,
        has_more,
        metadata: RequestMetadata::default(),
    }
}

/// A record that failed validation.
pub fn malformed(reason: &str) -> ListingRecord {
    Err(ValidationError::MalformedListing(reason.to_string()))
}

/// An opportunity built from a single-entry listing.
pub fn opportunity(id: &str, available: Decimal, rate: Decimal, direction: Direction) -> Opportunity {
    let listing = wise_listing(id, available, rate);
    let quote = RateQuote::from_entry(&listing, &listing.markets[0])
        .unwrap_or_else(|| panic!("rate {rate} must be positive"));
    Opportunity::new(quote, direction)
        .unwrap_or_else(|| panic!("profit for {available} at {rate} overflows"))
}
