//! Listing normalization: raw listings to canonical rate quotes.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::domain::listing::{MarketEntry, RawListing};
use crate::domain::money::Amount;
use crate::domain::quote::RateQuote;

/// Which listings and market entries are eligible for quoting.
#[derive(Debug, Clone, Deserialize)]
pub struct ListingFilter {
    /// Listings with less available than this are ignored.
    #[serde(default = "default_min_amount")]
    pub min_amount: Amount,

    /// Accepted payment methods. Empty accepts all.
    #[serde(default = "default_payment_methods")]
    pub payment_methods: Vec<String>,

    /// Accepted currency codes. Empty accepts all.
    #[serde(default = "default_currencies")]
    pub currencies: Vec<String>,
}

fn default_min_amount() -> Amount {
    Decimal::from(100)
}

fn default_payment_methods() -> Vec<String> {
    ["zelle", "paypal", "revolut", "wise"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_currencies() -> Vec<String> {
    ["USD", "GBP", "EUR", "CAD", "AUD"]
        .into_iter()
        .map(String::from)
        .collect()
}

impl Default for ListingFilter {
    fn default() -> Self {
        Self {
            min_amount: default_min_amount(),
            payment_methods: default_payment_methods(),
            currencies: default_currencies(),
        }
    }
}

impl ListingFilter {
    /// A filter that accepts every method and currency.
    pub fn accept_all(min_amount: Amount) -> Self {
        Self {
            min_amount,
            payment_methods: Vec::new(),
            currencies: Vec::new(),
        }
    }

    fn accepts(&self, entry: &MarketEntry) -> bool {
        let method_ok = self.payment_methods.is_empty()
            || self
                .payment_methods
                .iter()
                .any(|m| same_method_family(m, &entry.payment_method));
        method_ok && contains_ignore_case(&self.currencies, &entry.currency)
    }
}

fn contains_ignore_case(allowed: &[String], value: &str) -> bool {
    allowed.is_empty() || allowed.iter().any(|a| a.eq_ignore_ascii_case(value))
}

/// `zelle` accepts `zelle` and bank variants such as `zelle-chase`.
fn same_method_family(allowed: &str, method: &str) -> bool {
    if allowed.eq_ignore_ascii_case(method) {
        return true;
    }
    method.len() > allowed.len()
        && method.as_bytes()[allowed.len()] == b'-'
        && method.is_char_boundary(allowed.len())
        && method[..allowed.len()].eq_ignore_ascii_case(allowed)
}

/// Convert a listing into one quote per accepted market entry.
///
/// Listings below the minimum amount (including a zero or missing amount)
/// produce nothing. So do listings whose entries all have non-positive
/// rates. This never fails.
pub fn normalize(listing: &RawListing, filter: &ListingFilter) -> Vec<RateQuote> {
    if listing.available <= Decimal::ZERO || listing.available < filter.min_amount {
        return Vec::new();
    }

    listing
        .markets
        .iter()
        .filter(|entry| filter.accepts(entry))
        .filter_map(|entry| RateQuote::from_entry(listing, entry))
        .collect()
}
