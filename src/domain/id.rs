//! Domain identifier types.

use std::fmt;

/// Listing (deposit) identifier as reported by the market API.
///
/// Kept as the decimal string the API returns; it is parsed into an
/// on-chain integer only when a claim call is built.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ListingId(String);

impl ListingId {
    /// Create a new ListingId from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the listing ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ListingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ListingId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for ListingId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listing_id_new_and_as_str() {
        let id = ListingId::new("4821");
        assert_eq!(id.as_str(), "4821");
    }

    #[test]
    fn listing_id_conversions_and_display() {
        assert_eq!(ListingId::from("12").to_string(), "12");
        assert_eq!(ListingId::from("13".to_string()).as_str(), "13");
    }
}
