//! Opportunity detection: normalize listings, classify quotes, rank.

mod classify;
mod normalize;

pub use classify::{classify, Thresholds};
pub use normalize::{normalize, ListingFilter};

use super::board::OpportunityBoard;
use super::listing::RawListing;

/// Counts collected while detecting over one batch of listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DetectionStats {
    pub listings: usize,
    pub quotes: usize,
    pub opportunities: usize,
    /// Quotes dropped because their profit figures overflowed.
    pub out_of_range: usize,
}

/// Stateless pipeline from raw listings to a ranked board.
#[derive(Debug, Clone, Default)]
pub struct Detector {
    filter: ListingFilter,
    thresholds: Thresholds,
}

impl Detector {
    pub fn new(filter: ListingFilter, thresholds: Thresholds) -> Self {
        Self { filter, thresholds }
    }

    pub fn filter(&self) -> &ListingFilter {
        &self.filter
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    /// Normalize and classify every listing, then rank the result.
    pub fn detect<'a, I>(&self, listings: I) -> (OpportunityBoard, DetectionStats)
    where
        I: IntoIterator<Item = &'a RawListing>,
    {
        let mut board = OpportunityBoard::new();
        let mut stats = DetectionStats::default();

        for listing in listings {
            stats.listings += 1;
            for quote in normalize(listing, &self.filter) {
                stats.quotes += 1;
                match classify(&quote, &self.thresholds) {
                    Ok(opportunities) => {
                        stats.opportunities += opportunities.len();
                        for opportunity in opportunities {
                            board.push(opportunity);
                        }
                    }
                    Err(_) => stats.out_of_range += 1,
                }
            }
        }

        board.rank();
        (board, stats)
    }
}
