//! Result of one scan cycle.

use super::board::OpportunityBoard;
use super::detector::DetectionStats;
use super::market::{RateSummary, RequestMetadata};

/// Everything one scan cycle produced, handed to the operator console.
#[derive(Debug, Clone, Default)]
pub struct ScanReport {
    pub board: OpportunityBoard,
    pub stats: DetectionStats,
    /// Records that failed validation and were skipped.
    pub rejected: usize,
    pub metadata: RequestMetadata,
    pub summary: Option<RateSummary>,
    /// Set when fetching failed and the cycle was abandoned.
    pub fetch_error: Option<String>,
}

impl ScanReport {
    /// An empty report for a cycle whose fetch failed.
    pub fn aborted(reason: impl Into<String>) -> Self {
        Self {
            fetch_error: Some(reason.into()),
            ..Self::default()
        }
    }

    pub fn is_aborted(&self) -> bool {
        self.fetch_error.is_some()
    }
}
