//! Source-agnostic domain logic: listings, quotes, opportunities and trades.

pub mod board;
pub mod detector;
pub mod id;
pub mod listing;
pub mod market;
pub mod money;
pub mod opportunity;
pub mod quote;
pub mod report;
pub mod trade;

pub use board::OpportunityBoard;
pub use detector::{DetectionStats, Detector, ListingFilter, Thresholds};
pub use id::ListingId;
pub use listing::{MarketEntry, RawListing};
pub use market::{short_address, ActivityEvent, EventKind, RateRow, RateSummary, RequestMetadata};
pub use money::{Amount, Rate};
pub use opportunity::{Direction, Opportunity, Spread};
pub use quote::RateQuote;
pub use report::ScanReport;
pub use trade::{TradeRequest, TradeResult};
