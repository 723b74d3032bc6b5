//! Market data port.

use async_trait::async_trait;

use crate::domain::{ActivityEvent, RateSummary, RawListing, RequestMetadata};
use crate::error::{Result, ValidationError};

/// One fetched record: a typed listing, or the reason it was rejected.
pub type ListingRecord = std::result::Result<RawListing, ValidationError>;

/// One page of active listings.
#[derive(Debug, Default)]
pub struct ListingPage {
    pub records: Vec<ListingRecord>,
    pub has_more: bool,
    pub metadata: RequestMetadata,
}

/// Which events to stream and how often the server should poll for them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedFilter {
    pub event_types: Vec<String>,
    pub interval_ms: u64,
}

/// A decoded frame from the activity feed.
#[derive(Debug, Clone, PartialEq)]
pub enum FeedFrame {
    /// An activity event, or the reason its payload was rejected.
    Activity(std::result::Result<ActivityEvent, ValidationError>),
    /// The server reported an error on the stream.
    Error(String),
    /// Any other named frame (keep-alives, hello messages).
    Other { event: String },
}

/// An open activity feed.
#[async_trait]
pub trait ActivityFeed: Send {
    /// Wait for the next frame.
    ///
    /// `None` means the feed ended; `Some(Err(_))` is a transport failure.
    /// Both end the feed.
    async fn next_frame(&mut self) -> Option<Result<FeedFrame>>;
}

/// Source of listings, rate summaries, and the activity feed.
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    /// Fetch one page of active listings using offset pagination.
    async fn list_active_listings(&self, offset: usize, limit: usize) -> Result<ListingPage>;

    /// Fetch the rate summary for the given payment methods and currencies.
    async fn rate_summary(
        &self,
        methods: &[String],
        currencies: &[String],
    ) -> Result<(RateSummary, RequestMetadata)>;

    /// Open the live activity feed.
    async fn open_activity_feed(&self, filter: &FeedFilter) -> Result<Box<dyn ActivityFeed>>;

    /// Name for logging.
    fn source_name(&self) -> &'static str;
}
