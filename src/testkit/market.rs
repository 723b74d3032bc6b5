//! Scripted market data source and activity feed.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::{ActivityEvent, RateSummary, RequestMetadata};
use crate::error::{DataSourceError, Error, Result};
use crate::port::{ActivityFeed, FeedFilter, FeedFrame, ListingPage, MarketDataSource};

// ---------------------------------------------------------------------------
// ScriptedMarket
// ---------------------------------------------------------------------------

/// A market data source that replays queued responses.
///
/// Each `list_active_listings` call pops the next queued page (an empty
/// final page once exhausted). Calls are recorded for assertions.
pub struct ScriptedMarket {
    pages: Mutex<VecDeque<Result<ListingPage>>>,
    summaries: Mutex<VecDeque<Result<(RateSummary, RequestMetadata)>>>,
    feeds: Mutex<VecDeque<Result<ScriptedFeed>>>,
    page_requests: Mutex<Vec<(usize, usize)>>,
    feed_requests: Mutex<Vec<FeedFilter>>,
}

impl Default for ScriptedMarket {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptedMarket {
    pub fn new() -> Self {
        Self {
            pages: Mutex::new(VecDeque::new()),
            summaries: Mutex::new(VecDeque::new()),
            feeds: Mutex::new(VecDeque::new()),
            page_requests: Mutex::new(Vec::new()),
            feed_requests: Mutex::new(Vec::new()),
        }
    }

    #[must_use]
    pub fn with_pages(self, pages: Vec<Result<ListingPage>>) -> Self {
        lock(&self.pages).extend(pages);
        self
    }

    #[must_use]
    pub fn with_page(self, page: ListingPage) -> Self {
        lock(&self.pages).push_back(Ok(page));
        self
    }

    #[must_use]
    pub fn with_summary(self, summary: Result<(RateSummary, RequestMetadata)>) -> Self {
        lock(&self.summaries).push_back(summary);
        self
    }

    #[must_use]
    pub fn with_feed(self, feed: ScriptedFeed) -> Self {
        lock(&self.feeds).push_back(Ok(feed));
        self
    }

    #[must_use]
    pub fn with_feed_error(self, reason: &str) -> Self {
        lock(&self.feeds).push_back(Err(DataSourceError::FeedUnavailable(reason.to_string()).into()));
        self
    }

    /// Queue more pages after construction.
    pub fn push_pages(&self, pages: Vec<Result<ListingPage>>) {
        lock(&self.pages).extend(pages);
    }

    /// `(offset, limit)` of every listing request so far.
    pub fn page_requests(&self) -> Vec<(usize, usize)> {
        lock(&self.page_requests).clone()
    }

    pub fn feed_requests(&self) -> Vec<FeedFilter> {
        lock(&self.feed_requests).clone()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

#[async_trait]
impl MarketDataSource for ScriptedMarket {
    async fn list_active_listings(&self, offset: usize, limit: usize) -> Result<ListingPage> {
        lock(&self.page_requests).push((offset, limit));
        lock(&self.pages)
            .pop_front()
            .unwrap_or_else(|| Ok(ListingPage::default()))
    }

    async fn rate_summary(
        &self,
        _methods: &[String],
        _currencies: &[String],
    ) -> Result<(RateSummary, RequestMetadata)> {
        lock(&self.summaries)
            .pop_front()
            .unwrap_or_else(|| Ok((RateSummary::default(), RequestMetadata::default())))
    }

    async fn open_activity_feed(&self, filter: &FeedFilter) -> Result<Box<dyn ActivityFeed>> {
        lock(&self.feed_requests).push(filter.clone());
        match lock(&self.feeds).pop_front() {
            Some(Ok(feed)) => Ok(Box::new(feed)),
            Some(Err(e)) => Err(e),
            None => Err(Error::DataSource(DataSourceError::FeedUnavailable(
                "no scripted feed".to_string(),
            ))),
        }
    }

    fn source_name(&self) -> &'static str {
        "scripted"
    }
}

// ---------------------------------------------------------------------------
// ScriptedFeed
// ---------------------------------------------------------------------------

/// An activity feed that yields queued frames, then ends.
///
/// With [`hold_open`](Self::hold_open) it never ends once the queue is
/// drained, which lets tests exercise shutdown.
pub struct ScriptedFeed {
    frames: VecDeque<Result<FeedFrame>>,
    hold_open: bool,
}

impl Default for ScriptedFeed {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptedFeed {
    pub fn new() -> Self {
        Self {
            frames: VecDeque::new(),
            hold_open: false,
        }
    }

    #[must_use]
    pub fn with_frame(mut self, frame: FeedFrame) -> Self {
        self.frames.push_back(Ok(frame));
        self
    }

    #[must_use]
    pub fn with_event(self, event: ActivityEvent) -> Self {
        self.with_frame(FeedFrame::Activity(Ok(event)))
    }

    /// Queue a transport failure. The feed ends after yielding it.
    #[must_use]
    pub fn with_transport_error(mut self, reason: &str) -> Self {
        self.frames
            .push_back(Err(Error::Connection(reason.to_string())));
        self
    }

    #[must_use]
    pub fn hold_open(mut self) -> Self {
        self.hold_open = true;
        self
    }
}

#[async_trait]
impl ActivityFeed for ScriptedFeed {
    async fn next_frame(&mut self) -> Option<Result<FeedFrame>> {
        match self.frames.pop_front() {
            Some(frame) => Some(frame),
            None if self.hold_open => std::future::pending().await,
            None => None,
        }
    }
}

/// An activity event with the given type and deposit.
pub fn activity(event_type: &str, deposit_id: &str) -> ActivityEvent {
    ActivityEvent {
        event_type: event_type.to_string(),
        deposit_id: Some(deposit_id.to_string()),
        amount: None,
        actor: None,
        raw: format!(r#"{{"type":"{event_type}","depositId":"{deposit_id}"}}"#),
    }
}
