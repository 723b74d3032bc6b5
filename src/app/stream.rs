//! Live activity ingestion.
//!
//! Informational only: events are logged, never traded on. Any way the
//! feed stops other than shutdown is reported so the caller can fall back
//! to polling.

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::shutdown::Shutdown;
use crate::domain::ActivityEvent;
use crate::port::{FeedFilter, FeedFrame, MarketDataSource};

/// Why the feed stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEnd {
    /// The feed could not be opened.
    Unavailable(String),
    /// The server closed the stream.
    Closed,
    /// Transport error mid-stream.
    Failed(String),
    Shutdown,
}

impl StreamEnd {
    /// Whether the caller should switch to polling.
    pub fn should_fall_back(&self) -> bool {
        !matches!(self, Self::Shutdown)
    }
}

/// Counters over one feed session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreamStats {
    pub events: usize,
    pub malformed: usize,
    pub errors: usize,
    pub other: usize,
}

pub struct StreamIngestor {
    source: Arc<dyn MarketDataSource>,
    filter: FeedFilter,
}

impl StreamIngestor {
    pub fn new(source: Arc<dyn MarketDataSource>, filter: FeedFilter) -> Self {
        Self { source, filter }
    }

    pub fn filter(&self) -> &FeedFilter {
        &self.filter
    }

    /// Consume the feed until it ends or shutdown is triggered.
    pub async fn run(&self, shutdown: &mut Shutdown) -> (StreamEnd, StreamStats) {
        let mut stats = StreamStats::default();

        let mut feed = match self.source.open_activity_feed(&self.filter).await {
            Ok(feed) => feed,
            Err(e) => {
                warn!(error = %e, "Activity stream unavailable");
                return (StreamEnd::Unavailable(e.to_string()), stats);
            }
        };

        info!(
            events = ?self.filter.event_types,
            interval_ms = self.filter.interval_ms,
            "Streaming activity"
        );

        loop {
            tokio::select! {
                frame = feed.next_frame() => match frame {
                    None => {
                        warn!("Activity stream closed by server");
                        return (StreamEnd::Closed, stats);
                    }
                    Some(Err(e)) => {
                        warn!(error = %e, "Activity stream error");
                        return (StreamEnd::Failed(e.to_string()), stats);
                    }
                    Some(Ok(frame)) => handle_frame(frame, &mut stats),
                },
                () = shutdown.wait() => {
                    info!(events = stats.events, "Activity stream stopped");
                    return (StreamEnd::Shutdown, stats);
                }
            }
        }
    }
}

fn log_event(event: &ActivityEvent) {
    info!(
        event_type = %event.event_type,
        deposit_id = event.deposit_id.as_deref().unwrap_or("?"),
        "{}",
        event.describe()
    );
}

fn handle_frame(frame: FeedFrame, stats: &mut StreamStats) {
    match frame {
        FeedFrame::Activity(Ok(event)) => {
            stats.events += 1;
            log_event(&event);
        }
        FeedFrame::Activity(Err(e)) => {
            stats.malformed += 1;
            debug!(error = %e, "Dropping malformed activity event");
        }
        FeedFrame::Error(message) => {
            stats.errors += 1;
            warn!(%message, "Stream reported an error");
        }
        FeedFrame::Other { event } => {
            stats.other += 1;
            debug!(%event, "Ignoring stream frame");
        }
    }
}
