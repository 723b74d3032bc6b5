//! Peerlytics market data adapter: REST listings and summaries plus the
//! SSE activity feed.

mod client;
mod dto;
mod feed;
mod sse;

pub use client::PeerlyticsClient;
pub use feed::SseActivityFeed;
pub use sse::{SseDecoder, SseMessage};
