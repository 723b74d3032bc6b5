//! Activity feed over server-sent events.

use std::collections::VecDeque;
use std::pin::Pin;

use async_trait::async_trait;
use futures_util::{Stream, StreamExt};
use tracing::trace;

use super::dto::decode_event;
use super::sse::{SseDecoder, SseMessage};
use crate::error::{Result, ValidationError};
use crate::port::{ActivityFeed, FeedFrame};

type ByteStream = Pin<Box<dyn Stream<Item = reqwest::Result<Vec<u8>>> + Send>>;

/// A live `/activity/stream` connection.
pub struct SseActivityFeed {
    body: ByteStream,
    decoder: SseDecoder,
    pending: VecDeque<SseMessage>,
}

impl SseActivityFeed {
    pub(crate) fn new(response: reqwest::Response) -> Self {
        let body = response.bytes_stream().map(|chunk| chunk.map(|b| b.to_vec()));
        Self {
            body: Box::pin(body),
            decoder: SseDecoder::new(),
            pending: VecDeque::new(),
        }
    }
}

fn to_frame(message: SseMessage) -> FeedFrame {
    match message.event.as_str() {
        "activity" if message.oversized => FeedFrame::Activity(Err(
            ValidationError::MalformedEvent("event exceeds size limit".to_string()),
        )),
        "activity" => FeedFrame::Activity(decode_event(&message.data)),
        "error" if message.oversized => FeedFrame::Error("error event exceeds size limit".to_string()),
        "error" => FeedFrame::Error(message.data),
        _ => FeedFrame::Other {
            event: message.event,
        },
    }
}

#[async_trait]
impl ActivityFeed for SseActivityFeed {
    async fn next_frame(&mut self) -> Option<Result<FeedFrame>> {
        loop {
            if let Some(message) = self.pending.pop_front() {
                return Some(Ok(to_frame(message)));
            }

            match self.body.next().await? {
                Ok(chunk) => {
                    trace!(bytes = chunk.len(), "SSE chunk received");
                    self.pending.extend(self.decoder.push(&chunk));
                }
                Err(e) => return Some(Err(e.into())),
            }
        }
    }
}
