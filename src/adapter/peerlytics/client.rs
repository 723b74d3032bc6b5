//! Peerlytics REST client.
//!
//! Every request carries the `x-api-key` header when a key is configured.
//! Credit and rate-limit headers are returned with each response as
//! [`RequestMetadata`] rather than kept on the client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use super::dto::{decode_listing, DepositsResponse, SummaryResponse};
use super::feed::SseActivityFeed;
use crate::app::MarketConfig;
use crate::domain::{RateSummary, RequestMetadata};
use crate::error::{ConfigError, DataSourceError, Result};
use crate::port::{ActivityFeed, FeedFilter, ListingPage, MarketDataSource};

const API_KEY_HEADER: &str = "x-api-key";
const SUMMARY_LIMIT: usize = 200;
const MAX_ERROR_BODY: usize = 200;

/// HTTP client for the Peerlytics v1 API.
pub struct PeerlyticsClient {
    http: Client,
    /// No overall timeout; the activity stream stays open indefinitely.
    stream_http: Client,
    base_url: String,
}

impl PeerlyticsClient {
    pub fn new(config: &MarketConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        if let Some(key) = &config.api_key {
            let value = HeaderValue::from_str(key).map_err(|e| ConfigError::InvalidValue {
                field: "PEERLYTICS_API_KEY",
                reason: e.to_string(),
            })?;
            headers.insert(API_KEY_HEADER, value);
        }

        let http = Client::builder()
            .default_headers(headers.clone())
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        let stream_http = Client::builder()
            .default_headers(headers)
            .connect_timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            http,
            stream_http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<(T, RequestMetadata)> {
        let url = self.url(path);
        debug!(url = %url, "GET");

        let response = self.http.get(&url).query(query).send().await?;
        let metadata = request_metadata(response.headers());
        let response = check_status(response, &metadata).await?;

        let body = response.text().await?;
        let parsed = serde_json::from_str(&body)
            .map_err(|e| DataSourceError::Decode(format!("{path}: {e}")))?;
        Ok((parsed, metadata))
    }
}

fn header_string(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

fn request_metadata(headers: &HeaderMap) -> RequestMetadata {
    RequestMetadata {
        credits_remaining: header_string(headers, "x-credits-remaining"),
        credits_source: header_string(headers, "x-credits-source"),
        rate_limit_remaining: header_string(headers, "x-ratelimit-remaining"),
    }
}

async fn check_status(
    response: reqwest::Response,
    metadata: &RequestMetadata,
) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if status == StatusCode::TOO_MANY_REQUESTS {
        return Err(DataSourceError::RateLimited {
            remaining: metadata
                .rate_limit_remaining
                .clone()
                .unwrap_or_else(|| "0".to_string()),
        }
        .into());
    }

    let mut body = response.text().await.unwrap_or_default();
    if body.len() > MAX_ERROR_BODY {
        let cut = (0..=MAX_ERROR_BODY)
            .rev()
            .find(|&i| body.is_char_boundary(i))
            .unwrap_or(0);
        body.truncate(cut);
    }
    Err(DataSourceError::Status {
        status: status.as_u16(),
        body,
    }
    .into())
}

#[async_trait]
impl MarketDataSource for PeerlyticsClient {
    async fn list_active_listings(&self, offset: usize, limit: usize) -> Result<ListingPage> {
        let query = [
            ("status", "ACTIVE".to_string()),
            ("limit", limit.to_string()),
            ("offset", offset.to_string()),
        ];
        let (response, metadata): (DepositsResponse, _) = self.get_json("deposits", &query).await?;
        let (values, has_more) = response.into_parts();

        debug!(offset, count = values.len(), has_more, "Fetched deposits page");

        Ok(ListingPage {
            records: values.into_iter().map(decode_listing).collect(),
            has_more,
            metadata,
        })
    }

    async fn rate_summary(
        &self,
        methods: &[String],
        currencies: &[String],
    ) -> Result<(RateSummary, RequestMetadata)> {
        let mut query = vec![
            ("includeRates", "true".to_string()),
            ("limit", SUMMARY_LIMIT.to_string()),
        ];
        query.extend(methods.iter().map(|m| ("platform", m.clone())));
        query.extend(currencies.iter().map(|c| ("currency", c.clone())));

        let (response, metadata): (SummaryResponse, _) =
            self.get_json("market/summary", &query).await?;
        Ok((response.into_summary(), metadata))
    }

    async fn open_activity_feed(&self, filter: &FeedFilter) -> Result<Box<dyn ActivityFeed>> {
        let url = self.url("activity/stream");
        let mut query = vec![("intervalMs", filter.interval_ms.to_string())];
        query.extend(filter.event_types.iter().map(|t| ("type", t.clone())));

        info!(url = %url, events = ?filter.event_types, "Connecting to activity stream");

        let response = self
            .stream_http
            .get(&url)
            .header(ACCEPT, "text/event-stream")
            .query(&query)
            .send()
            .await
            .map_err(|e| DataSourceError::FeedUnavailable(e.to_string()))?;
        let metadata = request_metadata(response.headers());
        let response = check_status(response, &metadata).await?;

        info!(status = %response.status(), "Activity stream connected");
        Ok(Box::new(SseActivityFeed::new(response)))
    }

    fn source_name(&self) -> &'static str {
        "peerlytics"
    }
}
