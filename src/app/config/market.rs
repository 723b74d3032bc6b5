//! Market data API and activity stream configuration.

use serde::Deserialize;

/// Peerlytics API connection settings.
#[derive(Debug, Clone, Deserialize)]
pub struct MarketConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Loaded from `PEERLYTICS_API_KEY` at runtime, never from the file.
    #[serde(skip)]
    pub api_key: Option<String>,
    /// Listings requested per page.
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    /// Upper bound on pages fetched in one scan.
    #[serde(default = "default_max_pages")]
    pub max_pages: usize,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://peerlytics.xyz/api/v1".into()
}

const fn default_page_size() -> usize {
    100
}

const fn default_max_pages() -> usize {
    50
}

const fn default_request_timeout_secs() -> u64 {
    30
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            page_size: default_page_size(),
            max_pages: default_max_pages(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl MarketConfig {
    pub fn has_api_key(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.is_empty())
    }
}

/// Activity stream settings.
#[derive(Debug, Clone, Deserialize)]
pub struct StreamConfig {
    /// Server-side poll interval requested for the event stream.
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
    #[serde(default = "default_event_types")]
    pub event_types: Vec<String>,
}

const fn default_interval_ms() -> u64 {
    5000
}

fn default_event_types() -> Vec<String> {
    [
        "intent_signaled",
        "intent_fulfilled",
        "deposit_created",
        "deposit_rate_updated",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            interval_ms: default_interval_ms(),
            event_types: default_event_types(),
        }
    }
}
