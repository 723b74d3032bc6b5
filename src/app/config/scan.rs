//! Scan loop configuration: run mode, interval, thresholds and filters.

use std::fmt;

use serde::Deserialize;

use crate::domain::{ListingFilter, Thresholds};

/// How the process drives scans.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum RunMode {
    /// A single scan, then exit.
    Once,
    /// Scan on a fixed interval.
    #[default]
    Poll,
    /// Follow the live activity feed, falling back to polling.
    Stream,
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Once => write!(f, "once"),
            Self::Poll => write!(f, "poll"),
            Self::Stream => write!(f, "stream"),
        }
    }
}

/// Scan configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ScanConfig {
    #[serde(default)]
    pub mode: RunMode,
    /// Seconds between scans in poll mode.
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
    #[serde(flatten)]
    pub thresholds: Thresholds,
    #[serde(flatten)]
    pub filter: ListingFilter,
    /// Fetch and show the market rate summary each cycle.
    #[serde(default = "default_true")]
    pub show_summary: bool,
}

const fn default_interval_secs() -> u64 {
    60
}

const fn default_true() -> bool {
    true
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            mode: RunMode::default(),
            interval_secs: default_interval_secs(),
            thresholds: Thresholds::default(),
            filter: ListingFilter::default(),
            show_summary: true,
        }
    }
}
