//! Market-level data that accompanies listings: request metadata, rate
//! summaries, and activity events.

use rust_decimal::Decimal;

/// Credit and rate-limit counters reported with one API response.
///
/// Returned alongside every response and threaded through by the caller;
/// no client keeps these as mutable state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestMetadata {
    pub credits_remaining: Option<String>,
    pub credits_source: Option<String>,
    pub rate_limit_remaining: Option<String>,
}

impl RequestMetadata {
    /// Human-readable credit status.
    pub fn credit_status(&self) -> String {
        match (&self.credits_remaining, &self.credits_source) {
            (None, _) => "unknown".to_string(),
            (Some(remaining), Some(source)) => format!("{remaining} remaining ({source})"),
            (Some(remaining), None) => format!("{remaining} remaining"),
        }
    }

    /// Keep the newer value of each counter, falling back to `self`.
    #[must_use]
    pub fn merge(self, newer: RequestMetadata) -> RequestMetadata {
        RequestMetadata {
            credits_remaining: newer.credits_remaining.or(self.credits_remaining),
            credits_source: newer.credits_source.or(self.credits_source),
            rate_limit_remaining: newer.rate_limit_remaining.or(self.rate_limit_remaining),
        }
    }
}

/// One row of the market rate summary.
#[derive(Debug, Clone, PartialEq)]
pub struct RateRow {
    pub platform: String,
    pub currency: String,
    pub rate: Option<Decimal>,
    pub liquidity: Option<Decimal>,
}

/// Point-in-time rate summary. Informational only.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RateSummary {
    pub rows: Vec<RateRow>,
}

impl RateSummary {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Coarse category of an activity event, derived from its type name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Intent,
    Deposit,
    Other,
}

impl EventKind {
    /// Classify by substring, intent taking precedence.
    pub fn from_type(event_type: &str) -> Self {
        let lower = event_type.to_ascii_lowercase();
        if lower.contains("intent") {
            Self::Intent
        } else if lower.contains("deposit") {
            Self::Deposit
        } else {
            Self::Other
        }
    }
}

/// A single informational event from the activity feed.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityEvent {
    pub event_type: String,
    pub deposit_id: Option<String>,
    pub amount: Option<String>,
    /// Intent owner or taker for intent events, depositor for deposit events.
    pub actor: Option<String>,
    /// Compact JSON of the whole payload.
    pub raw: String,
}

impl ActivityEvent {
    pub fn kind(&self) -> EventKind {
        EventKind::from_type(&self.event_type)
    }

    /// One-line description for logs and the console.
    pub fn describe(&self) -> String {
        const MAX_PAYLOAD: usize = 120;

        let deposit = self.deposit_id.as_deref().unwrap_or("?");
        let actor = short_address(self.actor.as_deref().unwrap_or_default());
        match self.kind() {
            EventKind::Intent => format!(
                "{}: deposit={} amount={} by {}",
                self.event_type,
                deposit,
                self.amount.as_deref().unwrap_or("0"),
                actor
            ),
            EventKind::Deposit => format!("{}: deposit={} by {}", self.event_type, deposit, actor),
            EventKind::Other => {
                let payload: String = self.raw.chars().take(MAX_PAYLOAD).collect();
                format!("{}: {}", self.event_type, payload)
            }
        }
    }
}

/// `0x1234...abcd` for anything address-length; short strings pass through.
pub fn short_address(addr: &str) -> String {
    const HEAD: usize = 6;
    const TAIL: usize = 4;

    if addr.is_empty() {
        return "?".to_string();
    }
    if addr.len() < HEAD * 2 || !addr.is_ascii() {
        return addr.to_string();
    }
    format!("{}...{}", &addr[..HEAD], &addr[addr.len() - TAIL..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credit_status_formats() {
        assert_eq!(RequestMetadata::default().credit_status(), "unknown");

        let meta = RequestMetadata {
            credits_remaining: Some("940".into()),
            credits_source: Some("subscription".into()),
            rate_limit_remaining: None,
        };
        assert_eq!(meta.credit_status(), "940 remaining (subscription)");
    }

    #[test]
    fn merge_prefers_newer_values() {
        let older = RequestMetadata {
            credits_remaining: Some("10".into()),
            credits_source: Some("plan".into()),
            rate_limit_remaining: Some("5".into()),
        };
        let newer = RequestMetadata {
            credits_remaining: Some("9".into()),
            ..Default::default()
        };

        let merged = older.merge(newer);
        assert_eq!(merged.credits_remaining.as_deref(), Some("9"));
        assert_eq!(merged.credits_source.as_deref(), Some("plan"));
        assert_eq!(merged.rate_limit_remaining.as_deref(), Some("5"));
    }

    fn event(event_type: &str, actor: Option<&str>) -> ActivityEvent {
        ActivityEvent {
            event_type: event_type.into(),
            deposit_id: Some("12".into()),
            amount: Some("250000000".into()),
            actor: actor.map(Into::into),
            raw: format!(r#"{{"type":"{event_type}","padding":"{}"}}"#, "x".repeat(200)),
        }
    }

    #[test]
    fn describes_events_by_kind() {
        let addr = "0x1234567890abcdef1234567890abcdef1234abcd";
        assert_eq!(
            event("intent_signaled", Some(addr)).describe(),
            "intent_signaled: deposit=12 amount=250000000 by 0x1234...abcd"
        );
        assert_eq!(
            event("deposit_created", None).describe(),
            "deposit_created: deposit=12 by ?"
        );

        let other = event("heartbeat", None).describe();
        assert!(other.starts_with("heartbeat: {\"type\""));
        assert_eq!(other.len(), "heartbeat: ".len() + 120);
    }

    #[test]
    fn short_addresses() {
        assert_eq!(
            short_address("0x1234567890abcdef1234567890abcdef1234abcd"),
            "0x1234...abcd"
        );
        assert_eq!(short_address("0xabc"), "0xabc");
        assert_eq!(short_address(""), "?");
    }

    #[test]
    fn event_kind_from_type() {
        assert_eq!(EventKind::from_type("intent_signaled"), EventKind::Intent);
        assert_eq!(EventKind::from_type("DEPOSIT_CREATED"), EventKind::Deposit);
        assert_eq!(EventKind::from_type("deposit_intent_pruned"), EventKind::Intent);
        assert_eq!(EventKind::from_type("heartbeat"), EventKind::Other);
    }
}
