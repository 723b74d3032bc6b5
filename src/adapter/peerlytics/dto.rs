//! Wire types for the Peerlytics v1 API.
//!
//! The API has returned several envelope shapes over time. Each known shape
//! is a strict serde variant; anything else is a decode error. Individual
//! records are decoded one at a time so a single bad record is rejected
//! without failing its page.

use std::fmt;
use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;

use crate::domain::{ActivityEvent, EventKind, MarketEntry, RateRow, RateSummary, RawListing};
use crate::error::ValidationError;
use crate::port::ListingRecord;

/// A JSON scalar that may arrive as a number or a numeric string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum Scalar {
    Number(serde_json::Number),
    Text(String),
}

impl Scalar {
    fn to_decimal(&self) -> Option<Decimal> {
        let text = self.to_string();
        let text = text.trim();
        Decimal::from_str(text)
            .or_else(|_| Decimal::from_scientific(text))
            .ok()
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

// ---------------------------------------------------------------------------
// Deposits
// ---------------------------------------------------------------------------

/// `GET /deposits` response envelopes.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum DepositsResponse {
    /// `{ "success": true, "data": { "deposits": [...], "hasMore": true } }`
    /// or `{ "data": [...] }`.
    Enveloped { data: DepositsBody },
    /// `{ "deposits": [...], "hasMore": false }`
    Page(DepositsPage),
    /// `[...]`
    Bare(Vec<Value>),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum DepositsBody {
    Page(DepositsPage),
    List(Vec<Value>),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DepositsPage {
    deposits: Vec<Value>,
    #[serde(default)]
    has_more: bool,
}

impl DepositsResponse {
    /// Flatten any envelope into `(records, has_more)`. Bare lists never
    /// have a next page.
    pub(crate) fn into_parts(self) -> (Vec<Value>, bool) {
        match self {
            Self::Enveloped {
                data: DepositsBody::Page(page),
            }
            | Self::Page(page) => (page.deposits, page.has_more),
            Self::Enveloped {
                data: DepositsBody::List(records),
            }
            | Self::Bare(records) => (records, false),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DepositDto {
    #[serde(default)]
    deposit_id: Option<Scalar>,
    #[serde(default)]
    id: Option<Scalar>,
    #[serde(default)]
    available_usd: Option<Scalar>,
    #[serde(default)]
    depositor: Option<String>,
    #[serde(default)]
    success_rate_bps: Option<Scalar>,
    #[serde(default)]
    total_intents: Option<Scalar>,
    #[serde(default)]
    remaining_deposits: Option<Scalar>,
    #[serde(default)]
    intent_amount_min: Option<Scalar>,
    #[serde(default)]
    intent_amount_max: Option<Scalar>,
    #[serde(default)]
    markets: Option<Vec<MarketDto>>,
}

#[derive(Debug, Deserialize)]
struct MarketDto {
    #[serde(default)]
    platform: Option<String>,
    #[serde(default)]
    currency: Option<String>,
    #[serde(default)]
    rate: Option<Scalar>,
}

fn decimal_field(value: Option<&Scalar>, field: &str) -> Result<Decimal, ValidationError> {
    match value {
        None => Ok(Decimal::ZERO),
        Some(scalar) => scalar.to_decimal().ok_or_else(|| {
            ValidationError::MalformedListing(format!("{field} is not numeric: '{scalar}'"))
        }),
    }
}

fn raw_field(value: Option<&Scalar>) -> String {
    value.map_or_else(|| "0".to_string(), ToString::to_string)
}

/// Decode one deposit record into a [`RawListing`].
pub(crate) fn decode_listing(value: Value) -> ListingRecord {
    let dto: DepositDto = serde_json::from_value(value)
        .map_err(|e| ValidationError::MalformedListing(e.to_string()))?;

    let id = dto
        .deposit_id
        .as_ref()
        .or(dto.id.as_ref())
        .map(ToString::to_string)
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| ValidationError::MalformedListing("missing deposit id".into()))?;

    let available = decimal_field(dto.available_usd.as_ref(), "availableUsd")?;
    let success_bps = decimal_field(dto.success_rate_bps.as_ref(), "successRateBps")?;
    let fulfillments = decimal_field(dto.total_intents.as_ref(), "totalIntents")?
        .to_u64()
        .unwrap_or(0);

    let markets = dto
        .markets
        .unwrap_or_default()
        .into_iter()
        .map(|m| {
            let rate = decimal_field(m.rate.as_ref(), "rate")?;
            Ok(MarketEntry::new(
                m.platform.unwrap_or_default(),
                m.currency.unwrap_or_default(),
                rate,
            ))
        })
        .collect::<Result<Vec<_>, ValidationError>>()?;

    let mut listing = RawListing::new(id, available, markets)
        .with_owner(dto.depositor.unwrap_or_default())
        .with_track_record(success_bps / Decimal::from(10_000), fulfillments);
    listing.remaining_raw = raw_field(dto.remaining_deposits.as_ref());
    listing.intent_min_raw = raw_field(dto.intent_amount_min.as_ref());
    listing.intent_max_raw = raw_field(dto.intent_amount_max.as_ref());

    Ok(listing)
}

// ---------------------------------------------------------------------------
// Market summary
// ---------------------------------------------------------------------------

/// `GET /market/summary` response envelopes.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum SummaryResponse {
    Data { data: Vec<SummaryRowDto> },
    Items { items: Vec<SummaryRowDto> },
    Markets { markets: Vec<SummaryRowDto> },
    Bare(Vec<SummaryRowDto>),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SummaryRowDto {
    #[serde(default)]
    platform: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    currency: Option<String>,
    #[serde(default)]
    rate: Option<Scalar>,
    #[serde(default)]
    conversion_rate: Option<Scalar>,
    #[serde(default)]
    liquidity: Option<Scalar>,
    #[serde(default)]
    available_liquidity: Option<Scalar>,
}

impl SummaryResponse {
    pub(crate) fn into_summary(self) -> RateSummary {
        let rows = match self {
            Self::Data { data: rows }
            | Self::Items { items: rows }
            | Self::Markets { markets: rows }
            | Self::Bare(rows) => rows,
        };

        RateSummary {
            rows: rows
                .into_iter()
                .map(|row| RateRow {
                    platform: row.platform.or(row.name).unwrap_or_else(|| "?".into()),
                    currency: row.currency.unwrap_or_else(|| "?".into()),
                    rate: row
                        .rate
                        .or(row.conversion_rate)
                        .and_then(|s| s.to_decimal()),
                    liquidity: row
                        .liquidity
                        .or(row.available_liquidity)
                        .and_then(|s| s.to_decimal()),
                })
                .collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Activity events
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EventDto {
    #[serde(default, rename = "type")]
    kind: Option<String>,
    #[serde(default)]
    event_type: Option<String>,
    #[serde(default)]
    deposit_id: Option<Scalar>,
    #[serde(default)]
    amount: Option<Scalar>,
    #[serde(default)]
    owner: Option<String>,
    #[serde(default)]
    taker: Option<String>,
    #[serde(default)]
    depositor: Option<String>,
}

/// Decode the data of one `activity` frame.
pub(crate) fn decode_event(data: &str) -> Result<ActivityEvent, ValidationError> {
    let value: Value =
        serde_json::from_str(data).map_err(|e| ValidationError::MalformedEvent(e.to_string()))?;
    let raw = value.to_string();
    let dto: EventDto =
        serde_json::from_value(value).map_err(|e| ValidationError::MalformedEvent(e.to_string()))?;

    let event_type = dto
        .kind
        .or(dto.event_type)
        .unwrap_or_else(|| "unknown".to_string());

    let actor = match EventKind::from_type(&event_type) {
        EventKind::Intent => dto.owner.or(dto.taker),
        EventKind::Deposit => dto.depositor,
        EventKind::Other => None,
    };

    Ok(ActivityEvent {
        event_type,
        deposit_id: dto.deposit_id.map(|s| s.to_string()),
        amount: dto.amount.map(|s| s.to_string()),
        actor,
        raw,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn decodes_enveloped_page() {
        let body = json!({
            "success": true,
            "data": { "deposits": [{"depositId": "1"}], "hasMore": true }
        });
        let (records, has_more) = serde_json::from_value::<DepositsResponse>(body)
            .unwrap()
            .into_parts();
        assert_eq!(records.len(), 1);
        assert!(has_more);
    }

    #[test]
    fn decodes_bare_and_data_lists() {
        let bare = json!([{"depositId": "1"}, {"depositId": "2"}]);
        let (records, has_more) = serde_json::from_value::<DepositsResponse>(bare)
            .unwrap()
            .into_parts();
        assert_eq!(records.len(), 2);
        assert!(!has_more);

        let listed = json!({"data": [{"id": 7}]});
        let (records, has_more) = serde_json::from_value::<DepositsResponse>(listed)
            .unwrap()
            .into_parts();
        assert_eq!(records.len(), 1);
        assert!(!has_more);
    }

    #[test]
    fn unknown_envelope_is_rejected() {
        let body = json!({"error": "nope"});
        assert!(serde_json::from_value::<DepositsResponse>(body).is_err());
    }

    #[test]
    fn decodes_full_deposit() {
        let record = json!({
            "depositId": "4521",
            "availableUsd": 500.5,
            "depositor": "0x1234567890abcdef1234567890abcdef12345678",
            "successRateBps": 9850,
            "totalIntents": 42,
            "remainingDeposits": "500500000",
            "intentAmountMin": "10000000",
            "intentAmountMax": "500000000",
            "markets": [
                {"platform": "zelle-chase", "currency": "USD", "rate": 0.95},
                {"platform": "wise", "currency": "EUR", "rate": "1.02"}
            ]
        });

        let listing = decode_listing(record).unwrap();
        assert_eq!(listing.id.as_str(), "4521");
        assert_eq!(listing.available, dec!(500.5));
        assert_eq!(listing.success_ratio, dec!(0.985));
        assert_eq!(listing.fulfillments, 42);
        assert_eq!(listing.remaining_raw, "500500000");
        assert_eq!(listing.intent_min_raw, "10000000");
        assert_eq!(listing.markets.len(), 2);
        assert_eq!(listing.markets[0].rate, dec!(0.95));
        assert_eq!(listing.markets[1].rate, dec!(1.02));
    }

    #[test]
    fn missing_fields_default_to_zero() {
        let listing = decode_listing(json!({"id": 9})).unwrap();
        assert_eq!(listing.id.as_str(), "9");
        assert_eq!(listing.available, Decimal::ZERO);
        assert!(listing.markets.is_empty());
        assert_eq!(listing.remaining_raw, "0");
    }

    #[test]
    fn malformed_records_are_rejected_individually() {
        assert!(matches!(
            decode_listing(json!({"availableUsd": 100})),
            Err(ValidationError::MalformedListing(_))
        ));
        assert!(matches!(
            decode_listing(json!({"depositId": "1", "availableUsd": "lots"})),
            Err(ValidationError::MalformedListing(_))
        ));
        assert!(matches!(
            decode_listing(json!("not an object")),
            Err(ValidationError::MalformedListing(_))
        ));
    }

    #[test]
    fn summary_accepts_alias_fields() {
        let body = json!({"items": [
            {"name": "wise", "currency": "EUR", "conversionRate": "1.01", "availableLiquidity": 2500},
            {"platform": "zelle"}
        ]});
        let summary = serde_json::from_value::<SummaryResponse>(body)
            .unwrap()
            .into_summary();

        assert_eq!(summary.rows.len(), 2);
        assert_eq!(summary.rows[0].platform, "wise");
        assert_eq!(summary.rows[0].rate, Some(dec!(1.01)));
        assert_eq!(summary.rows[0].liquidity, Some(dec!(2500)));
        assert_eq!(summary.rows[1].currency, "?");
        assert_eq!(summary.rows[1].rate, None);
    }

    #[test]
    fn intent_event_uses_owner_or_taker() {
        let event = decode_event(
            r#"{"type":"intent_signaled","depositId":12,"amount":"250000000","taker":"0xabc"}"#,
        )
        .unwrap();
        assert_eq!(event.kind(), EventKind::Intent);
        assert_eq!(event.deposit_id.as_deref(), Some("12"));
        assert_eq!(event.amount.as_deref(), Some("250000000"));
        assert_eq!(event.actor.as_deref(), Some("0xabc"));
    }

    #[test]
    fn deposit_event_uses_depositor() {
        let event =
            decode_event(r#"{"eventType":"deposit_created","depositId":"3","depositor":"0xdef"}"#)
                .unwrap();
        assert_eq!(event.event_type, "deposit_created");
        assert_eq!(event.actor.as_deref(), Some("0xdef"));
    }

    #[test]
    fn malformed_event_is_rejected() {
        assert!(matches!(
            decode_event("{not json"),
            Err(ValidationError::MalformedEvent(_))
        ));
        assert!(matches!(
            decode_event("[1,2]"),
            Err(ValidationError::MalformedEvent(_))
        ));
    }
}
