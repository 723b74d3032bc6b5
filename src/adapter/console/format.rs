//! Formatting helpers for the terminal console.

use rust_decimal::{Decimal, RoundingStrategy};
use tabled::Tabled;

use crate::domain::{short_address, Direction, Opportunity, RateQuote, RateRow};

/// Rows of the rate summary shown per scan.
pub const SUMMARY_ROWS: usize = 10;

/// Human-facing name of a payment method slug.
pub fn display_name(method: &str) -> String {
    let name = match method.to_ascii_lowercase().as_str() {
        "zelle" => "Zelle",
        "zelle-citi" => "Zelle (Citi)",
        "zelle-chase" => "Zelle (Chase)",
        "zelle-bofa" => "Zelle (BofA)",
        "paypal" => "PayPal",
        "revolut" => "Revolut",
        "wise" => "Wise",
        "venmo" => "Venmo",
        "cashapp" => "Cash App",
        "monzo" => "Monzo",
        "mercadopago" => "Mercado Pago",
        "n26" => "N26",
        "chime" => "Chime",
        _ if method.is_empty() => "—",
        _ => return method.to_string(),
    };
    name.to_string()
}

/// Dollar amount with thousands separators and two decimals.
pub fn usd(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let text = format!("{:.2}", rounded.abs());
    let (whole, frac) = text.split_once('.').unwrap_or((&text, "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{sign}${grouped}.{frac}")
}

/// Percentage with two decimals.
pub fn pct(value: Decimal) -> String {
    format!("{:.2}%", value)
}

/// `0x1234...abcd (success 98%, 42 intents)`, when a track record is known.
pub fn maker_line(quote: &RateQuote) -> Option<String> {
    if quote.success_ratio().is_zero() {
        return None;
    }
    let success = (quote.success_ratio() * Decimal::ONE_HUNDRED).round();
    Some(format!(
        "{} (success {}%, {} intents)",
        short_address(quote.owner()),
        success,
        quote.fulfillments()
    ))
}

#[derive(Tabled)]
pub struct OpportunityRow {
    #[tabled(rename = "#")]
    rank: usize,
    #[tabled(rename = "Deposit")]
    deposit: String,
    #[tabled(rename = "Payment")]
    payment: String,
    #[tabled(rename = "Rate")]
    rate: String,
    #[tabled(rename = "Available")]
    available: String,
    #[tabled(rename = "Profit")]
    profit: String,
    #[tabled(rename = "Spread")]
    spread: String,
    #[tabled(rename = "Maker")]
    maker: String,
}

impl OpportunityRow {
    pub fn new(rank: usize, opportunity: &Opportunity) -> Self {
        let quote = opportunity.quote();
        Self {
            rank,
            deposit: quote.listing_id().to_string(),
            payment: display_name(quote.payment_method()),
            rate: format!("{:.6} {}", quote.rate(), quote.currency()),
            available: usd(quote.available()),
            profit: format!(
                "{} ({})",
                usd(opportunity.profit_amount()),
                pct(opportunity.profit_pct())
            ),
            spread: opportunity.spread().to_string(),
            maker: maker_line(quote).unwrap_or_else(|| "—".to_string()),
        }
    }
}

pub fn opportunity_rows(list: &[Opportunity]) -> Vec<OpportunityRow> {
    list.iter()
        .enumerate()
        .map(|(i, o)| OpportunityRow::new(i + 1, o))
        .collect()
}

#[derive(Tabled)]
pub struct SummaryRow {
    #[tabled(rename = "Platform")]
    platform: String,
    #[tabled(rename = "Currency")]
    currency: String,
    #[tabled(rename = "Rate")]
    rate: String,
    #[tabled(rename = "Liquidity")]
    liquidity: String,
}

pub fn summary_rows(rows: &[RateRow]) -> Vec<SummaryRow> {
    rows.iter()
        .take(SUMMARY_ROWS)
        .map(|row| SummaryRow {
            platform: display_name(&row.platform),
            currency: row.currency.clone(),
            rate: row.rate.map_or_else(|| "?".into(), |r| r.normalize().to_string()),
            liquidity: row.liquidity.map_or_else(|| "?".into(), usd),
        })
        .collect()
}

/// What the operator typed at the action prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Skip,
    Exit,
    Select { direction: Direction, rank: usize },
}

/// Parse `buy N`, `sell N`, `skip` or `exit`.
pub fn parse_command(input: &str) -> Result<Command, String> {
    let input = input.trim().to_ascii_lowercase();
    let mut parts = input.split_whitespace();

    match (parts.next(), parts.next(), parts.next()) {
        (None, _, _) | (Some("skip" | "s" | "n"), None, _) => Ok(Command::Skip),
        (Some("exit" | "quit" | "q"), None, _) => Ok(Command::Exit),
        (Some(word), Some(rank), None) => {
            let direction: Direction = word.parse().map_err(|_| usage())?;
            let rank: usize = rank
                .parse()
                .map_err(|_| format!("'{rank}' is not a number"))?;
            if rank == 0 {
                return Err("ranks start at 1".to_string());
            }
            Ok(Command::Select { direction, rank })
        }
        _ => Err(usage()),
    }
}

fn usage() -> String {
    "enter 'buy N', 'sell N', 'skip' or 'exit'".to_string()
}
