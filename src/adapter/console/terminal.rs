//! Interactive terminal console.

use std::str::FromStr;

use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input};
use rust_decimal::Decimal;

use super::format::{opportunity_rows, parse_command, pct, summary_rows, usd, Command};
use super::format::{display_name, maker_line};
use crate::app::explorer_tx_url;
use crate::cli::output;
use crate::domain::{Direction, Opportunity, OpportunityBoard, ScanReport, Thresholds, TradeResult};
use crate::error::Result;
use crate::port::{Decision, OperatorConsole};

/// Console that renders to stdout and prompts on the controlling terminal.
pub struct TerminalConsole {
    thresholds: Thresholds,
    explorer_url: String,
    show_summary: bool,
}

impl TerminalConsole {
    pub fn new(thresholds: Thresholds, explorer_url: impl Into<String>) -> Self {
        Self {
            thresholds,
            explorer_url: explorer_url.into(),
            show_summary: true,
        }
    }

    #[must_use]
    pub fn with_summary(mut self, show: bool) -> Self {
        self.show_summary = show;
        self
    }

    fn present_direction(&self, direction: Direction, list: &[Opportunity]) {
        if list.is_empty() {
            let line = match direction {
                Direction::Buy => format!(
                    "No buy opportunities at rate ≤ ${:.4}",
                    self.thresholds.buy
                ),
                Direction::Sell => format!(
                    "No sell opportunities at rate ≥ ${:.4}",
                    self.thresholds.sell
                ),
            };
            output::note(&line);
            return;
        }

        let title = match direction {
            Direction::Buy => format!(
                "BUY opportunities (discount ≥ {}), by profit",
                pct(self.thresholds.buy_discount_pct())
            ),
            Direction::Sell => format!(
                "SELL opportunities (premium ≥ {}), by profit",
                pct(self.thresholds.sell_premium_pct())
            ),
        };
        output::section(&title);
        output::table(opportunity_rows(list));
    }

    fn show_selection(&self, opportunity: &Opportunity) {
        let quote = opportunity.quote();
        output::section(&format!(
            "{} deposit {}",
            opportunity.direction(),
            quote.listing_id()
        ));
        output::field("Payment", display_name(quote.payment_method()));
        output::field("Rate", format!("{:.6} {}", quote.rate(), quote.currency()));
        output::field("Available", usd(quote.available()));
        output::field(
            "Profit",
            format!(
                "{} ({})",
                usd(opportunity.profit_amount()),
                pct(opportunity.profit_pct())
            ),
        );
        let (min, max) = quote.intent_bounds_raw();
        output::field("Intent bounds", format!("{min} - {max} (raw)"));
        if let Some(maker) = maker_line(quote) {
            output::field("Maker", maker);
        }
    }

    fn prompt_amount(&self, theme: &ColorfulTheme, available: Decimal) -> Result<Decimal> {
        loop {
            let raw: String = Input::with_theme(theme)
                .with_prompt(format!("Amount in USD (max {})", usd(available)))
                .default(available.normalize().to_string())
                .interact_text()?;

            match Decimal::from_str(raw.trim()) {
                Ok(amount) if amount > Decimal::ZERO && amount <= available => return Ok(amount),
                Ok(_) => output::warning(&format!(
                    "Amount must be greater than 0 and at most {}",
                    usd(available)
                )),
                Err(_) => output::warning(&format!("'{}' is not a number", raw.trim())),
            }
        }
    }

    fn explorer_link(&self, result: &TradeResult) -> Option<String> {
        result
            .tx_hash()
            .map(|hash| explorer_tx_url(&self.explorer_url, hash))
    }
}

impl OperatorConsole for TerminalConsole {
    fn present(&self, report: &ScanReport) {
        let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
        output::section(&format!("Arbitrage scan at {timestamp}"));

        if let Some(reason) = &report.fetch_error {
            output::warning(&format!("Scan skipped: {reason}"));
            return;
        }

        if report.metadata.credits_remaining.is_some() {
            output::field("API credits", report.metadata.credit_status());
        }
        output::field("Listings", report.stats.listings);
        output::field("Quotes", report.stats.quotes);
        if report.rejected > 0 {
            output::warning(&format!("{} malformed records skipped", report.rejected));
        }
        if report.stats.out_of_range > 0 {
            output::warning(&format!(
                "{} quotes skipped: amounts out of range",
                report.stats.out_of_range
            ));
        }

        if self.show_summary {
            if let Some(summary) = report.summary.as_ref().filter(|s| !s.is_empty()) {
                output::section("Market rates");
                output::table(summary_rows(&summary.rows));
            }
        }

        self.present_direction(Direction::Buy, report.board.buy());
        self.present_direction(Direction::Sell, report.board.sell());
        println!();
    }

    fn prompt_decision(&self, board: &OpportunityBoard) -> Result<Decision> {
        if board.is_empty() {
            return Ok(Decision::Skip);
        }

        let theme = ColorfulTheme::default();
        loop {
            let input: String = Input::with_theme(&theme)
                .with_prompt("Action (buy N / sell N / skip / exit)")
                .default("skip".to_string())
                .interact_text()?;

            let (direction, rank) = match parse_command(&input) {
                Ok(Command::Skip) => return Ok(Decision::Skip),
                Ok(Command::Exit) => return Ok(Decision::Exit),
                Ok(Command::Select { direction, rank }) => (direction, rank),
                Err(message) => {
                    output::warning(&message);
                    continue;
                }
            };

            let opportunity = match board.select(direction, rank) {
                Ok(opportunity) => opportunity,
                Err(e) => {
                    output::warning(&e.to_string());
                    continue;
                }
            };

            self.show_selection(opportunity);
            let amount = self.prompt_amount(&theme, opportunity.available())?;

            let confirmed = Confirm::with_theme(&theme)
                .with_prompt(format!(
                    "Signal intent for {} on deposit {}?",
                    usd(amount),
                    opportunity.quote().listing_id()
                ))
                .default(false)
                .interact()?;

            if !confirmed {
                output::note("Cancelled");
                return Ok(Decision::Skip);
            }

            return Ok(Decision::Execute {
                direction,
                rank,
                amount: Some(amount),
            });
        }
    }

    fn report_trade(&self, result: &TradeResult) {
        let link = self.explorer_link(result);

        match result {
            TradeResult::Pending { .. } => {
                output::warning("No receipt before timeout; the transaction may still confirm");
            }
            TradeResult::Confirmed {
                block_number,
                gas_used,
                intent_hash,
                ..
            } => {
                match block_number {
                    Some(block) => output::success(&format!("Confirmed in block {block}")),
                    None => output::success("Confirmed"),
                }
                output::field("Gas used", gas_used);
                if let Some(hash) = intent_hash {
                    output::field("Intent hash", hash);
                }
            }
            TradeResult::Reverted { block_number, .. } => {
                let at = block_number.map(|b| format!(" in block {b}")).unwrap_or_default();
                output::error(&format!("Transaction reverted{at}"));
            }
            TradeResult::FailedBeforeSubmission { reason } => {
                output::error(&format!("Not submitted: {reason}"));
            }
        }

        if let Some(link) = link {
            output::field("Explorer", link);
        }

        if result.is_confirmed() {
            output::section("Next steps");
            output::note("1. Send the fiat payment via the listed method");
            output::note("2. Generate the payment proof");
            output::note("3. Submit the proof to fulfil the intent");
        }
        println!();
    }
}
