//! One scan cycle: fetch, detect, present, and optionally execute.
//!
//! ```text
//! Idle ──▶ Fetching ──▶ Presenting ──▶ Executing ──▶ Idle
//!              │             │                        ▲
//!              └─ error ─────┴──── skip / no trade ───┘
//! ```

use std::fmt;
use std::sync::Arc;

use alloy_primitives::Address;
use tracing::{debug, info, warn};

use super::executor::TradeExecutor;
use super::shutdown::Shutdown;
use crate::domain::{Detector, RawListing, RequestMetadata, ScanReport, TradeRequest, TradeResult};
use crate::error::{Error, Result};
use crate::port::{Decision, MarketDataSource, OperatorConsole};

const DEFAULT_PAGE_SIZE: usize = 100;
const DEFAULT_MAX_PAGES: usize = 50;

/// Where the cycle currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanPhase {
    Idle,
    Fetching,
    Presenting,
    Executing,
}

impl fmt::Display for ScanPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Fetching => "fetching",
            Self::Presenting => "presenting",
            Self::Executing => "executing",
        };
        f.write_str(name)
    }
}

/// What one cycle produced.
#[derive(Debug)]
pub struct CycleOutcome {
    pub report: ScanReport,
    pub trade: Option<TradeResult>,
    /// The operator asked to stop, or shutdown arrived while prompting.
    pub stop: bool,
}

/// Listings fetched across all pages of one cycle.
#[derive(Debug, Default)]
pub struct FetchedListings {
    pub listings: Vec<RawListing>,
    pub rejected: usize,
    pub pages: usize,
    pub metadata: RequestMetadata,
}

pub struct ScanCycle {
    source: Arc<dyn MarketDataSource>,
    console: Arc<dyn OperatorConsole>,
    executor: TradeExecutor,
    detector: Detector,
    page_size: usize,
    max_pages: usize,
    show_summary: bool,
    recipient: Option<Address>,
    phase: ScanPhase,
}

impl ScanCycle {
    pub fn new(
        source: Arc<dyn MarketDataSource>,
        console: Arc<dyn OperatorConsole>,
        executor: TradeExecutor,
        detector: Detector,
    ) -> Self {
        Self {
            source,
            console,
            executor,
            detector,
            page_size: DEFAULT_PAGE_SIZE,
            max_pages: DEFAULT_MAX_PAGES,
            show_summary: true,
            recipient: None,
            phase: ScanPhase::Idle,
        }
    }

    #[must_use]
    pub fn with_paging(mut self, page_size: usize, max_pages: usize) -> Self {
        self.page_size = page_size.max(1);
        self.max_pages = max_pages.max(1);
        self
    }

    #[must_use]
    pub fn with_summary(mut self, show: bool) -> Self {
        self.show_summary = show;
        self
    }

    /// Send claimed funds here instead of the signer's address.
    #[must_use]
    pub fn with_recipient(mut self, recipient: Option<Address>) -> Self {
        self.recipient = recipient;
        self
    }

    pub fn phase(&self) -> ScanPhase {
        self.phase
    }

    pub fn detector(&self) -> &Detector {
        &self.detector
    }

    fn transition(&mut self, next: ScanPhase) {
        debug!(from = %self.phase, to = %next, "Scan phase");
        self.phase = next;
    }

    /// Page through active listings until the source reports no more,
    /// returns a short or empty page, or the page cap is hit.
    pub async fn fetch_listings(&self) -> Result<FetchedListings> {
        let mut fetched = FetchedListings::default();
        let mut offset = 0;

        while fetched.pages < self.max_pages {
            let page = self
                .source
                .list_active_listings(offset, self.page_size)
                .await?;
            fetched.pages += 1;
            fetched.metadata = std::mem::take(&mut fetched.metadata).merge(page.metadata);

            let count = page.records.len();
            for record in page.records {
                match record {
                    Ok(listing) => fetched.listings.push(listing),
                    Err(e) => {
                        fetched.rejected += 1;
                        debug!(error = %e, "Skipping malformed listing");
                    }
                }
            }

            if count == 0 || !page.has_more || count < self.page_size {
                return Ok(fetched);
            }
            offset += count;
        }

        warn!(
            pages = fetched.pages,
            listings = fetched.listings.len(),
            "Page cap reached; remaining listings not fetched"
        );
        Ok(fetched)
    }

    /// Fetch and detect without presenting. A fetch failure yields an
    /// aborted report.
    pub async fn scan(&mut self) -> ScanReport {
        self.transition(ScanPhase::Fetching);

        let fetched = match self.fetch_listings().await {
            Ok(fetched) => fetched,
            Err(e) => {
                warn!(source = self.source.source_name(), error = %e, "Fetch failed; skipping cycle");
                return ScanReport::aborted(e.to_string());
            }
        };

        let mut metadata = fetched.metadata;
        let mut summary = None;
        if self.show_summary {
            let filter = self.detector.filter();
            match self
                .source
                .rate_summary(&filter.payment_methods, &filter.currencies)
                .await
            {
                Ok((rates, meta)) => {
                    summary = Some(rates);
                    metadata = metadata.merge(meta);
                }
                Err(e) => warn!(error = %e, "Market summary unavailable"),
            }
        }

        let (board, stats) = self.detector.detect(&fetched.listings);

        info!(
            pages = fetched.pages,
            listings = stats.listings,
            rejected = fetched.rejected,
            quotes = stats.quotes,
            out_of_range = stats.out_of_range,
            buy = board.buy().len(),
            sell = board.sell().len(),
            credits = %metadata.credit_status(),
            "Scan complete"
        );

        ScanReport {
            board,
            stats,
            rejected: fetched.rejected,
            metadata,
            summary,
            fetch_error: None,
        }
    }

    /// Run one full cycle and return to idle.
    pub async fn run_once(&mut self, shutdown: &mut Shutdown) -> CycleOutcome {
        let report = self.scan().await;

        self.transition(ScanPhase::Presenting);
        self.console.present(&report);

        let mut outcome = CycleOutcome {
            report,
            trade: None,
            stop: false,
        };

        if outcome.report.board.is_empty() || !self.executor.trading_enabled() {
            self.transition(ScanPhase::Idle);
            return outcome;
        }

        let decision = match self.prompt(&outcome.report, shutdown).await {
            Some(decision) => decision,
            None => {
                outcome.stop = true;
                self.transition(ScanPhase::Idle);
                return outcome;
            }
        };

        match decision {
            Decision::Skip => {}
            Decision::Exit => outcome.stop = true,
            Decision::Execute {
                direction,
                rank,
                amount,
            } => {
                self.transition(ScanPhase::Executing);
                let result = self.execute(&outcome.report, direction, rank, amount).await;
                self.console.report_trade(&result);
                outcome.trade = Some(result);
            }
        }

        self.transition(ScanPhase::Idle);
        outcome
    }

    /// Ask the operator on the blocking pool. `None` means shutdown won.
    async fn prompt(&self, report: &ScanReport, shutdown: &mut Shutdown) -> Option<Decision> {
        let console = Arc::clone(&self.console);
        let board = report.board.clone();
        let prompt = tokio::task::spawn_blocking(move || console.prompt_decision(&board));

        tokio::select! {
            joined = prompt => {
                let decision = joined
                    .map_err(|e| Error::Io(std::io::Error::other(e.to_string())))
                    .and_then(|decision| decision);
                match decision {
                    Ok(decision) => Some(decision),
                    Err(e) => {
                        warn!(error = %e, "Operator prompt failed; skipping");
                        Some(Decision::Skip)
                    }
                }
            }
            () = shutdown.wait() => {
                info!("Shutdown while waiting for operator");
                None
            }
        }
    }

    async fn execute(
        &self,
        report: &ScanReport,
        direction: crate::domain::Direction,
        rank: usize,
        amount: Option<crate::domain::Amount>,
    ) -> TradeResult {
        let opportunity = match report.board.clone().take(direction, rank) {
            Ok(opportunity) => opportunity,
            Err(e) => return TradeResult::failed(e.to_string()),
        };

        let amount = amount.unwrap_or_else(|| opportunity.available());
        let request = match TradeRequest::new(opportunity, amount) {
            Ok(request) => request,
            Err(e) => {
                warn!(error = %e, "Invalid trade request");
                return TradeResult::failed(e.to_string());
            }
        };
        let request = match self.recipient {
            Some(recipient) => request.with_recipient(recipient),
            None => request,
        };

        let result = self.executor.execute(request).await;
        info!(outcome = result.label(), tx_hash = ?result.tx_hash(), "Trade finished");
        result
    }
}
