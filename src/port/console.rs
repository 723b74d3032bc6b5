//! Operator console port.
//!
//! Synchronous by design: the core calls into it and blocks until the
//! operator answers. Interactive terminals and scripted test drivers both
//! implement it.

use rust_decimal::Decimal;

use crate::domain::{Direction, OpportunityBoard, ScanReport, TradeResult};
use crate::error::Result;

/// What the operator chose after seeing a board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Keep monitoring.
    Skip,
    /// Stop the process.
    Exit,
    /// Claim the opportunity at 1-based `rank`. `amount: None` takes the
    /// full available amount. Only returned after explicit confirmation.
    Execute {
        direction: Direction,
        rank: usize,
        amount: Option<Decimal>,
    },
}

pub trait OperatorConsole: Send + Sync {
    /// Show the result of a scan.
    fn present(&self, report: &ScanReport);

    /// Block until the operator decides what to do with `board`.
    fn prompt_decision(&self, board: &OpportunityBoard) -> Result<Decision>;

    /// Show the outcome of an execution.
    fn report_trade(&self, result: &TradeResult);
}
