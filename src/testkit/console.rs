//! Scripted operator console.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::domain::{OpportunityBoard, ScanReport, TradeResult};
use crate::error::Result;
use crate::port::{Decision, OperatorConsole};

/// A console that answers prompts from a queue and records what it shows.
///
/// Once the queue is drained every prompt answers [`Decision::Skip`].
///
/// Best for: driving scan cycles without a terminal.
pub struct ScriptedConsole {
    decisions: Mutex<VecDeque<Result<Decision>>>,
    prompt_delay: Option<Duration>,
    presented: Mutex<Vec<ScanReport>>,
    trades: Mutex<Vec<TradeResult>>,
    prompts: Arc<AtomicU32>,
}

impl Default for ScriptedConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptedConsole {
    pub fn new() -> Self {
        Self {
            decisions: Mutex::new(VecDeque::new()),
            prompt_delay: None,
            presented: Mutex::new(Vec::new()),
            trades: Mutex::new(Vec::new()),
            prompts: Arc::new(AtomicU32::new(0)),
        }
    }

    #[must_use]
    pub fn with_decisions(self, decisions: Vec<Decision>) -> Self {
        lock(&self.decisions).extend(decisions.into_iter().map(Ok));
        self
    }

    #[must_use]
    pub fn with_prompt_result(self, result: Result<Decision>) -> Self {
        lock(&self.decisions).push_back(result);
        self
    }

    /// Make every prompt block for `delay` before answering, like an
    /// operator who has walked away.
    #[must_use]
    pub fn with_prompt_delay(mut self, delay: Duration) -> Self {
        self.prompt_delay = Some(delay);
        self
    }

    pub fn prompt_count(&self) -> u32 {
        self.prompts.load(Ordering::SeqCst)
    }

    pub fn presented(&self) -> Vec<ScanReport> {
        lock(&self.presented).clone()
    }

    pub fn trades(&self) -> Vec<TradeResult> {
        lock(&self.trades).clone()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

impl OperatorConsole for ScriptedConsole {
    fn present(&self, report: &ScanReport) {
        lock(&self.presented).push(report.clone());
    }

    fn prompt_decision(&self, _board: &OpportunityBoard) -> Result<Decision> {
        self.prompts.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.prompt_delay {
            std::thread::sleep(delay);
        }
        lock(&self.decisions)
            .pop_front()
            .unwrap_or(Ok(Decision::Skip))
    }

    fn report_trade(&self, result: &TradeResult) {
        lock(&self.trades).push(result.clone());
    }
}
