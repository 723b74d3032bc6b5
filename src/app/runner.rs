//! Run-mode driver: once, poll on an interval, or stream with a polling
//! fallback.

use std::time::Duration;

use tracing::{info, warn};

use super::config::RunMode;
use super::scan::ScanCycle;
use super::shutdown::Shutdown;
use super::stream::StreamIngestor;

pub struct Runner {
    cycle: ScanCycle,
    ingestor: StreamIngestor,
    mode: RunMode,
    interval: Duration,
}

impl Runner {
    pub fn new(cycle: ScanCycle, ingestor: StreamIngestor, mode: RunMode, interval: Duration) -> Self {
        Self {
            cycle,
            ingestor,
            mode,
            interval,
        }
    }

    /// Drive the configured mode until it finishes or shutdown.
    pub async fn run(mut self, mut shutdown: Shutdown) {
        info!(mode = %self.mode, interval_secs = self.interval.as_secs(), "Runner starting");

        match self.mode {
            RunMode::Once => {
                self.cycle.run_once(&mut shutdown).await;
            }
            RunMode::Poll => self.poll(&mut shutdown).await,
            RunMode::Stream => {
                let (end, stats) = self.ingestor.run(&mut shutdown).await;
                info!(
                    events = stats.events,
                    malformed = stats.malformed,
                    "Activity stream session ended"
                );
                if end.should_fall_back() {
                    warn!(reason = ?end, "Falling back to polling");
                    self.poll(&mut shutdown).await;
                }
            }
        }

        info!("Runner stopped");
    }

    async fn poll(&mut self, shutdown: &mut Shutdown) {
        let mut cycles: u64 = 0;
        loop {
            if shutdown.is_triggered() {
                return;
            }

            cycles += 1;
            let outcome = self.cycle.run_once(shutdown).await;
            if outcome.stop {
                info!(cycles, "Stop requested");
                return;
            }

            tokio::select! {
                () = tokio::time::sleep(self.interval) => {}
                () = shutdown.wait() => return,
            }
        }
    }
}
