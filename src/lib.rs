//! Rampscout - on-ramp arbitrage monitoring with operator-confirmed claims.
//!
//! Watches a peer-to-peer USD/fiat liquidity market for deposits priced
//! away from parity and, once the operator confirms, claims one on-chain
//! by signalling an intent on the escrow orchestrator.
//!
//! # Architecture
//!
//! - [`domain`] - Pure detection pipeline: listings become quotes, quotes
//!   become ranked buy/sell opportunities, opportunities become trade
//!   requests.
//! - [`port`] - Traits the application depends on: market data, chain
//!   client, operator console.
//! - [`adapter`] - Peerlytics REST/SSE client, alloy orchestrator client,
//!   interactive terminal console.
//! - [`app`] - Configuration, scan cycle, activity stream, trade executor
//!   and the run-mode driver.
//! - [`cli`] - Command-line entry points.
//!
//! # Features
//!
//! - `testkit` - Scripted doubles for every port, for integration tests.
//!
//! # Example
//!
//! ```
//! use rampscout::domain::{Detector, ListingFilter, MarketEntry, RawListing, Thresholds};
//! use rust_decimal_macros::dec;
//!
//! let detector = Detector::new(ListingFilter::accept_all(dec!(100)), Thresholds::default());
//! let listing = RawListing::new("1", dec!(500), vec![MarketEntry::new("wise", "USD", dec!(0.95))]);
//!
//! let (board, _) = detector.detect([&listing]);
//! assert_eq!(board.buy()[0].profit_amount(), dec!(25.00));
//! ```

pub mod adapter;
pub mod app;
pub mod cli;
pub mod domain;
pub mod error;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
