//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! Ports are the seams between the detection/execution core and the
//! outside world. Each has one production adapter under [`crate::adapter`]
//! and a scripted double under `testkit`.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │   Scan / Stream / Trade │
//!     ┌──────────────┤    Domain + Port        ├──────────────┐
//!     │              └─────────────────────────┘              │
//!     ▼                         ▼                             ▼
//! ┌──────────┐            ┌─────────────┐              ┌───────────┐
//! │ Market   │            │   Chain     │              │ Operator  │
//! │ Adapter  │            │   Adapter   │              │  Console  │
//! └──────────┘            └─────────────┘              └───────────┘
//! ```
//!
//! - [`MarketDataSource`], [`ActivityFeed`] - listings, rate summary, live events
//! - [`ChainClient`] - gas estimation, signed submission, receipts
//! - [`OperatorConsole`] - presentation and the blocking operator prompt

mod chain;
mod console;
mod market;

pub use chain::{ChainClient, ChainReceipt, ClaimCall};
pub use console::{Decision, OperatorConsole};
pub use market::{ActivityFeed, FeedFilter, FeedFrame, ListingPage, ListingRecord, MarketDataSource};
