//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`market`] - [`ScriptedMarket`](market::ScriptedMarket) and
//!   [`ScriptedFeed`](market::ScriptedFeed) for the market data port.
//! - [`chain`] - [`ScriptedChain`](chain::ScriptedChain), a recording chain client.
//! - [`console`] - [`ScriptedConsole`](console::ScriptedConsole), a non-interactive operator.
//! - [`domain`] - Builders for listings, pages and opportunities.

pub mod chain;
pub mod console;
pub mod domain;
pub mod market;
