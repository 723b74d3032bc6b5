//! Adapters: concrete implementations of the ports.

pub mod chain;
pub mod console;
pub mod peerlytics;
