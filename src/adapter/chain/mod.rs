//! On-chain adapter for the orchestrator contract.

mod orchestrator;

pub use orchestrator::{check_rpc, intent_hash_from_logs, OrchestratorClient};
