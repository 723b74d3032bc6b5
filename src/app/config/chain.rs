//! Chain, contract and wallet configuration.

use serde::Deserialize;

use crate::domain::money::SETTLEMENT_DECIMALS;

/// RPC endpoint and claim contract settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ChainConfig {
    #[serde(default = "default_rpc_url")]
    pub rpc_url: String,
    /// Chain ID: 8453 for Base mainnet, 84532 for Base Sepolia
    #[serde(default = "default_chain_id")]
    pub chain_id: u64,
    /// Orchestrator contract exposing `signalIntent`.
    #[serde(default = "default_orchestrator")]
    pub orchestrator: String,
    /// Block explorer base URL used for transaction links.
    #[serde(default = "default_explorer_url")]
    pub explorer_url: String,
    #[serde(default = "default_receipt_timeout_secs")]
    pub receipt_timeout_secs: u64,
    #[serde(default = "default_receipt_poll_ms")]
    pub receipt_poll_ms: u64,
    /// Headroom added to the gas estimate, in percent.
    #[serde(default = "default_gas_margin_pct")]
    pub gas_margin_pct: u64,
    /// Decimals of the settlement asset.
    #[serde(default = "default_asset_decimals")]
    pub asset_decimals: u32,
}

fn default_rpc_url() -> String {
    "https://mainnet.base.org".into()
}

const fn default_chain_id() -> u64 {
    8453
}

fn default_orchestrator() -> String {
    "0x88888883Ed048FF0a415271B28b2F52d431810D0".into()
}

fn default_explorer_url() -> String {
    "https://basescan.org".into()
}

const fn default_receipt_timeout_secs() -> u64 {
    120
}

const fn default_receipt_poll_ms() -> u64 {
    2000
}

const fn default_gas_margin_pct() -> u64 {
    20
}

const fn default_asset_decimals() -> u32 {
    SETTLEMENT_DECIMALS
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            rpc_url: default_rpc_url(),
            chain_id: default_chain_id(),
            orchestrator: default_orchestrator(),
            explorer_url: default_explorer_url(),
            receipt_timeout_secs: default_receipt_timeout_secs(),
            receipt_poll_ms: default_receipt_poll_ms(),
            gas_margin_pct: default_gas_margin_pct(),
            asset_decimals: default_asset_decimals(),
        }
    }
}

/// Wallet configuration for signing claim transactions.
/// Private key is loaded from `WALLET_PRIVATE_KEY` env var at runtime (never from config file).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WalletConfig {
    /// Private key loaded from `WALLET_PRIVATE_KEY` env var at runtime
    #[serde(skip)]
    pub private_key: Option<String>,
    /// Where claimed funds go. Defaults to the signer's own address.
    #[serde(default)]
    pub recipient: Option<String>,
}

impl WalletConfig {
    /// Trading is enabled when a non-empty private key is present.
    pub fn trading_requested(&self) -> bool {
        self.private_key
            .as_deref()
            .is_some_and(|k| !k.trim().is_empty())
    }

    /// The private key with a `0x` prefix, as signers expect.
    pub fn normalized_key(&self) -> Option<String> {
        let key = self.private_key.as_deref()?.trim();
        if key.is_empty() {
            return None;
        }
        Some(if key.starts_with("0x") {
            key.to_string()
        } else {
            format!("0x{key}")
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_gets_hex_prefix() {
        let wallet = WalletConfig {
            private_key: Some(" abcd ".into()),
            recipient: None,
        };
        assert_eq!(wallet.normalized_key().as_deref(), Some("0xabcd"));
        assert!(wallet.trading_requested());
    }

    #[test]
    fn blank_key_disables_trading() {
        let wallet = WalletConfig {
            private_key: Some("   ".into()),
            recipient: None,
        };
        assert!(!wallet.trading_requested());
        assert!(wallet.normalized_key().is_none());
        assert!(!WalletConfig::default().trading_requested());
    }

    #[test]
    fn asset_decimals_default_to_settlement_precision() {
        assert_eq!(ChainConfig::default().asset_decimals, SETTLEMENT_DECIMALS);
        let parsed: ChainConfig = toml::from_str("").unwrap();
        assert_eq!(parsed.asset_decimals, SETTLEMENT_DECIMALS);
    }
}
