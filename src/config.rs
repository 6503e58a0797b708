//! Network and signer configuration for the Vincent signer tool

use crate::constants::{
    HEDERA_MAINNET_CHAIN_ID, HEDERA_MAINNET_RPC_URL, HEDERA_TESTNET_CHAIN_ID,
    HEDERA_TESTNET_RPC_URL,
};
use alloy::primitives::Address;
use alloy::signers::local::PrivateKeySigner;
use eyre::{Context, Result};
use std::str::FromStr;
use std::time::Duration;

/// Hedera network selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NetworkMode {
    Mainnet,
    #[default]
    Testnet,
}

impl FromStr for NetworkMode {
    type Err = eyre::Report;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mainnet" => Ok(NetworkMode::Mainnet),
            "testnet" => Ok(NetworkMode::Testnet),
            other => eyre::bail!("Unknown Hedera network: {}", other),
        }
    }
}

/// Network configuration containing the RPC URL and chain ID
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkConfig {
    /// Chain ID (295 mainnet, 296 testnet)
    pub chain_id: u64,
    /// JSON-RPC relay endpoint URL
    pub rpc_url: String,
}

impl NetworkConfig {
    /// Fixed endpoint/chain pair for a network mode
    pub fn for_mode(mode: NetworkMode) -> Self {
        match mode {
            NetworkMode::Mainnet => Self {
                chain_id: HEDERA_MAINNET_CHAIN_ID,
                rpc_url: HEDERA_MAINNET_RPC_URL.to_string(),
            },
            NetworkMode::Testnet => Self {
                chain_id: HEDERA_TESTNET_CHAIN_ID,
                rpc_url: HEDERA_TESTNET_RPC_URL.to_string(),
            },
        }
    }

    /// Hedera mainnet configuration
    pub fn mainnet() -> Self {
        Self::for_mode(NetworkMode::Mainnet)
    }

    /// Hedera testnet configuration
    pub fn testnet() -> Self {
        Self::for_mode(NetworkMode::Testnet)
    }

    /// Point at a different relay for the same chain
    pub fn with_rpc_url(mut self, rpc_url: impl Into<String>) -> Self {
        self.rpc_url = rpc_url.into();
        self
    }
}

/// Per-stage time bounds for one pipeline run
///
/// The RPC provider and the signing service have their own transport
/// timeouts; these bound each stage as a whole, including the confirmation
/// wait after broadcast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineTimeouts {
    /// Fee and nonce lookups, and the broadcast call itself
    pub rpc: Duration,
    /// Round trip to the signing delegate
    pub signing: Duration,
    /// Waiting for a receipt after broadcast
    pub confirmation: Duration,
    /// Receipt polling interval
    pub poll_interval: Duration,
}

impl Default for PipelineTimeouts {
    fn default() -> Self {
        Self {
            rpc: Duration::from_secs(30),
            signing: Duration::from_secs(60),
            confirmation: Duration::from_secs(120),
            poll_interval: Duration::from_secs(2),
        }
    }
}

/// Process-scoped signer configuration, shared read-only by every invocation
#[derive(Debug, Clone)]
pub struct SignerConfig {
    /// Delegatee identity used to authenticate to Vincent (not the signing key)
    pub delegatee: PrivateKeySigner,
    /// PKP address on whose behalf transactions are signed
    pub delegator_pkp_eth_address: Address,
    /// Network selection
    pub network_mode: NetworkMode,
    /// Resolved RPC endpoint and chain ID
    pub network: NetworkConfig,
    /// Stage time bounds
    pub timeouts: PipelineTimeouts,
}

impl SignerConfig {
    /// Create a configuration for the given network mode
    pub fn new(
        delegatee: PrivateKeySigner,
        delegator_pkp_eth_address: Address,
        network_mode: NetworkMode,
    ) -> Self {
        Self {
            delegatee,
            delegator_pkp_eth_address,
            network_mode,
            network: NetworkConfig::for_mode(network_mode),
            timeouts: PipelineTimeouts::default(),
        }
    }

    /// Load from environment variables
    ///
    /// * `VINCENT_DELEGATEE_PRIVATE_KEY` - delegatee key (hex, with or without 0x)
    /// * `VINCENT_DELEGATOR_PKP_ETH_ADDRESS` - delegator PKP address
    /// * `HEDERA_NETWORK` - `mainnet` or `testnet` (default: testnet)
    /// * `HEDERA_RPC_URL` - optional relay override
    pub fn from_env() -> Result<Self> {
        let key = std::env::var("VINCENT_DELEGATEE_PRIVATE_KEY")
            .context("VINCENT_DELEGATEE_PRIVATE_KEY environment variable must be set")?;
        let key = key.trim();
        let key = key.strip_prefix("0x").unwrap_or(key);
        let delegatee: PrivateKeySigner =
            key.parse().context("Failed to parse delegatee private key")?;

        let delegator: Address = std::env::var("VINCENT_DELEGATOR_PKP_ETH_ADDRESS")
            .context("VINCENT_DELEGATOR_PKP_ETH_ADDRESS environment variable must be set")?
            .trim()
            .parse()
            .context("Invalid delegator PKP address")?;

        let mode = match std::env::var("HEDERA_NETWORK") {
            Ok(value) => value.parse()?,
            Err(_) => NetworkMode::default(),
        };

        let mut config = Self::new(delegatee, delegator, mode);
        if let Ok(rpc_url) = std::env::var("HEDERA_RPC_URL") {
            config.network = config.network.with_rpc_url(rpc_url);
        }

        Ok(config)
    }

    /// Set the stage time bounds
    pub fn with_timeouts(mut self, timeouts: PipelineTimeouts) -> Self {
        self.timeouts = timeouts;
        self
    }

    /// Override the relay URL (chain ID stays tied to the network mode)
    pub fn with_rpc_url(mut self, rpc_url: impl Into<String>) -> Self {
        self.network = self.network.with_rpc_url(rpc_url);
        self
    }

    /// Address of the delegatee identity
    pub fn delegatee_address(&self) -> Address {
        self.delegatee.address()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_selects_fixed_endpoints() {
        let mainnet = NetworkConfig::for_mode(NetworkMode::Mainnet);
        assert_eq!(mainnet.chain_id, 295);
        assert_eq!(mainnet.rpc_url, "https://mainnet.hashio.io/api");

        let testnet = NetworkConfig::for_mode(NetworkMode::Testnet);
        assert_eq!(testnet.chain_id, 296);
        assert_eq!(testnet.rpc_url, "https://testnet.hashio.io/api");
    }

    #[test]
    fn test_parse_network_mode() {
        assert_eq!("mainnet".parse::<NetworkMode>().unwrap(), NetworkMode::Mainnet);
        assert_eq!(" Testnet ".parse::<NetworkMode>().unwrap(), NetworkMode::Testnet);
        assert!("previewnet".parse::<NetworkMode>().is_err());
    }

    #[test]
    fn test_rpc_override_keeps_chain_id() {
        let delegatee: PrivateKeySigner =
            "4c0883a69102937d6231471b5dbb6204fe5129617082792ae468d01a3f362318"
                .parse()
                .unwrap();
        let config = SignerConfig::new(
            delegatee,
            Address::repeat_byte(0x11),
            NetworkMode::Mainnet,
        )
        .with_rpc_url("http://localhost:7546");

        assert_eq!(config.network.chain_id, 295);
        assert_eq!(config.network.rpc_url, "http://localhost:7546");
    }

    #[test]
    fn test_default_timeouts() {
        let timeouts = PipelineTimeouts::default();
        assert_eq!(timeouts.confirmation, Duration::from_secs(120));
        assert_eq!(timeouts.poll_interval, Duration::from_secs(2));
    }
}
