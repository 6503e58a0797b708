//! RPC provider abstraction: fee data, nonces, broadcast and confirmation

use crate::compiler::FeeData;
use crate::config::{NetworkConfig, PipelineTimeouts};
use alloy::network::Ethereum;
use alloy::primitives::{Address, Bytes, TxHash};
use alloy::providers::{Provider, ProviderBuilder};
use alloy::rpc::types::TransactionReceipt;
use alloy::transports::http::reqwest::Url;
use eyre::{Context, Result};
use std::sync::Arc;
use std::time::Duration;

/// Receipt summary for a confirmed transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Confirmation {
    pub tx_hash: TxHash,
    pub block_number: Option<u64>,
    pub gas_used: u64,
}

impl Confirmation {
    /// Accept a receipt only if the transaction succeeded
    pub fn from_receipt(receipt: &TransactionReceipt) -> Result<Self> {
        if !receipt.status() {
            eyre::bail!(
                "transaction execution reverted: {}",
                receipt.transaction_hash
            );
        }

        Ok(Self {
            tx_hash: receipt.transaction_hash,
            block_number: receipt.block_number,
            gas_used: receipt.gas_used,
        })
    }
}

/// Network access needed by the pipeline
pub trait NetworkProvider: Send + Sync {
    /// Current fee data
    fn fee_data(&self) -> impl std::future::Future<Output = Result<FeeData>> + Send;

    /// Nonce for the next transaction from `address`
    fn transaction_count(
        &self,
        address: Address,
    ) -> impl std::future::Future<Output = Result<u64>> + Send;

    /// Submit a signed raw transaction, returning its hash
    fn broadcast(&self, signed: Bytes) -> impl std::future::Future<Output = Result<TxHash>> + Send;

    /// Wait until the transaction is included and succeeded
    fn wait_for_confirmation(
        &self,
        tx_hash: TxHash,
    ) -> impl std::future::Future<Output = Result<Confirmation>> + Send;
}

/// JSON-RPC provider for the Hedera relay
pub struct RpcProvider {
    /// Read-only provider without fillers (transactions arrive already signed)
    provider: Arc<dyn Provider<Ethereum>>,
    poll_interval: Duration,
    max_attempts: u32,
}

impl RpcProvider {
    /// Connect to the relay configured for the network
    pub fn new(network: &NetworkConfig, timeouts: &PipelineTimeouts) -> Result<Self> {
        let url: Url = network.rpc_url.parse().context("Invalid RPC URL")?;
        let provider = ProviderBuilder::new()
            .disable_recommended_fillers()
            .network::<Ethereum>()
            .connect_http(url);

        Ok(Self {
            provider: Arc::new(provider),
            poll_interval: timeouts.poll_interval,
            max_attempts: poll_attempts(timeouts.confirmation, timeouts.poll_interval),
        })
    }
}

/// Number of receipt polls that fit in the confirmation window
fn poll_attempts(window: Duration, interval: Duration) -> u32 {
    if interval.is_zero() {
        return 1;
    }
    let attempts = window.as_millis() / interval.as_millis().max(1);
    attempts.clamp(1, u32::MAX as u128) as u32
}

impl NetworkProvider for RpcProvider {
    async fn fee_data(&self) -> Result<FeeData> {
        let gas_price = self
            .provider
            .get_gas_price()
            .await
            .context("Failed to get gas price")?;

        Ok(FeeData { gas_price })
    }

    async fn transaction_count(&self, address: Address) -> Result<u64> {
        let nonce = self
            .provider
            .get_transaction_count(address)
            .await
            .context("Failed to get transaction count")?;

        Ok(nonce)
    }

    async fn broadcast(&self, signed: Bytes) -> Result<TxHash> {
        let pending = self
            .provider
            .send_raw_transaction(&signed)
            .await
            .context("Failed to broadcast transaction")?;

        Ok(*pending.tx_hash())
    }

    async fn wait_for_confirmation(&self, tx_hash: TxHash) -> Result<Confirmation> {
        for attempt in 0..self.max_attempts {
            let receipt: Option<TransactionReceipt> = self
                .provider
                .get_transaction_receipt(tx_hash)
                .await
                .context("Failed to get transaction receipt")?;

            if let Some(receipt) = receipt {
                return Confirmation::from_receipt(&receipt);
            }

            tracing::debug!(
                "Receipt for {} not found (attempt {}/{})",
                tx_hash,
                attempt + 1,
                self.max_attempts
            );
            tokio::time::sleep(self.poll_interval).await;
        }

        eyre::bail!("Transaction receipt not found after timeout: {}", tx_hash)
    }
}
