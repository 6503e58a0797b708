//! SignAndSendPipeline - intent in, confirmed transaction hash out
//!
//! Stages run strictly in sequence:
//! `Received -> Compiled -> Signed -> Broadcast -> Confirmed`.
//! Any failure stops the run at its stage and is returned as a
//! [`PipelineError`]; [`SignAndSendPipeline::execute`] turns that into an
//! [`ExecutionResult`] so callers never see a fault.

use crate::compiler::{TxPlan, UnsignedTransaction};
use crate::config::SignerConfig;
use crate::error::{PipelineError, Stage};
use crate::provider::{NetworkProvider, RpcProvider};
use crate::signer::{SigningDelegate, SigningRequest, VincentDelegate};
use crate::types::{ExecutionResult, TransactionIntent};
use alloy::primitives::{Bytes, TxHash};
use eyre::Result;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

/// Run a stage future under a time bound
async fn within<T>(limit: Duration, what: &str, fut: impl Future<Output = Result<T>>) -> Result<T> {
    match tokio::time::timeout(limit, fut).await {
        Ok(result) => result,
        Err(_) => eyre::bail!("{} timed out after {:?}", what, limit),
    }
}

/// Sign-and-send pipeline bound to one immutable [`SignerConfig`]
///
/// Holds no per-invocation state, so one instance can serve concurrent runs.
/// Concurrent runs for the same delegator may read the same nonce; that is
/// left to the caller and the network to resolve.
pub struct SignAndSendPipeline<P: NetworkProvider, D: SigningDelegate> {
    config: Arc<SignerConfig>,
    provider: P,
    delegate: D,
}

impl SignAndSendPipeline<RpcProvider, VincentDelegate> {
    /// Pipeline against the configured Hedera relay and a Vincent API endpoint
    pub fn vincent(config: Arc<SignerConfig>, vincent_api_url: impl Into<String>) -> Result<Self> {
        let provider = RpcProvider::new(&config.network, &config.timeouts)?;
        let delegate = VincentDelegate::new(vincent_api_url, config.delegatee.clone())?;
        Ok(Self::new(config, provider, delegate))
    }
}

impl<P: NetworkProvider, D: SigningDelegate> SignAndSendPipeline<P, D> {
    pub fn new(config: Arc<SignerConfig>, provider: P, delegate: D) -> Self {
        Self {
            config,
            provider,
            delegate,
        }
    }

    /// Get the signer configuration
    pub fn config(&self) -> &SignerConfig {
        &self.config
    }

    // ========== Stages ==========

    /// Validate the intent, fetch fee and nonce, and build the unsigned transaction
    ///
    /// The intent is checked before any RPC call, so an unsupported action
    /// never reaches the network.
    pub async fn compile(
        &self,
        intent: &TransactionIntent,
    ) -> Result<UnsignedTransaction, PipelineError> {
        let plan = TxPlan::from_intent(intent)?;
        let limit = self.config.timeouts.rpc;

        let fees = within(limit, "Fee lookup", self.provider.fee_data())
            .await
            .map_err(PipelineError::FeeOrNonceLookup)?;
        let nonce = within(
            limit,
            "Nonce lookup",
            self.provider
                .transaction_count(self.config.delegator_pkp_eth_address),
        )
        .await
        .map_err(PipelineError::FeeOrNonceLookup)?;

        let unsigned = plan.into_unsigned(self.config.network.chain_id, fees, nonce);
        tracing::info!(
            "Compiled {} to {:?}: chain {} nonce {} gas {} @ {}",
            intent.action,
            unsigned.to(),
            unsigned.chain_id(),
            unsigned.nonce(),
            unsigned.gas_limit(),
            unsigned.gas_price()
        );

        Ok(unsigned)
    }

    /// Ask the signing delegate to sign on the delegator's behalf
    pub async fn sign(&self, unsigned: &UnsignedTransaction) -> Result<Bytes, PipelineError> {
        let request = SigningRequest::evm_transaction(
            unsigned.serialized(),
            self.config.delegator_pkp_eth_address,
        );

        let response = within(
            self.config.timeouts.signing,
            "Signing request",
            self.delegate.execute(request),
        )
        .await
        .map_err(PipelineError::SigningDelegate)?;

        let signed = response
            .into_signed_transaction()
            .map_err(PipelineError::SigningDelegate)?;
        tracing::info!("Received signed transaction ({} bytes)", signed.len());

        Ok(signed)
    }

    /// Broadcast the signed transaction and wait for its receipt
    pub async fn broadcast(&self, signed: Bytes) -> Result<TxHash, PipelineError> {
        let timeouts = &self.config.timeouts;

        let tx_hash = within(timeouts.rpc, "Broadcast", self.provider.broadcast(signed))
            .await
            .map_err(PipelineError::Broadcast)?;
        tracing::info!("Broadcast transaction {}", tx_hash);

        let confirmation = within(
            timeouts.confirmation,
            "Confirmation",
            self.provider.wait_for_confirmation(tx_hash),
        )
        .await
        .map_err(PipelineError::Broadcast)?;
        tracing::info!(
            "Transaction {} confirmed in block {:?} (gas used {})",
            tx_hash,
            confirmation.block_number,
            confirmation.gas_used
        );

        Ok(tx_hash)
    }

    // ========== Orchestration ==========

    /// Run all stages, returning the confirmed hash or the failing stage's error
    pub async fn run(&self, intent: &TransactionIntent) -> Result<TxHash, PipelineError> {
        tracing::debug!("Pipeline {} for {}", Stage::Received, intent.action);

        let unsigned = self.compile(intent).await?;
        let signed = self.sign(&unsigned).await?;
        let tx_hash = self.broadcast(signed).await?;

        tracing::debug!("Pipeline {} for {}", Stage::Confirmed, tx_hash);
        Ok(tx_hash)
    }

    /// Run the pipeline and convert any failure into an error result
    pub async fn execute(&self, intent: &TransactionIntent) -> ExecutionResult {
        match self.run(intent).await {
            Ok(tx_hash) => ExecutionResult::success(tx_hash),
            Err(err) => {
                tracing::error!(
                    stage = %err.stage(),
                    kind = err.kind(),
                    "[VincentSignerTool] Error: {}",
                    err
                );
                ExecutionResult::from(err)
            }
        }
    }
}
