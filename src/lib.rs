//! Vincent signer for Hedera
//!
//! Turns a transaction intent into a signed, broadcast and confirmed Hedera EVM
//! transaction. Signing is delegated to Vincent: the crate only ever holds the
//! delegatee identity, never the delegator's key.
//!
//! # Features
//!
//! - Compile `transfer` / `contractCall` intents into legacy EIP-155 transactions
//! - Delegate signing to the `evm-transaction-signer` ability
//! - Broadcast to the Hashio relay and wait for the receipt
//! - Expose the whole flow as a single plugin tool
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use vincent_signer::{SignAndSendPipeline, SignerConfig, TransactionIntent};
//!
//! #[tokio::main]
//! async fn main() -> eyre::Result<()> {
//!     let config = Arc::new(SignerConfig::from_env()?);
//!     let pipeline = SignAndSendPipeline::vincent(config, "https://vincent.example/api")?;
//!
//!     let result = pipeline
//!         .execute(&TransactionIntent::transfer("0x...", "1.5"))
//!         .await;
//!     println!("{}", result.result);
//!
//!     Ok(())
//! }
//! ```

pub mod compiler;
pub mod config;
pub mod constants;
pub mod error;
pub mod pipeline;
pub mod provider;
pub mod signer;
pub mod tool;
pub mod types;

// Re-export main types for convenience
pub use compiler::{FeeData, TxPlan, UnsignedTransaction};
pub use config::{NetworkConfig, NetworkMode, PipelineTimeouts, SignerConfig};
pub use error::{eyre, Context, PipelineError, Report, Result, Stage};
pub use pipeline::SignAndSendPipeline;
pub use provider::{Confirmation, NetworkProvider, RpcProvider};
pub use signer::{SigningDelegate, SigningRequest, SigningResponse, VincentDelegate};
pub use tool::{
    create_vincent_signer_plugin, vincent_signer_plugin, Plugin, SignAndSendTool, Tool,
    ToolContext,
};
pub use types::{ExecutionResult, SignAndSendParams, TransactionAction, TransactionIntent};
