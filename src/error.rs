//! Error types for the Vincent signer
//!
//! Collaborator adapters (RPC provider, signing delegate) use `eyre` for
//! ergonomic error handling with context. The pipeline classifies those
//! failures into [`PipelineError`] by the stage that produced them.

pub use eyre::{eyre, Context, Report, Result};

use std::fmt;
use thiserror::Error;

/// Pipeline stages, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Received,
    Compiled,
    Signed,
    Broadcast,
    Confirmed,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Received => "received",
            Stage::Compiled => "compiled",
            Stage::Signed => "signed",
            Stage::Broadcast => "broadcast",
            Stage::Confirmed => "confirmed",
        };
        f.write_str(name)
    }
}

/// A failed pipeline run
///
/// `Display` yields the bare narrative; the `Error: ` prefix is added when
/// the error is turned into an [`ExecutionResult`](crate::ExecutionResult).
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Unknown action or an intent field that cannot be compiled
    #[error("{0}")]
    InvalidIntent(String),

    /// Fee or nonce could not be fetched from the RPC provider
    #[error("{0:#}")]
    FeeOrNonceLookup(Report),

    /// The signing delegate returned no usable signed transaction
    #[error("{0:#}")]
    SigningDelegate(Report),

    /// The network rejected the transaction or confirmation failed
    #[error("{0:#}")]
    Broadcast(Report),
}

impl PipelineError {
    /// Stage at which the pipeline terminated
    pub fn stage(&self) -> Stage {
        match self {
            PipelineError::InvalidIntent(_) | PipelineError::FeeOrNonceLookup(_) => {
                Stage::Compiled
            }
            PipelineError::SigningDelegate(_) => Stage::Signed,
            PipelineError::Broadcast(_) => Stage::Broadcast,
        }
    }

    /// Short name of the error kind, used in logs
    pub fn kind(&self) -> &'static str {
        match self {
            PipelineError::InvalidIntent(_) => "invalid_intent",
            PipelineError::FeeOrNonceLookup(_) => "fee_or_nonce_lookup",
            PipelineError::SigningDelegate(_) => "signing_delegate",
            PipelineError::Broadcast(_) => "broadcast",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_intent_display_is_bare_narrative() {
        let err = PipelineError::InvalidIntent("Invalid transaction action.".into());
        assert_eq!(err.to_string(), "Invalid transaction action.");
        assert_eq!(err.stage(), Stage::Compiled);
    }

    #[test]
    fn test_report_errors_include_context_chain() {
        let source = eyre!("connection refused").wrap_err("Failed to get gas price");
        let err = PipelineError::FeeOrNonceLookup(source);
        assert_eq!(err.to_string(), "Failed to get gas price: connection refused");
    }

    #[test]
    fn test_stage_per_kind() {
        assert_eq!(
            PipelineError::SigningDelegate(eyre!("no result")).stage(),
            Stage::Signed
        );
        assert_eq!(
            PipelineError::Broadcast(eyre!("reverted")).stage(),
            Stage::Broadcast
        );
        assert_eq!(PipelineError::Broadcast(eyre!("x")).kind(), "broadcast");
    }

    #[test]
    fn test_stage_display() {
        assert_eq!(Stage::Compiled.to_string(), "compiled");
        assert_eq!(Stage::Confirmed.to_string(), "confirmed");
    }
}
