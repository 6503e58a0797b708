//! Tool output returned for every invocation

use crate::error::PipelineError;
use alloy::primitives::TxHash;
use serde::{Deserialize, Serialize};

/// Outcome of one sign-and-send run
///
/// `transaction_hash` is set only once the transaction has been confirmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionResult {
    /// Human-readable status; failures start with `Error:`
    pub result: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_hash: Option<String>,
}

impl ExecutionResult {
    /// Confirmed transaction
    pub fn success(hash: TxHash) -> Self {
        let hash = hash.to_string();
        Self {
            result: format!("Transaction successful with hash: {}", hash),
            transaction_hash: Some(hash),
        }
    }

    /// Failure with a narrative; never carries a hash
    pub fn error(message: impl std::fmt::Display) -> Self {
        Self {
            result: format!("Error: {}", message),
            transaction_hash: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.transaction_hash.is_some()
    }
}

impl From<PipelineError> for ExecutionResult {
    fn from(err: PipelineError) -> Self {
        Self::error(err)
    }
}

impl From<Result<TxHash, PipelineError>> for ExecutionResult {
    fn from(outcome: Result<TxHash, PipelineError>) -> Self {
        match outcome {
            Ok(hash) => Self::success(hash),
            Err(err) => err.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_serialization() {
        let hash = TxHash::repeat_byte(0xab);
        let result = ExecutionResult::success(hash);
        let expected_hash = format!("0x{}", "ab".repeat(32));

        assert!(result.is_success());
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({
                "result": format!("Transaction successful with hash: {}", expected_hash),
                "transactionHash": expected_hash,
            })
        );
    }

    #[test]
    fn test_error_has_no_hash() {
        let result: ExecutionResult =
            PipelineError::InvalidIntent("Invalid transaction action.".into()).into();

        assert!(!result.is_success());
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({ "result": "Error: Invalid transaction action." })
        );
    }
}
