//! Transaction intent types for the tool input

use serde::{Deserialize, Serialize};
use std::fmt;

/// What the caller wants the transaction to do
///
/// Unknown wire values are kept as [`TransactionAction::Unsupported`] so the
/// pipeline can answer them with a structured error instead of a parse fault.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TransactionAction {
    /// Plain value transfer
    Transfer,
    /// Call into a contract with opaque calldata
    ContractCall,
    /// Any other action string
    Unsupported(String),
}

impl TransactionAction {
    pub fn as_str(&self) -> &str {
        match self {
            TransactionAction::Transfer => "transfer",
            TransactionAction::ContractCall => "contractCall",
            TransactionAction::Unsupported(other) => other,
        }
    }
}

impl From<String> for TransactionAction {
    fn from(value: String) -> Self {
        match value.as_str() {
            "transfer" => TransactionAction::Transfer,
            "contractCall" => TransactionAction::ContractCall,
            _ => TransactionAction::Unsupported(value),
        }
    }
}

impl From<&str> for TransactionAction {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<TransactionAction> for String {
    fn from(action: TransactionAction) -> Self {
        action.as_str().to_string()
    }
}

impl fmt::Display for TransactionAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A caller-supplied transaction intent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionIntent {
    /// Transfer or contract call
    pub action: TransactionAction,
    /// Recipient address
    pub to: String,
    /// Amount of HBAR to transfer (transfer only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<String>,
    /// Hex calldata (contract call only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
}

impl TransactionIntent {
    /// Create a transfer intent
    pub fn transfer(to: impl Into<String>, amount: impl Into<String>) -> Self {
        Self {
            action: TransactionAction::Transfer,
            to: to.into(),
            amount: Some(amount.into()),
            data: None,
        }
    }

    /// Create a contract call intent
    pub fn contract_call(to: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            action: TransactionAction::ContractCall,
            to: to.into(),
            amount: None,
            data: Some(data.into()),
        }
    }
}

/// Tool parameters: `{ "intent": { ... } }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignAndSendParams {
    /// The transaction intent object
    pub intent: TransactionIntent,
}
