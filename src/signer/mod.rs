//! Signing delegate abstraction
//!
//! The pipeline never holds the delegator's key. It hands the serialized
//! unsigned transaction to a [`SigningDelegate`], which asks an external
//! authorization service to sign on the delegator's behalf.
//!
//! - `VincentDelegate`: Vincent ability API over HTTP

mod vincent;

pub use vincent::VincentDelegate;

use crate::constants::EVM_TRANSACTION_SIGNER_ABILITY;
use alloy::primitives::{Address, Bytes};
use eyre::Result;
use serde::{Deserialize, Serialize};

/// Ability execution request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SigningRequest {
    /// Ability to run (`evm-transaction-signer`)
    pub ability: String,
    pub parameters: SigningParameters,
    pub options: SigningOptions,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SigningParameters {
    /// 0x-hex unsigned transaction
    pub serialized_transaction: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SigningOptions {
    /// Checksummed PKP address on whose behalf the transaction is signed
    pub delegator_pkp_eth_address: String,
}

impl SigningRequest {
    /// Request a signature for an EVM transaction
    pub fn evm_transaction(serialized_transaction: impl Into<String>, delegator: Address) -> Self {
        Self {
            ability: EVM_TRANSACTION_SIGNER_ABILITY.to_string(),
            parameters: SigningParameters {
                serialized_transaction: serialized_transaction.into(),
            },
            options: SigningOptions {
                delegator_pkp_eth_address: delegator.to_checksum(None),
            },
        }
    }
}

/// Ability execution response
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SigningResponse {
    #[serde(default)]
    pub result: Option<SignedResult>,
    /// Error message reported by the service, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedResult {
    #[serde(default)]
    pub signed_transaction: Option<String>,
}

impl SigningResponse {
    /// Extract the signed raw transaction, failing if the service gave none
    pub fn into_signed_transaction(self) -> Result<Bytes> {
        let signed = self
            .result
            .and_then(|r| r.signed_transaction)
            .filter(|tx| !tx.trim().is_empty());

        let Some(signed) = signed else {
            match self.error {
                Some(reason) => {
                    eyre::bail!("Failed to get signed transaction from Vincent: {}", reason)
                }
                None => eyre::bail!("Failed to get signed transaction from Vincent."),
            }
        };

        signed
            .trim()
            .parse::<Bytes>()
            .map_err(|e| eyre::eyre!("Vincent returned malformed signed transaction: {}", e))
    }
}

/// Trait for external signing services
///
/// Implementations authenticate as a delegatee and sign on behalf of the
/// delegator named in the request. They never expose key material.
pub trait SigningDelegate: Send + Sync {
    /// Execute a signing request against the service
    fn execute(
        &self,
        request: SigningRequest,
    ) -> impl std::future::Future<Output = Result<SigningResponse>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_wire_shape() {
        let delegator = Address::repeat_byte(0x22);
        let request = SigningRequest::evm_transaction("0xec09", delegator);

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "ability": "evm-transaction-signer",
                "parameters": { "serializedTransaction": "0xec09" },
                "options": { "delegatorPkpEthAddress": delegator.to_checksum(None) },
            })
        );
    }

    #[test]
    fn test_response_with_signed_transaction() {
        let response: SigningResponse = serde_json::from_value(json!({
            "result": { "signedTransaction": "0xf86c0980" }
        }))
        .unwrap();

        let signed = response.into_signed_transaction().unwrap();
        assert_eq!(signed.to_vec(), vec![0xf8, 0x6c, 0x09, 0x80]);
    }

    #[test]
    fn test_response_without_result() {
        let response: SigningResponse = serde_json::from_value(json!({})).unwrap();
        let err = response.into_signed_transaction().unwrap_err();
        assert_eq!(err.to_string(), "Failed to get signed transaction from Vincent.");
    }

    #[test]
    fn test_response_error_is_surfaced() {
        let response: SigningResponse = serde_json::from_value(json!({
            "result": null,
            "error": "delegatee not permitted"
        }))
        .unwrap();
        let err = response.into_signed_transaction().unwrap_err();
        assert!(err.to_string().contains("delegatee not permitted"));
    }
}
