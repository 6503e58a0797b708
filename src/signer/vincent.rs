//! Vincent ability signer implementation
//!
//! Sends ability execution requests to a Vincent API endpoint. Requests are
//! authenticated by the delegatee identity; the delegator's PKP performs the
//! actual transaction signature inside the Vincent network.

use super::{SigningDelegate, SigningRequest, SigningResponse};
use alloy::primitives::Address;
use alloy::signers::local::PrivateKeySigner;
use alloy::signers::Signer;
use eyre::{Context, Result};
use reqwest::Client;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

const EXECUTE_PATH: &str = "/abilities/execute";

/// Headers proving the request came from the delegatee
#[derive(Debug, Clone)]
struct AuthHeaders {
    timestamp: String,
    signature: String,
}

/// Vincent ability client
pub struct VincentDelegate {
    /// Base URL of the Vincent ability API
    base_url: String,
    /// Delegatee identity (authenticates requests, cannot sign transactions)
    delegatee: PrivateKeySigner,
    /// HTTP client
    client: Client,
}

impl VincentDelegate {
    /// Create a new VincentDelegate
    ///
    /// # Arguments
    ///
    /// * `base_url` - Vincent ability API base URL
    /// * `delegatee` - Delegatee signer the app was granted permission for
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let delegate = VincentDelegate::new(
    ///     "https://vincent.example/api",
    ///     config.delegatee.clone(),
    /// )?;
    /// ```
    pub fn new(base_url: impl Into<String>, delegatee: PrivateKeySigner) -> Result<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();

        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            base_url,
            delegatee,
            client,
        })
    }

    /// Delegatee address the requests are authenticated as
    pub fn delegatee_address(&self) -> Address {
        self.delegatee.address()
    }

    /// Sign the request body as the delegatee
    ///
    /// Format: `{path}|{timestamp}|{body}`, EIP-191 personal message
    async fn authenticate(&self, body: &str) -> Result<AuthHeaders> {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .context("System time error")?
            .as_millis()
            .to_string();

        let payload = auth_payload(&timestamp, body);
        let signature = self
            .delegatee
            .sign_message(payload.as_bytes())
            .await
            .context("Failed to sign request as delegatee")?;

        Ok(AuthHeaders {
            timestamp,
            signature: alloy::hex::encode_prefixed(signature.as_bytes()),
        })
    }
}

fn auth_payload(timestamp: &str, body: &str) -> String {
    format!("{}|{}|{}", EXECUTE_PATH, timestamp, body)
}

impl SigningDelegate for VincentDelegate {
    async fn execute(&self, request: SigningRequest) -> Result<SigningResponse> {
        let body = serde_json::to_string(&request).context("Failed to serialize request")?;
        let auth = self.authenticate(&body).await?;

        tracing::debug!(
            "Executing Vincent ability {} for delegator {}",
            request.ability,
            request.options.delegator_pkp_eth_address
        );

        let url = format!("{}{}", self.base_url, EXECUTE_PATH);
        let resp = self
            .client
            .post(&url)
            .header("X-Delegatee-Address", self.delegatee_address().to_checksum(None))
            .header("X-Timestamp", &auth.timestamp)
            .header("X-Signature", &auth.signature)
            .header("Content-Type", "application/json")
            .body(body)
            .send()
            .await
            .context("Failed to reach Vincent")?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            eyre::bail!("Vincent ability execution failed: {} - {}", status, body);
        }

        let response: SigningResponse = resp
            .json()
            .await
            .context("Failed to parse Vincent response")?;

        if response.result.is_none() {
            tracing::warn!("Vincent returned no result for {}", request.ability);
        }

        Ok(response)
    }
}
