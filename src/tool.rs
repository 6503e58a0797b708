//! Tool and plugin types exposed to the host application

use crate::config::SignerConfig;
use crate::constants::{PLUGIN_NAME, PLUGIN_VERSION, SIGN_AND_SEND_WITH_VINCENT_TOOL};
use crate::pipeline::SignAndSendPipeline;
use crate::provider::NetworkProvider;
use crate::signer::SigningDelegate;
use crate::types::{ExecutionResult, SignAndSendParams};
use async_trait::async_trait;
use eyre::Result;
use std::sync::Arc;
use tracing::Instrument;

/// Per-invocation context supplied by the host
#[derive(Debug, Clone, Default)]
pub struct ToolContext {
    /// Host-side request identifier, attached to the invocation's log span
    pub request_id: Option<String>,
}

impl ToolContext {
    pub fn with_request_id(request_id: impl Into<String>) -> Self {
        Self {
            request_id: Some(request_id.into()),
        }
    }
}

/// A named capability the host can route calls to
#[async_trait]
pub trait Tool: Send + Sync {
    /// Stable identifier used for routing.
    fn method(&self) -> &str;

    /// Human-readable name.
    fn name(&self) -> &str;

    /// What the tool does.
    fn description(&self) -> &str;

    /// JSON Schema for the tool's parameters.
    fn parameters_schema(&self) -> serde_json::Value;

    /// Execute the tool. Failures are reported inside the result.
    async fn execute(&self, ctx: &ToolContext, params: serde_json::Value) -> ExecutionResult;
}

/// Signs a transaction with Vincent and broadcasts it to Hedera
pub struct SignAndSendTool<P: NetworkProvider, D: SigningDelegate> {
    pipeline: SignAndSendPipeline<P, D>,
}

impl<P: NetworkProvider, D: SigningDelegate> SignAndSendTool<P, D> {
    pub fn new(pipeline: SignAndSendPipeline<P, D>) -> Self {
        Self { pipeline }
    }
}

#[async_trait]
impl<P, D> Tool for SignAndSendTool<P, D>
where
    P: NetworkProvider + 'static,
    D: SigningDelegate + 'static,
{
    fn method(&self) -> &str {
        SIGN_AND_SEND_WITH_VINCENT_TOOL
    }

    fn name(&self) -> &str {
        "Sign and Send Transaction with Vincent"
    }

    fn description(&self) -> &str {
        "Signs a transaction using Vincent and broadcasts it to the Hedera network based on a user intent."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "intent": {
                    "type": "object",
                    "description": "The transaction intent object.",
                    "properties": {
                        "action": {
                            "type": "string",
                            "enum": ["transfer", "contractCall"]
                        },
                        "to": {
                            "type": "string",
                            "description": "The recipient's address."
                        },
                        "amount": {
                            "type": "string",
                            "description": "The amount of HBAR to transfer for a \"transfer\" action."
                        },
                        "data": {
                            "type": "string",
                            "description": "The data for a \"contractCall\" action."
                        }
                    },
                    "required": ["action", "to"]
                }
            },
            "required": ["intent"]
        })
    }

    async fn execute(&self, ctx: &ToolContext, params: serde_json::Value) -> ExecutionResult {
        let span = tracing::info_span!(
            "tool",
            method = SIGN_AND_SEND_WITH_VINCENT_TOOL,
            request_id = ctx.request_id.as_deref().unwrap_or("-")
        );

        let params: SignAndSendParams = match serde_json::from_value(params) {
            Ok(params) => params,
            Err(e) => {
                span.in_scope(|| tracing::warn!("Rejected tool parameters: {}", e));
                return ExecutionResult::error(format!("Invalid parameters: {}", e));
            }
        };

        self.pipeline.execute(&params.intent).instrument(span).await
    }
}

/// A named, versioned bundle of tools
pub struct Plugin {
    pub name: String,
    pub version: String,
    pub description: String,
    tools: Vec<Arc<dyn Tool>>,
}

impl Plugin {
    /// Tools provided by this plugin
    pub fn tools(&self) -> &[Arc<dyn Tool>] {
        &self.tools
    }

    /// Look up a tool by its routing identifier
    pub fn tool(&self, method: &str) -> Option<Arc<dyn Tool>> {
        self.tools.iter().find(|t| t.method() == method).cloned()
    }
}

/// Build the Vincent signer plugin around an existing pipeline
pub fn vincent_signer_plugin<P, D>(pipeline: SignAndSendPipeline<P, D>) -> Plugin
where
    P: NetworkProvider + 'static,
    D: SigningDelegate + 'static,
{
    Plugin {
        name: PLUGIN_NAME.to_string(),
        version: PLUGIN_VERSION.to_string(),
        description: "A plugin to sign and send transactions using the Vincent platform."
            .to_string(),
        tools: vec![Arc::new(SignAndSendTool::new(pipeline))],
    }
}

/// Build the Vincent signer plugin against the Hedera relay and a Vincent API endpoint
pub fn create_vincent_signer_plugin(
    config: Arc<SignerConfig>,
    vincent_api_url: impl Into<String>,
) -> Result<Plugin> {
    let pipeline = SignAndSendPipeline::vincent(config, vincent_api_url)?;
    Ok(vincent_signer_plugin(pipeline))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NetworkMode;
    use crate::pipeline::tests::{
        signed_response, test_config, CallLog, Failure, FakeDelegate, FakeProvider,
    };
    use serde_json::json;
    use std::sync::Mutex;

    fn plugin(log: &CallLog) -> Plugin {
        let pipeline = SignAndSendPipeline::new(
            test_config(NetworkMode::Testnet),
            FakeProvider {
                log: log.clone(),
                failure: Failure::None,
            },
            FakeDelegate {
                log: log.clone(),
                response: signed_response(),
                failure: Failure::None,
                requests: Arc::new(Mutex::new(Vec::new())),
            },
        );
        vincent_signer_plugin(pipeline)
    }

    #[test]
    fn test_plugin_metadata() {
        let plugin = plugin(&CallLog::default());
        assert_eq!(plugin.name, "vincent-signer-plugin");
        assert_eq!(plugin.version, "1.0.0");
        assert_eq!(plugin.tools().len(), 1);

        let tool = plugin.tool("sign_and_send_with_vincent_tool").unwrap();
        assert_eq!(tool.name(), "Sign and Send Transaction with Vincent");
        assert_eq!(
            tool.parameters_schema()["properties"]["intent"]["properties"]["action"]["enum"],
            json!(["transfer", "contractCall"])
        );
        assert!(plugin.tool("unknown_tool").is_none());
    }

    #[tokio::test]
    async fn test_execute_transfer() {
        let log = CallLog::default();
        let tool = plugin(&log).tool(SIGN_AND_SEND_WITH_VINCENT_TOOL).unwrap();

        let result = tool
            .execute(
                &ToolContext::with_request_id("req-1"),
                json!({ "intent": { "action": "transfer", "to": format!("0x{}", "ab".repeat(20)), "amount": "1.5" } }),
            )
            .await;

        assert!(result.is_success());
        assert!(result
            .result
            .starts_with("Transaction successful with hash: 0x"));
    }

    #[tokio::test]
    async fn test_execute_unsupported_action() {
        let log = CallLog::default();
        let tool = plugin(&log).tool(SIGN_AND_SEND_WITH_VINCENT_TOOL).unwrap();

        let result = tool
            .execute(
                &ToolContext::default(),
                json!({ "intent": { "action": "burn", "to": "0xabc" } }),
            )
            .await;

        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({ "result": "Error: Invalid transaction action." })
        );
        assert!(log.calls().is_empty());
    }

    #[tokio::test]
    async fn test_execute_malformed_params() {
        let log = CallLog::default();
        let tool = plugin(&log).tool(SIGN_AND_SEND_WITH_VINCENT_TOOL).unwrap();

        let result = tool
            .execute(&ToolContext::default(), json!({ "to": "0xabc" }))
            .await;

        assert!(result.result.starts_with("Error: Invalid parameters:"));
        assert_eq!(result.transaction_hash, None);
        assert!(log.calls().is_empty());
    }
}
