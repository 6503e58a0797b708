//! Sign and send one transaction through the Vincent signer plugin
//!
//! Run with:
//!   cargo run --example sign_and_send -- transfer 0xRecipient 1.5
//!   cargo run --example sign_and_send -- contractCall 0xContract 0x1234
//!
//! Requires VINCENT_DELEGATEE_PRIVATE_KEY, VINCENT_DELEGATOR_PKP_ETH_ADDRESS
//! and VINCENT_API_URL; HEDERA_NETWORK defaults to testnet.

use std::sync::Arc;

use eyre::Context;
use vincent_signer::constants::SIGN_AND_SEND_WITH_VINCENT_TOOL;
use vincent_signer::{create_vincent_signer_plugin, SignerConfig, Tool, ToolContext};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Load environment
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let mut args = std::env::args().skip(1);
    let (Some(action), Some(to)) = (args.next(), args.next()) else {
        eyre::bail!("usage: sign_and_send <transfer|contractCall> <to> [amount|data]");
    };
    let extra = args.next();

    let config = Arc::new(SignerConfig::from_env()?);
    let vincent_api_url = std::env::var("VINCENT_API_URL").context("VINCENT_API_URL must be set")?;

    println!("\n========================================");
    println!("     Vincent Signer - Sign and Send");
    println!("========================================");
    println!("Delegatee: {}", config.delegatee_address());
    println!("Delegator: {}", config.delegator_pkp_eth_address);
    println!(
        "Network:   {:?} (chain {})",
        config.network_mode, config.network.chain_id
    );

    let plugin = create_vincent_signer_plugin(config, vincent_api_url)?;
    let tool = plugin
        .tool(SIGN_AND_SEND_WITH_VINCENT_TOOL)
        .ok_or_else(|| eyre::eyre!("{} tool not registered", SIGN_AND_SEND_WITH_VINCENT_TOOL))?;

    let mut intent = serde_json::json!({ "action": &action, "to": to });
    match (action.as_str(), extra) {
        ("transfer", Some(amount)) => intent["amount"] = amount.into(),
        ("contractCall", Some(data)) => intent["data"] = data.into(),
        _ => {}
    }

    let result = tool
        .execute(
            &ToolContext::with_request_id("demo"),
            serde_json::json!({ "intent": intent }),
        )
        .await;

    println!("\n{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
