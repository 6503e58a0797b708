//! Constants for the Vincent signer tool

use alloy::primitives::utils::{parse_units, ParseUnits};
use alloy::primitives::U256;
use eyre::{Context, Result};

/// Native token (HBAR on the JSON-RPC relay) uses 18 decimals, like ETH
pub const NATIVE_DECIMALS: u8 = 18;

/// Hedera mainnet chain ID
pub const HEDERA_MAINNET_CHAIN_ID: u64 = 295;

/// Hedera testnet chain ID
pub const HEDERA_TESTNET_CHAIN_ID: u64 = 296;

/// Hashio JSON-RPC relay for mainnet
pub const HEDERA_MAINNET_RPC_URL: &str = "https://mainnet.hashio.io/api";

/// Hashio JSON-RPC relay for testnet
pub const HEDERA_TESTNET_RPC_URL: &str = "https://testnet.hashio.io/api";

/// Gas limit for a plain value transfer
pub const TRANSFER_GAS_LIMIT: u64 = 21_000;

/// Gas limit for a contract call
pub const CONTRACT_CALL_GAS_LIMIT: u64 = 300_000;

/// Vincent ability that signs serialized EVM transactions
pub const EVM_TRANSACTION_SIGNER_ABILITY: &str = "evm-transaction-signer";

/// Stable tool identifier used by the host for routing
pub const SIGN_AND_SEND_WITH_VINCENT_TOOL: &str = "sign_and_send_with_vincent_tool";

/// Plugin name
pub const PLUGIN_NAME: &str = "vincent-signer-plugin";

/// Plugin version
pub const PLUGIN_VERSION: &str = "1.0.0";

/// Parse a decimal amount of native tokens (e.g. "1.5") into its smallest unit
///
/// Amounts with more fractional digits than [`NATIVE_DECIMALS`] are rejected
/// rather than truncated.
pub fn parse_native_amount(amount: &str) -> Result<U256> {
    let trimmed = amount.trim();
    if let Some((_, fraction)) = trimmed.split_once('.') {
        if fraction.len() > NATIVE_DECIMALS as usize {
            eyre::bail!("Invalid amount: {amount}: too many decimals");
        }
    }

    let parsed = parse_units(trimmed, NATIVE_DECIMALS)
        .with_context(|| format!("Invalid amount: {amount}"))?;

    match parsed {
        ParseUnits::U256(value) => Ok(value),
        ParseUnits::I256(_) => eyre::bail!("Amount must not be negative: {amount}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_native_amount() {
        // 1.5 HBAR = 1.5 * 10^18
        let expected = U256::from(1_500_000_000_000_000_000u128);
        assert_eq!(parse_native_amount("1.5").unwrap(), expected);
        // 0 stays zero
        assert_eq!(parse_native_amount("0").unwrap(), U256::ZERO);
    }

    #[test]
    fn test_parse_native_amount_whole_units() {
        let expected = U256::from(42u64) * U256::from(10u64).pow(U256::from(18u64));
        assert_eq!(parse_native_amount("42").unwrap(), expected);
    }

    #[test]
    fn test_parse_native_amount_rejects_garbage() {
        assert!(parse_native_amount("one").is_err());
        assert!(parse_native_amount("-1").is_err());
        // 19 fractional digits would truncate
        assert!(parse_native_amount("0.0000000000000000001").is_err());
        assert!(parse_native_amount("1.0000000000000000005").is_err());
    }

    #[test]
    fn test_parse_native_amount_smallest_unit() {
        assert_eq!(
            parse_native_amount("0.000000000000000001").unwrap(),
            U256::from(1u64)
        );
    }
}
