//! Intent compiler: maps a [`TransactionIntent`] onto an unsigned Hedera EVM transaction
//!
//! Compilation is split in two so the intent is validated before any RPC call:
//! [`TxPlan::from_intent`] checks the action and parses the fields, and
//! [`TxPlan::into_unsigned`] fills in the live fee and nonce.

use crate::constants::{parse_native_amount, CONTRACT_CALL_GAS_LIMIT, TRANSFER_GAS_LIMIT};
use crate::error::PipelineError;
use crate::types::{TransactionAction, TransactionIntent};
use alloy::consensus::{SignableTransaction, TxLegacy};
use alloy::primitives::{Address, AddressError, Bytes, ChainId, TxKind, U256};

/// Live fee data from the RPC provider
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeeData {
    /// Current gas price in wei (weibar on Hedera)
    pub gas_price: u128,
}

/// Validated intent, waiting for chain data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxPlan {
    pub to: Address,
    pub value: U256,
    pub input: Bytes,
    pub gas_limit: u64,
}

impl TxPlan {
    /// Validate an intent and resolve its fields
    pub fn from_intent(intent: &TransactionIntent) -> Result<Self, PipelineError> {
        let (value, input, gas_limit) = match &intent.action {
            TransactionAction::Transfer => {
                let amount = intent.amount.as_deref().unwrap_or("0");
                let value = parse_native_amount(amount)
                    .map_err(|e| PipelineError::InvalidIntent(format!("{e:#}")))?;
                (value, Bytes::new(), TRANSFER_GAS_LIMIT)
            }
            TransactionAction::ContractCall => {
                let input = match intent.data.as_deref() {
                    Some(data) => data.trim().parse::<Bytes>().map_err(|e| {
                        PipelineError::InvalidIntent(format!("Invalid calldata {data}: {e}"))
                    })?,
                    None => Bytes::new(),
                };
                (U256::ZERO, input, CONTRACT_CALL_GAS_LIMIT)
            }
            TransactionAction::Unsupported(_) => {
                return Err(PipelineError::InvalidIntent(
                    "Invalid transaction action.".to_string(),
                ));
            }
        };

        let to = parse_recipient(&intent.to).map_err(|e| {
            PipelineError::InvalidIntent(format!("Invalid recipient address {}: {}", intent.to, e))
        })?;

        Ok(Self {
            to,
            value,
            input,
            gas_limit,
        })
    }

    /// Attach chain ID, gas price and nonce
    pub fn into_unsigned(self, chain_id: ChainId, fees: FeeData, nonce: u64) -> UnsignedTransaction {
        UnsignedTransaction {
            chain_id,
            inner: TxLegacy {
                chain_id: Some(chain_id),
                nonce,
                gas_price: fees.gas_price,
                gas_limit: self.gas_limit,
                to: TxKind::Call(self.to),
                value: self.value,
                input: self.input,
            },
        }
    }
}

/// Parse a recipient address, enforcing the EIP-55 checksum on mixed-case input
fn parse_recipient(to: &str) -> Result<Address, AddressError> {
    let to = to.trim();
    let digits = to.strip_prefix("0x").unwrap_or(to);
    let mixed_case = digits.chars().any(|c| c.is_ascii_lowercase())
        && digits.chars().any(|c| c.is_ascii_uppercase());

    if mixed_case {
        Address::parse_checksummed(to, None)
    } else {
        Ok(to.parse::<Address>()?)
    }
}

/// Legacy (type 0) transaction with EIP-155 replay protection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsignedTransaction {
    /// Always mirrored into `inner.chain_id`
    chain_id: ChainId,
    inner: TxLegacy,
}

impl UnsignedTransaction {
    pub fn chain_id(&self) -> ChainId {
        self.chain_id
    }

    pub fn nonce(&self) -> u64 {
        self.inner.nonce
    }

    pub fn gas_price(&self) -> u128 {
        self.inner.gas_price
    }

    pub fn gas_limit(&self) -> u64 {
        self.inner.gas_limit
    }

    pub fn to(&self) -> Option<Address> {
        self.inner.to.to().copied()
    }

    pub fn value(&self) -> U256 {
        self.inner.value
    }

    pub fn input(&self) -> &Bytes {
        &self.inner.input
    }

    /// Canonical signing payload:
    /// `rlp([nonce, gasPrice, gasLimit, to, value, data, chainId, 0, 0])`
    pub fn encoded_for_signing(&self) -> Bytes {
        Bytes::from(self.inner.encoded_for_signing())
    }

    /// Hex form handed to the signing delegate
    pub fn serialized(&self) -> String {
        alloy::hex::encode_prefixed(self.encoded_for_signing())
    }
}
