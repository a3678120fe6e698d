//! User operations of both entry point versions and the RPC types built around them

mod hash;
mod request;
mod v0_6;
mod v0_7;

use crate::{entry_point::EntryPointVersion, utils::as_checksum_addr};
use ethers::types::{Address, Bytes, Log, TransactionReceipt, H256, U256, U64};
pub use hash::UserOperationHash;
pub use request::UserOperationPartial;
use serde::{Deserialize, Serialize};
pub use v0_6::UserOperationV06;
pub use v0_7::{PackedUserOperation, UserOperationV07};

/// User operation of either entry point version
///
/// The v0.6 variant is tried first when deserializing, as a v0.7 operation has no `initCode`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserOperation {
    V06(UserOperationV06),
    V07(UserOperationV07),
}

impl UserOperation {
    pub fn version(&self) -> EntryPointVersion {
        match self {
            Self::V06(_) => EntryPointVersion::V0_6,
            Self::V07(_) => EntryPointVersion::V0_7,
        }
    }

    pub fn sender(&self) -> Address {
        match self {
            Self::V06(uo) => uo.sender,
            Self::V07(uo) => uo.sender,
        }
    }

    pub fn nonce(&self) -> U256 {
        match self {
            Self::V06(uo) => uo.nonce,
            Self::V07(uo) => uo.nonce,
        }
    }

    pub fn signature(&self) -> &Bytes {
        match self {
            Self::V06(uo) => &uo.signature,
            Self::V07(uo) => &uo.signature,
        }
    }

    /// Replaces the signature, leaving every other field untouched
    pub fn with_signature(self, signature: Bytes) -> Self {
        match self {
            Self::V06(uo) => Self::V06(uo.signature(signature)),
            Self::V07(uo) => Self::V07(uo.signature(signature)),
        }
    }

    /// Calculates the hash the entry point at `entry_point` assigns to the user operation
    pub fn hash(&self, entry_point: &Address, chain_id: u64) -> UserOperationHash {
        match self {
            Self::V06(uo) => uo.hash(entry_point, chain_id),
            Self::V07(uo) => uo.hash(entry_point, chain_id),
        }
    }

    /// First gas field that would be truncated when packing (v0.7 only)
    pub fn oversized_gas_field(&self) -> Option<&'static str> {
        match self {
            Self::V06(_) => None,
            Self::V07(uo) => uo.oversized_gas_field(),
        }
    }

    /// Sets the gas price of the user operation
    pub fn with_gas_price(self, max_fee_per_gas: U256, max_priority_fee_per_gas: U256) -> Self {
        match self {
            Self::V06(uo) => Self::V06(
                uo.max_fee_per_gas(max_fee_per_gas)
                    .max_priority_fee_per_gas(max_priority_fee_per_gas),
            ),
            Self::V07(uo) => Self::V07(
                uo.max_fee_per_gas(max_fee_per_gas)
                    .max_priority_fee_per_gas(max_priority_fee_per_gas),
            ),
        }
    }
}

impl From<UserOperationV06> for UserOperation {
    fn from(value: UserOperationV06) -> Self {
        Self::V06(value)
    }
}

impl From<UserOperationV07> for UserOperation {
    fn from(value: UserOperationV07) -> Self {
        Self::V07(value)
    }
}

/// Receipt of the user operation (returned from the RPC endpoint eth_getUserOperationReceipt)
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserOperationReceipt {
    #[serde(rename = "userOpHash")]
    pub user_operation_hash: UserOperationHash,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry_point: Option<Address>,
    #[serde(serialize_with = "as_checksum_addr")]
    pub sender: Address,
    pub nonce: U256,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paymaster: Option<Address>,
    pub actual_gas_cost: U256,
    pub actual_gas_used: U256,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub logs: Vec<Log>,
    #[serde(rename = "receipt")]
    pub tx_receipt: TransactionReceipt,
}

/// Struct that is returned from the RPC endpoint eth_getUserOperationByHash
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserOperationByHash {
    pub user_operation: UserOperation,
    #[serde(serialize_with = "as_checksum_addr")]
    pub entry_point: Address,
    pub transaction_hash: H256,
    pub block_hash: H256,
    pub block_number: U64,
}

/// Gas estimations for user operation (returned from the RPC endpoint eth_estimateUserOperationGas)
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserOperationGasEstimation {
    pub pre_verification_gas: U256,
    pub verification_gas_limit: U256,
    pub call_gas_limit: U256,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paymaster_verification_gas_limit: Option<U256>,
}
