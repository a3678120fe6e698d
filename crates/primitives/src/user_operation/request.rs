//! User operation request (optional fields)

use super::{UserOperation, UserOperationV06, UserOperationV07};
use crate::utils::as_checksum_addr_opt;
use ethers::types::{Address, Bytes, U256};
use serde::{Deserialize, Serialize};

/// User operation with all fields being optional
///
/// Sent to `pm_sponsorUserOperation` and `eth_estimateUserOperationGas` before the gas limits are
/// known. Fields of both entry point versions are present, absent ones are not serialized.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserOperationPartial {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "as_checksum_addr_opt"
    )]
    pub sender: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nonce: Option<U256>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub init_code: Option<Bytes>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub factory: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub factory_data: Option<Bytes>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub call_data: Option<Bytes>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub call_gas_limit: Option<U256>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verification_gas_limit: Option<U256>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pre_verification_gas: Option<U256>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_fee_per_gas: Option<U256>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_priority_fee_per_gas: Option<U256>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paymaster_and_data: Option<Bytes>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paymaster: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paymaster_verification_gas_limit: Option<U256>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paymaster_post_op_gas_limit: Option<U256>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paymaster_data: Option<Bytes>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<Bytes>,
}

impl UserOperationPartial {
    /// Drops the gas limits so the service fills them in
    pub fn without_gas_limits(mut self) -> Self {
        self.call_gas_limit = None;
        self.verification_gas_limit = None;
        self.pre_verification_gas = None;
        self.paymaster_verification_gas_limit = None;
        self.paymaster_post_op_gas_limit = None;
        self
    }
}

impl From<UserOperationV06> for UserOperationPartial {
    fn from(uo: UserOperationV06) -> Self {
        Self {
            sender: Some(uo.sender),
            nonce: Some(uo.nonce),
            init_code: Some(uo.init_code),
            call_data: Some(uo.call_data),
            call_gas_limit: Some(uo.call_gas_limit),
            verification_gas_limit: Some(uo.verification_gas_limit),
            pre_verification_gas: Some(uo.pre_verification_gas),
            max_fee_per_gas: Some(uo.max_fee_per_gas),
            max_priority_fee_per_gas: Some(uo.max_priority_fee_per_gas),
            paymaster_and_data: Some(uo.paymaster_and_data),
            signature: Some(uo.signature),
            ..Default::default()
        }
    }
}

impl From<UserOperationV07> for UserOperationPartial {
    fn from(uo: UserOperationV07) -> Self {
        Self {
            sender: Some(uo.sender),
            nonce: Some(uo.nonce),
            factory: uo.factory,
            factory_data: uo.factory_data,
            call_data: Some(uo.call_data),
            call_gas_limit: Some(uo.call_gas_limit),
            verification_gas_limit: Some(uo.verification_gas_limit),
            pre_verification_gas: Some(uo.pre_verification_gas),
            max_fee_per_gas: Some(uo.max_fee_per_gas),
            max_priority_fee_per_gas: Some(uo.max_priority_fee_per_gas),
            paymaster: uo.paymaster,
            paymaster_verification_gas_limit: uo.paymaster_verification_gas_limit,
            paymaster_post_op_gas_limit: uo.paymaster_post_op_gas_limit,
            paymaster_data: uo.paymaster_data,
            signature: Some(uo.signature),
            ..Default::default()
        }
    }
}

impl From<UserOperation> for UserOperationPartial {
    fn from(uo: UserOperation) -> Self {
        match uo {
            UserOperation::V06(uo) => uo.into(),
            UserOperation::V07(uo) => uo.into(),
        }
    }
}
