//! User operation for the v0.7 entry point
//!
//! The v0.7 entry point receives a packed user operation on chain, while bundlers and paymasters
//! exchange the unpacked form over JSON-RPC.

use super::UserOperationHash;
use crate::utils::{as_checksum_addr, pack_init_code, pack_paymaster_and_data, pack_uint128};
use ethers::{
    abi::AbiEncode,
    contract::{EthAbiCodec, EthAbiType},
    types::{Address, Bytes, H256, U256},
    utils::keccak256,
};
use serde::{Deserialize, Serialize};

/// User operation (v0.7 entry point)
#[derive(Default, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserOperationV07 {
    #[serde(serialize_with = "as_checksum_addr")]
    pub sender: Address,
    pub nonce: U256,
    /// Account factory, only set when the account is not yet deployed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub factory: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub factory_data: Option<Bytes>,
    pub call_data: Bytes,
    pub call_gas_limit: U256,
    pub verification_gas_limit: U256,
    pub pre_verification_gas: U256,
    pub max_fee_per_gas: U256,
    pub max_priority_fee_per_gas: U256,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paymaster: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paymaster_verification_gas_limit: Option<U256>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paymaster_post_op_gas_limit: Option<U256>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paymaster_data: Option<Bytes>,
    pub signature: Bytes,
}

/// On-chain (packed) form of the user operation
#[derive(Default, Clone, Debug, PartialEq, Eq, EthAbiCodec, EthAbiType)]
pub struct PackedUserOperation {
    pub sender: Address,
    pub nonce: U256,
    pub init_code: Bytes,
    pub call_data: Bytes,
    pub account_gas_limits: H256,
    pub pre_verification_gas: U256,
    pub gas_fees: H256,
    pub paymaster_and_data: Bytes,
    pub signature: Bytes,
}

#[derive(EthAbiCodec, EthAbiType)]
struct PackedUserOperationNoSignature {
    pub sender: Address,
    pub nonce: U256,
    pub init_code: H256,
    pub call_data: H256,
    pub account_gas_limits: H256,
    pub pre_verification_gas: U256,
    pub gas_fees: H256,
    pub paymaster_and_data: H256,
}

impl From<&PackedUserOperation> for PackedUserOperationNoSignature {
    fn from(value: &PackedUserOperation) -> Self {
        Self {
            sender: value.sender,
            nonce: value.nonce,
            init_code: keccak256(&value.init_code).into(),
            call_data: keccak256(&value.call_data).into(),
            account_gas_limits: value.account_gas_limits,
            pre_verification_gas: value.pre_verification_gas,
            gas_fees: value.gas_fees,
            paymaster_and_data: keccak256(&value.paymaster_and_data).into(),
        }
    }
}

impl PackedUserOperation {
    /// Packs the user operation without signature to bytes (used for calculating the hash)
    pub fn pack_without_signature(&self) -> Bytes {
        PackedUserOperationNoSignature::from(self).encode().into()
    }

    /// Calculates the hash of the user operation
    pub fn hash(&self, entry_point: &Address, chain_id: u64) -> UserOperationHash {
        H256::from_slice(
            keccak256(
                [
                    keccak256(self.pack_without_signature()).to_vec(),
                    entry_point.encode(),
                    U256::from(chain_id).encode(),
                ]
                .concat(),
            )
            .as_slice(),
        )
        .into()
    }
}

impl UserOperationV07 {
    /// First gas field that does not fit the `uint128` it is packed into
    ///
    /// Packing keeps the low 128 bits only, so such a user operation hashes to a different value
    /// than the one its fields describe.
    pub fn oversized_gas_field(&self) -> Option<&'static str> {
        let max = U256::from(u128::MAX);
        [
            ("verificationGasLimit", Some(self.verification_gas_limit)),
            ("callGasLimit", Some(self.call_gas_limit)),
            ("maxPriorityFeePerGas", Some(self.max_priority_fee_per_gas)),
            ("maxFeePerGas", Some(self.max_fee_per_gas)),
            ("paymasterVerificationGasLimit", self.paymaster_verification_gas_limit),
            ("paymasterPostOpGasLimit", self.paymaster_post_op_gas_limit),
        ]
        .into_iter()
        .find_map(|(name, value)| value.filter(|v| *v > max).map(|_| name))
    }

    /// `factory ‖ factoryData`, empty when there is no factory
    pub fn init_code(&self) -> Bytes {
        pack_init_code(self.factory, &self.factory_data.clone().unwrap_or_default())
    }

    /// `uint128(verificationGasLimit) ‖ uint128(callGasLimit)`
    pub fn account_gas_limits(&self) -> H256 {
        pack_uint128(self.verification_gas_limit, self.call_gas_limit).into()
    }

    /// `uint128(maxPriorityFeePerGas) ‖ uint128(maxFeePerGas)`
    pub fn gas_fees(&self) -> H256 {
        pack_uint128(self.max_priority_fee_per_gas, self.max_fee_per_gas).into()
    }

    /// `paymaster ‖ uint128(verificationGas) ‖ uint128(postOpGas) ‖ paymasterData`, empty when
    /// there is no paymaster
    pub fn paymaster_and_data(&self) -> Bytes {
        pack_paymaster_and_data(
            self.paymaster,
            self.paymaster_verification_gas_limit.unwrap_or_default(),
            self.paymaster_post_op_gas_limit.unwrap_or_default(),
            &self.paymaster_data.clone().unwrap_or_default(),
        )
    }

    pub fn pack(&self) -> PackedUserOperation {
        PackedUserOperation {
            sender: self.sender,
            nonce: self.nonce,
            init_code: self.init_code(),
            call_data: self.call_data.clone(),
            account_gas_limits: self.account_gas_limits(),
            pre_verification_gas: self.pre_verification_gas,
            gas_fees: self.gas_fees(),
            paymaster_and_data: self.paymaster_and_data(),
            signature: self.signature.clone(),
        }
    }

    /// Calculates the hash of the user operation
    pub fn hash(&self, entry_point: &Address, chain_id: u64) -> UserOperationHash {
        self.pack().hash(entry_point, chain_id)
    }

    pub fn sender(mut self, sender: Address) -> Self {
        self.sender = sender;
        self
    }

    pub fn nonce(mut self, nonce: U256) -> Self {
        self.nonce = nonce;
        self
    }

    /// Sets the factory and its calldata
    pub fn factory(mut self, factory: Address, factory_data: Bytes) -> Self {
        self.factory = Some(factory);
        self.factory_data = Some(factory_data);
        self
    }

    pub fn call_data(mut self, call_data: Bytes) -> Self {
        self.call_data = call_data;
        self
    }

    pub fn call_gas_limit(mut self, call_gas_limit: U256) -> Self {
        self.call_gas_limit = call_gas_limit;
        self
    }

    pub fn verification_gas_limit(mut self, verification_gas_limit: U256) -> Self {
        self.verification_gas_limit = verification_gas_limit;
        self
    }

    pub fn pre_verification_gas(mut self, pre_verification_gas: U256) -> Self {
        self.pre_verification_gas = pre_verification_gas;
        self
    }

    pub fn max_fee_per_gas(mut self, max_fee_per_gas: U256) -> Self {
        self.max_fee_per_gas = max_fee_per_gas;
        self
    }

    pub fn max_priority_fee_per_gas(mut self, max_priority_fee_per_gas: U256) -> Self {
        self.max_priority_fee_per_gas = max_priority_fee_per_gas;
        self
    }

    /// Sets the paymaster together with its gas limits and data
    pub fn paymaster(
        mut self,
        paymaster: Address,
        verification_gas_limit: U256,
        post_op_gas_limit: U256,
        data: Bytes,
    ) -> Self {
        self.paymaster = Some(paymaster);
        self.paymaster_verification_gas_limit = Some(verification_gas_limit);
        self.paymaster_post_op_gas_limit = Some(post_op_gas_limit);
        self.paymaster_data = Some(data);
        self
    }

    pub fn signature(mut self, signature: Bytes) -> Self {
        self.signature = signature;
        self
    }
}
