//! Paymaster sponsorship results (`pm_sponsorUserOperation`)

use crate::{
    entry_point::EntryPointVersion,
    user_operation::{UserOperation, UserOperationV06, UserOperationV07},
};
use ethers::types::{Address, Bytes, U256};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Sponsorship of a v0.6 user operation
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SponsorUserOperationResultV06 {
    pub paymaster_and_data: Bytes,
    pub pre_verification_gas: U256,
    pub verification_gas_limit: U256,
    pub call_gas_limit: U256,
}

/// Sponsorship of a v0.7 user operation
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SponsorUserOperationResultV07 {
    pub call_gas_limit: U256,
    pub verification_gas_limit: U256,
    pub pre_verification_gas: U256,
    pub paymaster: Address,
    pub paymaster_verification_gas_limit: U256,
    pub paymaster_post_op_gas_limit: U256,
    pub paymaster_data: Bytes,
}

/// Result of `pm_sponsorUserOperation`, the shape depends on the entry point
///
/// v0.7 is tried first since a v0.6 result lacks the `paymaster` field.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SponsorUserOperationResult {
    V07(SponsorUserOperationResultV07),
    V06(SponsorUserOperationResultV06),
}

#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("sponsorship for entry point {sponsorship} cannot be applied to a {user_operation} user operation")]
pub struct SponsorMergeError {
    pub sponsorship: EntryPointVersion,
    pub user_operation: EntryPointVersion,
}

impl SponsorUserOperationResultV06 {
    pub fn apply(self, uo: UserOperationV06) -> UserOperationV06 {
        uo.paymaster_and_data(self.paymaster_and_data)
            .pre_verification_gas(self.pre_verification_gas)
            .verification_gas_limit(self.verification_gas_limit)
            .call_gas_limit(self.call_gas_limit)
    }
}

impl SponsorUserOperationResultV07 {
    pub fn apply(self, uo: UserOperationV07) -> UserOperationV07 {
        uo.call_gas_limit(self.call_gas_limit)
            .verification_gas_limit(self.verification_gas_limit)
            .pre_verification_gas(self.pre_verification_gas)
            .paymaster(
                self.paymaster,
                self.paymaster_verification_gas_limit,
                self.paymaster_post_op_gas_limit,
                self.paymaster_data,
            )
    }
}

impl SponsorUserOperationResult {
    pub fn version(&self) -> EntryPointVersion {
        match self {
            Self::V06(_) => EntryPointVersion::V0_6,
            Self::V07(_) => EntryPointVersion::V0_7,
        }
    }

    /// Merges the sponsorship fields into the user operation
    pub fn merge(self, uo: UserOperation) -> Result<UserOperation, SponsorMergeError> {
        match (self, uo) {
            (Self::V06(res), UserOperation::V06(uo)) => Ok(UserOperation::V06(res.apply(uo))),
            (Self::V07(res), UserOperation::V07(uo)) => Ok(UserOperation::V07(res.apply(uo))),
            (res, uo) => Err(SponsorMergeError {
                sponsorship: res.version(),
                user_operation: uo.version(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserialize_picks_shape() {
        let res: SponsorUserOperationResult = serde_json::from_value(json!({
            "paymasterAndData": "0x000000000009b901dec1aab9389285965f49d387",
            "preVerificationGas": "0xc350",
            "verificationGasLimit": "0x7a120",
            "callGasLimit": "0x186a0"
        }))
        .unwrap();
        assert_eq!(res.version(), EntryPointVersion::V0_6);

        let res: SponsorUserOperationResult = serde_json::from_value(json!({
            "callGasLimit": "0x1",
            "verificationGasLimit": "0x2",
            "preVerificationGas": "0x3",
            "paymaster": "0x0000000000000039cd5e8ae05257ce51c473ddd1",
            "paymasterVerificationGasLimit": "0x4",
            "paymasterPostOpGasLimit": "0x5",
            "paymasterData": "0x1234"
        }))
        .unwrap();
        assert_eq!(res.version(), EntryPointVersion::V0_7);
    }

    #[test]
    fn merge_v07() {
        let paymaster: Address = "0x0000000000000039cd5e8aE05257CE51C473ddd1".parse().unwrap();
        let res = SponsorUserOperationResult::V07(SponsorUserOperationResultV07 {
            call_gas_limit: 1.into(),
            verification_gas_limit: 2.into(),
            pre_verification_gas: 3.into(),
            paymaster,
            paymaster_verification_gas_limit: 4.into(),
            paymaster_post_op_gas_limit: 5.into(),
            paymaster_data: "0x1234".parse().unwrap(),
        });
        let uo = UserOperationV07::default().max_fee_per_gas(9.into());
        match res.merge(uo.into()).unwrap() {
            UserOperation::V07(uo) => {
                assert_eq!(uo.call_gas_limit, 1.into());
                assert_eq!(uo.pre_verification_gas, 3.into());
                assert_eq!(uo.max_fee_per_gas, 9.into());
                assert_eq!(uo.paymaster, Some(paymaster));
                assert_eq!(uo.paymaster_post_op_gas_limit, Some(5.into()));
            }
            UserOperation::V06(_) => panic!("version changed"),
        }
    }

    #[test]
    fn merge_version_mismatch() {
        let res = SponsorUserOperationResult::V06(SponsorUserOperationResultV06::default());
        let err = res.merge(UserOperationV07::default().into()).unwrap_err();
        assert_eq!(err.sponsorship, EntryPointVersion::V0_6);
        assert_eq!(err.user_operation, EntryPointVersion::V0_7);
    }
}
