//! Account abstraction (ERC-4337) primitive types
//!
//! This crate contains user operation types of both entry point versions, their hashing and
//! signing, the results returned by bundlers and paymasters and helper functions.

pub mod chain;
pub mod constants;
mod entry_point;
mod gas;
pub mod provider;
mod sponsor;
mod user_operation;
mod utils;
mod wallet;

pub use entry_point::EntryPointVersion;
pub use gas::{GasPrice, GasPriceTier, UserOperationGasPrice};
pub use sponsor::{
    SponsorMergeError, SponsorUserOperationResult, SponsorUserOperationResultV06,
    SponsorUserOperationResultV07,
};
pub use user_operation::{
    PackedUserOperation, UserOperation, UserOperationByHash, UserOperationGasEstimation,
    UserOperationHash, UserOperationPartial, UserOperationReceipt, UserOperationV06,
    UserOperationV07,
};
pub use utils::{
    as_checksum_addr, get_address, pack_init_code, pack_paymaster_and_data, pack_uint128,
    unpack_init_code, unpack_uint128,
};
pub use wallet::{load_or_generate, Wallet, WalletError};
