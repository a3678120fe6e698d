use crate::gen::entry_point_api::{EntryPointAPIErrors, FailedOp};
use ethers::{
    abi::AbiDecode,
    types::{Address, Bytes},
};
use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;
use uorun_primitives::{EntryPointVersion, WalletError};

lazy_static! {
    /// `SenderAddressResult(address)` revert payload inside an error message
    static ref SENDER_ADDRESS_RESULT: Regex =
        Regex::new(r"0x6ca7b806([0-9a-fA-F]{24})([0-9a-fA-F]{40})").expect("Regex rules valid");
}

const SENDER_ADDRESS_RESULT_SELECTOR: [u8; 4] = [0x6c, 0xa7, 0xb8, 0x06];

/// Entry point errors
#[derive(Debug, Error, Clone)]
pub enum EntryPointError {
    /// Failed user operation error
    #[error("{0}")]
    FailedOp(FailedOp),

    /// Plain `Error(string)` revert
    #[error("execution reverted: {reason}")]
    Revert {
        /// The revert reason
        reason: String,
    },

    /// There is no revert when there should be
    #[error("{function} should revert")]
    NoRevert {
        /// function
        function: String,
    },

    /// Provider error
    #[error("provider error: {inner}")]
    Provider {
        /// The inner error message
        inner: String,
    },

    /// Data decoding error
    #[error("decode error: {inner}")]
    Decode {
        /// The inner error message
        inner: String,
    },

    /// Any other error
    #[error("other error: {inner}")]
    Other {
        /// The inner error message
        inner: String,
    },
}

/// Smart account errors
#[derive(Debug, Error)]
pub enum AccountError {
    #[error(transparent)]
    EntryPoint(#[from] EntryPointError),

    #[error(transparent)]
    Wallet(#[from] WalletError),

    #[error("{account} does not support entry point {version}")]
    UnsupportedEntryPoint { account: &'static str, version: EntryPointVersion },
}

/// Extracts the counterfactual sender from a reverted `getSenderAddress` call
///
/// Tries the ABI decoded `SenderAddressResult` error first, then the raw revert data (a
/// `SenderAddressResult` payload or a bare ABI encoded address) and finally looks for the error
/// payload in the error message.
///
/// `FailedOp`, `FailedOpWithRevert` and `Error(string)` reverts are returned as errors.
pub fn sender_address_from_revert(
    revert: Option<&Bytes>,
    message: &str,
) -> Result<Address, EntryPointError> {
    if let Some(data) = revert {
        if let Some(reason) = decode_revert_string(data) {
            return Err(EntryPointError::Revert { reason });
        }

        match EntryPointAPIErrors::decode(data.as_ref()) {
            Ok(EntryPointAPIErrors::SenderAddressResult(res)) => return Ok(res.sender),
            Ok(EntryPointAPIErrors::FailedOp(err)) => return Err(EntryPointError::FailedOp(err)),
            Ok(EntryPointAPIErrors::FailedOpWithRevert(err)) => {
                let inner = decode_revert_string(&err.inner)
                    .unwrap_or_else(|| err.inner.to_string());
                return Err(EntryPointError::FailedOp(FailedOp {
                    op_index: err.op_index,
                    reason: format!("{} ({inner})", err.reason),
                }));
            }
            _ => {}
        }

        if let Some(address) = address_from_raw_revert(data) {
            return Ok(address);
        }
    }

    if let Some(caps) = SENDER_ADDRESS_RESULT.captures(message) {
        if let Ok(address) = caps[2].parse::<Address>() {
            return Ok(address);
        }
    }

    Err(EntryPointError::Decode { inner: "unable to parse revert reason".into() })
}

fn address_from_raw_revert(data: &[u8]) -> Option<Address> {
    let word = match data.len() {
        36 if data[..4] == SENDER_ADDRESS_RESULT_SELECTOR => &data[4..],
        32 => data,
        _ => return None,
    };
    word[..12].iter().all(|b| *b == 0).then(|| Address::from_slice(&word[12..]))
}

// ethers-rs could not handle `require (true, "reason")` or `revert("test failed")` well in this
// case revert with `require` error would ends up with error event signature `0x08c379a0`
// we need to handle it manually
pub fn decode_revert_string(data: &Bytes) -> Option<String> {
    if data.len() < 4 {
        return None;
    }
    let (error_sig, reason) = data.split_at(4);
    if error_sig == [0x08, 0xc3, 0x79, 0xa0] {
        <String as AbiDecode>::decode(reason).ok()
    } else {
        None
    }
}
