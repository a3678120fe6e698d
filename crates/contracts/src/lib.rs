//! Account abstraction (ERC-4337) smart contract interfaces
//!
//! Entry point calls, smart account (SimpleAccount, Safe) derivation and signing and ERC-20
//! helpers.

pub mod accounts;
pub mod entry_point;
pub mod erc20;
mod error;
pub mod gen;

pub use accounts::{SafeAccount, SimpleAccount, SmartAccount};
pub use entry_point::EntryPoint;
pub use error::{decode_revert_string, sender_address_from_revert, AccountError, EntryPointError};
