//! Entry point versions

use crate::constants::entry_point::{ADDRESS_V0_6, ADDRESS_V0_7};
use ethers::types::Address;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Version of the entry point smart contract a user operation targets
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, EnumString, Display, Serialize, Deserialize,
)]
pub enum EntryPointVersion {
    #[strum(to_string = "v0.6", serialize = "0.6", serialize = "0.6.0")]
    #[serde(rename = "v0.6")]
    V0_6,
    #[default]
    #[strum(to_string = "v0.7", serialize = "0.7", serialize = "0.7.0")]
    #[serde(rename = "v0.7")]
    V0_7,
}

impl EntryPointVersion {
    /// Canonical deployment address of this entry point version
    pub fn address(&self) -> Address {
        let address = match self {
            Self::V0_6 => ADDRESS_V0_6,
            Self::V0_7 => ADDRESS_V0_7,
        };
        address.parse().expect("entry point address constant is valid")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn parse_and_display() {
        assert_eq!(EntryPointVersion::from_str("v0.6").unwrap(), EntryPointVersion::V0_6);
        assert_eq!(EntryPointVersion::from_str("0.7.0").unwrap(), EntryPointVersion::V0_7);
        assert!(EntryPointVersion::from_str("v0.5").is_err());
        assert_eq!(EntryPointVersion::V0_7.to_string(), "v0.7");
    }

    #[test]
    fn addresses() {
        assert_eq!(
            EntryPointVersion::V0_6.address(),
            "0x5FF137D4b0FDCD49DcA30c7CF57E578a026d2789".parse::<Address>().unwrap()
        );
        assert_eq!(
            EntryPointVersion::V0_7.address(),
            "0x0000000071727De22E5E9d8BAf0edAc6f37da032".parse::<Address>().unwrap()
        );
    }
}
