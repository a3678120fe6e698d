//! Gas price tiers returned by `pimlico_getUserOperationGasPrice`

use ethers::types::U256;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// EIP-1559 fee pair of a single tier
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GasPrice {
    pub max_fee_per_gas: U256,
    pub max_priority_fee_per_gas: U256,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserOperationGasPrice {
    pub slow: GasPrice,
    pub standard: GasPrice,
    pub fast: GasPrice,
}

/// Gas price tier to pick from [UserOperationGasPrice]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, EnumString, Display)]
#[strum(serialize_all = "lowercase")]
pub enum GasPriceTier {
    Slow,
    Standard,
    #[default]
    Fast,
}

impl UserOperationGasPrice {
    pub fn tier(&self, tier: GasPriceTier) -> GasPrice {
        match tier {
            GasPriceTier::Slow => self.slow,
            GasPriceTier::Standard => self.standard,
            GasPriceTier::Fast => self.fast,
        }
    }
}
