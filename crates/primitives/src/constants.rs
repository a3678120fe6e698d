//! Account abstraction (ERC-4337)-related constants

/// Entry point smart contracts
pub mod entry_point {
    /// Address of the v0.6 entry point smart contract
    pub const ADDRESS_V0_6: &str = "0x5FF137D4b0FDCD49DcA30c7CF57E578a026d2789";
    /// Address of the v0.7 entry point smart contract
    pub const ADDRESS_V0_7: &str = "0x0000000071727De22E5E9d8BAf0edAc6f37da032";
}

/// eth-infinitism sample `SimpleAccount`
pub mod simple_account {
    /// Factory deployed for the v0.6 entry point
    pub const FACTORY_V0_6: &str = "0x9406Cc6185a346906296840746125a0E44976454";
    /// Factory deployed for the v0.7 entry point
    pub const FACTORY_V0_7: &str = "0x91E60e0613810449d098b0b5Ec8b51A0FE8c8985";
    /// Signature of the right length so the account doesn't immediately revert during estimation
    pub const DUMMY_SIGNATURE_V0_6: &str = "0xfffffffffffffffffffffffffffffff0000000000000000000000000000000007aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa1c";
    pub const DUMMY_SIGNATURE_V0_7: &str = "0xa15569dd8f8324dbeabf8073fdec36d4b754f53ce5901e283c6de79af177dc94557fa3c9922cd7af2a96ca94402d35c39f266925ee6407aeb32b31d76978d4ba1c";
}

/// Safe 1.4.1 with the 4337 module (v0.7 entry point)
pub mod safe {
    pub const VERSION: &str = "1.4.1";
    pub const SINGLETON: &str = "0x41675C099F32341bf84BFc5382aF534df5C7461a";
    pub const PROXY_FACTORY: &str = "0x4e1DCf7AD4e460CfD30791CCC4F9c8a4f820ec67";
    pub const MODULE_4337: &str = "0x75cf11467937ce3F2f357CE24ffc3DBF8fD5c226";
    pub const MODULE_SETUP: &str = "0x2dd68b007B46fBe91B9A7c3EDa5A7a1063cB5b47";
    pub const MULTI_SEND: &str = "0x38869bf66a61cF6bDB996A6aE40D5853Fd43B526";
    /// ECDSA signature placeholder used before the real one is known
    pub const DUMMY_ECDSA_SIGNATURE: &str = "0xfffffffffffffffffffffffffffffff0000000000000000000000000000000007aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa1c";
}

/// Token paymaster
pub mod erc20_paymaster {
    /// Pimlico ERC-20 paymaster (v0.6 entry point)
    pub const ADDRESS: &str = "0x000000000009B901DeC1aaB9389285965F49D387";
    /// USDC on Polygon Mumbai
    pub const USDC_MUMBAI: &str = "0x9999f7Fea5938fD3b1E26A12c3f2fb024e194f97";
    /// Minimum USDC balance (6 decimals) the sender must hold to pay for gas
    pub const MIN_USDC_BALANCE: u64 = 1_000_000;
    pub const USDC_DECIMALS: u32 = 6;
}

/// Hosted bundler and paymaster services
pub mod pimlico {
    pub const BASE_URL: &str = "https://api.pimlico.io";
    /// Environment variable holding the API key
    pub const API_KEY_ENV: &str = "PIMLICO_API_KEY";
}

/// Public execution client endpoints
pub mod public_rpc {
    pub const SEPOLIA: &str = "https://rpc.ankr.com/eth_sepolia";
    pub const POLYGON_MUMBAI: &str = "https://mumbai.rpc.thirdweb.com";
}

/// Defaults shared by the walkthroughs
pub mod defaults {
    /// vitalik.eth
    pub const RECIPIENT: &str = "0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045";
    /// Interval between two `eth_getUserOperationReceipt` calls (in milliseconds)
    pub const RECEIPT_POLL_INTERVAL_MS: u64 = 1000;
    /// Environment variable holding the owner's private key
    pub const PRIVATE_KEY_ENV: &str = "PRIVATE_KEY";
    /// Dotfile the generated private key is persisted to
    pub const KEY_FILE: &str = ".env";
}
