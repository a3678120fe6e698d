//! Contract bindings

pub mod entry_point_api {
    use ethers::contract::abigen;

    abigen!(
        EntryPointAPI,
        r#"[
            function getSenderAddress(bytes initCode) external
            function getNonce(address sender, uint192 key) external view returns (uint256 nonce)
            function balanceOf(address account) external view returns (uint256)
            function depositTo(address account) external payable
            error FailedOp(uint256 opIndex, string reason)
            error FailedOpWithRevert(uint256 opIndex, string reason, bytes inner)
            error SenderAddressResult(address sender)
        ]"#
    );
}

pub mod simple_account {
    use ethers::contract::abigen;

    abigen!(
        SimpleAccountFactory,
        r#"[
            function createAccount(address owner, uint256 salt) external returns (address ret)
            function getAddress(address owner, uint256 salt) external view returns (address)
        ]"#
    );

    abigen!(
        SimpleAccount,
        r#"[
            function execute(address dest, uint256 value, bytes func) external
            function executeBatch(address[] dest, bytes[] func) external
        ]"#
    );
}

pub mod safe {
    use ethers::contract::abigen;

    abigen!(
        SafeProxyFactory,
        r#"[
            function createProxyWithNonce(address singleton, bytes initializer, uint256 saltNonce) external returns (address proxy)
        ]"#
    );

    abigen!(
        Safe,
        r#"[
            function setup(address[] owners, uint256 threshold, address to, bytes data, address fallbackHandler, address paymentToken, uint256 payment, address paymentReceiver) external
        ]"#
    );

    abigen!(
        SafeModuleSetup,
        r#"[
            function enableModules(address[] modules) external
        ]"#
    );

    abigen!(
        MultiSend,
        r#"[
            function multiSend(bytes transactions) external payable
        ]"#
    );

    abigen!(
        Safe4337Module,
        r#"[
            function executeUserOpWithErrorString(address to, uint256 value, bytes data, uint8 operation) external
        ]"#
    );
}

pub mod erc20 {
    use ethers::contract::abigen;

    abigen!(
        ERC20,
        r#"[
            function balanceOf(address owner) external view returns (uint256)
            function approve(address spender, uint256 value) external returns (bool)
            function decimals() external view returns (uint8)
        ]"#
    );
}
