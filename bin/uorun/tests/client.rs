#[allow(dead_code)]
#[path = "../../../crates/rpc/tests/common.rs"]
mod common;

use common::{paymaster, start_mock, transaction_hash, MockState, CHAIN_ID};
use ethers::{
    abi::AbiEncode,
    providers::{JsonRpcError, MockProvider, MockResponse, Provider},
    types::{Address, Bytes, Signature, U256},
};
use serde_json::json;
use std::{sync::Arc, time::Duration};
use uorun::flows::SmartAccountClient;
use uorun_contracts::{EntryPoint, SimpleAccount, SmartAccount};
use uorun_primitives::{
    constants::simple_account::{FACTORY_V0_6, FACTORY_V0_7},
    EntryPointVersion, UserOperation, Wallet,
};
use uorun_rpc::{BundlerClient, PaymasterClient, WaitOptions};

const SENDER: &str = "0x9c5754De1443984659E1b3a8d1931D83475ba29C";
const OWNER_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

fn sender() -> Address {
    SENDER.parse().unwrap()
}

/// Queues the execution client answers of one `prepare_user_operation` call
///
/// `MockProvider` pops the last pushed response first.
fn mock_eth_client(mock: &MockProvider, nonce: u64, code: Bytes) {
    mock.push::<Bytes, _>(code).unwrap();
    mock.push::<Bytes, _>(Bytes::from(U256::from(nonce).encode())).unwrap();
    mock.push_response(MockResponse::Error(JsonRpcError {
        code: 3,
        message: "execution reverted".into(),
        data: Some(json!(
            "0x6ca7b8060000000000000000000000009c5754de1443984659e1b3a8d1931d83475ba29c"
        )),
    }));
}

type MockClient =
    SmartAccountClient<Provider<MockProvider>, SimpleAccount<Provider<MockProvider>>>;

async fn mock_client(
    version: EntryPointVersion,
    url: &str,
    nonce: u64,
    code: Bytes,
) -> eyre::Result<MockClient> {
    let (provider, mock) = Provider::mocked();
    mock_eth_client(&mock, nonce, code);
    let entry_point = EntryPoint::new(Arc::new(provider), version.address());
    let wallet = Wallet::from_private_key(OWNER_KEY)?;
    let account = SimpleAccount::new(entry_point.clone(), version, wallet);

    Ok(SmartAccountClient::new(
        account,
        entry_point,
        BundlerClient::new(url, version.address())?,
        CHAIN_ID,
    )
    .paymaster(PaymasterClient::new(url, version.address())?)
    .wait_options(WaitOptions {
        poll_interval: Duration::from_millis(10),
        timeout: Some(Duration::from_secs(5)),
    }))
}

#[tokio::test]
async fn send_transaction_deploys_sponsored_account() -> eyre::Result<()> {
    let state = Arc::new(MockState { pending_polls: 1, ..Default::default() });
    let (url, _handle) = start_mock(state.clone()).await?;
    let client = mock_client(EntryPointVersion::V0_7, &url, 0, Bytes::default()).await?;

    let to: Address = "0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045".parse()?;
    let tx_hash = client.send_transaction(to, U256::zero(), "0x1234".parse()?).await?;
    assert_eq!(tx_hash, transaction_hash());

    // sponsorship is requested with the fast gas price and without gas limits
    let requested = state.sponsored.lock().unwrap()[0].clone();
    assert_eq!(requested.sender, Some(sender()));
    assert_eq!(requested.nonce, Some(U256::zero()));
    assert_eq!(requested.factory, Some(FACTORY_V0_7.parse()?));
    assert!(requested.factory_data.is_some());
    assert_eq!(requested.max_fee_per_gas, Some(30.into()));
    assert_eq!(requested.max_priority_fee_per_gas, Some(3.into()));
    assert_eq!(requested.call_gas_limit, None);
    assert_eq!(requested.signature, Some(client.account().dummy_signature()));

    // the sponsorship is merged before signing
    let sent = state.sent.lock().unwrap()[0].clone();
    let hash = sent.hash(&EntryPointVersion::V0_7.address(), CHAIN_ID);
    let signature = Signature::try_from(sent.signature().as_ref())?;
    assert_eq!(signature.recover(hash.0.as_bytes())?, client.account().owner());
    match sent {
        UserOperation::V07(uo) => {
            assert_eq!(uo.factory, Some(FACTORY_V0_7.parse()?));
            assert_eq!(uo.paymaster, Some(paymaster()));
            assert_eq!(uo.paymaster_verification_gas_limit, Some(40_000.into()));
            assert_eq!(uo.call_gas_limit, 100_000.into());
            assert_eq!(uo.max_fee_per_gas, 30.into());
        }
        UserOperation::V06(_) => panic!("unexpected entry point version"),
    }
    Ok(())
}

#[tokio::test]
async fn deployed_account_has_no_factory() -> eyre::Result<()> {
    let state = Arc::new(MockState::default());
    let (url, _handle) = start_mock(state.clone()).await?;
    let code = Bytes::from_static(&[0x60, 0x80]);
    let client = mock_client(EntryPointVersion::V0_7, &url, 5, code).await?;

    client.send_transaction(sender(), U256::zero(), Bytes::default()).await?;

    let requested = state.sponsored.lock().unwrap()[0].clone();
    assert_eq!(requested.factory, None);
    assert_eq!(requested.factory_data, None);
    assert_eq!(requested.nonce, Some(5.into()));

    let sent = state.sent.lock().unwrap()[0].clone();
    assert_eq!(sent.nonce(), 5.into());
    match sent {
        UserOperation::V07(uo) => assert_eq!(uo.factory, None),
        UserOperation::V06(_) => panic!("unexpected entry point version"),
    }
    Ok(())
}

#[tokio::test]
async fn v06_deployment_is_sponsored() -> eyre::Result<()> {
    let state = Arc::new(MockState::default());
    let (url, _handle) = start_mock(state.clone()).await?;
    let client = mock_client(EntryPointVersion::V0_6, &url, 0, Bytes::default()).await?;

    let tx_hash = client.send_transaction(sender(), U256::zero(), Bytes::default()).await?;
    assert_eq!(tx_hash, transaction_hash());

    let requested = state.sponsored.lock().unwrap()[0].clone();
    let init_code = requested.init_code.expect("init code is requested");
    assert_eq!(&init_code[..20], FACTORY_V0_6.parse::<Address>()?.as_bytes());

    match state.sent.lock().unwrap()[0].clone() {
        UserOperation::V06(uo) => {
            assert_eq!(uo.init_code, init_code);
            assert_eq!(uo.paymaster(), Some(paymaster()));
            assert_eq!(uo.verification_gas_limit, 500_000.into());
            assert_eq!(uo.max_priority_fee_per_gas, 3.into());
        }
        UserOperation::V07(_) => panic!("unexpected entry point version"),
    }
    Ok(())
}
