use super::{build_user_operation, connect_entry_point, submit, tx_url};
use crate::config::Config;
use ethers::types::{Address, Bytes, H256, U256};
use tracing::info;
use uorun_contracts::{SimpleAccount, SmartAccount};
use uorun_primitives::{
    constants::defaults::RECIPIENT, EntryPointVersion, UserOperationPartial, Wallet,
};
use uorun_rpc::{BundlerClient, PaymasterClient, WaitOptions};

/// Deploys a SimpleAccount owned by a fresh key with a sponsored user operation calling
/// `execute(vitalik, 0, "hello")`, step by step
pub async fn simple_sponsored(config: &Config, wait: WaitOptions) -> eyre::Result<H256> {
    let version = EntryPointVersion::V0_7;
    let chain_id = config.chain.id();
    let bundler = BundlerClient::new(&config.bundler_url()?, version.address())?;
    let paymaster = PaymasterClient::new(&config.paymaster_url()?, version.address())?;

    let wallet = Wallet::build_random();
    info!("Generated wallet with private key: {}", wallet.private_key_hex());

    let entry_point = connect_entry_point(config, version).await?;
    let account = SimpleAccount::new(entry_point, version, wallet);

    let (factory, factory_data) = account.factory_and_data();
    info!("Generated factoryData: {factory_data}");

    let sender = account.address().await?;
    info!("Calculated sender address: {sender:?}");

    let to: Address = RECIPIENT.parse()?;
    let call_data = account.encode_call_data(to, U256::zero(), Bytes::from_static(b"hello"));
    info!("Generated callData: {call_data}");

    let gas_price = bundler.get_user_operation_gas_price().await?.fast;
    let uo = build_user_operation(
        version,
        sender,
        U256::zero(),
        Some((factory, factory_data)),
        call_data,
        account.dummy_signature(),
    )
    .with_gas_price(gas_price.max_fee_per_gas, gas_price.max_priority_fee_per_gas);

    let sponsorship = paymaster
        .sponsor_user_operation(UserOperationPartial::from(uo.clone()).without_gas_limits())
        .await?;
    info!("Received paymaster sponsor result: {sponsorship:?}");
    let uo = sponsorship.merge(uo)?;

    let signature = account.sign_user_operation(&uo, chain_id).await?;
    info!("Generated signature: {signature}");
    let uo = uo.with_signature(signature);

    let receipt = submit(&bundler, &uo, wait).await?;
    let tx_hash = receipt.tx_receipt.transaction_hash;
    info!("UserOperation included: {}", tx_url(&config.chain, tx_hash));

    Ok(tx_hash)
}
