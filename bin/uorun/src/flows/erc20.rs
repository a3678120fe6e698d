use super::{build_user_operation, connect_entry_point, submit, tx_url};
use crate::config::Config;
use ethers::types::{Address, Bytes, H256, U256};
use eyre::eyre;
use tracing::{info, warn};
use uorun_contracts::{
    erc20::{balance_of, encode_approve, format_units},
    SimpleAccount, SmartAccount,
};
use uorun_primitives::{
    constants::{
        defaults::RECIPIENT,
        erc20_paymaster::{ADDRESS, MIN_USDC_BALANCE, USDC_DECIMALS, USDC_MUMBAI},
    },
    EntryPointVersion, GasPrice, UserOperation, UserOperationPartial, UserOperationV06, Wallet,
};
use uorun_rpc::{BundlerClient, PaymasterClient, WaitOptions};

/// Fails unless the sender holds enough USDC to pay the ERC-20 paymaster
pub fn ensure_usdc_balance(sender: Address, balance: U256) -> eyre::Result<()> {
    if balance < U256::from(MIN_USDC_BALANCE) {
        return Err(eyre!(
            "insufficient USDC balance for counterfactual wallet address {sender:?}: {} USDC, required at least 1 USDC",
            format_units(balance, USDC_DECIMALS)
        ));
    }
    Ok(())
}

/// User operation paid in USDC through the ERC-20 paymaster
///
/// The gas limits are fixed since the paymaster doesn't estimate them.
pub fn erc20_user_operation(
    sender: Address,
    nonce: U256,
    call_data: Bytes,
    gas_price: GasPrice,
    paymaster: Address,
) -> UserOperationV06 {
    UserOperationV06::default()
        .sender(sender)
        .nonce(nonce)
        .call_data(call_data)
        .call_gas_limit(100_000.into())
        .verification_gas_limit(500_000.into())
        .pre_verification_gas(50_000.into())
        .max_fee_per_gas(gas_price.max_fee_per_gas)
        .max_priority_fee_per_gas(gas_price.max_priority_fee_per_gas)
        .paymaster_and_data(paymaster.as_bytes().to_vec().into())
}

/// Pays the gas of a SimpleAccount (v0.6) in USDC
///
/// The first run deploys the account and approves USDC to the ERC-20 paymaster with a sponsored
/// user operation. Then an empty call to vitalik is paid through the ERC-20 paymaster.
pub async fn erc20_paymaster(
    config: &Config,
    wallet: Wallet,
    wait: WaitOptions,
) -> eyre::Result<H256> {
    let version = EntryPointVersion::V0_6;
    let chain_id = config.chain.id();
    let usdc: Address = USDC_MUMBAI.parse()?;
    let erc20_paymaster: Address = ADDRESS.parse()?;
    let bundler = BundlerClient::new(&config.bundler_url()?, version.address())?;
    let paymaster = PaymasterClient::new(&config.paymaster_url()?, version.address())?;

    let entry_point = connect_entry_point(config, version).await?;
    let account = SimpleAccount::new(entry_point.clone(), version, wallet);

    let sender = account.address().await?;
    info!("Counterfactual sender address: {sender:?}");

    let balance = balance_of(entry_point.eth_client(), usdc, sender).await?;
    ensure_usdc_balance(sender, balance)?;

    let gas_price = bundler.get_user_operation_gas_price().await?.fast;

    let nonce = entry_point.get_nonce(&sender, U256::zero()).await?;
    if nonce.is_zero() {
        let approve = encode_approve(erc20_paymaster, U256::MAX);
        let uo = build_user_operation(
            version,
            sender,
            nonce,
            Some(account.factory_and_data()),
            account.encode_call_data(usdc, U256::zero(), approve),
            account.dummy_signature(),
        )
        .with_gas_price(gas_price.max_fee_per_gas, gas_price.max_priority_fee_per_gas);

        let sponsorship = paymaster
            .sponsor_user_operation(UserOperationPartial::from(uo.clone()).without_gas_limits())
            .await?;
        let uo = sponsorship.merge(uo)?;
        let signature = account.sign_user_operation(&uo, chain_id).await?;
        submit(&bundler, &uo.with_signature(signature), wait).await?;
    } else {
        warn!("Deployment UserOperation previously submitted, skipping...");
    }

    info!("Sponsoring a user operation with the ERC-20 paymaster...");

    let nonce = entry_point.get_nonce(&sender, U256::zero()).await?;
    let to: Address = RECIPIENT.parse()?;
    let call_data = account.encode_call_data(to, U256::zero(), Bytes::default());
    let uo = UserOperation::from(erc20_user_operation(
        sender,
        nonce,
        call_data,
        gas_price,
        erc20_paymaster,
    ));
    let signature = account.sign_user_operation(&uo, chain_id).await?;

    let receipt = submit(&bundler, &uo.with_signature(signature), wait).await?;
    let tx_hash = receipt.tx_receipt.transaction_hash;
    info!("UserOperation included: {}", tx_url(&config.chain, tx_hash));

    Ok(tx_hash)
}
