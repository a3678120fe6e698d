use super::{address_url, connect_entry_point, tx_url, SmartAccountClient, Transaction};
use crate::config::Config;
use ethers::types::H256;
use tracing::info;
use uorun_contracts::{SafeAccount, SmartAccount};
use uorun_primitives::{EntryPointVersion, Wallet};
use uorun_rpc::{BundlerClient, PaymasterClient, WaitOptions};

/// Sends a sponsored transaction from a Safe owned by `wallet`, deploying it on first use
pub async fn safe_sponsored(
    config: &Config,
    wallet: Wallet,
    tx: Transaction,
    wait: WaitOptions,
) -> eyre::Result<H256> {
    let version = EntryPointVersion::V0_7;
    let bundler = BundlerClient::new(&config.bundler_url()?, version.address())?;
    let paymaster = PaymasterClient::new(&config.paymaster_url()?, version.address())?;
    let entry_point = connect_entry_point(config, version).await?;
    let account = SafeAccount::new(entry_point.clone(), version, wallet)?;

    let address = account.address().await?;
    info!("Smart account address: {}", address_url(&config.chain, address));

    let client = SmartAccountClient::new(account, entry_point, bundler, config.chain.id())
        .paymaster(paymaster)
        .wait_options(wait);

    let tx_hash = client.send_transaction(tx.to, tx.value, tx.data).await?;
    info!("User operation included: {}", tx_url(&config.chain, tx_hash));

    Ok(tx_hash)
}
