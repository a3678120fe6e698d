//! Walkthroughs: each one builds, sponsors, signs and submits user operations end to end

mod client;
mod erc20;
mod safe;
mod simple;

pub use client::{build_user_operation, SmartAccountClient};
pub use erc20::{erc20_paymaster, erc20_user_operation, ensure_usdc_balance};
pub use safe::safe_sponsored;
pub use simple::simple_sponsored;

use crate::config::Config;
use alloy_chains::Chain;
use ethers::{
    providers::{Http, Provider},
    types::{Address, Bytes, H256, U256},
};
use std::sync::Arc;
use tracing::info;
use uorun_contracts::EntryPoint;
use uorun_primitives::{
    chain::ChainExt, provider::create_http_provider, EntryPointVersion, UserOperation,
    UserOperationReceipt,
};
use uorun_rpc::{BundlerClient, WaitOptions};

/// Call sent from the smart account
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transaction {
    pub to: Address,
    pub value: U256,
    pub data: Bytes,
}

/// Entry point of the version, connected to the execution client of the config
pub async fn connect_entry_point(
    config: &Config,
    version: EntryPointVersion,
) -> eyre::Result<EntryPoint<Provider<Http>>> {
    let eth_client = Arc::new(create_http_provider(config.rpc_url()?).await?);
    Ok(EntryPoint::new(eth_client, version.address()))
}

pub fn tx_url(chain: &Chain, hash: H256) -> String {
    chain.explorer_tx_url(hash).unwrap_or_else(|| format!("{hash:?}"))
}

pub fn address_url(chain: &Chain, address: Address) -> String {
    chain.explorer_address_url(address).unwrap_or_else(|| format!("{address:?}"))
}

/// Sends the signed user operation and polls until it is included
pub async fn submit(
    bundler: &BundlerClient,
    uo: &UserOperation,
    wait: WaitOptions,
) -> eyre::Result<UserOperationReceipt> {
    let hash = bundler.send_user_operation(uo).await?;
    info!("UserOperation submitted. Hash: {hash}");

    info!("Querying for receipts...");
    let receipt = bundler.wait_for_user_operation_receipt(hash, wait).await?;
    info!("Receipt found! Transaction hash: {:?}", receipt.tx_receipt.transaction_hash);

    Ok(receipt)
}
