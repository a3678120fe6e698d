use super::args::{AccountKind, KeyArgs, NetworkArgs, TransactionArgs, WaitArgs};
use crate::{
    config::{api_key_from_env, Config, PimlicoApiVersion},
    flows::{
        address_url, connect_entry_point, erc20_paymaster, safe_sponsored, simple_sponsored,
        tx_url,
    },
    utils::{parse_entry_point_version, parse_uo_hash},
};
use alloy_chains::NamedChain;
use clap::Parser;
use tracing::info;
use uorun_contracts::{SafeAccount, SimpleAccount, SmartAccount};
use uorun_primitives::{EntryPointVersion, UserOperationHash};
use uorun_rpc::BundlerClient;

/// Send a sponsored transaction from a Safe (v0.7 entry point)
#[derive(Debug, Parser)]
pub struct SafeSponsoredCommand {
    #[clap(flatten)]
    network: NetworkArgs,

    #[clap(flatten)]
    key: KeyArgs,

    #[clap(flatten)]
    wait: WaitArgs,

    #[clap(flatten)]
    tx: TransactionArgs,
}

impl SafeSponsoredCommand {
    /// Execute the command
    pub async fn execute(self) -> eyre::Result<()> {
        let config = Config::new(
            &self.network,
            NamedChain::Sepolia,
            PimlicoApiVersion::V2,
            api_key_from_env(),
        );
        let (wallet, _) = self.key.load_wallet()?;
        safe_sponsored(&config, wallet, self.tx.into(), self.wait.wait_options()).await?;
        Ok(())
    }
}

/// Deploy a SimpleAccount owned by a fresh key with a sponsored user operation (v0.7 entry point)
#[derive(Debug, Parser)]
pub struct SimpleSponsoredCommand {
    #[clap(flatten)]
    network: NetworkArgs,

    #[clap(flatten)]
    wait: WaitArgs,
}

impl SimpleSponsoredCommand {
    /// Execute the command
    pub async fn execute(self) -> eyre::Result<()> {
        let config = Config::new(
            &self.network,
            NamedChain::Sepolia,
            PimlicoApiVersion::V2,
            api_key_from_env(),
        );
        simple_sponsored(&config, self.wait.wait_options()).await?;
        Ok(())
    }
}

/// Pay the gas of a SimpleAccount in USDC through the ERC-20 paymaster (v0.6 entry point)
#[derive(Debug, Parser)]
pub struct Erc20PaymasterCommand {
    #[clap(flatten)]
    network: NetworkArgs,

    #[clap(flatten)]
    key: KeyArgs,

    #[clap(flatten)]
    wait: WaitArgs,
}

impl Erc20PaymasterCommand {
    /// Execute the command
    pub async fn execute(self) -> eyre::Result<()> {
        let config = Config::new(
            &self.network,
            NamedChain::PolygonMumbai,
            PimlicoApiVersion::V1,
            api_key_from_env(),
        );
        let (wallet, _) = self.key.load_wallet()?;
        erc20_paymaster(&config, wallet, self.wait.wait_options()).await?;
        Ok(())
    }
}

/// Generate the owner's private key unless the key file already has one
#[derive(Debug, Parser)]
pub struct GenerateKeyCommand {
    #[clap(flatten)]
    key: KeyArgs,
}

impl GenerateKeyCommand {
    /// Execute the command
    pub fn execute(self) -> eyre::Result<()> {
        let (wallet, generated) = self.key.load_wallet()?;
        if !generated {
            info!("Private key of owner {:?} already set, nothing generated", wallet.address());
        }
        Ok(())
    }
}

/// Print the counterfactual address of the owner's smart account
#[derive(Debug, Parser)]
pub struct SenderAddressCommand {
    #[clap(flatten)]
    network: NetworkArgs,

    #[clap(flatten)]
    key: KeyArgs,

    /// Smart account implementation.
    #[clap(long, value_enum, default_value_t = AccountKind::Simple)]
    account: AccountKind,

    /// Entry point version (`v0.6` or `v0.7`).
    #[clap(long, default_value = "v0.7", value_parser=parse_entry_point_version)]
    entry_point_version: EntryPointVersion,
}

impl SenderAddressCommand {
    /// Execute the command
    pub async fn execute(self) -> eyre::Result<()> {
        let config = Config::new(
            &self.network,
            NamedChain::Sepolia,
            PimlicoApiVersion::V2,
            api_key_from_env(),
        );
        let (wallet, _) = self.key.load_wallet()?;
        let entry_point = connect_entry_point(&config, self.entry_point_version).await?;

        let address = match self.account {
            AccountKind::Simple => {
                SimpleAccount::new(entry_point, self.entry_point_version, wallet).address().await?
            }
            AccountKind::Safe => {
                SafeAccount::new(entry_point, self.entry_point_version, wallet)?.address().await?
            }
        };
        info!("Smart account address: {}", address_url(&config.chain, address));
        Ok(())
    }
}

/// Print the user operation gas prices of the bundler
#[derive(Debug, Parser)]
pub struct GasPriceCommand {
    #[clap(flatten)]
    network: NetworkArgs,
}

impl GasPriceCommand {
    /// Execute the command
    pub async fn execute(self) -> eyre::Result<()> {
        let config = Config::new(
            &self.network,
            NamedChain::Sepolia,
            PimlicoApiVersion::V2,
            api_key_from_env(),
        );
        let bundler =
            BundlerClient::new(&config.bundler_url()?, EntryPointVersion::V0_7.address())?;
        let gas_price = bundler.get_user_operation_gas_price().await?;
        for (tier, price) in
            [("slow", gas_price.slow), ("standard", gas_price.standard), ("fast", gas_price.fast)]
        {
            info!(
                "{tier}: maxFeePerGas {} maxPriorityFeePerGas {}",
                price.max_fee_per_gas, price.max_priority_fee_per_gas
            );
        }
        Ok(())
    }
}

/// Wait for a user operation to be included
#[derive(Debug, Parser)]
pub struct WaitReceiptCommand {
    /// Hash of the user operation.
    #[clap(value_parser=parse_uo_hash)]
    hash: UserOperationHash,

    #[clap(flatten)]
    network: NetworkArgs,

    #[clap(flatten)]
    wait: WaitArgs,

    /// Entry point version the user operation was sent to.
    #[clap(long, default_value = "v0.7", value_parser=parse_entry_point_version)]
    entry_point_version: EntryPointVersion,
}

impl WaitReceiptCommand {
    /// Execute the command
    pub async fn execute(self) -> eyre::Result<()> {
        let bundler_api = match self.entry_point_version {
            EntryPointVersion::V0_6 => PimlicoApiVersion::V1,
            EntryPointVersion::V0_7 => PimlicoApiVersion::V2,
        };
        let config =
            Config::new(&self.network, NamedChain::Sepolia, bundler_api, api_key_from_env());
        let bundler =
            BundlerClient::new(&config.bundler_url()?, self.entry_point_version.address())?;

        info!("Querying for receipts...");
        let receipt =
            bundler.wait_for_user_operation_receipt(self.hash, self.wait.wait_options()).await?;
        info!(
            "UserOperation included: {}",
            tx_url(&config.chain, receipt.tx_receipt.transaction_hash)
        );
        Ok(())
    }
}
