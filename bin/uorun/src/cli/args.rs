use crate::{
    flows::Transaction,
    utils::{parse_address, parse_bytes, parse_chain, parse_u256},
};
use alloy_chains::Chain;
use clap::{Parser, ValueEnum};
use ethers::types::{Address, Bytes, U256};
use expanded_pathbuf::ExpandedPathBuf;
use std::time::Duration;
use uorun_primitives::{
    constants::defaults::{KEY_FILE, PRIVATE_KEY_ENV, RECEIPT_POLL_INTERVAL_MS, RECIPIENT},
    load_or_generate, Wallet,
};
use uorun_rpc::WaitOptions;

/// Chain and service endpoint args
#[derive(Debug, Clone, Parser, PartialEq)]
pub struct NetworkArgs {
    /// Chain to run on, by name (e.g. `sepolia`) or id.
    ///
    /// Defaults to the chain of the walkthrough.
    #[clap(long, value_parser=parse_chain)]
    pub chain: Option<Chain>,

    /// Execution client RPC URL.
    ///
    /// By default, a public endpoint of the chain is used.
    #[clap(long)]
    pub rpc_url: Option<String>,

    /// Bundler RPC URL, overrides the Pimlico bundler.
    #[clap(long)]
    pub bundler_url: Option<String>,

    /// Paymaster RPC URL, overrides the Pimlico paymaster.
    #[clap(long)]
    pub paymaster_url: Option<String>,
}

/// Private key args
#[derive(Debug, Clone, Parser)]
pub struct KeyArgs {
    /// Dotfile the owner's private key is read from and persisted to.
    #[clap(long, default_value = KEY_FILE)]
    pub key_file: ExpandedPathBuf,
}

impl KeyArgs {
    /// Loads `PRIVATE_KEY` (from the environment or the key file) or generates and persists a new
    /// key
    pub fn load_wallet(&self) -> eyre::Result<(Wallet, bool)> {
        dotenv::from_path(self.key_file.as_path()).ok();
        let private_key = std::env::var(PRIVATE_KEY_ENV).ok();
        Ok(load_or_generate(private_key.as_deref(), self.key_file.as_path())?)
    }
}

/// Receipt polling args
#[derive(Debug, Clone, Parser, PartialEq)]
pub struct WaitArgs {
    /// Interval between two `eth_getUserOperationReceipt` calls (in milliseconds).
    #[clap(long, default_value_t = RECEIPT_POLL_INTERVAL_MS)]
    pub poll_interval: u64,

    /// Gives up waiting for the receipt after this many seconds.
    ///
    /// By default, it waits until the user operation is included.
    #[clap(long)]
    pub timeout: Option<u64>,
}

impl WaitArgs {
    pub fn wait_options(&self) -> WaitOptions {
        WaitOptions {
            poll_interval: Duration::from_millis(self.poll_interval),
            timeout: self.timeout.map(Duration::from_secs),
        }
    }
}

/// Transaction sent from the smart account
#[derive(Debug, Clone, Parser, PartialEq)]
pub struct TransactionArgs {
    /// Recipient of the call.
    #[clap(long, default_value = RECIPIENT, value_parser=parse_address)]
    pub to: Address,

    /// Value sent along (in wei).
    #[clap(long, default_value = "0", value_parser=parse_u256)]
    pub value: U256,

    /// Calldata of the call.
    #[clap(long, default_value = "0x1234", value_parser=parse_bytes)]
    pub data: Bytes,
}

impl From<TransactionArgs> for Transaction {
    fn from(args: TransactionArgs) -> Self {
        Self { to: args.to, value: args.value, data: args.data }
    }
}

/// Smart account implementation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum AccountKind {
    /// eth-infinitism SimpleAccount
    #[default]
    Simple,
    /// Safe 1.4.1 with the 4337 module
    Safe,
}
