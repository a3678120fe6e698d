use crate::utils::run_until_ctrl_c;
use clap::{value_parser, Parser, Subcommand};

pub mod args;
pub mod commands;

/// The main uorun CLI interface
#[derive(Debug, Parser)]
#[command(author, version, about = "uorun", long_about = None)]
pub struct Cli {
    /// The command to execute
    #[clap(subcommand)]
    command: Commands,

    /// The verbosity level
    #[clap(long, short, global = true, default_value_t = 2, value_parser = value_parser!(u8).range(..=4))]
    verbosity: u8,
}

impl Cli {
    /// Get the log level based on the verbosity level
    pub fn get_log_level(&self) -> String {
        match self.verbosity {
            0 => "error",
            1 => "warn",
            2 => "info",
            3 => "debug",
            _ => "trace",
        }
        .into()
    }
}

/// Commands to be executed
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Send a sponsored transaction from a Safe smart account
    #[command(name = "safe-sponsored")]
    SafeSponsored(Box<commands::SafeSponsoredCommand>),

    /// Deploy a SimpleAccount with a sponsored user operation, step by step
    #[command(name = "simple-sponsored")]
    SimpleSponsored(commands::SimpleSponsoredCommand),

    /// Pay for gas in USDC with the ERC-20 paymaster
    #[command(name = "erc20-paymaster")]
    Erc20Paymaster(commands::Erc20PaymasterCommand),

    /// Generate the owner's private key
    #[command(name = "generate-key")]
    GenerateKey(commands::GenerateKeyCommand),

    /// Print the counterfactual smart account address
    #[command(name = "sender-address")]
    SenderAddress(commands::SenderAddressCommand),

    /// Print the user operation gas prices
    #[command(name = "gas-price")]
    GasPrice(commands::GasPriceCommand),

    /// Wait for the receipt of a user operation
    #[command(name = "wait-receipt")]
    WaitReceipt(commands::WaitReceiptCommand),
}

pub fn run() -> eyre::Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    let rust_log = match std::env::var("RUST_LOG") {
        Ok(val) => format!("{val},uorun={}", cli.get_log_level()),
        Err(_) => format!("uorun={}", cli.get_log_level()),
    };
    std::env::set_var("RUST_LOG", rust_log);
    tracing_subscriber::fmt::init();

    let rt = tokio::runtime::Builder::new_multi_thread().enable_all().build()?;

    let task = async move {
        match cli.command {
            Commands::SafeSponsored(command) => command.execute().await,
            Commands::SimpleSponsored(command) => command.execute().await,
            Commands::Erc20Paymaster(command) => command.execute().await,
            Commands::GenerateKey(command) => command.execute(),
            Commands::SenderAddress(command) => command.execute().await,
            Commands::GasPrice(command) => command.execute().await,
            Commands::WaitReceipt(command) => command.execute().await,
        }
    };

    rt.block_on(run_until_ctrl_c(task))
}
