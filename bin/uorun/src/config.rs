//! Service endpoints resolved from the flags, the environment and per-walkthrough defaults

use crate::cli::args::NetworkArgs;
use alloy_chains::{Chain, NamedChain};
use eyre::eyre;
use uorun_primitives::{
    chain::ChainExt,
    constants::{
        pimlico::{API_KEY_ENV, BASE_URL},
        public_rpc,
    },
};

/// Version of the Pimlico API the bundler URL points to
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PimlicoApiVersion {
    /// Still serves the v0.6 entry point bundler
    V1,
    #[default]
    V2,
}

impl PimlicoApiVersion {
    fn path(&self) -> &'static str {
        match self {
            Self::V1 => "v1",
            Self::V2 => "v2",
        }
    }
}

/// Pimlico JSON-RPC URL of the chain
pub fn pimlico_url(version: PimlicoApiVersion, chain: &Chain, api_key: &str) -> String {
    format!("{BASE_URL}/{}/{}/rpc?apikey={api_key}", version.path(), chain.pimlico_name())
}

/// Public execution client of the chain, if one is known
pub fn default_rpc_url(chain: &Chain) -> Option<&'static str> {
    match chain.named() {
        Some(NamedChain::Sepolia) => Some(public_rpc::SEPOLIA),
        Some(NamedChain::PolygonMumbai) => Some(public_rpc::POLYGON_MUMBAI),
        _ => None,
    }
}

/// Reads the API key from the environment (after the dotfile is loaded)
pub fn api_key_from_env() -> Option<String> {
    std::env::var(API_KEY_ENV).ok().filter(|key| !key.trim().is_empty())
}

/// Endpoints a walkthrough talks to
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub chain: Chain,
    rpc_url: Option<String>,
    bundler_url: Option<String>,
    paymaster_url: Option<String>,
    bundler_api: PimlicoApiVersion,
    api_key: Option<String>,
}

impl Config {
    /// Flags take precedence over the defaults of the walkthrough
    pub fn new(
        args: &NetworkArgs,
        default_chain: NamedChain,
        bundler_api: PimlicoApiVersion,
        api_key: Option<String>,
    ) -> Self {
        Self {
            chain: args.chain.unwrap_or_else(|| Chain::from_named(default_chain)),
            rpc_url: args.rpc_url.clone(),
            bundler_url: args.bundler_url.clone(),
            paymaster_url: args.paymaster_url.clone(),
            bundler_api,
            api_key,
        }
    }

    /// Execution client URL
    pub fn rpc_url(&self) -> eyre::Result<&str> {
        self.rpc_url.as_deref().or_else(|| default_rpc_url(&self.chain)).ok_or_else(|| {
            eyre!("No public RPC URL known for chain {}, use --rpc-url", self.chain)
        })
    }

    /// Bundler URL, the Pimlico bundler unless overridden
    pub fn bundler_url(&self) -> eyre::Result<String> {
        match &self.bundler_url {
            Some(url) => Ok(url.clone()),
            None => Ok(pimlico_url(self.bundler_api, &self.chain, self.api_key()?)),
        }
    }

    /// Paymaster URL, the Pimlico (v2) paymaster unless overridden
    pub fn paymaster_url(&self) -> eyre::Result<String> {
        match &self.paymaster_url {
            Some(url) => Ok(url.clone()),
            None => Ok(pimlico_url(PimlicoApiVersion::V2, &self.chain, self.api_key()?)),
        }
    }

    fn api_key(&self) -> eyre::Result<&str> {
        self.api_key.as_deref().ok_or_else(|| eyre!("Missing {API_KEY_ENV}"))
    }
}
