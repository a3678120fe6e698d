//! Chain extensions
use alloy_chains::{Chain, NamedChain};
use ethers::types::{Address, H256};

pub trait ChainExt {
    /// Chain path segment of the Pimlico API URLs
    fn pimlico_name(&self) -> String;

    /// Block explorer page of a transaction
    fn explorer_tx_url(&self, hash: H256) -> Option<String>;

    /// Block explorer page of an address
    fn explorer_address_url(&self, address: Address) -> Option<String>;
}

impl ChainExt for Chain {
    fn pimlico_name(&self) -> String {
        let name = match self.named() {
            Some(NamedChain::Mainnet) => "ethereum",
            Some(NamedChain::Sepolia) => "sepolia",
            Some(NamedChain::Goerli) => "goerli",
            Some(NamedChain::Polygon) => "polygon",
            Some(NamedChain::PolygonMumbai) => "mumbai",
            Some(NamedChain::Optimism) => "optimism",
            Some(NamedChain::OptimismSepolia) => "optimism-sepolia",
            Some(NamedChain::Arbitrum) => "arbitrum",
            Some(NamedChain::ArbitrumSepolia) => "arbitrum-sepolia",
            Some(NamedChain::Base) => "base",
            Some(NamedChain::BaseSepolia) => "base-sepolia",
            _ => return self.id().to_string(),
        };
        name.into()
    }

    fn explorer_tx_url(&self, hash: H256) -> Option<String> {
        self.etherscan_urls().map(|(_, base)| format!("{base}/tx/{hash:?}"))
    }

    fn explorer_address_url(&self, address: Address) -> Option<String> {
        self.etherscan_urls().map(|(_, base)| format!("{base}/address/{address:?}"))
    }
}
