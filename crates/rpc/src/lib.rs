//! Account abstraction (ERC-4337) bundler and paymaster JSON-RPC
//!
//! API definitions of the `eth`, `pimlico` and `pm` namespaces and typed clients on top of them.

mod client;
mod error;
mod eth_api;
mod paymaster_api;
mod pimlico_api;

pub use client::{BundlerClient, PaymasterClient, WaitOptions};
pub use error::RpcClientError;
pub use eth_api::{EthApiClient, EthApiServer};
pub use paymaster_api::{PaymasterApiClient, PaymasterApiServer};
pub use pimlico_api::{PimlicoApiClient, PimlicoApiServer};
