use jsonrpsee::core::ClientError;
use std::time::Duration;
use thiserror::Error;
use uorun_primitives::UserOperationHash;

/// Bundler and paymaster client errors
#[derive(Debug, Error)]
pub enum RpcClientError {
    /// JSON-RPC request failed (transport error or error response)
    #[error(transparent)]
    Client(#[from] ClientError),

    #[error("invalid endpoint {url}: {inner}")]
    InvalidUrl { url: String, inner: String },

    #[error("user operation {hash} not included after {timeout:?}")]
    Timeout { hash: UserOperationHash, timeout: Duration },
}
