use jsonrpsee::{core::RpcResult, proc_macros::rpc};
use uorun_primitives::UserOperationGasPrice;

/// Pimlico bundler extensions (`pimlico` namespace)
#[rpc(client, server, namespace = "pimlico")]
pub trait PimlicoApi {
    /// Gas prices (slow, standard and fast tiers) the bundler accepts for user operations
    #[method(name = "getUserOperationGasPrice")]
    async fn get_user_operation_gas_price(&self) -> RpcResult<UserOperationGasPrice>;
}
