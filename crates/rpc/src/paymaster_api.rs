use ethers::types::Address;
use jsonrpsee::{core::RpcResult, proc_macros::rpc};
use uorun_primitives::{SponsorUserOperationResult, UserOperationPartial};

/// Verifying paymaster (`pm` namespace)
#[rpc(client, server, namespace = "pm")]
pub trait PaymasterApi {
    /// Asks the paymaster to sponsor the user operation.
    ///
    /// The result holds the paymaster fields and the gas limits the sponsorship was signed for, in
    /// the shape of the entry point version.
    #[method(name = "sponsorUserOperation")]
    async fn sponsor_user_operation(
        &self,
        user_operation: UserOperationPartial,
        entry_point: Address,
    ) -> RpcResult<SponsorUserOperationResult>;
}
