//! Smart accounts the user operations are sent from

mod safe;
mod simple;

use crate::error::AccountError;
use async_trait::async_trait;
use ethers::types::{Address, Bytes, U256};
pub use safe::{encode_multi_send_tx, SafeAccount, SafeAddresses};
pub use simple::{encode_create_account, encode_execute, SimpleAccount};
use uorun_primitives::{pack_init_code, EntryPointVersion, UserOperation};

/// Smart account: counterfactual address, call data encoding and user operation signing
#[async_trait]
pub trait SmartAccount: Send + Sync {
    fn entry_point_version(&self) -> EntryPointVersion;

    fn entry_point(&self) -> Address {
        self.entry_point_version().address()
    }

    /// Address of the owner (signer) of the account
    fn owner(&self) -> Address;

    /// Factory and calldata deploying the account
    fn factory_and_data(&self) -> (Address, Bytes);

    /// `factory ‖ factoryData`
    fn init_code(&self) -> Bytes {
        let (factory, data) = self.factory_and_data();
        pack_init_code(Some(factory), &data)
    }

    /// Counterfactual address of the account
    async fn address(&self) -> Result<Address, AccountError>;

    /// Call data executing a call from the account
    fn encode_call_data(&self, to: Address, value: U256, data: Bytes) -> Bytes;

    /// Signature of the right shape so the account doesn't revert during estimation
    fn dummy_signature(&self) -> Bytes;

    async fn sign_user_operation(
        &self,
        uo: &UserOperation,
        chain_id: u64,
    ) -> Result<Bytes, AccountError>;
}
