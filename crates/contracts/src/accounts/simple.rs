use super::SmartAccount;
use crate::{
    entry_point::EntryPoint,
    error::AccountError,
    gen::simple_account::{CreateAccountCall, ExecuteCall},
};
use async_trait::async_trait;
use ethers::{
    abi::AbiEncode,
    providers::Middleware,
    types::{Address, Bytes, U256},
};
use uorun_primitives::{
    constants::simple_account::{
        DUMMY_SIGNATURE_V0_6, DUMMY_SIGNATURE_V0_7, FACTORY_V0_6, FACTORY_V0_7,
    },
    EntryPointVersion, UserOperation, Wallet,
};

/// eth-infinitism `SimpleAccount`, owned by a single ECDSA key
pub struct SimpleAccount<M: Middleware + 'static> {
    entry_point: EntryPoint<M>,
    version: EntryPointVersion,
    factory: Address,
    wallet: Wallet,
    salt: U256,
}

impl<M: Middleware + 'static> SimpleAccount<M> {
    pub fn new(entry_point: EntryPoint<M>, version: EntryPointVersion, wallet: Wallet) -> Self {
        let factory = match version {
            EntryPointVersion::V0_6 => FACTORY_V0_6,
            EntryPointVersion::V0_7 => FACTORY_V0_7,
        };
        let factory = factory.parse().expect("factory address constant is valid");
        Self { entry_point, version, factory, wallet, salt: U256::zero() }
    }

    pub fn salt(mut self, salt: U256) -> Self {
        self.salt = salt;
        self
    }

    pub fn wallet(&self) -> &Wallet {
        &self.wallet
    }
}

/// `execute(dest, value, func)`
pub fn encode_execute(dest: Address, value: U256, func: Bytes) -> Bytes {
    ExecuteCall { dest, value, func }.encode().into()
}

/// `createAccount(owner, salt)`
pub fn encode_create_account(owner: Address, salt: U256) -> Bytes {
    CreateAccountCall { owner, salt }.encode().into()
}

#[async_trait]
impl<M: Middleware + 'static> SmartAccount for SimpleAccount<M> {
    fn entry_point_version(&self) -> EntryPointVersion {
        self.version
    }

    fn entry_point(&self) -> Address {
        self.entry_point.address()
    }

    fn owner(&self) -> Address {
        self.wallet.address()
    }

    fn factory_and_data(&self) -> (Address, Bytes) {
        (self.factory, encode_create_account(self.owner(), self.salt))
    }

    async fn address(&self) -> Result<Address, AccountError> {
        Ok(self.entry_point.get_sender_address(self.init_code()).await?)
    }

    fn encode_call_data(&self, to: Address, value: U256, data: Bytes) -> Bytes {
        encode_execute(to, value, data)
    }

    fn dummy_signature(&self) -> Bytes {
        let sig = match self.version {
            EntryPointVersion::V0_6 => DUMMY_SIGNATURE_V0_6,
            EntryPointVersion::V0_7 => DUMMY_SIGNATURE_V0_7,
        };
        sig.parse().unwrap_or_default()
    }

    async fn sign_user_operation(
        &self,
        uo: &UserOperation,
        chain_id: u64,
    ) -> Result<Bytes, AccountError> {
        let signed = self.wallet.sign_uo(uo, &self.entry_point.address(), chain_id).await?;
        Ok(signed.signature().clone())
    }
}
