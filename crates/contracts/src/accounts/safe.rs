//! Safe 1.4.1 account with the Safe 4337 module

use super::SmartAccount;
use crate::{
    entry_point::EntryPoint,
    error::AccountError,
    gen::safe::{
        CreateProxyWithNonceCall, EnableModulesCall, ExecuteUserOpWithErrorStringCall,
        MultiSendCall, SetupCall,
    },
};
use async_trait::async_trait;
use ethers::{
    abi::{encode, AbiEncode, Token},
    providers::Middleware,
    types::{Address, Bytes, H256, U256},
    utils::keccak256,
};
use lazy_static::lazy_static;
use uorun_primitives::{
    constants::safe::{
        DUMMY_ECDSA_SIGNATURE, MODULE_4337, MODULE_SETUP, MULTI_SEND, PROXY_FACTORY, SINGLETON,
    },
    EntryPointVersion, UserOperation, UserOperationV07, Wallet, WalletError,
};

const DOMAIN_SEPARATOR_TYPE: &str = "EIP712Domain(uint256 chainId,address verifyingContract)";
const SAFE_OP_TYPE: &str = "SafeOp(address safe,uint256 nonce,bytes initCode,bytes callData,uint128 verificationGasLimit,uint128 callGasLimit,uint256 preVerificationGas,uint128 maxPriorityFeePerGas,uint128 maxFeePerGas,bytes paymasterAndData,uint48 validAfter,uint48 validUntil,address entryPoint)";

/// MultiSend operation
const DELEGATE_CALL: u8 = 1;

lazy_static! {
    static ref DOMAIN_SEPARATOR_TYPEHASH: [u8; 32] = keccak256(DOMAIN_SEPARATOR_TYPE);
    static ref SAFE_OP_TYPEHASH: [u8; 32] = keccak256(SAFE_OP_TYPE);
}

/// Addresses of the Safe deployment the account is created from
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SafeAddresses {
    pub singleton: Address,
    pub proxy_factory: Address,
    pub module_4337: Address,
    pub module_setup: Address,
    pub multi_send: Address,
}

impl Default for SafeAddresses {
    fn default() -> Self {
        let parse = |addr: &str| addr.parse().expect("Safe address constant is valid");
        Self {
            singleton: parse(SINGLETON),
            proxy_factory: parse(PROXY_FACTORY),
            module_4337: parse(MODULE_4337),
            module_setup: parse(MODULE_SETUP),
            multi_send: parse(MULTI_SEND),
        }
    }
}

/// Safe owned by a single ECDSA key, with the 4337 module enabled and set as fallback handler
pub struct SafeAccount<M: Middleware + 'static> {
    entry_point: EntryPoint<M>,
    addresses: SafeAddresses,
    wallet: Wallet,
    salt_nonce: U256,
}

impl<M: Middleware + 'static> SafeAccount<M> {
    pub fn new(
        entry_point: EntryPoint<M>,
        version: EntryPointVersion,
        wallet: Wallet,
    ) -> Result<Self, AccountError> {
        if version != EntryPointVersion::V0_7 {
            return Err(AccountError::UnsupportedEntryPoint { account: "Safe", version });
        }
        Ok(Self { entry_point, addresses: SafeAddresses::default(), wallet, salt_nonce: U256::zero() })
    }

    pub fn salt_nonce(mut self, salt_nonce: U256) -> Self {
        self.salt_nonce = salt_nonce;
        self
    }

    /// `setup` calldata, enabling the 4337 module through a delegate call to the module setup
    /// contract
    pub fn initializer(&self) -> Bytes {
        let enable_modules =
            EnableModulesCall { modules: vec![self.addresses.module_4337] }.encode();
        let transactions = encode_multi_send_tx(
            DELEGATE_CALL,
            self.addresses.module_setup,
            U256::zero(),
            &enable_modules,
        );
        let multi_send = MultiSendCall { transactions }.encode();

        SetupCall {
            owners: vec![self.wallet.address()],
            threshold: U256::one(),
            to: self.addresses.multi_send,
            data: multi_send.into(),
            fallback_handler: self.addresses.module_4337,
            payment_token: Address::zero(),
            payment: U256::zero(),
            payment_receiver: Address::zero(),
        }
        .encode()
        .into()
    }

    /// EIP-712 digest of the `SafeOp` the 4337 module verifies
    pub fn safe_op_hash(
        &self,
        uo: &UserOperationV07,
        chain_id: u64,
        valid_after: u64,
        valid_until: u64,
    ) -> H256 {
        let domain_separator = keccak256(encode(&[
            Token::FixedBytes(DOMAIN_SEPARATOR_TYPEHASH.to_vec()),
            Token::Uint(chain_id.into()),
            Token::Address(self.addresses.module_4337),
        ]));
        let struct_hash = keccak256(encode(&[
            Token::FixedBytes(SAFE_OP_TYPEHASH.to_vec()),
            Token::Address(uo.sender),
            Token::Uint(uo.nonce),
            Token::FixedBytes(keccak256(uo.init_code()).to_vec()),
            Token::FixedBytes(keccak256(&uo.call_data).to_vec()),
            Token::Uint(uo.verification_gas_limit),
            Token::Uint(uo.call_gas_limit),
            Token::Uint(uo.pre_verification_gas),
            Token::Uint(uo.max_priority_fee_per_gas),
            Token::Uint(uo.max_fee_per_gas),
            Token::FixedBytes(keccak256(uo.paymaster_and_data()).to_vec()),
            Token::Uint(valid_after.into()),
            Token::Uint(valid_until.into()),
            Token::Address(self.entry_point.address()),
        ]));

        keccak256([&[0x19, 0x01][..], &domain_separator[..], &struct_hash[..]].concat()).into()
    }
}

/// Packs a single MultiSend transaction: `operation ‖ to ‖ value ‖ data.length ‖ data`
pub fn encode_multi_send_tx(operation: u8, to: Address, value: U256, data: &[u8]) -> Bytes {
    [
        &[operation][..],
        to.as_bytes(),
        &value.encode()[..],
        &U256::from(data.len()).encode()[..],
        data,
    ]
    .concat()
    .into()
}

/// `uint48 validAfter ‖ uint48 validUntil ‖ signature`
fn pack_validity(valid_after: u64, valid_until: u64, signature: &[u8]) -> Bytes {
    [&valid_after.to_be_bytes()[2..], &valid_until.to_be_bytes()[2..], signature].concat().into()
}

#[async_trait]
impl<M: Middleware + 'static> SmartAccount for SafeAccount<M> {
    fn entry_point_version(&self) -> EntryPointVersion {
        EntryPointVersion::V0_7
    }

    fn entry_point(&self) -> Address {
        self.entry_point.address()
    }

    fn owner(&self) -> Address {
        self.wallet.address()
    }

    fn factory_and_data(&self) -> (Address, Bytes) {
        let data = CreateProxyWithNonceCall {
            singleton: self.addresses.singleton,
            initializer: self.initializer(),
            salt_nonce: self.salt_nonce,
        }
        .encode();
        (self.addresses.proxy_factory, data.into())
    }

    async fn address(&self) -> Result<Address, AccountError> {
        Ok(self.entry_point.get_sender_address(self.init_code()).await?)
    }

    fn encode_call_data(&self, to: Address, value: U256, data: Bytes) -> Bytes {
        ExecuteUserOpWithErrorStringCall { to, value, data, operation: 0 }.encode().into()
    }

    fn dummy_signature(&self) -> Bytes {
        let sig: Bytes = DUMMY_ECDSA_SIGNATURE.parse().unwrap_or_default();
        pack_validity(0, 0, &sig)
    }

    async fn sign_user_operation(
        &self,
        uo: &UserOperation,
        chain_id: u64,
    ) -> Result<Bytes, AccountError> {
        let UserOperation::V07(uo) = uo else {
            return Err(AccountError::UnsupportedEntryPoint {
                account: "Safe",
                version: uo.version(),
            });
        };
        if let Some(field) = uo.oversized_gas_field() {
            return Err(WalletError::GasOverflow(field).into());
        }
        let digest = self.safe_op_hash(uo, chain_id, 0, 0);
        let sig = self.wallet.sign_hash(digest)?;
        Ok(pack_validity(0, 0, &sig.to_vec()))
    }
}
