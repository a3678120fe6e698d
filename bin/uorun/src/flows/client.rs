use super::submit;
use ethers::{
    providers::Middleware,
    types::{Address, Bytes, H256, U256},
};
use tracing::{debug, warn};
use uorun_contracts::{EntryPoint, SmartAccount};
use uorun_primitives::{
    pack_init_code, EntryPointVersion, GasPriceTier, UserOperation, UserOperationGasEstimation,
    UserOperationPartial, UserOperationV06, UserOperationV07,
};
use uorun_rpc::{BundlerClient, PaymasterClient, WaitOptions};

/// Sends transactions from a smart account as user operations
///
/// Gas prices come from the bundler (`fast` tier by default). Gas limits come from the paymaster
/// sponsorship when a paymaster is set, otherwise from the bundler estimation.
pub struct SmartAccountClient<M: Middleware + 'static, A: SmartAccount> {
    account: A,
    entry_point: EntryPoint<M>,
    bundler: BundlerClient,
    paymaster: Option<PaymasterClient>,
    chain_id: u64,
    gas_price_tier: GasPriceTier,
    wait: WaitOptions,
}

impl<M: Middleware + 'static, A: SmartAccount> SmartAccountClient<M, A> {
    pub fn new(
        account: A,
        entry_point: EntryPoint<M>,
        bundler: BundlerClient,
        chain_id: u64,
    ) -> Self {
        Self {
            account,
            entry_point,
            bundler,
            paymaster: None,
            chain_id,
            gas_price_tier: GasPriceTier::default(),
            wait: WaitOptions::default(),
        }
    }

    pub fn paymaster(mut self, paymaster: PaymasterClient) -> Self {
        self.paymaster = Some(paymaster);
        self
    }

    pub fn gas_price_tier(mut self, tier: GasPriceTier) -> Self {
        self.gas_price_tier = tier;
        self
    }

    pub fn wait_options(mut self, wait: WaitOptions) -> Self {
        self.wait = wait;
        self
    }

    pub fn account(&self) -> &A {
        &self.account
    }

    /// Builds the user operation up to (but excluding) the signature
    pub async fn prepare_user_operation(
        &self,
        to: Address,
        value: U256,
        data: Bytes,
    ) -> eyre::Result<UserOperation> {
        let sender = self.account.address().await?;
        let nonce = self.entry_point.get_nonce(&sender, U256::zero()).await?;
        let factory = if self.entry_point.is_deployed(&sender).await? {
            None
        } else {
            debug!("Account {sender:?} not deployed yet, adding factory data");
            Some(self.account.factory_and_data())
        };

        let uo = build_user_operation(
            self.account.entry_point_version(),
            sender,
            nonce,
            factory,
            self.account.encode_call_data(to, value, data),
            self.account.dummy_signature(),
        );

        let gas_price =
            self.bundler.get_user_operation_gas_price().await?.tier(self.gas_price_tier);
        let uo = uo.with_gas_price(gas_price.max_fee_per_gas, gas_price.max_priority_fee_per_gas);

        let uo = match &self.paymaster {
            Some(paymaster) => {
                let request = UserOperationPartial::from(uo.clone()).without_gas_limits();
                let sponsorship = paymaster.sponsor_user_operation(request).await?;
                sponsorship.merge(uo)?
            }
            None => {
                let estimation = self
                    .bundler
                    .estimate_user_operation_gas(UserOperationPartial::from(uo.clone()))
                    .await?;
                apply_gas_estimation(uo, &estimation)
            }
        };

        Ok(uo)
    }

    /// Signs, sends and waits for the user operation, returning the hash of the transaction
    /// including it
    pub async fn send_transaction(
        &self,
        to: Address,
        value: U256,
        data: Bytes,
    ) -> eyre::Result<H256> {
        let uo = self.prepare_user_operation(to, value, data).await?;
        let signature = self.account.sign_user_operation(&uo, self.chain_id).await?;
        let uo = uo.with_signature(signature);

        let receipt = submit(&self.bundler, &uo, self.wait).await?;
        if !receipt.success {
            warn!("User operation reverted: {}", receipt.reason.as_deref().unwrap_or("no reason"));
        }
        Ok(receipt.tx_receipt.transaction_hash)
    }
}

/// Unsigned user operation of the entry point version, without gas fields
///
/// `factory` is only set for accounts which are not deployed yet.
pub fn build_user_operation(
    version: EntryPointVersion,
    sender: Address,
    nonce: U256,
    factory: Option<(Address, Bytes)>,
    call_data: Bytes,
    signature: Bytes,
) -> UserOperation {
    match version {
        EntryPointVersion::V0_6 => {
            let init_code = factory
                .map(|(factory, data)| pack_init_code(Some(factory), &data))
                .unwrap_or_default();
            UserOperationV06::default()
                .sender(sender)
                .nonce(nonce)
                .init_code(init_code)
                .call_data(call_data)
                .signature(signature)
                .into()
        }
        EntryPointVersion::V0_7 => {
            let uo = UserOperationV07::default().sender(sender).nonce(nonce);
            let uo = match factory {
                Some((factory, data)) => uo.factory(factory, data),
                None => uo,
            };
            uo.call_data(call_data).signature(signature).into()
        }
    }
}

fn apply_gas_estimation(
    uo: UserOperation,
    estimation: &UserOperationGasEstimation,
) -> UserOperation {
    match uo {
        UserOperation::V06(uo) => uo
            .call_gas_limit(estimation.call_gas_limit)
            .verification_gas_limit(estimation.verification_gas_limit)
            .pre_verification_gas(estimation.pre_verification_gas)
            .into(),
        UserOperation::V07(uo) => uo
            .call_gas_limit(estimation.call_gas_limit)
            .verification_gas_limit(estimation.verification_gas_limit)
            .pre_verification_gas(estimation.pre_verification_gas)
            .into(),
    }
}
