use async_trait::async_trait;
use ethers::types::{Address, TransactionReceipt, H256, U256, U64};
use jsonrpsee::{
    core::RpcResult,
    server::{ServerBuilder, ServerHandle},
    types::ErrorObjectOwned,
    RpcModule,
};
use std::{
    net::{Ipv4Addr, SocketAddr, SocketAddrV4},
    sync::{
        atomic::{AtomicU16, AtomicUsize, Ordering},
        Arc, Mutex,
    },
};
use uorun_primitives::{
    GasPrice, SponsorUserOperationResult, SponsorUserOperationResultV06,
    SponsorUserOperationResultV07, UserOperation, UserOperationByHash,
    UserOperationGasEstimation, UserOperationGasPrice, UserOperationHash, UserOperationPartial,
    UserOperationReceipt,
};
use uorun_rpc::{EthApiServer, PaymasterApiServer, PimlicoApiServer};

pub const CHAIN_ID: u64 = 11_155_111;

static PORT: AtomicU16 = AtomicU16::new(18000);

/// test_address returns a address on localhost with a increasing port number.
/// This is to prevent multiple tests from using the same port.
pub fn test_address() -> String {
    let port = PORT.fetch_add(1, Ordering::SeqCst);
    SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::LOCALHOST, port)).to_string()
}

/// State of the mock bundler and paymaster, shared with the test
#[derive(Default)]
pub struct MockState {
    /// Number of `null` receipts returned before the receipt
    pub pending_polls: usize,
    pub receipt_calls: AtomicUsize,
    pub sent: Mutex<Vec<UserOperation>>,
    pub sponsored: Mutex<Vec<UserOperationPartial>>,
}

#[derive(Clone)]
pub struct MockService {
    pub state: Arc<MockState>,
}

pub fn gas_price() -> UserOperationGasPrice {
    UserOperationGasPrice {
        slow: GasPrice { max_fee_per_gas: 10.into(), max_priority_fee_per_gas: 1.into() },
        standard: GasPrice { max_fee_per_gas: 20.into(), max_priority_fee_per_gas: 2.into() },
        fast: GasPrice { max_fee_per_gas: 30.into(), max_priority_fee_per_gas: 3.into() },
    }
}

pub fn paymaster() -> Address {
    "0x0000000000000039cd5e8aE05257CE51C473ddd1".parse().unwrap()
}

pub fn transaction_hash() -> H256 {
    "0x95418c07086df02ff6bc9e8bdc150b380cb761beecc098630440bcec6e862702".parse().unwrap()
}

#[async_trait]
impl EthApiServer for MockService {
    async fn chain_id(&self) -> RpcResult<U64> {
        Ok(CHAIN_ID.into())
    }

    async fn supported_entry_points(&self) -> RpcResult<Vec<String>> {
        Ok(vec!["0x0000000071727De22E5E9d8BAf0edAc6f37da032".into()])
    }

    async fn send_user_operation(
        &self,
        user_operation: UserOperation,
        entry_point: Address,
    ) -> RpcResult<UserOperationHash> {
        if user_operation.signature().is_empty() {
            return Err(ErrorObjectOwned::owned(-32507, "Invalid UserOperation signature", None::<()>));
        }
        let hash = user_operation.hash(&entry_point, CHAIN_ID);
        self.state.sent.lock().unwrap().push(user_operation);
        Ok(hash)
    }

    async fn estimate_user_operation_gas(
        &self,
        _user_operation: UserOperationPartial,
        _entry_point: Address,
    ) -> RpcResult<UserOperationGasEstimation> {
        Ok(UserOperationGasEstimation {
            pre_verification_gas: 50_000.into(),
            verification_gas_limit: 500_000.into(),
            call_gas_limit: 100_000.into(),
            paymaster_verification_gas_limit: None,
        })
    }

    async fn get_user_operation_receipt(
        &self,
        user_operation_hash: UserOperationHash,
    ) -> RpcResult<Option<UserOperationReceipt>> {
        let calls = self.state.receipt_calls.fetch_add(1, Ordering::SeqCst);
        if calls < self.state.pending_polls {
            return Ok(None);
        }

        let sent = self.state.sent.lock().unwrap();
        let Some(uo) = sent.last() else {
            return Ok(None);
        };
        Ok(Some(UserOperationReceipt {
            user_operation_hash,
            entry_point: None,
            sender: uo.sender(),
            nonce: uo.nonce(),
            paymaster: Some(paymaster()),
            actual_gas_cost: U256::from(1_000),
            actual_gas_used: U256::from(100),
            success: true,
            reason: None,
            logs: vec![],
            tx_receipt: TransactionReceipt {
                transaction_hash: transaction_hash(),
                ..Default::default()
            },
        }))
    }

    async fn get_user_operation_by_hash(
        &self,
        _user_operation_hash: UserOperationHash,
    ) -> RpcResult<Option<UserOperationByHash>> {
        Ok(None)
    }
}

#[async_trait]
impl PimlicoApiServer for MockService {
    async fn get_user_operation_gas_price(&self) -> RpcResult<UserOperationGasPrice> {
        Ok(gas_price())
    }
}

#[async_trait]
impl PaymasterApiServer for MockService {
    async fn sponsor_user_operation(
        &self,
        user_operation: UserOperationPartial,
        _entry_point: Address,
    ) -> RpcResult<SponsorUserOperationResult> {
        let res = if user_operation.init_code.is_some() ||
            user_operation.paymaster_and_data.is_some()
        {
            SponsorUserOperationResult::V06(SponsorUserOperationResultV06 {
                paymaster_and_data: paymaster().as_bytes().to_vec().into(),
                pre_verification_gas: 50_000.into(),
                verification_gas_limit: 500_000.into(),
                call_gas_limit: 100_000.into(),
            })
        } else {
            SponsorUserOperationResult::V07(SponsorUserOperationResultV07 {
                call_gas_limit: 100_000.into(),
                verification_gas_limit: 500_000.into(),
                pre_verification_gas: 50_000.into(),
                paymaster: paymaster(),
                paymaster_verification_gas_limit: 40_000.into(),
                paymaster_post_op_gas_limit: 1.into(),
                paymaster_data: "0x1234".parse().unwrap(),
            })
        };
        self.state.sponsored.lock().unwrap().push(user_operation);
        Ok(res)
    }
}

/// Starts the mock bundler and paymaster, returning its URL
pub async fn start_mock(state: Arc<MockState>) -> eyre::Result<(String, ServerHandle)> {
    let addr = test_address();
    let server = ServerBuilder::default().build(addr.as_str()).await?;

    let service = MockService { state };
    let mut module = RpcModule::new(());
    module.merge(EthApiServer::into_rpc(service.clone()))?;
    module.merge(PimlicoApiServer::into_rpc(service.clone()))?;
    module.merge(PaymasterApiServer::into_rpc(service))?;

    let handle = server.start(module);
    Ok((format!("http://{addr}"), handle))
}
