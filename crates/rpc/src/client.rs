//! Clients of the hosted bundler and paymaster services

use crate::{
    error::RpcClientError, eth_api::EthApiClient, paymaster_api::PaymasterApiClient,
    pimlico_api::PimlicoApiClient,
};
use ethers::types::Address;
use jsonrpsee::http_client::{HttpClient, HttpClientBuilder};
use std::time::Duration;
use tracing::{debug, trace};
use uorun_primitives::{
    constants::defaults::RECEIPT_POLL_INTERVAL_MS, SponsorUserOperationResult, UserOperation,
    UserOperationByHash, UserOperationGasEstimation, UserOperationGasPrice, UserOperationHash,
    UserOperationPartial, UserOperationReceipt,
};

/// How to wait for a user operation receipt
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WaitOptions {
    /// Fixed delay between two `eth_getUserOperationReceipt` calls
    pub poll_interval: Duration,
    /// Give up after this long; wait forever when `None`
    pub timeout: Option<Duration>,
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self { poll_interval: Duration::from_millis(RECEIPT_POLL_INTERVAL_MS), timeout: None }
    }
}

fn build_http_client(url: &str) -> Result<HttpClient, RpcClientError> {
    HttpClientBuilder::default()
        .build(url)
        .map_err(|err| RpcClientError::InvalidUrl { url: url.into(), inner: err.to_string() })
}

/// Bundler client bound to one entry point
#[derive(Clone, Debug)]
pub struct BundlerClient {
    client: HttpClient,
    entry_point: Address,
}

impl BundlerClient {
    pub fn new(url: &str, entry_point: Address) -> Result<Self, RpcClientError> {
        Ok(Self { client: build_http_client(url)?, entry_point })
    }

    pub fn entry_point(&self) -> Address {
        self.entry_point
    }

    pub async fn chain_id(&self) -> Result<u64, RpcClientError> {
        Ok(EthApiClient::chain_id(&self.client).await?.as_u64())
    }

    pub async fn supported_entry_points(&self) -> Result<Vec<String>, RpcClientError> {
        Ok(EthApiClient::supported_entry_points(&self.client).await?)
    }

    pub async fn get_user_operation_gas_price(
        &self,
    ) -> Result<UserOperationGasPrice, RpcClientError> {
        let gas_price = self.client.get_user_operation_gas_price().await?;
        debug!("User operation gas price: {gas_price:?}");
        Ok(gas_price)
    }

    pub async fn send_user_operation(
        &self,
        uo: &UserOperation,
    ) -> Result<UserOperationHash, RpcClientError> {
        debug!("Sending user operation {}", serde_json::to_string(uo).unwrap_or_default());
        Ok(self.client.send_user_operation(uo.clone(), self.entry_point).await?)
    }

    pub async fn estimate_user_operation_gas(
        &self,
        uo: UserOperationPartial,
    ) -> Result<UserOperationGasEstimation, RpcClientError> {
        Ok(self.client.estimate_user_operation_gas(uo, self.entry_point).await?)
    }

    pub async fn get_user_operation_receipt(
        &self,
        hash: UserOperationHash,
    ) -> Result<Option<UserOperationReceipt>, RpcClientError> {
        Ok(self.client.get_user_operation_receipt(hash).await?)
    }

    pub async fn get_user_operation_by_hash(
        &self,
        hash: UserOperationHash,
    ) -> Result<Option<UserOperationByHash>, RpcClientError> {
        Ok(self.client.get_user_operation_by_hash(hash).await?)
    }

    /// Polls `eth_getUserOperationReceipt` at a fixed interval until the receipt is available
    pub async fn wait_for_user_operation_receipt(
        &self,
        hash: UserOperationHash,
        opts: WaitOptions,
    ) -> Result<UserOperationReceipt, RpcClientError> {
        match opts.timeout {
            Some(timeout) => {
                tokio::time::timeout(timeout, self.poll_receipt(hash, opts.poll_interval))
                    .await
                    .map_err(|_| RpcClientError::Timeout { hash, timeout })?
            }
            None => self.poll_receipt(hash, opts.poll_interval).await,
        }
    }

    async fn poll_receipt(
        &self,
        hash: UserOperationHash,
        interval: Duration,
    ) -> Result<UserOperationReceipt, RpcClientError> {
        loop {
            if let Some(receipt) = self.get_user_operation_receipt(hash).await? {
                return Ok(receipt);
            }
            trace!("Receipt of user operation {hash} not available yet");
            tokio::time::sleep(interval).await;
        }
    }
}

/// Paymaster client bound to one entry point
#[derive(Clone, Debug)]
pub struct PaymasterClient {
    client: HttpClient,
    entry_point: Address,
}

impl PaymasterClient {
    pub fn new(url: &str, entry_point: Address) -> Result<Self, RpcClientError> {
        Ok(Self { client: build_http_client(url)?, entry_point })
    }

    pub fn entry_point(&self) -> Address {
        self.entry_point
    }

    pub async fn sponsor_user_operation(
        &self,
        uo: UserOperationPartial,
    ) -> Result<SponsorUserOperationResult, RpcClientError> {
        debug!("Requesting sponsorship for {}", serde_json::to_string(&uo).unwrap_or_default());
        let res = self.client.sponsor_user_operation(uo, self.entry_point).await?;
        debug!("Sponsorship result: {res:?}");
        Ok(res)
    }
}
