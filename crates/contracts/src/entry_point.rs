use crate::{
    error::{sender_address_from_revert, EntryPointError},
    gen::entry_point_api::EntryPointAPI,
};
use ethers::{
    providers::Middleware,
    types::{Address, Bytes, U256},
};
use std::sync::Arc;
use tracing::debug;

#[derive(Clone)]
pub struct EntryPoint<M: Middleware + 'static> {
    eth_client: Arc<M>,
    address: Address,
    entry_point_api: EntryPointAPI<M>,
}

impl<M: Middleware + 'static> EntryPoint<M> {
    pub fn new(eth_client: Arc<M>, address: Address) -> Self {
        let entry_point_api = EntryPointAPI::new(address, eth_client.clone());
        Self { eth_client, address, entry_point_api }
    }

    pub fn entry_point_api(&self) -> &EntryPointAPI<M> {
        &self.entry_point_api
    }

    pub fn eth_client(&self) -> Arc<M> {
        self.eth_client.clone()
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// Counterfactual address of the account created by `init_code`
    ///
    /// `getSenderAddress` always reverts with `SenderAddressResult(address)`.
    pub async fn get_sender_address(&self, init_code: Bytes) -> Result<Address, EntryPointError> {
        let res = self.entry_point_api.get_sender_address(init_code).call().await;

        match res {
            Ok(_) => Err(EntryPointError::NoRevert { function: "get_sender_address".into() }),
            Err(err) => {
                debug!("getSenderAddress reverted: {err:?}");
                sender_address_from_revert(err.as_revert(), &err.to_string())
            }
        }
    }

    pub async fn get_nonce(&self, address: &Address, key: U256) -> Result<U256, EntryPointError> {
        let res = self.entry_point_api.get_nonce(*address, key).call().await;

        match res {
            Ok(nonce) => Ok(nonce),
            Err(err) => Err(EntryPointError::Other { inner: format!("get nonce error: {err:?}") }),
        }
    }

    pub async fn balance_of(&self, addr: &Address) -> Result<U256, EntryPointError> {
        let res = self.entry_point_api.balance_of(*addr).call().await;

        match res {
            Ok(balance) => Ok(balance),
            Err(err) => Err(EntryPointError::Other { inner: format!("balance of error: {err:?}") }),
        }
    }

    /// Whether there is code at the address
    pub async fn is_deployed(&self, addr: &Address) -> Result<bool, EntryPointError> {
        let code = self
            .eth_client
            .get_code(*addr, None)
            .await
            .map_err(|err| EntryPointError::Provider { inner: err.to_string() })?;
        Ok(!code.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ethers::{
        abi::AbiEncode,
        providers::{JsonRpcError, MockProvider, MockResponse, Provider},
    };
    use serde_json::json;

    fn entry_point() -> (EntryPoint<Provider<MockProvider>>, MockProvider) {
        let (provider, mock) = Provider::mocked();
        let ep = EntryPoint::new(
            Arc::new(provider),
            "0x0000000071727De22E5E9d8BAf0edAc6f37da032".parse().unwrap(),
        );
        (ep, mock)
    }

    #[tokio::test]
    async fn get_sender_address_from_revert() {
        let (ep, mock) = entry_point();
        mock.push_response(MockResponse::Error(JsonRpcError {
            code: 3,
            message: "execution reverted".into(),
            data: Some(json!(
                "0x6ca7b8060000000000000000000000009c5754de1443984659e1b3a8d1931d83475ba29c"
            )),
        }));

        let sender = ep.get_sender_address(Bytes::default()).await.unwrap();
        assert_eq!(
            sender,
            "0x9c5754De1443984659E1b3a8d1931D83475ba29C".parse::<Address>().unwrap()
        );
    }

    #[tokio::test]
    async fn get_sender_address_without_revert() {
        let (ep, mock) = entry_point();
        mock.push::<Bytes, _>(Bytes::default()).unwrap();

        let err = ep.get_sender_address(Bytes::default()).await.unwrap_err();
        assert!(matches!(err, EntryPointError::NoRevert { .. }));
    }

    #[tokio::test]
    async fn get_nonce() {
        let (ep, mock) = entry_point();
        mock.push::<Bytes, _>(Bytes::from(U256::from(5).encode())).unwrap();

        let nonce = ep.get_nonce(&Address::random(), U256::zero()).await.unwrap();
        assert_eq!(nonce, 5.into());
    }

    #[tokio::test]
    async fn is_deployed() {
        let (ep, mock) = entry_point();
        mock.push::<Bytes, _>(Bytes::from_static(&[0x60, 0x80])).unwrap();
        assert!(ep.is_deployed(&Address::random()).await.unwrap());

        mock.push::<Bytes, _>(Bytes::default()).unwrap();
        assert!(!ep.is_deployed(&Address::random()).await.unwrap());
    }
}
