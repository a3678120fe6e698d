//! ERC-20 helpers (paying gas with tokens through the ERC-20 paymaster)

use crate::{
    error::EntryPointError,
    gen::erc20::{ApproveCall, ERC20},
};
use ethers::{
    abi::AbiEncode,
    providers::Middleware,
    types::{Address, Bytes, U256},
};
use std::sync::Arc;

/// `approve(spender, value)`
pub fn encode_approve(spender: Address, value: U256) -> Bytes {
    ApproveCall { spender, value }.encode().into()
}

/// Token balance of `owner`
pub async fn balance_of<M: Middleware + 'static>(
    eth_client: Arc<M>,
    token: Address,
    owner: Address,
) -> Result<U256, EntryPointError> {
    ERC20::new(token, eth_client)
        .balance_of(owner)
        .call()
        .await
        .map_err(|err| EntryPointError::Other { inner: format!("balance of error: {err:?}") })
}

/// Formats a token amount with the given number of decimals, trimming trailing zeros
pub fn format_units(amount: U256, decimals: u32) -> String {
    let base = U256::exp10(decimals as usize);
    let (int, frac) = amount.div_mod(base);
    if frac.is_zero() {
        return int.to_string();
    }
    let frac = format!("{:0>width$}", frac.to_string(), width = decimals as usize);
    format!("{int}.{}", frac.trim_end_matches('0'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ethers::providers::{MockProvider, Provider};

    #[test]
    fn approve_call_data() {
        let spender: Address = "0x000000000009B901DeC1aaB9389285965F49D387".parse().unwrap();
        let data = encode_approve(spender, U256::MAX);
        assert_eq!(&data[..4], &[0x09, 0x5e, 0xa7, 0xb3]);
        assert_eq!(&data[16..36], spender.as_bytes());
        assert_eq!(&data[36..68], &[0xff; 32]);
    }

    #[test]
    fn format_usdc() {
        assert_eq!(format_units(1_000_000.into(), 6), "1");
        assert_eq!(format_units(250_000.into(), 6), "0.25");
        assert_eq!(format_units(1_000_001.into(), 6), "1.000001");
        assert_eq!(format_units(U256::zero(), 6), "0");
    }

    #[tokio::test]
    async fn token_balance() {
        let (provider, mock) = Provider::mocked();
        mock.push::<Bytes, _>(Bytes::from(U256::from(1_500_000).encode())).unwrap();
        let balance = balance_of(Arc::new(provider), Address::random(), Address::random())
            .await
            .unwrap();
        assert_eq!(balance, 1_500_000.into());
    }
}
