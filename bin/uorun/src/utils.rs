use alloy_chains::Chain;
use ethers::types::{Address, Bytes, U256};
use pin_utils::pin_mut;
use std::{future::Future, str::FromStr};
use tracing::info;
use uorun_primitives::{EntryPointVersion, UserOperationHash};

/// Parses address from string
pub fn parse_address(s: &str) -> Result<Address, String> {
    Address::from_str(s).map_err(|_| format!("String {s} is not a valid address"))
}

/// Parses U256 from string
pub fn parse_u256(s: &str) -> Result<U256, String> {
    U256::from_str_radix(s, 10).map_err(|_| format!("String {s} is not a valid U256"))
}

/// Parses hex encoded bytes from string
pub fn parse_bytes(s: &str) -> Result<Bytes, String> {
    Bytes::from_str(s).map_err(|_| format!("String {s} is not valid hex encoded bytes"))
}

/// Parses chain from its name (e.g. `sepolia`) or id
pub fn parse_chain(s: &str) -> Result<Chain, String> {
    Chain::from_str(s).map_err(|_| format!("String {s} is not a valid chain"))
}

/// Parses EntryPointVersion from string
pub fn parse_entry_point_version(s: &str) -> Result<EntryPointVersion, String> {
    EntryPointVersion::from_str(s)
        .map_err(|_| format!("String {s} is not a valid entry point version"))
}

/// Parses user operation hash from string
pub fn parse_uo_hash(s: &str) -> Result<UserOperationHash, String> {
    UserOperationHash::from_str(s).map_err(|_| format!("String {s} is not a valid hash"))
}

/// Runs the future to completion or until:
/// - `ctrl-c` is received.
/// - `SIGTERM` is received (unix only).
pub async fn run_until_ctrl_c<F, E>(fut: F) -> Result<(), E>
where
    F: Future<Output = Result<(), E>>,
    E: Send + Sync + 'static + From<std::io::Error>,
{
    let ctrl_c = tokio::signal::ctrl_c();

    let mut stream = tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())?;
    let sigterm = stream.recv();
    pin_mut!(sigterm, ctrl_c, fut);

    tokio::select! {
        _ = ctrl_c => {
            info!("Received ctrl-c signal, walkthrough interrupted.");
        },
        _ = sigterm => {
            info!("Received SIGTERM signal, walkthrough interrupted.");
        },
        res = fut => res?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_chains::NamedChain;

    #[test]
    fn parse_values() {
        assert_eq!(
            parse_address("0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045").unwrap(),
            "0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045".parse::<Address>().unwrap()
        );
        assert!(parse_address("0x1234").is_err());
        assert_eq!(parse_u256("1000000").unwrap(), U256::from(1_000_000));
        assert!(parse_u256("0x10").is_err());
        assert_eq!(parse_bytes("0x1234").unwrap().as_ref(), &[0x12, 0x34]);
        assert!(parse_bytes("0xzz").is_err());
    }

    #[test]
    fn parse_chains_and_versions() {
        assert_eq!(parse_chain("sepolia").unwrap(), Chain::from_named(NamedChain::Sepolia));
        assert_eq!(parse_chain("80001").unwrap(), Chain::from_named(NamedChain::PolygonMumbai));
        assert!(parse_chain("not-a-chain").is_err());
        assert_eq!(parse_entry_point_version("v0.6").unwrap(), EntryPointVersion::V0_6);
        assert!(parse_entry_point_version("v0.8").is_err());
        assert!(parse_uo_hash(
            "0x95418c07086df02ff6bc9e8bdc150b380cb761beecc098630440bcec6e862702"
        )
        .is_ok());
    }
}
