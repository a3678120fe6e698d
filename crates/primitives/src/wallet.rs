//! A `Wallet` is a wrapper around an ethers wallet owning the smart account
use crate::{constants::defaults::PRIVATE_KEY_ENV, UserOperation};
use ethers::{
    prelude::{k256::ecdsa::SigningKey, rand},
    signers::{Signer, WalletError as SignerError},
    types::{Address, Signature, H256},
    utils::hex,
};
use std::{
    fs::{self, OpenOptions},
    io::{ErrorKind, Write},
    path::Path,
    str::FromStr,
};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum WalletError {
    #[error("invalid private key: {0}")]
    InvalidKey(String),
    #[error(transparent)]
    Signer(#[from] SignerError),
    #[error("failed to persist private key: {0}")]
    Io(#[from] std::io::Error),
    #[error("{0} does not fit in uint128")]
    GasOverflow(&'static str),
}

/// Wrapper around ethers wallet
#[derive(Clone, Debug)]
pub struct Wallet {
    /// Signing key of the wallet
    pub signer: ethers::signers::Wallet<SigningKey>,
}

impl Wallet {
    /// Builds a `Wallet` from a hex encoded private key (with or without the `0x` prefix)
    pub fn from_private_key(key: &str) -> Result<Self, WalletError> {
        let signer = ethers::signers::Wallet::from_str(key.trim())
            .map_err(|err| WalletError::InvalidKey(err.to_string()))?;
        Ok(Self { signer })
    }

    /// Builds a `Wallet` using a randomly generated key
    pub fn build_random() -> Self {
        let mut rng = rand::thread_rng();
        Self { signer: ethers::signers::Wallet::new(&mut rng) }
    }

    /// Address of the owner of the smart account
    pub fn address(&self) -> Address {
        self.signer.address()
    }

    /// `0x` prefixed hex encoded private key
    pub fn private_key_hex(&self) -> String {
        format!("0x{}", hex::encode(self.signer.signer().to_bytes()))
    }

    /// Signs the user operation hash as an EIP-191 personal message
    ///
    /// # Arguments
    /// * `uo` - The [UserOperation](UserOperation) to be signed
    /// * `ep` - The entry point contract address
    /// * `chain_id` - The chain id of the blockchain network to be used
    ///
    /// # Returns
    /// * `UserOperation` - The signed [UserOperation](UserOperation)
    pub async fn sign_uo(
        &self,
        uo: &UserOperation,
        ep: &Address,
        chain_id: u64,
    ) -> Result<UserOperation, WalletError> {
        if let Some(field) = uo.oversized_gas_field() {
            return Err(WalletError::GasOverflow(field));
        }
        let h = uo.hash(ep, chain_id);
        let sig = self.signer.sign_message(h.0.as_bytes()).await?;
        Ok(uo.clone().with_signature(sig.to_vec().into()))
    }

    /// Signs a raw digest (e.g. EIP-712), without the personal message prefix
    pub fn sign_hash(&self, hash: H256) -> Result<Signature, WalletError> {
        Ok(self.signer.sign_hash(hash)?)
    }
}

/// Uses the private key if one is given, otherwise generates a new one and appends it to the
/// dotfile as `PRIVATE_KEY=0x...`
///
/// Returns the wallet and whether the key was generated.
pub fn load_or_generate(
    private_key: Option<&str>,
    dotfile: &Path,
) -> Result<(Wallet, bool), WalletError> {
    if let Some(key) = private_key.filter(|key| !key.trim().is_empty()) {
        return Ok((Wallet::from_private_key(key)?, false));
    }

    let wallet = Wallet::build_random();
    let needs_newline = match fs::read(dotfile) {
        Ok(content) => content.last().is_some_and(|b| *b != b'\n'),
        Err(err) if err.kind() == ErrorKind::NotFound => false,
        Err(err) => return Err(err.into()),
    };
    let mut file = OpenOptions::new().create(true).append(true).open(dotfile)?;
    if needs_newline {
        writeln!(file)?;
    }
    writeln!(file, "{PRIVATE_KEY_ENV}={}", wallet.private_key_hex())?;
    info!("Generated private key for owner {:?}, saved to {}", wallet.address(), dotfile.display());

    Ok((wallet, true))
}
