//! Misc utils

use ethers::{
    types::{Address, Bytes, U128, U256},
    utils::to_checksum,
};

/// Converts address to checksum address
pub fn as_checksum_addr<S>(val: &Address, s: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    s.serialize_str(&to_checksum(val, None))
}

/// Converts Option address to checksum
pub fn as_checksum_addr_opt<S>(val: &Option<Address>, s: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    if let Some(addr) = val {
        s.serialize_str(&to_checksum(addr, None))
    } else {
        s.serialize_none()
    }
}

/// If possible, parses address from the first 20 bytes
pub fn get_address(buf: &[u8]) -> Option<Address> {
    if buf.len() >= 20 {
        Some(Address::from_slice(&buf[0..20]))
    } else {
        None
    }
}

/// Packs the factory address and its calldata into v0.6-style init code.
/// Returns empty init code when there is no factory.
pub fn pack_init_code(factory: Option<Address>, factory_data: &Bytes) -> Bytes {
    match factory {
        Some(factory) if !factory.is_zero() => {
            [factory.as_bytes(), factory_data.as_ref()].concat().into()
        }
        _ => Bytes::default(),
    }
}

/// Splits init code into the factory address and its calldata
pub fn unpack_init_code(init_code: &[u8]) -> (Option<Address>, Bytes) {
    match get_address(init_code) {
        Some(factory) => (Some(factory), Bytes::from(init_code[20..].to_vec())),
        None => (None, Bytes::default()),
    }
}

/// Packs the v0.7 paymaster fields into `paymasterAndData`
pub fn pack_paymaster_and_data(
    paymaster: Option<Address>,
    paymaster_verification_gas_limit: U256,
    paymaster_post_op_gas_limit: U256,
    paymaster_data: &Bytes,
) -> Bytes {
    match paymaster {
        Some(paymaster) if !paymaster.is_zero() => {
            let gas = pack_uint128(paymaster_verification_gas_limit, paymaster_post_op_gas_limit);
            [paymaster.as_bytes(), &gas[..], paymaster_data.as_ref()].concat().into()
        }
        _ => Bytes::default(),
    }
}

/// Packs two uint128 into a single 32-byte word (`a` in the high half)
///
/// Values above `u128::MAX` are truncated to their low 128 bits. Signing rejects such user
/// operations, see `UserOperation::oversized_gas_field`.
pub fn pack_uint128(a: U256, b: U256) -> [u8; 32] {
    let mut res = [0u8; 32];
    let a: U128 = {
        let mut tem = [0; 32];
        a.to_big_endian(&mut tem);
        U128::from_big_endian(&tem[16..32])
    };
    let b: U128 = {
        let mut tem = [0; 32];
        b.to_big_endian(&mut tem);
        U128::from_big_endian(&tem[16..32])
    };
    a.to_big_endian(&mut res[0..16]);
    b.to_big_endian(&mut res[16..32]);
    res
}

/// Unpacks two uint128 from bytes
pub fn unpack_uint128(buf: &[u8]) -> (U256, U256) {
    let mut a = [0u8; 16];
    let mut b = [0u8; 16];
    a.copy_from_slice(&buf[0..16]);
    b.copy_from_slice(&buf[16..32]);
    (U256::from_big_endian(&a), U256::from_big_endian(&b))
}
