//! Crypto Utilities
//!
//! Hashing and address encoding helpers shared by the wallet and the engine.

use secp256k1::PublicKey;
use tiny_keccak::{Hasher, Keccak};

/// Length of an encoded address: `0x` + 40 hex characters
pub const ADDRESS_LEN: usize = 42;

/// Keccak256 hash (used for Ethereum addresses)
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak::v256();
    hasher.update(data);
    let mut out = [0u8; 32];
    hasher.finalize(&mut out);
    out
}

/// Raw 20-byte account id: last 20 bytes of Keccak-256 over the
/// uncompressed public key without its `0x04` format byte.
pub fn address_bytes(public_key: &PublicKey) -> [u8; 20] {
    let uncompressed = public_key.serialize_uncompressed();
    let hash = keccak256(&uncompressed[1..]);
    let mut out = [0u8; 20];
    out.copy_from_slice(&hash[12..]);
    out
}

/// Lowercase `0x`-prefixed address for a public key
pub fn public_key_to_address(public_key: &PublicKey) -> String {
    format!("0x{}", hex::encode(address_bytes(public_key)))
}

/// Convert raw address bytes to checksummed Ethereum address
pub fn to_checksum_address(address: &[u8]) -> String {
    let lower = hex::encode(address);
    let hash = keccak256(lower.as_bytes());

    let mut result = String::from("0x");
    for (i, ch) in lower.chars().enumerate() {
        let byte = hash[i / 2];
        let nibble = if i % 2 == 0 { byte >> 4 } else { byte & 0x0f };

        if ch.is_ascii_digit() {
            result.push(ch);
        } else if nibble >= 8 {
            result.push(ch.to_ascii_uppercase());
        } else {
            result.push(ch);
        }
    }

    result
}

/// True when `address` is exactly `0x` followed by 40 lowercase hex digits
pub fn is_canonical_address(address: &str) -> bool {
    address.len() == ADDRESS_LEN
        && address.starts_with("0x")
        && address[2..]
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
}
