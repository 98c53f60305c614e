//! Key Derivation
//!
//! Turns a 64-byte BIP-39 seed into a secp256k1 key pair and its address.
//!
//! SECURITY: The seed should be wrapped in Zeroizing by the caller.

use std::str::FromStr;

use bitcoin::bip32::{DerivationPath, Xpriv};
use bitcoin::Network;
use secp256k1::{PublicKey, Secp256k1, SecretKey};
use zeroize::Zeroizing;

use crate::error::{WalletError, WalletResult};
use crate::utils::crypto::public_key_to_address;
use crate::utils::wallet_config::SeedMode;

use super::mnemonic::SEED_LEN;

/// Standard Ethereum account path (first account, first address)
pub const ETHEREUM_PATH: &str = "m/44'/60'/0'/0/0";

/// Key pair and address derived from one seed
pub struct KeyMaterial {
    pub secret_key: SecretKey,
    pub public_key: PublicKey,
    /// 64 lowercase hex characters, no prefix
    pub private_key_hex: Zeroizing<String>,
    /// `0x` + 40 lowercase hex characters
    pub address: String,
}

impl KeyMaterial {
    /// Uncompressed public key without the `0x04` format byte, hex-encoded
    pub fn public_uncompressed_hex(&self) -> String {
        hex::encode(&self.public_key.serialize_uncompressed()[1..])
    }
}

impl Drop for KeyMaterial {
    fn drop(&mut self) {
        self.secret_key.non_secure_erase();
    }
}

/// Derive the account key pair for `seed` under `mode`
pub fn derive_key_material(seed: &[u8; SEED_LEN], mode: SeedMode) -> WalletResult<KeyMaterial> {
    let secret_key = match mode {
        SeedMode::Truncated => truncated_secret(seed)?,
        SeedMode::Bip44 => bip44_secret(seed, ETHEREUM_PATH)?,
    };
    key_material_from_secret(secret_key)
}

/// Build key material around an existing secret key
pub fn key_material_from_secret(secret_key: SecretKey) -> WalletResult<KeyMaterial> {
    let secp = Secp256k1::signing_only();
    let public_key = PublicKey::from_secret_key(&secp, &secret_key);
    let address = public_key_to_address(&public_key);

    Ok(KeyMaterial {
        private_key_hex: Zeroizing::new(hex::encode(secret_key.secret_bytes())),
        secret_key,
        public_key,
        address,
    })
}

/// First 32 seed bytes taken as the scalar.
///
/// Fails with `DerivationFailed` when those bytes are zero or not below the
/// curve order; no reduction is applied.
fn truncated_secret(seed: &[u8; SEED_LEN]) -> WalletResult<SecretKey> {
    SecretKey::from_slice(&seed[..32]).map_err(|e| {
        WalletError::derivation_failed("Seed prefix is not a valid secp256k1 scalar")
            .with_details(e.to_string())
    })
}

fn bip44_secret(seed: &[u8; SEED_LEN], path: &str) -> WalletResult<SecretKey> {
    let secp = bitcoin::secp256k1::Secp256k1::new();
    let master = Xpriv::new_master(Network::Bitcoin, seed)?;
    let path = DerivationPath::from_str(path)?;
    let child = master.derive_priv(&secp, &path)?;
    Ok(child.private_key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::utils::crypto::is_canonical_address;

    fn seed_from_hex(hex_seed: &str) -> [u8; SEED_LEN] {
        let mut seed = [0u8; SEED_LEN];
        seed.copy_from_slice(&hex::decode(hex_seed).unwrap());
        seed
    }

    const LEGAL_WINNER_SEED: &str = "878386efb78845b3355bd15ea4d39ef97d179cb712b77d5c12b6be415fffeffe\
                                     5f377ba02bf3f8544ab800b955e51fbff09828f682052a20faa6addbbddfb096";

    #[test]
    fn test_truncated_derivation() {
        let keys = derive_key_material(&seed_from_hex(LEGAL_WINNER_SEED), SeedMode::Truncated).unwrap();
        assert_eq!(
            keys.private_key_hex.as_str(),
            "878386efb78845b3355bd15ea4d39ef97d179cb712b77d5c12b6be415fffeffe"
        );
        assert_eq!(keys.address, "0x5f8ad1b918ac16b21811f034f956e2cc605eefe6");
        assert_eq!(
            keys.public_uncompressed_hex(),
            "857ccdf8a26aa0ea206ec6b37c31b29e99a9f03cf8de2367a74fd085578b4146\
             973dd8d9f555d44cc1be1cb6810706e8dce5b8f732369fd1097be9cbcd379a3d"
        );
    }

    #[test]
    fn test_bip44_derivation() {
        let keys = derive_key_material(&seed_from_hex(LEGAL_WINNER_SEED), SeedMode::Bip44).unwrap();
        assert_eq!(
            keys.private_key_hex.as_str(),
            "33fa40f84e854b941c2b0436dd4a256e1df1cb41b9c1c0ccc8446408c19b8bf9"
        );
        assert_eq!(keys.address, "0x58a57ed9d8d624cbd12e2c467d34787555bb1b25");
    }

    #[test]
    fn test_truncated_ignores_second_half() {
        let mut seed = seed_from_hex(LEGAL_WINNER_SEED);
        let before = derive_key_material(&seed, SeedMode::Truncated).unwrap();
        seed[32..].fill(0xAA);
        let after = derive_key_material(&seed, SeedMode::Truncated).unwrap();
        assert_eq!(before.address, after.address);
    }

    #[test]
    fn test_out_of_range_prefix_fails() {
        let mut seed = [0u8; SEED_LEN];
        seed[..32].fill(0xFF);
        let err = derive_key_material(&seed, SeedMode::Truncated).err().unwrap();
        assert_eq!(err.code, ErrorCode::DerivationFailed);

        let zero = [0u8; SEED_LEN];
        let err = derive_key_material(&zero, SeedMode::Truncated).err().unwrap();
        assert_eq!(err.code, ErrorCode::DerivationFailed);
    }

    #[test]
    fn test_private_key_hex_keeps_leading_zeros() {
        let mut bytes = [0u8; 32];
        bytes[31] = 1;
        let keys = key_material_from_secret(SecretKey::from_slice(&bytes).unwrap()).unwrap();
        assert_eq!(keys.private_key_hex.len(), 64);
        assert!(keys.private_key_hex.starts_with("0000"));
        // Address of the generator point
        assert_eq!(keys.address, "0x7e5f4552091a69125d5dfcb7b8c2659029395bdf");
        assert!(is_canonical_address(&keys.address));
    }
}
