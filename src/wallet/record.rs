//! Wallet Record
//!
//! The in-memory result of the last successful derivation. A record is
//! either absent or complete; there is no partially filled state.

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::types::{WalletExport, WalletSummary};
use crate::utils::crypto::to_checksum_address;
use crate::utils::wallet_config::SeedMode;

use super::derivation::KeyMaterial;
use super::mnemonic::SEED_LEN;

/// Mnemonic, seed, private key and address of one derived wallet.
///
/// Secret fields are zeroed on drop and never shown by `Debug`.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct WalletRecord {
    mnemonic: String,
    seed: [u8; SEED_LEN],
    private_key_hex: String,
    public_uncompressed_hex: String,
    address: String,
    #[zeroize(skip)]
    seed_mode: SeedMode,
}

impl WalletRecord {
    pub(crate) fn new(
        mnemonic: &str,
        seed: &[u8; SEED_LEN],
        keys: &KeyMaterial,
        seed_mode: SeedMode,
    ) -> Self {
        Self {
            mnemonic: mnemonic.to_string(),
            seed: *seed,
            private_key_hex: keys.private_key_hex.to_string(),
            public_uncompressed_hex: keys.public_uncompressed_hex(),
            address: keys.address.clone(),
            seed_mode,
        }
    }

    /// Mnemonic phrase exactly as it was hashed
    ///
    /// # Warning
    /// Be careful when displaying or logging this value!
    pub fn mnemonic(&self) -> &str {
        &self.mnemonic
    }

    pub fn word_count(&self) -> usize {
        self.mnemonic.split_whitespace().count()
    }

    /// Private scalar as 64 lowercase hex characters
    pub fn private_key_hex(&self) -> &str {
        &self.private_key_hex
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    /// EIP-55 mixed-case form of the address, for display
    pub fn checksum_address(&self) -> String {
        match hex::decode(&self.address[2..]) {
            Ok(bytes) => to_checksum_address(&bytes),
            Err(_) => self.address.clone(),
        }
    }

    pub fn seed_mode(&self) -> SeedMode {
        self.seed_mode
    }

    pub fn summary(&self) -> WalletSummary {
        WalletSummary {
            address: self.address.clone(),
            checksum_address: self.checksum_address(),
            word_count: self.word_count(),
        }
    }

    /// Full key material, including secrets
    pub fn export(&self) -> WalletExport {
        WalletExport {
            mnemonic: self.mnemonic.clone(),
            private_key_hex: self.private_key_hex.clone(),
            public_uncompressed_hex: self.public_uncompressed_hex.clone(),
            address: self.address.clone(),
            seed_mode: self.seed_mode,
        }
    }
}

impl std::fmt::Debug for WalletRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalletRecord")
            .field("word_count", &self.word_count())
            .field("mnemonic", &"[REDACTED]")
            .field("private_key_hex", &"[REDACTED]")
            .field("address", &self.address)
            .field("seed_mode", &self.seed_mode)
            .finish()
    }
}
