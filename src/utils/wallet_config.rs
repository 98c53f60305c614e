//! Wallet Configuration
//!
//! Settings that fix how a `WalletContext` derives keys:
//! - Mnemonic strength for newly created wallets
//! - Seed-to-key mode (legacy truncation or BIP-44 path)
//! - Mnemonic validation policy on import
//! - Log redaction
//!
//! Presets cover the common combinations; hosts may also load settings
//! from a JSON document.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{WalletError, WalletResult};
use crate::wallet::WordCount;

/// How the 64-byte BIP-39 seed becomes a secp256k1 secret key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeedMode {
    /// First 32 seed bytes used directly as the scalar. Bit-compatible with
    /// wallets produced by the legacy Blackout app, not with HD wallets.
    #[default]
    Truncated,
    /// BIP-32 derivation along `m/44'/60'/0'/0/0`, as MetaMask and most
    /// Ethereum wallets do.
    Bip44,
}

/// How strictly imported phrases are checked before derivation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MnemonicPolicy {
    /// English wordlist membership, word count and checksum are enforced
    #[default]
    Strict,
    /// Any non-blank phrase is stretched byte for byte, without normalization
    Permissive,
}

/// Wallet settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WalletSettings {
    /// Mnemonic length for `create_wallet`
    pub word_count: WordCount,
    pub seed_mode: SeedMode,
    pub mnemonic_policy: MnemonicPolicy,
    /// Redact sensitive data in logs
    pub redact_logs: bool,
}

impl Default for WalletSettings {
    fn default() -> Self {
        Self::standard()
    }
}

impl WalletSettings {
    /// 12 words, truncated seed, strict import
    pub fn standard() -> Self {
        Self {
            word_count: WordCount::Twelve,
            seed_mode: SeedMode::Truncated,
            mnemonic_policy: MnemonicPolicy::Strict,
            redact_logs: true,
        }
    }

    /// Reproduces the legacy app exactly: truncated seed, and imported
    /// phrases hashed as given once they are non-blank
    pub fn legacy_compatible() -> Self {
        Self {
            mnemonic_policy: MnemonicPolicy::Permissive,
            ..Self::standard()
        }
    }

    /// 24 words on the standard Ethereum HD path with strict import
    pub fn hd_standard() -> Self {
        Self {
            word_count: WordCount::TwentyFour,
            seed_mode: SeedMode::Bip44,
            mnemonic_policy: MnemonicPolicy::Strict,
            redact_logs: true,
        }
    }

    /// Parse settings from JSON. Missing fields take defaults.
    pub fn from_json(json: &str) -> WalletResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| WalletError::config_error(format!("Invalid settings: {}", e)))
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> WalletResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            WalletError::config_error(format!("Cannot read {}: {}", path.display(), e))
        })?;
        Self::from_json(&contents)
    }
}
