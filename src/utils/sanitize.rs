//! Input Sanitization
//!
//! Mnemonic phrases arrive from a scripting environment as arbitrary strings.
//! Before strict BIP-39 parsing they are:
//! - Unicode-normalized to NFKD (the form BIP-39 hashes)
//! - Stripped of null bytes and control characters
//! - Collapsed to single spaces between words
//! - Bounded in length
//!
//! Permissive phrases are hashed byte for byte, so they only get the
//! blank and length checks of `check_raw_mnemonic`.

use crate::error::{WalletError, WalletResult};
use unicode_normalization::UnicodeNormalization;

/// Maximum length for various input types
pub mod limits {
    /// Maximum normalized mnemonic length in bytes. 24 English words fit in
    /// under 220; other wordlists and permissive phrases get headroom.
    pub const MAX_MNEMONIC_LENGTH: usize = 1024;
    /// Maximum bridge JSON payload size
    pub const MAX_JSON_SIZE: usize = 64 * 1024;
}

/// Normalize a mnemonic phrase for seed derivation.
///
/// Word case is preserved; only encoding and spacing are canonicalized.
/// Fails with `InvalidMnemonic` when nothing but whitespace remains.
pub fn normalize_mnemonic(input: &str) -> WalletResult<String> {
    let normalized: String = input
        .nfkd()
        .filter(|c| *c != '\0' && (!c.is_control() || c.is_whitespace()))
        .collect();

    let words: Vec<&str> = normalized.split_whitespace().collect();
    if words.is_empty() {
        return Err(WalletError::invalid_mnemonic("Mnemonic is empty"));
    }

    let joined = words.join(" ");
    if joined.len() > limits::MAX_MNEMONIC_LENGTH {
        return Err(WalletError::invalid_mnemonic(format!(
            "Mnemonic exceeds {} bytes",
            limits::MAX_MNEMONIC_LENGTH
        )));
    }

    Ok(joined)
}

/// Validate a phrase that will be hashed without normalization.
///
/// Fails with `InvalidMnemonic` when the phrase is blank after trimming or
/// longer than `limits::MAX_MNEMONIC_LENGTH` bytes.
pub fn check_raw_mnemonic(input: &str) -> WalletResult<()> {
    if input.trim().is_empty() {
        return Err(WalletError::invalid_mnemonic("Mnemonic is empty"));
    }
    if input.len() > limits::MAX_MNEMONIC_LENGTH {
        return Err(WalletError::invalid_mnemonic(format!(
            "Mnemonic exceeds {} bytes",
            limits::MAX_MNEMONIC_LENGTH
        )));
    }
    Ok(())
}

/// Reject bridge payloads larger than `limits::MAX_JSON_SIZE`
pub fn check_payload_size(input: &str) -> WalletResult<()> {
    if input.len() > limits::MAX_JSON_SIZE {
        return Err(WalletError::invalid_input(format!(
            "Payload exceeds {} bytes",
            limits::MAX_JSON_SIZE
        )));
    }
    Ok(())
}
