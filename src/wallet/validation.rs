//! Address and Mnemonic Validation

use bip39::Mnemonic;

use crate::error::{WalletError, WalletResult};
use crate::utils::crypto::{to_checksum_address, ADDRESS_LEN};
use crate::utils::sanitize::normalize_mnemonic;

/// Check if a mnemonic phrase is a valid English BIP-39 phrase
pub fn is_valid_mnemonic(phrase: &str) -> bool {
    match normalize_mnemonic(phrase) {
        Ok(normalized) => Mnemonic::parse_normalized(&normalized).is_ok(),
        Err(_) => false,
    }
}

/// Validate an Ethereum address
/// Returns (is_valid, checksummed_address)
///
/// Mixed-case input must carry a correct EIP-55 checksum; all-lowercase and
/// all-uppercase input is accepted as unchecksummed.
pub fn validate_ethereum_address(address: &str) -> (bool, Option<String>) {
    match parse_ethereum_address(address) {
        Ok(bytes) => (true, Some(to_checksum_address(&bytes))),
        Err(_) => (false, None),
    }
}

/// Parse an address into its 20 raw bytes
pub fn parse_ethereum_address(address: &str) -> WalletResult<[u8; 20]> {
    let trimmed = address.trim();

    if !trimmed.starts_with("0x") || trimmed.len() != ADDRESS_LEN {
        return Err(WalletError::new(
            crate::error::ErrorCode::InvalidAddress,
            "Address must be 0x followed by 40 hex characters",
        ));
    }

    let hex_part = &trimmed[2..];
    let mut bytes = [0u8; 20];
    hex::decode_to_slice(hex_part, &mut bytes).map_err(|e| {
        WalletError::new(crate::error::ErrorCode::InvalidAddress, "Address is not hex")
            .with_details(e.to_string())
    })?;

    let is_mixed_case = hex_part.chars().any(|c| c.is_ascii_lowercase())
        && hex_part.chars().any(|c| c.is_ascii_uppercase());
    if is_mixed_case && to_checksum_address(&bytes)[2..] != *hex_part {
        return Err(WalletError::new(
            crate::error::ErrorCode::InvalidAddress,
            "Address checksum mismatch",
        ));
    }

    Ok(bytes)
}
