//! Shared types for the Blackout wallet core
//!
//! All data structures that cross module boundaries are defined here
//! for consistent serialization and FFI compatibility.

use serde::{Deserialize, Serialize};

// =============================================================================
// Wallet Types
// =============================================================================

/// Public view of a derived wallet. Carries nothing secret.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletSummary {
    /// `0x` + 40 lowercase hex characters
    pub address: String,
    /// EIP-55 mixed-case rendering of the same address
    pub checksum_address: String,
    pub word_count: usize,
}

/// Full key material of a derived wallet, as written by `--reveal` and
/// consumed by the `wallet_validator` binary.
#[derive(Clone, Serialize, Deserialize)]
pub struct WalletExport {
    pub mnemonic: String,
    pub private_key_hex: String,
    pub public_uncompressed_hex: String,
    pub address: String,
    pub seed_mode: crate::utils::wallet_config::SeedMode,
}

impl std::fmt::Debug for WalletExport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalletExport")
            .field("mnemonic", &"[REDACTED]")
            .field("private_key_hex", &"[REDACTED]")
            .field("address", &self.address)
            .field("seed_mode", &self.seed_mode)
            .finish()
    }
}

// =============================================================================
// API Response
// =============================================================================

/// JSON envelope returned across the bridge and FFI boundaries
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<crate::error::WalletError>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(error: crate::error::WalletError) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error),
        }
    }
}

impl<T: Serialize> ApiResponse<T> {
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| {
            r#"{"success":false,"error":{"code":"internal","message":"Serialization failed","details":null}}"#.to_string()
        })
    }
}

impl<T> From<crate::error::WalletResult<T>> for ApiResponse<T> {
    fn from(result: crate::error::WalletResult<T>) -> Self {
        match result {
            Ok(data) => Self::ok(data),
            Err(e) => Self::err(e),
        }
    }
}
