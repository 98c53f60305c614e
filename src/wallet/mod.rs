//! Wallet Module
//!
//! Handles mnemonic generation, seed stretching, key derivation and the
//! context object that holds the current wallet.

mod context;
mod derivation;
mod mnemonic;
mod record;
mod validation;

pub use context::*;
pub use derivation::*;
pub use mnemonic::*;
pub use record::*;
pub use validation::*;

use crate::error::WalletResult;
use crate::utils::wallet_config::WalletSettings;

/// Derive a wallet from `mnemonic` without keeping it in any context
pub fn restore_from_mnemonic(mnemonic: &str, settings: &WalletSettings) -> WalletResult<WalletRecord> {
    let (phrase, seed) = mnemonic_to_seed(mnemonic, settings.mnemonic_policy)?;
    let keys = derive_key_material(&seed, settings.seed_mode)?;
    Ok(WalletRecord::new(&phrase, &seed, &keys, settings.seed_mode))
}
