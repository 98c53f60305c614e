//! Blackout Wallet Core
//!
//! Deterministic wallet derivation for the Blackout hybrid app:
//! mnemonic -> BIP-39 seed -> secp256k1 key pair -> Ethereum address.
//!
//! # Architecture
//!
//! This crate provides:
//! - **wallet**: Mnemonic generation, seed derivation, key derivation and
//!   the `WalletContext` holding the current wallet
//! - **bridge**: The `createWallet` / `importWallet` / `getAddress` command
//!   surface, serialized through one mutex per bridge
//! - **engine**: Lifecycle-enforcing container that signs payloads with an
//!   ephemeral key
//! - **ffi**: C-ABI exports for the host shell
//!
//! # FFI Usage
//!
//! All public FFI functions are in the `ffi` module and follow this pattern:
//! - Input: opaque bridge handle, plus a JSON string where needed
//! - Output: JSON string (must be freed with `blackout_free_string`)
//!
//! # Security
//!
//! This crate uses `zeroize` to securely clear sensitive data from memory.
//! Mnemonics, seeds, private keys and entropy are zeroed when dropped, and
//! log fields carrying them are redacted.
//!
//! # Example
//!
//! ```rust,no_run
//! use blackout_wallet::WalletContext;
//!
//! let mut context = WalletContext::new();
//! let address = context.import_wallet(
//!     "legal winner thank year wave sausage worth useful legal winner thank yellow",
//! )?;
//! assert_eq!(address, context.address());
//! # Ok::<(), blackout_wallet::WalletError>(())
//! ```

pub mod bridge;
pub mod engine;
pub mod error;
pub mod ffi;
pub mod types;
pub mod utils;
pub mod wallet;

// Re-export key types for convenience
pub use error::{ErrorCode, WalletError, WalletResult};
pub use types::*;

pub use bridge::{BridgeCommand, BridgeReply, CommandHandler, WalletBridge};
pub use engine::{BlackoutEngine, EngineState, LifecyclePhase};
pub use wallet::{restore_from_mnemonic, WalletContext, WalletRecord, WordCount};

pub use utils::crypto::{keccak256, public_key_to_address, to_checksum_address};
pub use utils::logging::init_logging;
pub use utils::wallet_config::{MnemonicPolicy, SeedMode, WalletSettings};
