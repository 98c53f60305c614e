//! Script bridge
//!
//! The three methods a scripting host may call: `createWallet`,
//! `importWallet` and `getAddress`. Each returns an address string.

pub mod handler;
pub mod types;


pub use handler::{CommandHandler, WalletBridge};
pub use types::*;
