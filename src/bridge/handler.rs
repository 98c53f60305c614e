//! Command dispatch
//!
//! `WalletBridge` serializes every command against one `WalletContext`
//! through a single mutex; each command holds the lock for its whole
//! read-modify-read.

use std::sync::{Mutex, MutexGuard};

use crate::error::{WalletError, WalletResult};
use crate::types::ApiResponse;
use crate::utils::sanitize::check_payload_size;
use crate::utils::wallet_config::WalletSettings;
use crate::wallet::WalletContext;

use super::types::{BridgeCommand, BridgeReply};

/// Executes bridge commands, returning the address string each method yields
pub trait CommandHandler {
    fn handle(&self, command: BridgeCommand) -> WalletResult<String>;

    /// Parse a JSON command, run it and wrap the outcome in an
    /// `ApiResponse<BridgeReply>` envelope
    fn dispatch_json(&self, json: &str) -> String {
        let result = check_payload_size(json)
            .and_then(|_| parse_command(json))
            .and_then(|command| {
                crate::log_debug!("bridge", "Dispatching command", method = command.method_name());
                self.handle(command)
            })
            .map(|address| BridgeReply { address });

        ApiResponse::from(result).to_json()
    }
}

fn parse_command(json: &str) -> WalletResult<BridgeCommand> {
    serde_json::from_str(json)
        .map_err(|e| WalletError::parse_error(format!("Invalid command: {}", e)))
}

/// Thread-safe bridge over one wallet context
#[derive(Debug, Default)]
pub struct WalletBridge {
    context: Mutex<WalletContext>,
}

impl WalletBridge {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: WalletSettings) -> Self {
        Self {
            context: Mutex::new(WalletContext::with_settings(settings)),
        }
    }

    pub fn create_wallet(&self) -> WalletResult<String> {
        self.lock()?.create_wallet()
    }

    pub fn import_wallet(&self, mnemonic: &str) -> WalletResult<String> {
        self.lock()?.import_wallet(mnemonic)
    }

    /// Never fails on an empty context; the address is then empty
    pub fn get_address(&self) -> WalletResult<String> {
        Ok(self.lock()?.address())
    }

    /// Run `f` with exclusive access to the context
    pub fn with_context<T, F>(&self, f: F) -> WalletResult<T>
    where
        F: FnOnce(&mut WalletContext) -> WalletResult<T>,
    {
        let mut context = self.lock()?;
        f(&mut context)
    }

    fn lock(&self) -> WalletResult<MutexGuard<'_, WalletContext>> {
        self.context
            .lock()
            .map_err(|_| WalletError::internal("Wallet context lock poisoned"))
    }
}

impl CommandHandler for WalletBridge {
    fn handle(&self, command: BridgeCommand) -> WalletResult<String> {
        match &command {
            BridgeCommand::CreateWallet => self.create_wallet(),
            BridgeCommand::ImportWallet { mnemonic } => self.import_wallet(mnemonic),
            BridgeCommand::GetAddress => self.get_address(),
        }
    }
}
