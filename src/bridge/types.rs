//! Bridge types and data structures

use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

/// One call from the scripting environment.
///
/// Wire form is tagged by `method`:
/// `{"method":"importWallet","mnemonic":"..."}`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "camelCase")]
pub enum BridgeCommand {
    CreateWallet,
    ImportWallet { mnemonic: String },
    GetAddress,
}

impl BridgeCommand {
    /// Wire name of the method
    pub fn method_name(&self) -> &'static str {
        match self {
            Self::CreateWallet => "createWallet",
            Self::ImportWallet { .. } => "importWallet",
            Self::GetAddress => "getAddress",
        }
    }
}

impl Drop for BridgeCommand {
    fn drop(&mut self) {
        if let Self::ImportWallet { mnemonic } = self {
            mnemonic.zeroize();
        }
    }
}

impl std::fmt::Debug for BridgeCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ImportWallet { .. } => f
                .debug_struct("ImportWallet")
                .field("mnemonic", &"[REDACTED]")
                .finish(),
            other => f.write_str(other.method_name()),
        }
    }
}

/// Result payload of every bridge method: the (possibly empty) address
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BridgeReply {
    pub address: String,
}
