//! FFI Layer for the Blackout wallet core
//!
//! All C-ABI exports are defined here. This is the ONLY file that should
//! contain `extern "C"` functions.
//!
//! Hosts hold an opaque `WalletBridge` handle per wallet; there is no global
//! wallet state. Every call except the handle constructors returns a JSON
//! envelope that must be freed with `blackout_free_string`:
//!
//! ```json
//! { "success": true, "data": { "address": "0x..." }, "error": null }
//! ```

use std::ffi::{CStr, CString};
use std::os::raw::c_char;

use zeroize::Zeroize;

use crate::bridge::{BridgeReply, CommandHandler, WalletBridge};
use crate::error::{WalletError, WalletResult};
use crate::types::ApiResponse;
use crate::utils::logging;
use crate::utils::sanitize::check_payload_size;
use crate::utils::wallet_config::WalletSettings;

// =============================================================================
// Memory Management
// =============================================================================

/// Free a string returned by any blackout_* function
///
/// # Safety
/// The pointer must have been returned by a blackout_* function
#[unsafe(no_mangle)]
pub extern "C" fn blackout_free_string(s: *mut c_char) {
    if s.is_null() {
        return;
    }
    unsafe {
        let _ = CString::from_raw(s);
    }
}

// =============================================================================
// Handle Lifecycle
// =============================================================================

/// Create a bridge with standard settings
#[unsafe(no_mangle)]
pub extern "C" fn blackout_bridge_new() -> *mut WalletBridge {
    Box::into_raw(Box::new(WalletBridge::new()))
}

/// Create a bridge from a settings JSON document
///
/// # Input
/// ```json
/// { "word_count": 24, "seed_mode": "bip44", "mnemonic_policy": "strict", "redact_logs": true }
/// ```
///
/// Returns null when the input is not valid settings. `redact_logs` applies
/// to the whole process.
#[unsafe(no_mangle)]
pub extern "C" fn blackout_bridge_new_with_config(input: *const c_char) -> *mut WalletBridge {
    let settings = read_str(input).and_then(WalletSettings::from_json);
    match settings {
        Ok(settings) => {
            logging::set_redaction(settings.redact_logs);
            Box::into_raw(Box::new(WalletBridge::with_settings(settings)))
        }
        Err(e) => {
            crate::log_error!("ffi", "Rejected bridge settings", error = e);
            std::ptr::null_mut()
        }
    }
}

/// Destroy a bridge, zeroing any wallet it holds
///
/// # Safety
/// `handle` must come from `blackout_bridge_new*` and not be used afterwards
#[unsafe(no_mangle)]
pub extern "C" fn blackout_bridge_free(handle: *mut WalletBridge) {
    if handle.is_null() {
        return;
    }
    unsafe {
        drop(Box::from_raw(handle));
    }
}

// =============================================================================
// Wallet Operations
// =============================================================================

/// Generate a fresh mnemonic and derive its address
///
/// # Output
/// ```json
/// { "success": true, "data": { "address": "0x..." } }
/// ```
#[unsafe(no_mangle)]
pub extern "C" fn blackout_create_wallet(handle: *const WalletBridge) -> *mut c_char {
    respond(bridge_ref(handle).and_then(WalletBridge::create_wallet))
}

/// Derive from a caller-supplied mnemonic
///
/// # Input
/// ```json
/// { "mnemonic": "word1 word2 ..." }
/// ```
#[unsafe(no_mangle)]
pub extern "C" fn blackout_import_wallet(
    handle: *const WalletBridge,
    input: *const c_char,
) -> *mut c_char {
    #[derive(serde::Deserialize)]
    struct ImportRequest {
        mnemonic: String,
    }

    let result = bridge_ref(handle).and_then(|bridge| {
        let json_str = read_str(input)?;
        check_payload_size(json_str)?;
        let mut request: ImportRequest = serde_json::from_str(json_str)
            .map_err(|e| WalletError::parse_error(format!("Invalid JSON: {}", e)))?;
        let address = bridge.import_wallet(&request.mnemonic);
        request.mnemonic.zeroize();
        address
    });
    respond(result)
}

/// Stored address; empty when no wallet has been derived
#[unsafe(no_mangle)]
pub extern "C" fn blackout_get_address(handle: *const WalletBridge) -> *mut c_char {
    respond(bridge_ref(handle).and_then(WalletBridge::get_address))
}

/// Run one bridge command given as JSON
///
/// # Input
/// ```json
/// { "method": "createWallet" | "importWallet" | "getAddress", "mnemonic": "..." }
/// ```
#[unsafe(no_mangle)]
pub extern "C" fn blackout_dispatch(
    handle: *const WalletBridge,
    input: *const c_char,
) -> *mut c_char {
    let bridge = match bridge_ref(handle) {
        Ok(bridge) => bridge,
        Err(e) => return error_response(e),
    };
    match read_str(input) {
        Ok(json_str) => string_to_ptr(bridge.dispatch_json(json_str)),
        Err(e) => error_response(e),
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Borrow a C string as UTF-8
fn read_str<'a>(input: *const c_char) -> WalletResult<&'a str> {
    if input.is_null() {
        return Err(WalletError::invalid_input("Null input pointer"));
    }
    let c_str = unsafe { CStr::from_ptr(input) };
    c_str
        .to_str()
        .map_err(|_| WalletError::invalid_input("Invalid UTF-8 string"))
}

fn bridge_ref<'a>(handle: *const WalletBridge) -> WalletResult<&'a WalletBridge> {
    unsafe { handle.as_ref() }.ok_or_else(|| WalletError::invalid_input("Null bridge handle"))
}

fn respond(result: WalletResult<String>) -> *mut c_char {
    let response: ApiResponse<BridgeReply> = result.map(|address| BridgeReply { address }).into();
    string_to_ptr(response.to_json())
}

fn error_response(error: WalletError) -> *mut c_char {
    let response: ApiResponse<()> = ApiResponse::err(error);
    string_to_ptr(response.to_json())
}

/// Convert Rust string to C string pointer
fn string_to_ptr(s: String) -> *mut c_char {
    match CString::new(s) {
        Ok(c_str) => c_str.into_raw(),
        Err(_) => c"{\"success\":false,\"data\":null,\"error\":{\"code\":\"internal\",\"message\":\"String conversion failed\",\"details\":null}}"
            .to_owned()
            .into_raw(),
    }
}
