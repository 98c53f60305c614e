use blackout_wallet::utils::crypto::is_canonical_address;
use blackout_wallet::{
    keccak256, restore_from_mnemonic, to_checksum_address, MnemonicPolicy, WalletExport,
    WalletSettings,
};
use secp256k1::{PublicKey, Secp256k1, SecretKey};
use std::env;
use std::error::Error;
use std::fs;
use std::io::{self, Read};

struct ValidationResult {
    name: &'static str,
    success: bool,
    message: String,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args: Vec<String> = env::args().collect();
    let payload = if let Some(path) = args.get(1) {
        fs::read_to_string(path)?
    } else {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        buffer
    };

    let export: WalletExport = serde_json::from_str(&payload)?;

    let results = vec![
        run_validation("Key pair", || validate_key_pair(&export)),
        run_validation("Address", || validate_address(&export)),
        run_validation("Mnemonic", || validate_mnemonic(&export)),
    ];

    println!("================ Wallet Validation ================");
    for result in &results {
        let status = if result.success {
            "✅ PASS"
        } else {
            "❌ FAIL"
        };
        println!("{:<10} {}", result.name, status);
        if !result.success {
            println!("    {}", result.message);
        }
    }

    let overall_success = results.iter().all(|r| r.success);
    println!("===================================================");
    if overall_success {
        println!("Overall status: ✅ Exported wallet verified");
        Ok(())
    } else {
        println!("Overall status: ❌ Validation failed");
        Err("wallet validation failed".into())
    }
}

fn run_validation<F>(name: &'static str, f: F) -> ValidationResult
where
    F: FnOnce() -> Result<(), String>,
{
    match f() {
        Ok(_) => ValidationResult {
            name,
            success: true,
            message: String::new(),
        },
        Err(message) => ValidationResult {
            name,
            success: false,
            message,
        },
    }
}

/// Private key must produce the exported public key
fn validate_key_pair(export: &WalletExport) -> Result<(), String> {
    if export.private_key_hex.len() != 64 {
        return Err(format!(
            "Private key must be 64 hex characters, got {}",
            export.private_key_hex.len()
        ));
    }
    let secret_bytes = hex::decode(&export.private_key_hex).map_err(|e| e.to_string())?;
    let secret_key = SecretKey::from_slice(&secret_bytes).map_err(|e| e.to_string())?;

    let secp = Secp256k1::new();
    let public_key = PublicKey::from_secret_key(&secp, &secret_key);
    let public_hex = hex::encode(&public_key.serialize_uncompressed()[1..]);
    if public_hex != export.public_uncompressed_hex {
        return Err("Uncompressed public key mismatch".to_string());
    }
    Ok(())
}

/// Address must be the Keccak-256 tail of the exported public key
fn validate_address(export: &WalletExport) -> Result<(), String> {
    if !is_canonical_address(&export.address) {
        return Err(format!("Address is not lowercase 0x-hex: {}", export.address));
    }

    let public_bytes = hex::decode(&export.public_uncompressed_hex).map_err(|e| e.to_string())?;
    let hash = keccak256(&public_bytes);
    let expected = to_checksum_address(&hash[12..]);
    if expected.to_lowercase() != export.address {
        return Err("Address does not match public key".to_string());
    }
    Ok(())
}

/// Re-deriving from the mnemonic must reproduce the exported keys. Exports
/// carry the exact phrase that was hashed, so raw hashing covers both policies.
fn validate_mnemonic(export: &WalletExport) -> Result<(), String> {
    let settings = WalletSettings {
        seed_mode: export.seed_mode,
        mnemonic_policy: MnemonicPolicy::Permissive,
        ..WalletSettings::standard()
    };
    let record = restore_from_mnemonic(&export.mnemonic, &settings).map_err(|e| e.to_string())?;

    if record.private_key_hex() != export.private_key_hex {
        return Err("Mnemonic derives a different private key".to_string());
    }
    if record.address() != export.address {
        return Err("Mnemonic derives a different address".to_string());
    }
    Ok(())
}
