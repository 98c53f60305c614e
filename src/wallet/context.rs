//! Wallet Context
//!
//! Explicitly owned holder of the current `WalletRecord`. Create and import
//! derive a complete record first and only then replace the stored one, so a
//! failed call leaves the previous wallet untouched.

use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use secp256k1::{PublicKey, Secp256k1, SecretKey};
use zeroize::Zeroizing;

use crate::engine::BlackoutEngine;
use crate::error::{WalletError, WalletResult};
use crate::types::WalletSummary;
use crate::utils::wallet_config::WalletSettings;

use super::mnemonic::generate_mnemonic;
use super::record::WalletRecord;
use super::restore_from_mnemonic;

#[derive(Debug, Default)]
pub struct WalletContext {
    settings: WalletSettings,
    record: Option<WalletRecord>,
}

impl WalletContext {
    /// Empty context with standard settings
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: WalletSettings) -> Self {
        Self {
            settings,
            record: None,
        }
    }

    pub fn settings(&self) -> &WalletSettings {
        &self.settings
    }

    /// Generate a fresh mnemonic from the OS random source and derive from it
    pub fn create_wallet(&mut self) -> WalletResult<String> {
        self.create_wallet_with_rng(&mut OsRng)
    }

    pub fn create_wallet_with_rng<R>(&mut self, rng: &mut R) -> WalletResult<String>
    where
        R: RngCore + CryptoRng + ?Sized,
    {
        let phrase = generate_mnemonic(rng, self.settings.word_count).map_err(|e| {
            crate::log_warn!("wallet", "Mnemonic generation failed", error = e);
            e
        })?;
        let address = self.derive_and_store(&phrase)?;

        crate::log_info!(
            "wallet",
            "Wallet created",
            word_count = usize::from(self.settings.word_count),
            address = address,
        );
        Ok(address)
    }

    /// Derive from a caller-supplied phrase and replace the current record
    pub fn import_wallet(&mut self, mnemonic: &str) -> WalletResult<String> {
        let address = self.derive_and_store(mnemonic).map_err(|e| {
            crate::log_warn!("wallet", "Wallet import failed", error = e);
            e
        })?;

        crate::log_info!("wallet", "Wallet imported", address = address);
        Ok(address)
    }

    /// Stored address, or an empty string when nothing has been derived
    pub fn address(&self) -> String {
        self.record
            .as_ref()
            .map(|record| record.address().to_string())
            .unwrap_or_default()
    }

    pub fn record(&self) -> Option<&WalletRecord> {
        self.record.as_ref()
    }

    pub fn summary(&self) -> Option<WalletSummary> {
        self.record.as_ref().map(WalletRecord::summary)
    }

    /// Drop the current record, zeroing its secrets
    pub fn clear(&mut self) {
        self.record = None;
    }

    /// Unlocked engine holding the current wallet's key
    pub fn open_engine(&self) -> WalletResult<BlackoutEngine> {
        let record = self
            .record
            .as_ref()
            .ok_or_else(|| WalletError::invalid_input("No wallet loaded"))?;

        let key_bytes = Zeroizing::new(hex::decode(record.private_key_hex())?);
        let secret_key = SecretKey::from_slice(&key_bytes)?;
        let public_key = PublicKey::from_secret_key(&Secp256k1::signing_only(), &secret_key);

        let mut engine = BlackoutEngine::new(public_key);
        engine.unlock(secret_key)?;
        Ok(engine)
    }

    fn derive_and_store(&mut self, mnemonic: &str) -> WalletResult<String> {
        let record = restore_from_mnemonic(mnemonic, &self.settings)?;
        let address = record.address().to_string();
        self.record = Some(record);
        Ok(address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::EngineState;
    use crate::error::ErrorCode;
    use crate::utils::crypto::is_canonical_address;
    use rand_chacha::rand_core::SeedableRng;
    use rand_chacha::ChaCha20Rng;
    use std::collections::HashSet;

    const LEGAL_WINNER: &str =
        "legal winner thank year wave sausage worth useful legal winner thank yellow";
    const LEGAL_WINNER_ADDRESS: &str = "0x5f8ad1b918ac16b21811f034f956e2cc605eefe6";

    /// Random source that always reports failure
    struct FailingRng;

    impl RngCore for FailingRng {
        fn next_u32(&mut self) -> u32 {
            0
        }
        fn next_u64(&mut self) -> u64 {
            0
        }
        fn fill_bytes(&mut self, dest: &mut [u8]) {
            dest.fill(0);
        }
        fn try_fill_bytes(&mut self, _dest: &mut [u8]) -> Result<(), rand::Error> {
            Err(rand::Error::new(std::io::Error::new(
                std::io::ErrorKind::Other,
                "entropy source offline",
            )))
        }
    }

    impl CryptoRng for FailingRng {}

    #[test]
    fn test_address_empty_before_derivation() {
        let context = WalletContext::new();
        assert_eq!(context.address(), "");
        assert!(context.record().is_none());
        assert!(context.summary().is_none());
    }

    #[test]
    fn test_import_then_address() {
        let mut context = WalletContext::new();
        let address = context.import_wallet(LEGAL_WINNER).unwrap();
        assert_eq!(address, LEGAL_WINNER_ADDRESS);
        assert_eq!(context.address(), LEGAL_WINNER_ADDRESS);
        assert_eq!(context.address(), LEGAL_WINNER_ADDRESS);
    }

    #[test]
    fn test_import_is_deterministic() {
        let a = WalletContext::new().import_wallet(LEGAL_WINNER).unwrap();
        let b = WalletContext::new().import_wallet(LEGAL_WINNER).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_import_empty_fails_and_keeps_record() {
        let mut context = WalletContext::new();
        let err = context.import_wallet("").unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidMnemonic);
        assert_eq!(context.address(), "");

        context.import_wallet(LEGAL_WINNER).unwrap();
        let err = context.import_wallet("   ").unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidMnemonic);
        assert_eq!(context.address(), LEGAL_WINNER_ADDRESS);
        assert_eq!(context.record().unwrap().mnemonic(), LEGAL_WINNER);
    }

    #[test]
    fn test_create_overwrites_import() {
        let mut context = WalletContext::new();
        context.import_wallet(LEGAL_WINNER).unwrap();
        let created = context.create_wallet().unwrap();

        assert_ne!(created, LEGAL_WINNER_ADDRESS);
        assert_eq!(context.address(), created);
        assert_ne!(context.record().unwrap().mnemonic(), LEGAL_WINNER);
    }

    #[test]
    fn test_create_yields_distinct_mnemonics() {
        let mut context = WalletContext::new();
        let mut mnemonics = HashSet::new();
        for _ in 0..64 {
            let address = context.create_wallet().unwrap();
            assert!(is_canonical_address(&address));
            mnemonics.insert(context.record().unwrap().mnemonic().to_string());
        }
        assert_eq!(mnemonics.len(), 64);
    }

    #[test]
    fn test_create_respects_word_count() {
        let mut context = WalletContext::with_settings(WalletSettings::hd_standard());
        context.create_wallet().unwrap();
        assert_eq!(context.record().unwrap().word_count(), 24);
    }

    #[test]
    fn test_create_with_seeded_rng_matches_import() {
        let mut context = WalletContext::new();
        let created = context
            .create_wallet_with_rng(&mut ChaCha20Rng::seed_from_u64(42))
            .unwrap();
        let phrase = context.record().unwrap().mnemonic().to_string();

        let imported = WalletContext::new().import_wallet(&phrase).unwrap();
        assert_eq!(created, imported);
    }

    #[test]
    fn test_entropy_failure_keeps_record() {
        let mut context = WalletContext::new();
        context.import_wallet(LEGAL_WINNER).unwrap();

        let err = context.create_wallet_with_rng(&mut FailingRng).unwrap_err();
        assert_eq!(err.code, ErrorCode::EntropyUnavailable);
        assert!(err.is_retryable());
        assert_eq!(context.address(), LEGAL_WINNER_ADDRESS);
    }

    #[test]
    fn test_legacy_settings_accept_any_phrase() {
        let mut strict = WalletContext::new();
        assert_eq!(
            strict.import_wallet("hello world").unwrap_err().code,
            ErrorCode::InvalidMnemonic
        );

        let mut legacy = WalletContext::with_settings(WalletSettings::legacy_compatible());
        let address = legacy.import_wallet("hello world").unwrap();
        assert_eq!(address, "0xf99e1f5423b9367fa9a763843425089b784e6f43");
    }

    #[test]
    fn test_clear() {
        let mut context = WalletContext::new();
        context.import_wallet(LEGAL_WINNER).unwrap();
        context.clear();
        assert_eq!(context.address(), "");
    }

    #[test]
    fn test_open_engine() {
        let mut context = WalletContext::new();
        let err = context.open_engine().unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidInput);

        context.import_wallet(LEGAL_WINNER).unwrap();
        let mut engine = context.open_engine().unwrap();
        assert_eq!(engine.state(), EngineState::Active);

        let signature = engine.execute(b"attestation").unwrap();
        assert!(engine.verify(b"attestation", &signature).unwrap());
        assert_eq!(
            crate::utils::crypto::public_key_to_address(engine.public_key()),
            LEGAL_WINNER_ADDRESS
        );
        engine.erase();
        assert_eq!(engine.state(), EngineState::Cold);
    }
}
