//! Ephemeral Key Control
//!
//! Signs payloads with a secp256k1 key that exists only between unlock and
//! erase. Verification needs only the public key.

use secp256k1::ecdsa::Signature;
use secp256k1::{All, Message, PublicKey, Secp256k1, SecretKey};
use sha2::{Digest, Sha256};

use super::mediation::Anomaly;

/// Compact ECDSA signature length (r || s)
pub const SIGNATURE_LEN: usize = 64;

pub struct SecurityController {
    secp: Secp256k1<All>,
    public_key: PublicKey,
    ephemeral_key: Option<SecretKey>,
}

impl SecurityController {
    pub fn new(public_key: PublicKey) -> Self {
        Self {
            secp: Secp256k1::new(),
            public_key,
            ephemeral_key: None,
        }
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    pub fn has_ephemeral_key(&self) -> bool {
        self.ephemeral_key.is_some()
    }

    /// Load the signing key. It must belong to the verifying key.
    pub fn load_ephemeral_key(&mut self, secret_key: SecretKey) -> Result<(), Anomaly> {
        if PublicKey::from_secret_key(&self.secp, &secret_key) != self.public_key {
            return Err(Anomaly::KeyMismatch);
        }
        self.destroy_ephemeral_key();
        self.ephemeral_key = Some(secret_key);
        Ok(())
    }

    /// ECDSA over SHA-256 of `data`, compact encoding
    pub fn sign(&self, data: &[u8]) -> Result<[u8; SIGNATURE_LEN], Anomaly> {
        let secret_key = self.ephemeral_key.as_ref().ok_or(Anomaly::KeyNotLoaded)?;
        let message = digest_message(data);
        Ok(self.secp.sign_ecdsa(&message, secret_key).serialize_compact())
    }

    /// `Ok(false)` for a well-formed signature that does not match
    pub fn verify(&self, data: &[u8], signature: &[u8]) -> Result<bool, Anomaly> {
        let signature = Signature::from_compact(signature)
            .map_err(|e| Anomaly::MalformedSignature(e.to_string()))?;
        let message = digest_message(data);
        Ok(self
            .secp
            .verify_ecdsa(&message, &signature, &self.public_key)
            .is_ok())
    }

    pub fn destroy_ephemeral_key(&mut self) {
        if let Some(mut secret_key) = self.ephemeral_key.take() {
            secret_key.non_secure_erase();
        }
    }
}

impl Drop for SecurityController {
    fn drop(&mut self) {
        self.destroy_ephemeral_key();
    }
}

impl std::fmt::Debug for SecurityController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecurityController")
            .field("public_key", &self.public_key)
            .field("ephemeral_key_loaded", &self.ephemeral_key.is_some())
            .finish()
    }
}

fn digest_message(data: &[u8]) -> Message {
    let digest: [u8; 32] = Sha256::digest(data).into();
    Message::from_digest(digest)
}
