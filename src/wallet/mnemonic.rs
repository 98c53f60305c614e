//! Mnemonic Generation and Seed Stretching
//!
//! BIP-39 phrases are generated from caller-supplied randomness and stretched
//! into 64-byte seeds with PBKDF2-HMAC-SHA512 (2048 rounds, salt
//! `"mnemonic" + passphrase`).
//!
//! SECURITY: entropy and seeds are held in `Zeroizing` buffers.

use bip39::Mnemonic;
use hmac::Hmac;
use rand::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};
use sha2::Sha512;
use zeroize::Zeroizing;

use crate::error::{WalletError, WalletResult};
use crate::utils::sanitize::{check_raw_mnemonic, normalize_mnemonic};
use crate::utils::wallet_config::MnemonicPolicy;

/// BIP-39 seed length in bytes
pub const SEED_LEN: usize = 64;

const PBKDF2_ROUNDS: u32 = 2048;

/// Supported mnemonic lengths
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub enum WordCount {
    /// 12 words (128-bit entropy)
    #[default]
    Twelve = 12,
    /// 15 words (160-bit entropy)
    Fifteen = 15,
    /// 18 words (192-bit entropy)
    Eighteen = 18,
    /// 21 words (224-bit entropy)
    TwentyOne = 21,
    /// 24 words (256-bit entropy)
    TwentyFour = 24,
}

impl WordCount {
    /// Bytes of entropy behind a phrase of this length
    #[inline]
    pub const fn entropy_bytes(self) -> usize {
        match self {
            WordCount::Twelve => 16,
            WordCount::Fifteen => 20,
            WordCount::Eighteen => 24,
            WordCount::TwentyOne => 28,
            WordCount::TwentyFour => 32,
        }
    }

    #[inline]
    pub const fn strength_bits(self) -> usize {
        self.entropy_bytes() * 8
    }
}

impl TryFrom<usize> for WordCount {
    type Error = String;

    fn try_from(count: usize) -> Result<Self, Self::Error> {
        match count {
            12 => Ok(WordCount::Twelve),
            15 => Ok(WordCount::Fifteen),
            18 => Ok(WordCount::Eighteen),
            21 => Ok(WordCount::TwentyOne),
            24 => Ok(WordCount::TwentyFour),
            other => Err(format!(
                "Invalid word count: {}. Expected 12, 15, 18, 21 or 24.",
                other
            )),
        }
    }
}

impl From<WordCount> for usize {
    fn from(count: WordCount) -> Self {
        count as usize
    }
}

/// Generate a fresh English mnemonic of the requested length.
///
/// A failing random source surfaces as `EntropyUnavailable`; so does an
/// all-zero draw, which a healthy source produces with negligible probability.
pub fn generate_mnemonic<R>(rng: &mut R, word_count: WordCount) -> WalletResult<Zeroizing<String>>
where
    R: RngCore + CryptoRng + ?Sized,
{
    let mut buffer = Zeroizing::new([0u8; 32]);
    let entropy = &mut buffer[..word_count.entropy_bytes()];
    rng.try_fill_bytes(entropy)?;

    if entropy.iter().all(|b| *b == 0) {
        return Err(WalletError::entropy_unavailable(
            "Random source returned all-zero entropy",
        ));
    }

    let mnemonic = Mnemonic::from_entropy(entropy)
        .map_err(|e| WalletError::derivation_failed(format!("Failed to create mnemonic: {}", e)))?;

    Ok(Zeroizing::new(mnemonic.to_string()))
}

/// Stretch a phrase into a 64-byte seed with an empty passphrase.
///
/// Returns the phrase alongside the seed so callers store exactly what was
/// hashed: normalized under `Strict`, byte for byte as given under
/// `Permissive`.
pub fn mnemonic_to_seed(
    phrase: &str,
    policy: MnemonicPolicy,
) -> WalletResult<(Zeroizing<String>, Zeroizing<[u8; SEED_LEN]>)> {
    mnemonic_to_seed_with_passphrase(phrase, "", policy)
}

/// Stretch a phrase into a 64-byte seed with a BIP-39 passphrase
pub fn mnemonic_to_seed_with_passphrase(
    phrase: &str,
    passphrase: &str,
    policy: MnemonicPolicy,
) -> WalletResult<(Zeroizing<String>, Zeroizing<[u8; SEED_LEN]>)> {
    match policy {
        MnemonicPolicy::Strict => {
            let normalized = Zeroizing::new(normalize_mnemonic(phrase)?);
            let mnemonic = Mnemonic::parse_normalized(&normalized)
                .map_err(|e| WalletError::invalid_mnemonic(format!("Invalid mnemonic: {}", e)))?;
            Ok((normalized, Zeroizing::new(mnemonic.to_seed(passphrase))))
        }
        MnemonicPolicy::Permissive => {
            check_raw_mnemonic(phrase)?;
            let seed = raw_seed(phrase, passphrase)?;
            Ok((Zeroizing::new(phrase.to_string()), seed))
        }
    }
}

/// PBKDF2 over the phrase's UTF-8 bytes, byte-identical to BIP-39 for
/// canonical phrases
fn raw_seed(phrase: &str, passphrase: &str) -> WalletResult<Zeroizing<[u8; SEED_LEN]>> {
    use unicode_normalization::UnicodeNormalization;

    let salt = Zeroizing::new(format!("mnemonic{}", passphrase.nfkd().collect::<String>()));
    let mut seed = Zeroizing::new([0u8; SEED_LEN]);
    pbkdf2::pbkdf2::<Hmac<Sha512>>(
        phrase.as_bytes(),
        salt.as_bytes(),
        PBKDF2_ROUNDS,
        &mut seed[..],
    )
    .map_err(|e| WalletError::invalid_mnemonic(format!("Seed derivation failed: {}", e)))?;
    Ok(seed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use rand::rngs::OsRng;
    use rand_chacha::rand_core::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    const ABANDON_12: &str =
        "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";
    const LEGAL_WINNER: &str =
        "legal winner thank year wave sausage worth useful legal winner thank yellow";

    #[test]
    fn test_word_count_entropy() {
        assert_eq!(WordCount::Twelve.entropy_bytes(), 16);
        assert_eq!(WordCount::TwentyFour.entropy_bytes(), 32);
        assert_eq!(WordCount::Eighteen.strength_bits(), 192);
        assert_eq!(WordCount::try_from(21), Ok(WordCount::TwentyOne));
        assert!(WordCount::try_from(13).is_err());
        assert_eq!(usize::from(WordCount::Fifteen), 15);
        assert_eq!(WordCount::default(), WordCount::Twelve);
    }

    #[test]
    fn test_generate_word_counts() {
        for count in [
            WordCount::Twelve,
            WordCount::Fifteen,
            WordCount::Eighteen,
            WordCount::TwentyOne,
            WordCount::TwentyFour,
        ] {
            let phrase = generate_mnemonic(&mut OsRng, count).unwrap();
            assert_eq!(phrase.split_whitespace().count(), count as usize);
            assert!(Mnemonic::parse_normalized(&phrase).is_ok());
        }
    }

    #[test]
    fn test_generate_is_deterministic_for_seeded_rng() {
        let a = generate_mnemonic(&mut ChaCha20Rng::seed_from_u64(7), WordCount::Twelve).unwrap();
        let b = generate_mnemonic(&mut ChaCha20Rng::seed_from_u64(7), WordCount::Twelve).unwrap();
        let c = generate_mnemonic(&mut ChaCha20Rng::seed_from_u64(8), WordCount::Twelve).unwrap();
        assert_eq!(*a, *b);
        assert_ne!(*a, *c);
    }

    #[test]
    fn test_abandon_seed_vector() {
        let (_, seed) = mnemonic_to_seed(ABANDON_12, MnemonicPolicy::Strict).unwrap();
        assert_eq!(
            hex::encode(&seed[..32]),
            "5eb00bbddcf069084889a8ab9155568165f5c453ccb85e70811aaed6f6da5fc1"
        );
    }

    #[test]
    fn test_legal_winner_seed_vector() {
        let (phrase, seed) = mnemonic_to_seed(LEGAL_WINNER, MnemonicPolicy::Strict).unwrap();
        assert_eq!(phrase.as_str(), LEGAL_WINNER);
        assert_eq!(
            hex::encode(&seed[..]),
            "878386efb78845b3355bd15ea4d39ef97d179cb712b77d5c12b6be415fffeffe\
             5f377ba02bf3f8544ab800b955e51fbff09828f682052a20faa6addbbddfb096"
        );
    }

    #[test]
    fn test_policies_agree_on_valid_phrases() {
        let (_, strict) = mnemonic_to_seed(LEGAL_WINNER, MnemonicPolicy::Strict).unwrap();
        let (_, permissive) = mnemonic_to_seed(LEGAL_WINNER, MnemonicPolicy::Permissive).unwrap();
        assert_eq!(&strict[..], &permissive[..]);
    }

    #[test]
    fn test_passphrase_changes_seed() {
        let (_, plain) = mnemonic_to_seed(ABANDON_12, MnemonicPolicy::Strict).unwrap();
        let (_, salted) =
            mnemonic_to_seed_with_passphrase(ABANDON_12, "TREZOR", MnemonicPolicy::Strict).unwrap();
        assert_ne!(&plain[..], &salted[..]);
    }

    #[test]
    fn test_strict_rejects_bad_checksum() {
        let bad = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon";
        let err = mnemonic_to_seed(bad, MnemonicPolicy::Strict).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidMnemonic);
    }

    #[test]
    fn test_strict_rejects_unknown_words() {
        let err = mnemonic_to_seed("hello world", MnemonicPolicy::Strict).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidMnemonic);
    }

    #[test]
    fn test_permissive_accepts_arbitrary_phrases() {
        let (_, seed) = mnemonic_to_seed("hello world", MnemonicPolicy::Permissive).unwrap();
        assert_eq!(
            hex::encode(&seed[..32]),
            "d9646a6d5fedb3b2df16869c22e8662b0c6196075afd22f41c05e7ee1cdde305"
        );
    }

    #[test]
    fn test_permissive_hashes_raw_bytes() {
        let trailing = format!("{}\n", LEGAL_WINNER);
        let (phrase, seed) = mnemonic_to_seed(&trailing, MnemonicPolicy::Permissive).unwrap();
        assert_eq!(phrase.as_str(), trailing);
        assert_eq!(
            hex::encode(&seed[..32]),
            "83563fb21ddd37d16f01b4dc507c8d8cf3fd6dc59e8cab03653c65a30e96ff55"
        );

        // Strict still normalizes the same input back to the canonical phrase
        let (phrase, _) = mnemonic_to_seed(&trailing, MnemonicPolicy::Strict).unwrap();
        assert_eq!(phrase.as_str(), LEGAL_WINNER);
    }

    #[test]
    fn test_permissive_keeps_control_chars() {
        let joined = LEGAL_WINNER.replacen(' ', "\u{0}", 1);
        let (_, seed) = mnemonic_to_seed(&joined, MnemonicPolicy::Permissive).unwrap();
        assert_eq!(
            hex::encode(&seed[..32]),
            "74fe57fcd6cc21913d3d78ab72fa5f182de5f2d3f71069e4f7534c4ac0bcdcae"
        );
    }

    #[test]
    fn test_empty_rejected_under_both_policies() {
        for policy in [MnemonicPolicy::Strict, MnemonicPolicy::Permissive] {
            for blank in ["", "  \n\t"] {
                let err = mnemonic_to_seed(blank, policy).unwrap_err();
                assert_eq!(err.code, ErrorCode::InvalidMnemonic);
            }
        }
    }
}
