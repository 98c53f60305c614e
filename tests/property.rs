use blackout_wallet::utils::crypto::is_canonical_address;
use blackout_wallet::utils::sanitize::normalize_mnemonic;
use blackout_wallet::wallet::{key_material_from_secret, mnemonic_to_seed};
use blackout_wallet::{keccak256, to_checksum_address, MnemonicPolicy};
use proptest::prelude::*;
use secp256k1::SecretKey;

fn any_secret_key() -> impl Strategy<Value = SecretKey> {
    prop::array::uniform32(any::<u8>()).prop_filter_map("valid secp256k1 scalar", |bytes| {
        SecretKey::from_slice(&bytes).ok()
    })
}

fn any_mnemonic() -> impl Strategy<Value = String> {
    prop::array::uniform16(any::<u8>()).prop_map(|entropy| {
        bip39::Mnemonic::from_entropy(&entropy)
            .expect("16 bytes is valid entropy")
            .to_string()
    })
}

proptest! {
    #[test]
    fn checksum_addresses_roundtrip(bytes in prop::array::uniform20(any::<u8>())) {
        let checksummed = to_checksum_address(&bytes);
        prop_assert!(checksummed.starts_with("0x"));

        let tail = checksummed.trim_start_matches("0x");
        let lower_expected = hex::encode(bytes);
        let lower_tail = tail.to_ascii_lowercase();
        prop_assert_eq!(lower_tail.as_str(), lower_expected.as_str());

        let hash = keccak256(lower_expected.as_bytes());
        let mut expected = String::from("0x");
        for (i, ch) in lower_expected.chars().enumerate() {
            let byte = hash[i / 2];
            let nibble = if i % 2 == 0 { byte >> 4 } else { byte & 0x0f };
            if ch.is_ascii_digit() || nibble < 8 {
                expected.push(ch);
            } else {
                expected.push(ch.to_ascii_uppercase());
            }
        }
        prop_assert_eq!(checksummed, expected);
    }

    #[test]
    fn derived_addresses_are_canonical(secret in any_secret_key()) {
        let keys = key_material_from_secret(secret).expect("valid scalar");
        prop_assert!(is_canonical_address(&keys.address));
        prop_assert_eq!(keys.private_key_hex.len(), 64);
        prop_assert_eq!(keys.private_key_hex.as_str(), hex::encode(secret.secret_bytes()));

        let public = hex::decode(keys.public_uncompressed_hex()).expect("hex");
        let hash = keccak256(&public);
        prop_assert_eq!(&keys.address[2..], hex::encode(&hash[12..]));
    }

    #[test]
    fn normalization_is_idempotent(input in "[a-z \t\n]{0,80}") {
        if let Ok(once) = normalize_mnemonic(&input) {
            let twice = normalize_mnemonic(&once).expect("normalized input stays valid");
            prop_assert_eq!(&once, &twice);
            prop_assert!(!once.contains("  "));
            prop_assert_eq!(once.trim(), once.as_str());
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn policies_agree_on_valid_mnemonics(phrase in any_mnemonic()) {
        let (_, strict) = mnemonic_to_seed(&phrase, MnemonicPolicy::Strict).expect("valid phrase");
        let (_, permissive) = mnemonic_to_seed(&phrase, MnemonicPolicy::Permissive).expect("non-empty");
        prop_assert_eq!(&strict[..], &permissive[..]);
    }

    #[test]
    fn whitespace_does_not_change_seed(phrase in any_mnemonic()) {
        let messy = format!("  {}\t", phrase.replace(' ', "   "));
        let (_, clean) = mnemonic_to_seed(&phrase, MnemonicPolicy::Strict).expect("valid phrase");
        let (_, spaced) = mnemonic_to_seed(&messy, MnemonicPolicy::Strict).expect("valid phrase");
        prop_assert_eq!(&clean[..], &spaced[..]);
    }
}
