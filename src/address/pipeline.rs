//! npub to Bitcoin address pipeline
//!
//! decode npub -> x-only key -> compressed key -> Hash160 -> P2PKH + P2WPKH.
//! The Hash160 is computed once and shared by both encodings.

use super::{ConversionError, DerivationError};
use crate::codec::{base58, bech32};
use crate::constants::{P2PKH_VERSION, SEGWIT_HRP, WITNESS_VERSION};
use crate::crypto::{hash160, Hash160, PublicKey};
use crate::nostr::{decode_key, KeyKind};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Both mainnet addresses for one Nostr public key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BitcoinAddresses {
    /// Normalised npub the addresses were derived from
    pub npub: String,
    /// x-only public key, 64 lowercase hex chars
    pub hex_pubkey: String,
    /// Base58Check P2PKH address
    pub legacy_address: String,
    /// bech32 P2WPKH address
    pub segwit_address: String,
}

/// Convert an `npub1...` string into its legacy and segwit addresses.
pub fn convert(npub: &str) -> Result<BitcoinAddresses, ConversionError> {
    let decoded = decode_key(npub, KeyKind::Npub)?;
    let public_key = PublicKey::from_slice(&decoded.bytes)?;
    let pubkey_hash = pubkey_hash(&public_key);

    let legacy_address = legacy_address(&pubkey_hash);
    let segwit_address = segwit_address(&pubkey_hash)?;

    debug!(npub = %decoded.normalized, hash160 = %pubkey_hash, "derived bitcoin addresses");

    Ok(BitcoinAddresses {
        npub: decoded.normalized,
        hex_pubkey: public_key.to_hex(),
        legacy_address,
        segwit_address,
    })
}

/// Hash160 of the compressed public key
pub fn pubkey_hash(public_key: &PublicKey) -> Hash160 {
    hash160(&public_key.compressed())
}

/// Mainnet P2PKH address for a Hash160
pub fn legacy_address(pubkey_hash: &Hash160) -> String {
    base58::encode_check(P2PKH_VERSION, pubkey_hash.as_bytes())
}

/// Mainnet witness v0 (P2WPKH) address for a Hash160
pub fn segwit_address(pubkey_hash: &Hash160) -> Result<String, DerivationError> {
    let mut words = Vec::with_capacity(33);
    words.push(WITNESS_VERSION);
    words.extend(bech32::to_words(pubkey_hash.as_bytes()));
    Ok(bech32::encode(SEGWIT_HRP, &words)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::Bech32Error;
    use crate::crypto::KeyError;
    use crate::nostr::KeyFormatError;

    const GENERATOR_NPUB: &str = "npub10xlxvlhemja6c4dqv22uapctqupfhlxm9h8z3k2e72q4k9hcz7vqpkge6d";

    #[test]
    fn test_generator_npub() {
        let addresses = convert(GENERATOR_NPUB).unwrap();
        assert_eq!(
            addresses.hex_pubkey,
            "79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798"
        );
        assert_eq!(addresses.legacy_address, "1BgGZ9tcN4rm9KBzDn7KprQz87SZ26SAMH");
        assert_eq!(
            addresses.segwit_address,
            "bc1qw508d6qejxtdg4y5r3zarvary0c5xw7kv8f3t4"
        );
    }

    #[test]
    fn test_real_npubs() {
        let cases = [
            (
                "npub1sg6plzptd64u62a878hep2kev88swjh3tw00gjsfl8f237lmu63q0uf63m",
                "82341f882b6eabcd2ba7f1ef90aad961cf074af15b9ef44a09f9d2a8fbfbe6a2",
                "19LyAFBRhkivTqjX4LXrzuP3xL7yUR3kqj",
                "bc1qtwrunl5gsztfpfz2ed6uja8p776cftvxgypg0n",
            ),
            (
                "npub180cvv07tjdrrgpa0j7j7tmnyl2yr6yr7l8j4s3evf6u64th6gkwsyjh6w6",
                "3bf0c63fcb93463407af97a5e5ee64fa883d107ef9e558472c4eb9aaaefa459d",
                "14hTm52YKsfzBx3boqm2Di6J2BFqdFPb8W",
                "bc1q9z844y3ell5846fu2ycanulwtf8gwtfcmu6eaj",
            ),
        ];
        for (npub, hex_pubkey, legacy, segwit) in cases {
            let addresses = convert(npub).unwrap();
            assert_eq!(addresses.npub, npub);
            assert_eq!(addresses.hex_pubkey, hex_pubkey);
            assert_eq!(addresses.legacy_address, legacy);
            assert_eq!(addresses.segwit_address, segwit);
        }
    }

    #[test]
    fn test_uppercase_npub_accepted() {
        let addresses = convert(&GENERATOR_NPUB.to_ascii_uppercase()).unwrap();
        assert_eq!(addresses.npub, GENERATOR_NPUB);
    }

    #[test]
    fn test_prefix_rejected() {
        for input in ["", "npub", "nsec10xlxvlhemja6c4dqv22uapctqupfhlxm9h8z3k2e72q4k9hcz7vqpkge6d", "bc1qw508d6qejxtdg4y5r3zarvary0c5xw7kv8f3t4"] {
            let err = convert(input).unwrap_err();
            assert_eq!(
                err,
                ConversionError::InvalidKeyFormat(KeyFormatError::MissingPrefix { expected: "npub1" })
            );
        }
    }

    #[test]
    fn test_checksum_failure_is_format_error() {
        let corrupted = GENERATOR_NPUB.replace("ge6d", "ge6e");
        assert_eq!(
            convert(&corrupted).unwrap_err(),
            ConversionError::InvalidKeyFormat(KeyFormatError::Bech32(Bech32Error::InvalidChecksum))
        );
    }

    #[test]
    fn test_short_key_is_derivation_error() {
        // valid npub checksum over a 20-byte payload
        let err = convert("npub1qqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqq6r9zhj").unwrap_err();
        assert_eq!(
            err,
            ConversionError::AddressDerivation(DerivationError::Key(KeyError::InvalidLength {
                expected: 32,
                found: 20,
            }))
        );
    }

    #[test]
    fn test_off_curve_is_derivation_error() {
        // x = 5 is not on secp256k1
        let err = convert("npub1qqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqzsfj2hcx").unwrap_err();
        assert_eq!(
            err,
            ConversionError::AddressDerivation(DerivationError::Key(KeyError::InvalidPublicKey))
        );
    }

    #[test]
    fn test_zero_hash_legacy() {
        assert_eq!(
            legacy_address(&Hash160([0u8; 20])),
            "1111111111111111111114oLvT2"
        );
    }

    #[test]
    fn test_segwit_known_vector() {
        let hash = Hash160::from_hex("751e76e8199196d454941c45d1b3a323f1433bd6").unwrap();
        assert_eq!(
            segwit_address(&hash).unwrap(),
            "bc1qw508d6qejxtdg4y5r3zarvary0c5xw7kv8f3t4"
        );
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(convert(GENERATOR_NPUB).unwrap(), convert(GENERATOR_NPUB).unwrap());
    }
}
