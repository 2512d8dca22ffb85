//! Parsing and encoding of bech32 Nostr keys
//!
//! Decoding here only establishes that the input is a well-formed, checksummed
//! entity with the right HRP. Length and curve checks belong to the caller.

use crate::codec::bech32::{self, Bech32Error};
use crate::constants::{NPUB_HRP, NPUB_PREFIX, NSEC_HRP, NSEC_PREFIX};
use crate::crypto::{PublicKey, SecretKey};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Key format errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyFormatError {
    #[error("Invalid key format: must start with \"{expected}\"")]
    MissingPrefix { expected: &'static str },
    #[error("Invalid bech32 encoding: {0}")]
    Bech32(#[from] Bech32Error),
    #[error("Invalid prefix: expected \"{expected}\", got \"{found}\"")]
    UnexpectedHrp { expected: &'static str, found: String },
}

/// Which Nostr entity a key string holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyKind {
    #[default]
    Npub,
    Nsec,
}

impl KeyKind {
    /// Human-readable part
    pub fn hrp(&self) -> &'static str {
        match self {
            KeyKind::Npub => NPUB_HRP,
            KeyKind::Nsec => NSEC_HRP,
        }
    }

    /// HRP plus separator
    pub fn prefix(&self) -> &'static str {
        match self {
            KeyKind::Npub => NPUB_PREFIX,
            KeyKind::Nsec => NSEC_PREFIX,
        }
    }
}

/// A checksum-verified key entity, not yet length or curve checked
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedKey {
    pub kind: KeyKind,
    /// Trimmed, case-folded input
    pub normalized: String,
    /// Regrouped payload bytes
    pub bytes: Vec<u8>,
}

/// Trim whitespace and fold an all-uppercase string to lowercase.
///
/// Mixed case is left alone so the codec can reject it.
pub fn normalize(input: &str) -> String {
    let trimmed = input.trim();
    if trimmed.bytes().any(|b| b.is_ascii_lowercase()) {
        trimmed.to_string()
    } else {
        trimmed.to_ascii_lowercase()
    }
}

/// Check the prefix, bech32-decode and regroup a key of the given kind.
pub fn decode_key(input: &str, kind: KeyKind) -> Result<DecodedKey, KeyFormatError> {
    let normalized = normalize(input);
    if !normalized.starts_with(kind.prefix()) {
        return Err(KeyFormatError::MissingPrefix {
            expected: kind.prefix(),
        });
    }

    let decoded = bech32::decode(&normalized)?;
    if decoded.hrp != kind.hrp() {
        return Err(KeyFormatError::UnexpectedHrp {
            expected: kind.hrp(),
            found: decoded.hrp,
        });
    }

    Ok(DecodedKey {
        kind,
        bytes: bech32::from_words(&decoded.words),
        normalized,
    })
}

/// Encode raw key bytes as a bech32 entity.
pub fn encode_key(kind: KeyKind, bytes: &[u8; 32]) -> Result<String, Bech32Error> {
    bech32::encode(kind.hrp(), &bech32::to_words(bytes))
}

/// `npub1...` for a public key
pub fn encode_npub(key: &PublicKey) -> Result<String, Bech32Error> {
    encode_key(KeyKind::Npub, &key.to_bytes())
}

/// `nsec1...` for a secret key
pub fn encode_nsec(key: &SecretKey) -> Result<String, Bech32Error> {
    encode_key(KeyKind::Nsec, &key.to_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    const GENERATOR_NPUB: &str = "npub10xlxvlhemja6c4dqv22uapctqupfhlxm9h8z3k2e72q4k9hcz7vqpkge6d";
    const GENERATOR_X: &str = "79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798";

    #[test]
    fn test_decode_npub() {
        let decoded = decode_key(GENERATOR_NPUB, KeyKind::Npub).unwrap();
        assert_eq!(hex::encode(&decoded.bytes), GENERATOR_X);
        assert_eq!(decoded.normalized, GENERATOR_NPUB);
    }

    #[test]
    fn test_decode_trims_and_folds_uppercase() {
        let input = format!("  {}\n", GENERATOR_NPUB.to_ascii_uppercase());
        let decoded = decode_key(&input, KeyKind::Npub).unwrap();
        assert_eq!(decoded.normalized, GENERATOR_NPUB);
    }

    #[test]
    fn test_missing_prefix() {
        assert_eq!(
            decode_key("nsec1qqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqsmhltgl", KeyKind::Npub)
                .unwrap_err(),
            KeyFormatError::MissingPrefix { expected: "npub1" }
        );
        assert_eq!(
            decode_key("", KeyKind::Npub).unwrap_err(),
            KeyFormatError::MissingPrefix { expected: "npub1" }
        );
    }

    #[test]
    fn test_bad_checksum() {
        let corrupted = GENERATOR_NPUB.replace("ge6d", "ge6e");
        assert_eq!(
            decode_key(&corrupted, KeyKind::Npub).unwrap_err(),
            KeyFormatError::Bech32(Bech32Error::InvalidChecksum)
        );
    }

    #[test]
    fn test_unexpected_hrp() {
        // the last '1' splits the string, so the HRP swallows the data part
        let bogus = bech32::encode("npub1x", &[0, 1, 2]).unwrap();
        assert_eq!(
            decode_key(&bogus, KeyKind::Npub).unwrap_err(),
            KeyFormatError::UnexpectedHrp { expected: "npub", found: "npub1x".to_string() }
        );
    }

    #[test]
    fn test_decode_nsec() {
        let decoded = decode_key(
            "nsec1qqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqsmhltgl",
            KeyKind::Nsec,
        )
        .unwrap();
        let mut expected = vec![0u8; 32];
        expected[31] = 1;
        assert_eq!(decoded.bytes, expected);
    }

    #[test]
    fn test_encode_npub() {
        let mut x = [0u8; 32];
        x.copy_from_slice(&hex::decode(GENERATOR_X).unwrap());
        let key = PublicKey::from_bytes(&x).unwrap();
        assert_eq!(encode_npub(&key).unwrap(), GENERATOR_NPUB);
    }

    #[test]
    fn test_kind_serde() {
        assert_eq!(serde_json::to_string(&KeyKind::Nsec).unwrap(), "\"nsec\"");
        let kind: KeyKind = serde_json::from_str("\"npub\"").unwrap();
        assert_eq!(kind, KeyKind::Npub);
    }
}
