//! secp256k1 keys as carried by Nostr
//!
//! Nostr public keys are BIP-340 x-only keys. The full point is recovered
//! with `lift_x`, which always picks the even-y solution, so the compressed
//! SEC1 form is `0x02 || x`.

use crate::constants::KEY_LENGTH;
use k256::elliptic_curve::sec1::ToEncodedPoint;
use thiserror::Error;

/// SEC1 tag for a compressed point with even y
const EVEN_Y_TAG: u8 = 0x02;

/// Key errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyError {
    #[error("Invalid key length: expected {expected} bytes, got {found}")]
    InvalidLength { expected: usize, found: usize },
    #[error("Invalid public key: x coordinate is not on secp256k1")]
    InvalidPublicKey,
    #[error("Invalid secret key: not a scalar in [1, n)")]
    InvalidSecretKey,
}

/// 32-byte x-only public key, validated as a curve point
#[derive(Clone, PartialEq, Eq)]
pub struct PublicKey {
    x_only: [u8; 32],
    point: k256::PublicKey,
}

impl PublicKey {
    /// Create from 32 bytes
    pub fn from_bytes(bytes: &[u8; 32]) -> Result<Self, KeyError> {
        let mut sec1 = [0u8; 33];
        sec1[0] = EVEN_Y_TAG;
        sec1[1..].copy_from_slice(bytes);

        let point = k256::PublicKey::from_sec1_bytes(&sec1)
            .map_err(|_| KeyError::InvalidPublicKey)?;

        Ok(PublicKey {
            x_only: *bytes,
            point,
        })
    }

    /// Create from a slice that must hold exactly 32 bytes
    pub fn from_slice(bytes: &[u8]) -> Result<Self, KeyError> {
        let arr: [u8; 32] = bytes.try_into().map_err(|_| KeyError::InvalidLength {
            expected: KEY_LENGTH,
            found: bytes.len(),
        })?;
        Self::from_bytes(&arr)
    }

    /// 33-byte compressed SEC1 encoding
    pub fn compressed(&self) -> [u8; 33] {
        let encoded = self.point.to_encoded_point(true);
        let mut out = [0u8; 33];
        out.copy_from_slice(encoded.as_bytes());
        out
    }

    /// Export x-only bytes
    pub fn to_bytes(&self) -> [u8; 32] {
        self.x_only
    }

    /// Lowercase hex of the x-only bytes
    pub fn to_hex(&self) -> String {
        hex::encode(self.x_only)
    }
}

impl std::fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PublicKey({})", self.to_hex())
    }
}

/// 32-byte secret key
#[derive(Clone)]
pub struct SecretKey(k256::SecretKey);

impl std::fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SecretKey([REDACTED])")
    }
}

impl SecretKey {
    /// Create from 32 bytes
    pub fn from_bytes(bytes: &[u8; 32]) -> Result<Self, KeyError> {
        k256::SecretKey::from_slice(bytes)
            .map(SecretKey)
            .map_err(|_| KeyError::InvalidSecretKey)
    }

    /// Create from a slice that must hold exactly 32 bytes
    pub fn from_slice(bytes: &[u8]) -> Result<Self, KeyError> {
        let arr: [u8; 32] = bytes.try_into().map_err(|_| KeyError::InvalidLength {
            expected: KEY_LENGTH,
            found: bytes.len(),
        })?;
        Self::from_bytes(&arr)
    }

    /// The BIP-340 x-only public key for this secret
    pub fn public_key(&self) -> Result<PublicKey, KeyError> {
        let encoded = self.0.public_key().to_encoded_point(true);
        let mut x_only = [0u8; 32];
        x_only.copy_from_slice(&encoded.as_bytes()[1..]);
        PublicKey::from_bytes(&x_only)
    }

    /// Export to bytes
    pub fn to_bytes(&self) -> [u8; 32] {
        self.0.to_bytes().into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GENERATOR_X: &str = "79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798";

    fn x_bytes(hex_str: &str) -> [u8; 32] {
        let mut out = [0u8; 32];
        out.copy_from_slice(&hex::decode(hex_str).unwrap());
        out
    }

    #[test]
    fn test_compress_generator() {
        let key = PublicKey::from_bytes(&x_bytes(GENERATOR_X)).unwrap();
        let compressed = key.compressed();
        assert_eq!(compressed[0], 0x02);
        assert_eq!(hex::encode(&compressed[1..]), GENERATOR_X);
    }

    #[test]
    fn test_compress_keeps_even_prefix() {
        let x = "82341f882b6eabcd2ba7f1ef90aad961cf074af15b9ef44a09f9d2a8fbfbe6a2";
        let key = PublicKey::from_bytes(&x_bytes(x)).unwrap();
        assert_eq!(hex::encode(key.compressed()), format!("02{}", x));
    }

    #[test]
    fn test_off_curve_rejected() {
        // x = 5 has no y on secp256k1
        let mut x = [0u8; 32];
        x[31] = 5;
        assert_eq!(PublicKey::from_bytes(&x).unwrap_err(), KeyError::InvalidPublicKey);
    }

    #[test]
    fn test_wrong_length_rejected() {
        assert_eq!(
            PublicKey::from_slice(&[1u8; 20]).unwrap_err(),
            KeyError::InvalidLength { expected: 32, found: 20 }
        );
    }

    #[test]
    fn test_secret_one_maps_to_generator() {
        let mut bytes = [0u8; 32];
        bytes[31] = 1;
        let secret = SecretKey::from_bytes(&bytes).unwrap();
        assert_eq!(secret.public_key().unwrap().to_hex(), GENERATOR_X);
        assert_eq!(secret.to_bytes(), bytes);
    }

    #[test]
    fn test_public_key_matches_bip340_signer() {
        // secret 6 maps to an odd-y point; the x-only key must not change
        let mut bytes = [0u8; 32];
        bytes[31] = 6;
        let secret = SecretKey::from_bytes(&bytes).unwrap();
        let signer = k256::schnorr::SigningKey::from_bytes(&bytes).unwrap();
        let expected: [u8; 32] = signer.verifying_key().to_bytes().into();

        assert_eq!(secret.public_key().unwrap().to_bytes(), expected);
        assert_eq!(secret.to_bytes(), bytes);
    }

    #[test]
    fn test_zero_secret_rejected() {
        assert_eq!(
            SecretKey::from_bytes(&[0u8; 32]).unwrap_err(),
            KeyError::InvalidSecretKey
        );
    }

    #[test]
    fn test_secret_debug_redacted() {
        let mut bytes = [0u8; 32];
        bytes[31] = 7;
        let secret = SecretKey::from_bytes(&bytes).unwrap();
        assert_eq!(format!("{:?}", secret), "SecretKey([REDACTED])");
    }
}
