//! nsec to Wallet Import Format

use super::{ConversionError, DerivationError};
use crate::codec::base58;
use crate::constants::{WIF_COMPRESSED_FLAG, WIF_VERSION};
use crate::crypto::SecretKey;
use crate::nostr::{decode_key, encode_npub, KeyKind};
use serde::{Deserialize, Serialize};

/// A Nostr secret key re-encoded for Bitcoin wallets
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WifKey {
    pub nsec: String,
    pub hex_privkey: String,
    /// Mainnet WIF for the compressed public key
    pub wif: String,
    /// npub of the same key pair
    pub npub: String,
}

impl std::fmt::Debug for WifKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WifKey")
            .field("npub", &self.npub)
            .finish_non_exhaustive()
    }
}

/// Convert an `nsec1...` string into WIF.
pub fn convert_nsec(nsec: &str) -> Result<WifKey, ConversionError> {
    let decoded = decode_key(nsec, KeyKind::Nsec)?;
    let secret = SecretKey::from_slice(&decoded.bytes)?;
    let public_key = secret.public_key()?;
    let npub = encode_npub(&public_key).map_err(DerivationError::from)?;

    Ok(WifKey {
        nsec: decoded.normalized,
        hex_privkey: hex::encode(secret.to_bytes()),
        wif: to_wif(&secret),
        npub,
    })
}

/// `base58check(0x80 || secret || 0x01)`
pub fn to_wif(secret: &SecretKey) -> String {
    let mut payload = Vec::with_capacity(33);
    payload.extend_from_slice(&secret.to_bytes());
    payload.push(WIF_COMPRESSED_FLAG);
    base58::encode_check(WIF_VERSION, &payload)
}
