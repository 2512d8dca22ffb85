//! Conversion errors
//!
//! Callers see two kinds: the input is not a valid key string, or a
//! well-formed key could not be turned into an address. The underlying cause
//! stays reachable through `source()`.

use crate::codec::Bech32Error;
use crate::crypto::KeyError;
use crate::nostr::KeyFormatError;
use thiserror::Error;

/// Failures after the key string has been decoded
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DerivationError {
    #[error(transparent)]
    Key(#[from] KeyError),
    #[error("Address encoding failed: {0}")]
    Encoding(#[from] Bech32Error),
}

/// Conversion errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    #[error("Invalid Nostr key: {0}")]
    InvalidKeyFormat(#[from] KeyFormatError),
    #[error("Failed to derive address: {0}")]
    AddressDerivation(#[from] DerivationError),
}

impl ConversionError {
    /// True for malformed input, false for derivation failures
    pub fn is_format_error(&self) -> bool {
        matches!(self, ConversionError::InvalidKeyFormat(_))
    }
}

impl From<KeyError> for ConversionError {
    fn from(err: KeyError) -> Self {
        ConversionError::AddressDerivation(DerivationError::Key(err))
    }
}
