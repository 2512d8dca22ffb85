//! Text codecs - bech32 and base58(check)

pub mod bech32;
pub mod base58;

pub use base58::Base58Error;
pub use bech32::{Bech32Error, Decoded};
