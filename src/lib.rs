//! npub2btc Core Library
//!
//! Converts a Nostr public key (bech32 `npub`) into the two Bitcoin address
//! encodings of its Hash160: a legacy P2PKH address (Base58Check) and a
//! native segwit P2WPKH address (bech32, witness v0).
//!
//! Every conversion is a pure function of its input string.

pub mod codec;
pub mod crypto;
pub mod nostr;
pub mod address;
pub mod rpc;

pub use address::{convert, convert_nsec, BitcoinAddresses, ConversionError, WifKey};

/// Protocol constants - fixed by BIP-173, BIP-340, NIP-19 and Bitcoin mainnet
pub mod constants {
    /// Human-readable part of a Nostr public key
    pub const NPUB_HRP: &str = "npub";

    /// Human-readable part of a Nostr secret key
    pub const NSEC_HRP: &str = "nsec";

    /// Every valid npub starts with its HRP followed by the separator
    pub const NPUB_PREFIX: &str = "npub1";

    /// Every valid nsec starts with its HRP followed by the separator
    pub const NSEC_PREFIX: &str = "nsec1";

    /// Human-readable part of mainnet segwit addresses
    pub const SEGWIT_HRP: &str = "bc";

    /// Witness version for P2WPKH
    pub const WITNESS_VERSION: u8 = 0;

    /// Base58Check version byte for mainnet P2PKH
    pub const P2PKH_VERSION: u8 = 0x00;

    /// Base58Check version byte for mainnet WIF secrets
    pub const WIF_VERSION: u8 = 0x80;

    /// WIF suffix marking the secret as belonging to a compressed public key
    pub const WIF_COMPRESSED_FLAG: u8 = 0x01;

    /// Maximum length of a bech32 string (BIP-173)
    pub const BECH32_MAX_LENGTH: usize = 90;

    /// Length of a raw x-only public key or secret key
    pub const KEY_LENGTH: usize = 32;

    /// Default HTTP port for `npub2btc serve`
    pub const DEFAULT_PORT: u16 = 5002;
}
