//! Cryptography module - SHA-256 / RIPEMD-160 hashing, secp256k1 keys

mod hash;
mod pubkey;

pub use hash::*;
pub use pubkey::*;
