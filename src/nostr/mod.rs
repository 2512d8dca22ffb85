//! Nostr bech32 key entities (NIP-19 `npub` / `nsec`)

mod keys;

pub use keys::*;
