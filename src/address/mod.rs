//! Address derivation - npub to P2PKH / P2WPKH, nsec to WIF

mod error;
mod pipeline;
mod wif;
mod batch;

pub use error::*;
pub use pipeline::*;
pub use wif::*;
pub use batch::*;
