//! Batch conversion
//!
//! Each key is converted on its own; one bad key never aborts the rest.

use super::{convert, convert_nsec, BitcoinAddresses, WifKey};
use crate::nostr::KeyKind;
use serde::{Deserialize, Serialize};

/// One successful conversion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Converted {
    Npub(BitcoinAddresses),
    Nsec(WifKey),
}

/// One failed conversion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchFailure {
    pub key: String,
    pub error: String,
}

/// Results and failures of a batch, in input order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchOutcome {
    pub results: Vec<Converted>,
    pub errors: Vec<BatchFailure>,
}

impl BatchOutcome {
    /// True when there were keys and none converted
    pub fn all_failed(&self) -> bool {
        self.results.is_empty() && !self.errors.is_empty()
    }
}

/// Convert every key of the given kind.
pub fn convert_batch<I, S>(keys: I, kind: KeyKind) -> BatchOutcome
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut outcome = BatchOutcome::default();

    for key in keys {
        let key = key.as_ref();
        let converted = match kind {
            KeyKind::Npub => convert(key).map(Converted::Npub),
            KeyKind::Nsec => convert_nsec(key).map(Converted::Nsec),
        };
        match converted {
            Ok(result) => outcome.results.push(result),
            Err(e) => outcome.errors.push(BatchFailure {
                key: key.to_string(),
                error: e.to_string(),
            }),
        }
    }

    outcome
}
