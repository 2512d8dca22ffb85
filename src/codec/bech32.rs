//! Bech32 encoding (BIP-173)
//!
//! Strings are `hrp || '1' || data`, where the data part is drawn from a
//! 32-symbol charset and ends in a 6-symbol BCH checksum over the expanded
//! HRP and the payload words.

use crate::constants::BECH32_MAX_LENGTH;
use thiserror::Error;

/// Data-part alphabet, indexed by 5-bit word value
pub const CHARSET: &[u8; 32] = b"qpzry9x8gf2tvdw0s3jn54khce6mua7l";

/// Separator between the HRP and the data part
pub const SEPARATOR: char = '1';

/// Number of trailing data words holding the checksum
pub const CHECKSUM_LENGTH: usize = 6;

const GENERATOR: [u32; 5] = [0x3b6a57b2, 0x26508e6d, 0x1ea119fa, 0x3d4233dd, 0x2a1462b3];

/// Bech32 errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Bech32Error {
    #[error("Invalid character in bech32 string")]
    InvalidCharacter,
    #[error("Bech32 string mixes upper and lower case")]
    MixedCase,
    #[error("Bech32 string is too long: {0} characters")]
    TooLong(usize),
    #[error("Missing separator '1'")]
    MissingSeparator,
    #[error("Empty human-readable part")]
    EmptyHrp,
    #[error("Data part is shorter than the checksum")]
    DataTooShort,
    #[error("Invalid data character '{0}'")]
    InvalidDataCharacter(char),
    #[error("Invalid bech32 checksum")]
    InvalidChecksum,
    #[error("Word out of 5-bit range: {0}")]
    InvalidWord(u8),
    #[error("Invalid character in human-readable part")]
    InvalidHrp,
}

/// A decoded bech32 string with its checksum stripped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    /// Lowercased human-readable part
    pub hrp: String,
    /// Payload words (each 0..=31)
    pub words: Vec<u8>,
}

/// Decode and checksum-verify a bech32 string.
pub fn decode(input: &str) -> Result<Decoded, Bech32Error> {
    if !input.bytes().all(|b| b.is_ascii_alphanumeric()) {
        return Err(Bech32Error::InvalidCharacter);
    }

    let has_lower = input.bytes().any(|b| b.is_ascii_lowercase());
    let has_upper = input.bytes().any(|b| b.is_ascii_uppercase());
    if has_lower && has_upper {
        return Err(Bech32Error::MixedCase);
    }

    if input.len() > BECH32_MAX_LENGTH {
        return Err(Bech32Error::TooLong(input.len()));
    }

    let lowered = input.to_ascii_lowercase();
    let pos = lowered.rfind(SEPARATOR).ok_or(Bech32Error::MissingSeparator)?;
    if pos == 0 {
        return Err(Bech32Error::EmptyHrp);
    }
    if pos + 1 + CHECKSUM_LENGTH > lowered.len() {
        return Err(Bech32Error::DataTooShort);
    }

    let hrp = &lowered[..pos];
    let data = lowered[pos + 1..]
        .bytes()
        .map(|c| {
            CHARSET
                .iter()
                .position(|&symbol| symbol == c)
                .map(|index| index as u8)
                .ok_or(Bech32Error::InvalidDataCharacter(c as char))
        })
        .collect::<Result<Vec<u8>, _>>()?;

    if !verify_checksum(hrp, &data) {
        return Err(Bech32Error::InvalidChecksum);
    }

    Ok(Decoded {
        hrp: hrp.to_string(),
        words: data[..data.len() - CHECKSUM_LENGTH].to_vec(),
    })
}

/// Encode `words` under `hrp`, appending a freshly computed checksum.
///
/// The HRP is lowercased; encoders must only emit lowercase strings.
pub fn encode(hrp: &str, words: &[u8]) -> Result<String, Bech32Error> {
    if hrp.is_empty() {
        return Err(Bech32Error::EmptyHrp);
    }
    if !hrp.bytes().all(|b| (33..=126).contains(&b)) {
        return Err(Bech32Error::InvalidHrp);
    }
    if let Some(&word) = words.iter().find(|&&w| w > 31) {
        return Err(Bech32Error::InvalidWord(word));
    }

    let length = hrp.len() + 1 + words.len() + CHECKSUM_LENGTH;
    if length > BECH32_MAX_LENGTH {
        return Err(Bech32Error::TooLong(length));
    }

    let hrp = hrp.to_ascii_lowercase();
    let checksum = create_checksum(&hrp, words);

    let mut encoded = String::with_capacity(length);
    encoded.push_str(&hrp);
    encoded.push(SEPARATOR);
    encoded.extend(
        words
            .iter()
            .chain(checksum.iter())
            .map(|&w| CHARSET[w as usize] as char),
    );
    Ok(encoded)
}

/// BCH checksum register over GF(32), seeded with 1.
pub fn polymod(values: &[u8]) -> u32 {
    let mut chk: u32 = 1;
    for &value in values {
        let top = chk >> 25;
        chk = ((chk & 0x1ffffff) << 5) ^ value as u32;
        for (i, generator) in GENERATOR.iter().enumerate() {
            if (top >> i) & 1 == 1 {
                chk ^= generator;
            }
        }
    }
    chk
}

/// High 3 bits of each HRP character, a zero, then the low 5 bits of each.
pub fn hrp_expand(hrp: &str) -> Vec<u8> {
    let bytes = hrp.as_bytes();
    let mut expanded = Vec::with_capacity(bytes.len() * 2 + 1);
    expanded.extend(bytes.iter().map(|b| b >> 5));
    expanded.push(0);
    expanded.extend(bytes.iter().map(|b| b & 31));
    expanded
}

/// Compute the 6-word checksum for `hrp` and `words`.
pub fn create_checksum(hrp: &str, words: &[u8]) -> [u8; CHECKSUM_LENGTH] {
    let mut values = hrp_expand(hrp);
    values.extend_from_slice(words);
    values.extend_from_slice(&[0u8; CHECKSUM_LENGTH]);
    let modulus = polymod(&values) ^ 1;

    let mut checksum = [0u8; CHECKSUM_LENGTH];
    for (i, word) in checksum.iter_mut().enumerate() {
        *word = ((modulus >> (5 * (5 - i))) & 31) as u8;
    }
    checksum
}

/// Check that `data` (payload followed by checksum) verifies under `hrp`.
pub fn verify_checksum(hrp: &str, data: &[u8]) -> bool {
    let mut values = hrp_expand(hrp);
    values.extend_from_slice(data);
    polymod(&values) == 1
}

/// Regroup bytes into 5-bit words, zero-padding the final group.
pub fn to_words(bytes: &[u8]) -> Vec<u8> {
    let mut words = Vec::with_capacity((bytes.len() * 8).div_ceil(5));
    let mut acc: u32 = 0;
    let mut bits = 0u32;

    for &byte in bytes {
        acc = ((acc << 8) | byte as u32) & 0xffff;
        bits += 8;
        while bits >= 5 {
            bits -= 5;
            words.push(((acc >> bits) & 31) as u8);
        }
    }
    if bits > 0 {
        words.push(((acc << (5 - bits)) & 31) as u8);
    }
    words
}

/// Regroup 5-bit words into bytes.
///
/// A trailing group of fewer than 8 bits is padding and is dropped without
/// inspection.
pub fn from_words(words: &[u8]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(words.len() * 5 / 8);
    let mut acc: u32 = 0;
    let mut bits = 0u32;

    for &word in words {
        acc = ((acc << 5) | (word & 31) as u32) & 0xffff;
        bits += 5;
        while bits >= 8 {
            bits -= 8;
            bytes.push(((acc >> bits) & 0xff) as u8);
        }
    }
    bytes
}
