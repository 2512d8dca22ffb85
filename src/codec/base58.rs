//! Base58 and Base58Check encoding
//!
//! Base58 treats its input as one unsigned big-endian integer. Leading zero
//! bytes carry no numeric weight, so each one is written as a leading `'1'`.

use crate::crypto::checksum;
use thiserror::Error;

/// Bitcoin base58 alphabet (no `0`, `O`, `I`, `l`)
pub const ALPHABET: &[u8; 58] = b"123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

/// Length of the Base58Check checksum suffix
pub const CHECKSUM_LENGTH: usize = 4;

/// Base58 errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Base58Error {
    #[error("Invalid base58 character '{character}' at index {index}")]
    InvalidCharacter { character: char, index: usize },
    #[error("Base58Check payload too short: {0} bytes")]
    TooShort(usize),
    #[error("Invalid base58check checksum")]
    InvalidChecksum,
}

/// Encode bytes as base58.
pub fn encode(bytes: &[u8]) -> String {
    let zeros = bytes.iter().take_while(|&&b| b == 0).count();

    // Long division of the big-endian number by 58; quotients keep no
    // leading zero bytes so the loop ends once the number reaches zero.
    let mut number = bytes[zeros..].to_vec();
    let mut digits = Vec::with_capacity(bytes.len() * 138 / 100 + 1);
    while !number.is_empty() {
        let mut remainder = 0u32;
        let mut quotient = Vec::with_capacity(number.len());
        for &byte in &number {
            let acc = (remainder << 8) | byte as u32;
            let q = acc / 58;
            remainder = acc % 58;
            if !quotient.is_empty() || q != 0 {
                quotient.push(q as u8);
            }
        }
        digits.push(ALPHABET[remainder as usize]);
        number = quotient;
    }

    let mut encoded = String::with_capacity(zeros + digits.len());
    encoded.extend(std::iter::repeat('1').take(zeros));
    encoded.extend(digits.iter().rev().map(|&d| d as char));
    encoded
}

/// Decode a base58 string back into bytes.
pub fn decode(input: &str) -> Result<Vec<u8>, Base58Error> {
    let zeros = input.chars().take_while(|&c| c == '1').count();

    // Minimal big-endian magnitude
    let mut number: Vec<u8> = Vec::new();
    for (index, character) in input.chars().enumerate() {
        let value = ALPHABET
            .iter()
            .position(|&symbol| symbol as char == character)
            .ok_or(Base58Error::InvalidCharacter { character, index })?;

        let mut carry = value as u32;
        for byte in number.iter_mut().rev() {
            carry += *byte as u32 * 58;
            *byte = (carry & 0xff) as u8;
            carry >>= 8;
        }
        while carry > 0 {
            number.insert(0, (carry & 0xff) as u8);
            carry >>= 8;
        }
    }

    let mut bytes = vec![0u8; zeros];
    bytes.extend(number);
    Ok(bytes)
}

/// Base58Check: `base58(version || payload || first4(sha256d(version || payload)))`
pub fn encode_check(version: u8, payload: &[u8]) -> String {
    let mut data = Vec::with_capacity(1 + payload.len() + CHECKSUM_LENGTH);
    data.push(version);
    data.extend_from_slice(payload);
    let check = checksum(&data);
    data.extend_from_slice(&check);
    encode(&data)
}

/// Decode a Base58Check string into its version byte and payload.
pub fn decode_check(input: &str) -> Result<(u8, Vec<u8>), Base58Error> {
    let data = decode(input)?;
    if data.len() < 1 + CHECKSUM_LENGTH {
        return Err(Base58Error::TooShort(data.len()));
    }

    let (body, check) = data.split_at(data.len() - CHECKSUM_LENGTH);
    if checksum(body).as_slice() != check {
        return Err(Base58Error::InvalidChecksum);
    }

    Ok((body[0], body[1..].to_vec()))
}
