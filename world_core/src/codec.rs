//! Standard base64 (RFC 4648 alphabet, `=` padding).

use thiserror::Error;

const ALPHABET: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";
const PAD: u8 = b'=';

#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum DecodeError {
    #[error("encoded length {0} is not a multiple of 4")]
    InvalidLength(usize),
    #[error("invalid byte [{byte:#04x}] at offset {offset}")]
    InvalidByte { offset: usize, byte: u8 },
    #[error("misplaced padding at offset {0}")]
    InvalidPadding(usize),
}

/// Encodes `input` 3 bytes at a time into 4 characters each, padding the last
/// group with `=` or `==`. Empty input encodes to an empty string.
pub fn encode<T: AsRef<[u8]>>(input: T) -> String {
    let input = input.as_ref();
    let mut out = Vec::with_capacity(encoded_len(input.len()));
    for group in input.chunks(3) {
        let b0 = group[0];
        let b1 = group.get(1).copied().unwrap_or_default();
        let b2 = group.get(2).copied().unwrap_or_default();
        let bits = (u32::from(b0) << 16) | (u32::from(b1) << 8) | u32::from(b2);

        out.push(ALPHABET[(bits >> 18) as usize & 0x3f]);
        out.push(ALPHABET[(bits >> 12) as usize & 0x3f]);
        out.push(if group.len() > 1 {
            ALPHABET[(bits >> 6) as usize & 0x3f]
        } else {
            PAD
        });
        out.push(if group.len() > 2 {
            ALPHABET[bits as usize & 0x3f]
        } else {
            PAD
        });
    }
    // Only alphabet and padding bytes were pushed
    out.into_iter().map(char::from).collect()
}

/// Length of the encoding of `len` input bytes: `ceil(len / 3) * 4`
pub fn encoded_len(len: usize) -> usize {
    len.div_ceil(3) * 4
}

/// Inverse of [`encode`]. Padding is required and only allowed at the end.
pub fn decode<T: AsRef<[u8]>>(input: T) -> Result<Vec<u8>, DecodeError> {
    let input = input.as_ref();
    if input.len() % 4 != 0 {
        return Err(DecodeError::InvalidLength(input.len()));
    }
    let mut out = Vec::with_capacity(input.len() / 4 * 3);
    let last_group = input.len() / 4;
    for (group_index, group) in input.chunks(4).enumerate() {
        let offset = group_index * 4;
        let is_last = group_index + 1 == last_group;
        let padding = group.iter().rev().take_while(|b| **b == PAD).count();
        if padding > 2 || (padding > 0 && !is_last) {
            return Err(DecodeError::InvalidPadding(offset + 4 - padding));
        }
        let mut bits: u32 = 0;
        for (i, byte) in group[..4 - padding].iter().enumerate() {
            let sextet = sextet(*byte).ok_or(DecodeError::InvalidByte {
                offset: offset + i,
                byte: *byte,
            })?;
            bits |= u32::from(sextet) << (18 - 6 * i);
        }
        let bytes = bits.to_be_bytes();
        out.extend_from_slice(&bytes[1..4 - padding]);
    }
    Ok(out)
}

fn sextet(byte: u8) -> Option<u8> {
    match byte {
        b'A'..=b'Z' => Some(byte - b'A'),
        b'a'..=b'z' => Some(byte - b'a' + 26),
        b'0'..=b'9' => Some(byte - b'0' + 52),
        b'+' => Some(62),
        b'/' => Some(63),
        _ => None,
    }
}
