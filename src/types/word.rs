//! 32-byte ABI words and the literal parsers that produce them.
//!
//! Every argument of a call is encoded as exactly one [`Word`]:
//! - `uint`/`uint256`: big-endian, right-justified (256-bit range)
//! - `address`: 20 bytes right-justified, 12 zero bytes in front
//! - `bytes32`: hex digits left-justified, zero-filled on the right
//! - `$`: [`Word::PLACEHOLDER`], whatever the declared type

use crate::types::address::Address;
use crate::types::encoding::{Decode, DecodeError, Encode, EncodeSink, read_array};
use crate::types::hex;
use callc_derive::Error;
use std::fmt;

/// Word length in bytes.
pub const WORD_LEN: usize = 32;

/// Maximum number of hex digits a word holds.
const WORD_DIGITS: usize = WORD_LEN * 2;

/// Why a numeric or hex literal could not be turned into a word.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LiteralError {
    #[error("no digits")]
    Empty,
    #[error("negative values are not allowed")]
    Negative,
    #[error("invalid digit {0:?}")]
    InvalidDigit(char),
    #[error("value does not fit in 256 bits")]
    Overflow,
    #[error("more than 32 bytes of data")]
    TooLong,
}

/// A single 32-byte ABI word.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Word(pub [u8; WORD_LEN]);

impl Word {
    #[cfg(test)]
    pub const ZERO: Word = Word([0u8; WORD_LEN]);

    /// Sentinel substituted by the interpreter with a prior call's result.
    pub const PLACEHOLDER: Word = Word([0xFF; WORD_LEN]);

    /// Right-justifies an address in a word.
    pub fn from_address(address: &Address) -> Word {
        let mut out = [0u8; WORD_LEN];
        out[WORD_LEN - address.0.len()..].copy_from_slice(&address.0);
        Word(out)
    }

    #[cfg(test)]
    pub fn from_u64(value: u64) -> Word {
        let mut out = [0u8; WORD_LEN];
        out[WORD_LEN - 8..].copy_from_slice(&value.to_be_bytes());
        Word(out)
    }

    /// Parses an unsigned 256-bit integer literal.
    ///
    /// Accepts decimal digits, or `0x`/`0X` followed by hex digits. Leading
    /// zeros are allowed in both forms.
    pub fn parse_uint(token: &str) -> Result<Word, LiteralError> {
        if token.starts_with('-') {
            return Err(LiteralError::Negative);
        }

        match token
            .strip_prefix("0x")
            .or_else(|| token.strip_prefix("0X"))
        {
            Some(digits) => Self::from_hex_right(digits),
            None => Self::from_decimal(token),
        }
    }

    /// Parses up to 64 hex digits (optional `0x`) into a left-justified word.
    pub fn parse_bytes32(token: &str) -> Result<Word, LiteralError> {
        let digits = hex::strip_prefix(token);
        if digits.chars().count() > WORD_DIGITS {
            return Err(LiteralError::TooLong);
        }

        let mut out = [0u8; WORD_LEN];
        for (i, c) in digits.chars().enumerate() {
            let n = u8::try_from(c)
                .ok()
                .and_then(hex::nibble)
                .ok_or(LiteralError::InvalidDigit(c))?;
            out[i / 2] |= if i % 2 == 0 { n << 4 } else { n };
        }
        Ok(Word(out))
    }

    fn from_decimal(digits: &str) -> Result<Word, LiteralError> {
        if digits.is_empty() {
            return Err(LiteralError::Empty);
        }

        let mut out = [0u8; WORD_LEN];
        for c in digits.chars() {
            let d = c.to_digit(10).ok_or(LiteralError::InvalidDigit(c))?;
            mul_add(&mut out, 10, d)?;
        }
        Ok(Word(out))
    }

    fn from_hex_right(digits: &str) -> Result<Word, LiteralError> {
        if digits.is_empty() {
            return Err(LiteralError::Empty);
        }

        let mut out = [0u8; WORD_LEN];
        for c in digits.chars() {
            let d = u8::try_from(c)
                .ok()
                .and_then(hex::nibble)
                .ok_or(LiteralError::InvalidDigit(c))?;
            mul_add(&mut out, 16, d as u32)?;
        }
        Ok(Word(out))
    }
}

/// `acc = acc * factor + addend` over a big-endian 256-bit value.
fn mul_add(acc: &mut [u8; WORD_LEN], factor: u32, addend: u32) -> Result<(), LiteralError> {
    let mut carry = addend;
    for byte in acc.iter_mut().rev() {
        let v = *byte as u32 * factor + carry;
        *byte = (v & 0xff) as u8;
        carry = v >> 8;
    }
    if carry != 0 {
        return Err(LiteralError::Overflow);
    }
    Ok(())
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(&self.0))
    }
}

impl Encode for Word {
    fn encode<S: EncodeSink>(&self, out: &mut S) {
        out.write(&self.0);
    }
}

impl Decode for Word {
    fn decode(input: &mut &[u8]) -> Result<Self, DecodeError> {
        read_array::<WORD_LEN>(input).map(Word)
    }
}
