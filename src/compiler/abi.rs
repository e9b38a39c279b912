//! Argument encoding for the supported ABI subset.
//!
//! Each argument becomes one 32-byte [`Word`] chosen by its declared type.
//! The literal `$` is a placeholder for the result of an earlier call and
//! always encodes as [`Word::PLACEHOLDER`]; resolving it is left to whatever
//! executes the bytecode.
//!
//! Checks run in a fixed order: the argument count first, then per argument
//! the placeholder, then the type tag, then the literal itself. A `$` passed
//! for a type outside the supported set therefore still encodes.

use crate::compiler::errors::ErrorKind;
use crate::types::address::Address;
use crate::types::word::Word;

/// Argument token that stands for a prior call's result.
pub const PLACEHOLDER_TOKEN: &str = "$";

/// Parameter types an argument can be encoded as.
///
/// `uint` and `uint256` encode identically. The selector still hashes the tag
/// as written, so the spelling is kept in the signature, not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AbiType {
    Address,
    Uint256,
    Bytes32,
}

impl AbiType {
    pub fn parse(tag: &str) -> Result<AbiType, ErrorKind> {
        match tag {
            "address" => Ok(AbiType::Address),
            "uint256" | "uint" => Ok(AbiType::Uint256),
            "bytes32" => Ok(AbiType::Bytes32),
            other => Err(ErrorKind::UnsupportedType(other.to_string())),
        }
    }
}

/// Failure while encoding an argument list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgumentError {
    /// Index of the offending argument; `None` when the count is wrong.
    pub index: Option<usize>,
    pub kind: ErrorKind,
}

/// Encodes a single argument token as a word of the type named by `tag`.
pub fn encode_argument(tag: &str, token: &str) -> Result<Word, ErrorKind> {
    if token == PLACEHOLDER_TOKEN {
        return Ok(Word::PLACEHOLDER);
    }

    match AbiType::parse(tag)? {
        AbiType::Address => Address::parse_lenient(token)
            .map(|address| Word::from_address(&address))
            .ok_or_else(|| ErrorKind::InvalidAddress(token.to_string())),
        AbiType::Uint256 => {
            Word::parse_uint(token).map_err(|reason| ErrorKind::NumericLiteral {
                token: token.to_string(),
                reason,
            })
        }
        AbiType::Bytes32 => {
            Word::parse_bytes32(token).map_err(|reason| ErrorKind::InvalidBytes32 {
                token: token.to_string(),
                reason,
            })
        }
    }
}

/// Encodes `args` against the type tags `types`, one word per argument in
/// order.
///
/// The count is checked before any argument or tag is looked at.
pub fn encode_arguments(types: &[&str], args: &[&str]) -> Result<Vec<Word>, ArgumentError> {
    if types.len() != args.len() {
        return Err(ArgumentError {
            index: None,
            kind: ErrorKind::ArgumentCountMismatch {
                expected: types.len(),
                actual: args.len(),
            },
        });
    }

    types
        .iter()
        .zip(args)
        .enumerate()
        .map(|(i, (tag, token))| {
            encode_argument(tag, token).map_err(|kind| ArgumentError {
                index: Some(i),
                kind,
            })
        })
        .collect()
}
