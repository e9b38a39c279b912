//! Function selector derivation.
//!
//! A selector is the first four bytes of the Keccak-256 hash of the
//! canonical signature `name(type1,type2,...)`, written without spaces and
//! with each type tag spelled exactly as declared. Tags are hashed without
//! being checked; an unsupported tag is only rejected when an argument of
//! that type has to be encoded.

use crate::types::encoding::{Decode, DecodeError, Encode, EncodeSink, read_array};
use crate::types::hash::Hash;
use crate::types::hex;
use std::fmt;

/// Selector length in bytes.
pub const SELECTOR_LEN: usize = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Selector(pub [u8; SELECTOR_LEN]);

impl Selector {
    /// Derives the selector for `name` with the type tags `params`.
    pub fn resolve(name: &str, params: &[&str]) -> Selector {
        let mut hasher = Hash::keccak256();
        hasher.update(name);
        hasher.update("(");
        for (i, tag) in params.iter().enumerate() {
            if i > 0 {
                hasher.update(",");
            }
            hasher.update(tag);
        }
        hasher.update(")");

        let hash = hasher.finalize();
        let mut out = [0u8; SELECTOR_LEN];
        out.copy_from_slice(&hash.0[..SELECTOR_LEN]);
        Selector(out)
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(&self.0))
    }
}

impl Encode for Selector {
    fn encode<S: EncodeSink>(&self, out: &mut S) {
        out.write(&self.0);
    }
}

impl Decode for Selector {
    fn decode(input: &mut &[u8]) -> Result<Self, DecodeError> {
        read_array::<SELECTOR_LEN>(input).map(Selector)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sha3::{Digest, Keccak256};

    fn keccak_prefix(signature: &str) -> [u8; 4] {
        let digest = Keccak256::digest(signature.as_bytes());
        [digest[0], digest[1], digest[2], digest[3]]
    }

    #[test]
    fn transfer_selector_matches_independent_hash() {
        let selector = Selector::resolve("transfer", &["address", "uint256"]);
        assert_eq!(selector.0, keccak_prefix("transfer(address,uint256)"));
    }

    #[test]
    fn tags_are_joined_with_commas() {
        assert_eq!(
            Selector::resolve("store", &["bytes32", "uint", "address"]).0,
            keccak_prefix("store(bytes32,uint,address)")
        );
    }

    #[test]
    fn empty_parameter_list() {
        assert_eq!(Selector::resolve("ping", &[]).0, keccak_prefix("ping()"));
    }

    #[test]
    fn uint_alias_hashes_as_written() {
        assert_ne!(
            Selector::resolve("f", &["uint"]),
            Selector::resolve("f", &["uint256"])
        );
    }

    #[test]
    fn unsupported_tags_still_hash() {
        assert_eq!(
            Selector::resolve("setFlag", &["bool"]).0,
            keccak_prefix("setFlag(bool)")
        );
    }

    #[test]
    fn display_is_prefixed_hex() {
        assert_eq!(Selector([0xa9, 0x05, 0x9c, 0xbb]).to_string(), "0xa9059cbb");
    }
}
