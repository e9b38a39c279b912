//! 20-byte contract addresses.

use crate::types::encoding::{Decode, DecodeError, Encode, EncodeSink, read_array};
use crate::types::hex;
use std::fmt;

/// Address length in bytes.
pub const ADDRESS_LEN: usize = 20;

/// Fixed-size 20-byte address naming the target of a call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Address(pub [u8; ADDRESS_LEN]);

impl Address {
    /// Parses the strict form: `0x` followed by exactly 40 hex digits.
    pub fn parse(token: &str) -> Option<Address> {
        let digits = token.strip_prefix("0x")?;
        hex::decode_exact::<ADDRESS_LEN>(digits).map(Address)
    }

    /// Parses 40 hex digits with an optional `0x` prefix.
    pub fn parse_lenient(token: &str) -> Option<Address> {
        hex::decode_exact::<ADDRESS_LEN>(hex::strip_prefix(token)).map(Address)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(&self.0))
    }
}

impl Encode for Address {
    fn encode<S: EncodeSink>(&self, out: &mut S) {
        out.write(&self.0);
    }
}

impl Decode for Address {
    fn decode(input: &mut &[u8]) -> Result<Self, DecodeError> {
        read_array::<ADDRESS_LEN>(input).map(Address)
    }
}
