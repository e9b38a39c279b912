//! 32-byte Keccak-256 digests.

use sha3::{Digest, Keccak256};
use std::fmt;

/// Keccak-256 digest length in bytes.
pub const HASH_LEN: usize = 32;

/// Keccak-256 digest (the pre-standard SHA-3 padding used for selectors).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Hash)]
pub struct Hash(pub [u8; HASH_LEN]);

impl Hash {
    /// Creates an incremental Keccak-256 builder.
    ///
    /// Lets callers feed a value in pieces without first joining it into a
    /// single buffer.
    pub fn keccak256() -> HashBuilder {
        HashBuilder::new()
    }
}

impl fmt::Display for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

/// Incremental Keccak-256 hash builder.
pub struct HashBuilder {
    hasher: Keccak256,
}

impl HashBuilder {
    pub fn new() -> Self {
        Self {
            hasher: Keccak256::new(),
        }
    }

    /// Feeds data into the hash computation.
    pub fn update(&mut self, data: impl AsRef<[u8]>) {
        self.hasher.update(data.as_ref());
    }

    /// Consumes the builder and returns the final hash.
    pub fn finalize(self) -> Hash {
        Hash(self.hasher.finalize().into())
    }
}

impl Default for HashBuilder {
    fn default() -> Self {
        Self::new()
    }
}
