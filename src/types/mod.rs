//! Fixed-width value types used by the compiler.
//!
//! - `Address`: 20-byte call target
//! - `Word`: 32-byte ABI word and the literal parsers that produce it
//! - `Hash`: Keccak-256 digest used to derive selectors
//! - `encoding`: `Encode`/`Decode` traits for the record stream

pub mod address;
pub mod encoding;
pub mod hash;
pub mod hex;
pub mod word;
