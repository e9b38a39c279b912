//! Compiler for `.call` contract-call scripts.
//!
//! Translates lines of the form `[label =] <address> name(types) args...`
//! into a compact stream of `CALL` records (selector plus ABI-encoded
//! arguments) with a label table on the side.

pub mod compiler;
pub mod types;
pub mod utils;
