//! Derive macros for the callc crate.
//!
//! Provides `#[derive(Error)]`, which generates `Display` and
//! `std::error::Error` for compiler error types from `#[error("...")]`
//! attributes.

mod error;

use proc_macro::TokenStream;

/// Implements `Display` and `Error` from `#[error("...")]` messages.
#[proc_macro_derive(Error, attributes(error))]
pub fn derive_error(input: TokenStream) -> TokenStream {
    error::derive_error(input)
}
