//! `#[derive(Error)]` for compiler error types.
//!
//! ```ignore
//! use callc_derive::Error;
//!
//! #[derive(Debug, Error)]
//! pub enum ErrorKind {
//!     #[error("unsupported type {0:?}")]
//!     UnsupportedType(String),
//!
//!     #[error("argument count mismatch: expected {expected}, got {actual}")]
//!     ArgumentCountMismatch { expected: usize, actual: usize },
//!
//!     #[error("unexpected end of input")]
//!     Eof,
//! }
//! ```
//!
//! Tuple fields are referenced positionally (`{0}`, `{1:?}`), named fields by
//! name. Format specs after `:` are kept as written. Structs take a single
//! `#[error]` attribute on the type itself.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{ToTokens, format_ident, quote};
use syn::{Attribute, Data, DeriveInput, Fields, Lit, Meta, parse_macro_input};

pub fn derive_error(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match expand(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let body = match &input.data {
        Data::Enum(data) => {
            let arms = data
                .variants
                .iter()
                .map(|variant| {
                    let ident = &variant.ident;
                    let message = message_from_attrs(
                        &variant.attrs,
                        ident,
                        &format!("variant `{}`", ident),
                    )?;
                    Ok(enum_arm(ident, &variant.fields, &message))
                })
                .collect::<syn::Result<Vec<_>>>()?;

            quote! {
                match self {
                    #(#arms)*
                }
            }
        }
        Data::Struct(data) => {
            let message = message_from_attrs(&input.attrs, name, &format!("type `{}`", name))?;
            struct_body(&data.fields, &message)
        }
        Data::Union(_) => {
            return Err(syn::Error::new_spanned(
                input,
                "Error derive does not support unions",
            ));
        }
    };

    Ok(quote! {
        impl #impl_generics ::std::fmt::Display for #name #ty_generics #where_clause {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                #body
            }
        }

        impl #impl_generics ::std::error::Error for #name #ty_generics #where_clause {}
    })
}

fn enum_arm(ident: &syn::Ident, fields: &Fields, message: &str) -> TokenStream2 {
    let used = placeholder_args(message);
    match fields {
        Fields::Unit => quote! {
            Self::#ident => write!(f, #message),
        },
        Fields::Unnamed(fields) => {
            let patterns: Vec<_> = (0..fields.unnamed.len())
                .map(|i| {
                    if used.contains(&i.to_string()) {
                        let binding = format_ident!("f{}", i);
                        quote! { #binding }
                    } else {
                        quote! { _ }
                    }
                })
                .collect();
            let bindings = used_positions(&used, fields.unnamed.len());
            let format = rename_positional(message, fields.unnamed.len());
            quote! {
                Self::#ident(#(#patterns),*) => write!(f, #format, #(#bindings = #bindings),*),
            }
        }
        Fields::Named(fields) => {
            let names: Vec<_> = used_names(fields, &used);
            quote! {
                Self::#ident { #(#names,)* .. } => write!(f, #message, #(#names = #names),*),
            }
        }
    }
}

fn struct_body(fields: &Fields, message: &str) -> TokenStream2 {
    let used = placeholder_args(message);
    match fields {
        Fields::Unit => quote! { write!(f, #message) },
        Fields::Named(fields) => {
            let names: Vec<_> = used_names(fields, &used);
            quote! { write!(f, #message, #(#names = self.#names),*) }
        }
        Fields::Unnamed(fields) => {
            let bindings = used_positions(&used, fields.unnamed.len());
            let indices: Vec<_> = (0..fields.unnamed.len())
                .filter(|i| used.contains(&i.to_string()))
                .map(syn::Index::from)
                .collect();
            let format = rename_positional(message, fields.unnamed.len());
            quote! { write!(f, #format, #(#bindings = self.#indices),*) }
        }
    }
}

/// Named fields that the message refers to, in declaration order.
fn used_names<'a>(fields: &'a syn::FieldsNamed, used: &[String]) -> Vec<&'a syn::Ident> {
    fields
        .named
        .iter()
        .filter_map(|field| field.ident.as_ref())
        .filter(|ident| used.contains(&ident.to_string()))
        .collect()
}

/// `f0`, `f1`, ... for the tuple positions that the message refers to.
fn used_positions(used: &[String], field_count: usize) -> Vec<syn::Ident> {
    (0..field_count)
        .filter(|i| used.contains(&i.to_string()))
        .map(|i| format_ident!("f{}", i))
        .collect()
}

/// Reads the string literal out of the first `#[error("...")]` attribute.
fn message_from_attrs<T: ToTokens>(
    attrs: &[Attribute],
    target: &T,
    target_desc: &str,
) -> syn::Result<String> {
    let Some(attr) = attrs.iter().find(|attr| attr.path().is_ident("error")) else {
        return Err(syn::Error::new_spanned(
            target,
            format!(
                "missing #[error(\"...\")] attribute on {}; every error needs a display message",
                target_desc
            ),
        ));
    };

    let Meta::List(list) = &attr.meta else {
        return Err(syn::Error::new_spanned(
            &attr.meta,
            "invalid #[error] attribute; use #[error(\"message\")]",
        ));
    };

    match syn::parse2::<Lit>(list.tokens.clone()) {
        Ok(Lit::Str(lit)) => Ok(lit.value()),
        _ => Err(syn::Error::new_spanned(
            &attr.meta,
            "#[error] expects a string literal, e.g. #[error(\"invalid address: {0}\")]",
        )),
    }
}

/// Splits a format string into literal text and `{arg:spec}` placeholders.
///
/// Escaped braces (`{{`, `}}`) stay in the literal text.
fn for_each_placeholder(message: &str, mut visit: impl FnMut(Piece<'_>)) {
    let mut rest = message;

    while let Some(start) = rest.find(['{', '}']) {
        visit(Piece::Text(&rest[..start]));
        let tail = &rest[start..];

        if tail.starts_with("{{") || tail.starts_with("}}") {
            visit(Piece::Text(&tail[..2]));
            rest = &tail[2..];
            continue;
        }
        if tail.starts_with('}') {
            visit(Piece::Text("}"));
            rest = &tail[1..];
            continue;
        }

        let Some(end) = tail.find('}') else {
            visit(Piece::Text(tail));
            return;
        };
        let inner = &tail[1..end];
        let (arg, spec) = match inner.find(':') {
            Some(colon) => (&inner[..colon], &inner[colon..]),
            None => (inner, ""),
        };
        visit(Piece::Placeholder { arg, spec });
        rest = &tail[end + 1..];
    }

    visit(Piece::Text(rest));
}

enum Piece<'a> {
    Text(&'a str),
    Placeholder { arg: &'a str, spec: &'a str },
}

/// Argument names (`"0"`, `"line"`, ...) referenced by the message.
fn placeholder_args(message: &str) -> Vec<String> {
    let mut args = Vec::new();
    for_each_placeholder(message, |piece| {
        if let Piece::Placeholder { arg, .. } = piece
            && !args.iter().any(|a| a == arg)
        {
            args.push(arg.to_string());
        }
    });
    args
}

/// Rewrites `{0}` / `{0:spec}` placeholders to `{f0}` / `{f0:spec}`.
fn rename_positional(message: &str, field_count: usize) -> String {
    let mut out = String::with_capacity(message.len() + field_count * 2);
    for_each_placeholder(message, |piece| match piece {
        Piece::Text(text) => out.push_str(text),
        Piece::Placeholder { arg, spec } => match arg.parse::<usize>() {
            Ok(index) if index < field_count => {
                out.push_str(&format!("{{f{}{}}}", index, spec));
            }
            _ => out.push_str(&format!("{{{}{}}}", arg, spec)),
        },
    });
    out
}
