#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Procedural macros shared by the Countersign crates.
//!
//! Every crate in the workspace reports failures through a single error enum whose
//! variants carry an optional human-readable context. The [`macro@csign_error`] attribute
//! wires such an enum into `thiserror` and generates the `.context(..)` plumbing so that
//! call sites can stay on the `?` operator.

mod error;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// Turns an enum into a Countersign error type.
///
/// # Generated Items
///
/// * `#[derive(Debug, thiserror::Error)]` unless already present.
/// * `<ErrorName>Ext<T>` trait with `.context(..)` for `Result<T, ErrorName>` and for
///   `Result<T, Source>` of every variant that wraps an upstream error.
/// * `From<Source>` for every variant with a `source` field (or a field marked
///   `#[source]`/`#[from]`).
/// * `From<&'static str>` and `From<String>` when an `Internal { message, context }`
///   variant exists.
/// * A module-private `format_context` helper used inside `#[error(..)]` strings.
///
/// # Requirements
///
/// 1. Only enums are accepted.
/// 2. Every variant must use named fields.
/// 3. A variant wrapping an upstream error must also declare
///    `context: Option<Cow<'static, str>>`.
///
/// # Example
///
/// ```rust,ignore
/// use std::borrow::Cow;
///
/// #[csign_derive::csign_error]
/// pub enum CryptoError {
///     #[error("Key material error{}: {message}", format_context(.context))]
///     KeyMaterial { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
///
///     #[error("Internal crypto error{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
///
/// fn decode(raw: &str) -> Result<Vec<u8>, CryptoError> {
///     base64::decode(raw).map_err(|_| "invalid base64".into())
/// }
/// ```
#[proc_macro_attribute]
pub fn csign_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    error::expand(input).into()
}
