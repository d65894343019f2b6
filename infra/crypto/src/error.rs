//! # Crypto Errors
//!
//! [`CryptoError`] covers malformed key material, unparseable signatures and failures of the
//! symmetric primitives.

use std::borrow::Cow;

#[csign_derive::csign_error]
pub enum CryptoError {
    /// Stored key material failed to decode, or does not describe a valid P-256 key.
    #[error("Invalid key material{}: {message}", format_context(.context))]
    KeyMaterial { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Key material was not valid base64.
    #[error("Key decoding error{}: {source}", format_context(.context))]
    Decoding { source: base64::DecodeError, context: Option<Cow<'static, str>> },

    /// The signature type label is not one of the known factor combinations.
    #[error("Unknown signature type{}: {label}", format_context(.context))]
    UnknownSignatureType { label: String, context: Option<Cow<'static, str>> },

    /// The signature does not have the decimal group shape its type requires.
    #[error("Invalid signature format{}: {message}", format_context(.context))]
    InvalidSignatureFormat { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Sealing a key failed.
    #[error("Encryption error{}: {message}", format_context(.context))]
    Encryption { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// A sealed key is malformed, or was sealed under a different transport key.
    #[error("Decryption error{}: {message}", format_context(.context))]
    Decryption { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Internal crypto error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
