use crate::repository::RepositoryError;
use csign_audit::AuditError;
use csign_crypto::CryptoError;
use std::borrow::Cow;

/// Signature slice error type.
///
/// Domain outcomes (mismatch, invalid state, invalid application, unknown activation) are
/// not errors; they are reported through
/// [`VerificationResult`](crate::service::VerificationResult).
#[csign_derive::csign_error]
pub enum SignatureError {
    /// Malformed key material, unknown signature type or unparseable signature.
    #[error("Crypto error{}: {source}", format_context(.context))]
    Crypto { source: CryptoError, context: Option<Cow<'static, str>> },

    #[error("Repository error{}: {source}", format_context(.context))]
    Repository { source: RepositoryError, context: Option<Cow<'static, str>> },

    /// The attempt was applied and saved, but its audit record could not be written.
    #[error("Audit error{}: {source}", format_context(.context))]
    Audit { source: AuditError, context: Option<Cow<'static, str>> },

    /// Every read-verify-write cycle lost a concurrent save race.
    #[error("Concurrent update conflict{}: {message}", format_context(.context))]
    Conflict { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Invalid configuration{}: {message}", format_context(.context))]
    InvalidConfiguration { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Internal signature error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
