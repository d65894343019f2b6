use std::borrow::Cow;

/// Audit slice error type.
#[csign_derive::csign_error]
pub enum AuditError {
    /// The audit store refused or could not persist a record.
    #[error("Audit store unavailable{}: {message}", format_context(.context))]
    Unavailable { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Audit error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
