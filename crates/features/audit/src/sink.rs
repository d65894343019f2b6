use crate::error::AuditError;
use crate::record::SignatureAuditRecord;
use std::future::Future;
use std::sync::Arc;

/// Append-only destination of signature audit records.
///
/// A failed append is reported to the caller; implementations never drop records silently.
pub trait AuditSink: Send + Sync {
    fn record(
        &self,
        record: SignatureAuditRecord,
    ) -> impl Future<Output = Result<(), AuditError>> + Send;
}

impl<S: AuditSink> AuditSink for Arc<S> {
    fn record(
        &self,
        record: SignatureAuditRecord,
    ) -> impl Future<Output = Result<(), AuditError>> + Send {
        S::record(self, record)
    }
}
