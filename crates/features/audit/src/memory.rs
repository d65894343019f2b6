use crate::error::AuditError;
use crate::record::{AuditQuery, SignatureAuditRecord};
use crate::sink::AuditSink;
use parking_lot::RwLock;
use tracing::trace;

/// Process-local audit trail.
#[derive(Debug, Default)]
pub struct MemoryAuditLog {
    records: RwLock<Vec<SignatureAuditRecord>>,
}

impl MemoryAuditLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records matching `query`, oldest first.
    #[must_use]
    pub fn query(&self, query: &AuditQuery) -> Vec<SignatureAuditRecord> {
        let mut found: Vec<_> =
            self.records.read().iter().filter(|r| query.matches(r)).cloned().collect();
        found.sort_by_key(|r| r.timestamp);
        found
    }

    /// Every record for `activation_id`, in append order.
    #[must_use]
    pub fn for_activation(&self, activation_id: &str) -> Vec<SignatureAuditRecord> {
        self.records.read().iter().filter(|r| r.activation_id == activation_id).cloned().collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

impl AuditSink for MemoryAuditLog {
    async fn record(&self, record: SignatureAuditRecord) -> Result<(), AuditError> {
        trace!(activation_id = %record.activation_id, reason = %record.reason, "Audit record appended");
        self.records.write().push(record);
        Ok(())
    }
}
