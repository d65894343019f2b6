use chrono::{DateTime, Utc};
use csign_domain::{ActivationStatus, ReasonCode, SignatureType};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// One audited signature verification attempt.
///
/// `counter` and `status` describe the activation after the attempt was applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignatureAuditRecord {
    pub activation_id: String,
    pub user_id: String,
    pub application_id: String,
    pub signature_type: SignatureType,
    /// Exact bytes the signature was checked against.
    pub payload: Vec<u8>,
    pub valid: bool,
    pub reason: ReasonCode,
    pub counter: u64,
    pub status: ActivationStatus,
    pub timestamp: DateTime<Utc>,
}

impl SignatureAuditRecord {
    /// The payload as text, with invalid UTF-8 replaced.
    #[must_use]
    pub fn payload_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.payload)
    }
}

/// Filter for listing the audit trail of one user.
///
/// Time bounds are inclusive; an absent bound leaves that side open.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuditQuery {
    pub user_id: String,
    pub application_id: Option<String>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

impl AuditQuery {
    #[must_use]
    pub fn for_user(user_id: impl Into<String>) -> Self {
        Self { user_id: user_id.into(), ..Self::default() }
    }

    #[must_use]
    pub fn application(mut self, application_id: impl Into<String>) -> Self {
        self.application_id = Some(application_id.into());
        self
    }

    #[must_use]
    pub fn between(mut self, from: Option<DateTime<Utc>>, to: Option<DateTime<Utc>>) -> Self {
        self.from = from;
        self.to = to;
        self
    }

    #[must_use]
    pub fn matches(&self, record: &SignatureAuditRecord) -> bool {
        record.user_id == self.user_id
            && self.application_id.as_ref().is_none_or(|app| *app == record.application_id)
            && self.from.is_none_or(|from| record.timestamp >= from)
            && self.to.is_none_or(|to| record.timestamp <= to)
    }
}
