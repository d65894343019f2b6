use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use strum_macros::{Display, EnumString, IntoStaticStr};

/// Lifecycle status of an activation.
///
/// Only [`ActivationStatus::Active`] activations can produce a valid signature.
/// [`ActivationStatus::Blocked`] and [`ActivationStatus::Removed`] are terminal with
/// respect to verification; nothing in the signature path moves an activation out of them.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, IntoStaticStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum ActivationStatus {
    /// Key exchange started but not committed yet.
    Pending,
    /// Usable for signature verification.
    Active,
    /// Locked out after too many failed attempts.
    Blocked,
    /// Logically deleted.
    Removed,
}

impl ActivationStatus {
    /// Returns `true` if signatures may be verified against the activation.
    #[must_use]
    pub const fn is_usable(self) -> bool {
        matches!(self, Self::Active)
    }
}

/// A device/server key-exchange context bound to one user and one application.
///
/// The record is owned by the persistence layer; the signature service works on an
/// exclusive copy per call and writes it back through the repository.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activation {
    pub activation_id: String,
    pub user_id: String,
    pub application_id: String,
    /// Base64 of the server's P-256 private scalar.
    pub server_private_key: String,
    /// Base64 of the device's SEC1-encoded P-256 public point.
    pub device_public_key: String,
    pub status: ActivationStatus,
    pub counter: u64,
    pub failed_attempts: u64,
    pub max_failed_attempts: u64,
    pub timestamp_last_used: Option<DateTime<Utc>>,
    /// Storage revision, bumped by the repository on every successful save.
    #[serde(default)]
    pub revision: u64,
}

impl Activation {
    /// Number of failed attempts left before the activation is blocked, never negative.
    #[must_use]
    pub const fn remaining_attempts(&self) -> u64 {
        self.max_failed_attempts.saturating_sub(self.failed_attempts)
    }
}

impl fmt::Debug for Activation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Activation")
            .field("activation_id", &self.activation_id)
            .field("user_id", &self.user_id)
            .field("application_id", &self.application_id)
            .field("server_private_key", &"<redacted>")
            .field("device_public_key", &self.device_public_key)
            .field("status", &self.status)
            .field("counter", &self.counter)
            .field("failed_attempts", &self.failed_attempts)
            .field("max_failed_attempts", &self.max_failed_attempts)
            .field("timestamp_last_used", &self.timestamp_last_used)
            .field("revision", &self.revision)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn activation(failed: u64, max: u64) -> Activation {
        Activation {
            activation_id: "a1".to_owned(),
            user_id: "u1".to_owned(),
            application_id: "app".to_owned(),
            server_private_key: "c2VjcmV0".to_owned(),
            device_public_key: "cHVibGlj".to_owned(),
            status: ActivationStatus::Active,
            counter: 0,
            failed_attempts: failed,
            max_failed_attempts: max,
            timestamp_last_used: None,
            revision: 0,
        }
    }

    #[test]
    fn test_remaining_attempts_saturates() {
        assert_eq!(activation(0, 5).remaining_attempts(), 5);
        assert_eq!(activation(4, 5).remaining_attempts(), 1);
        assert_eq!(activation(7, 5).remaining_attempts(), 0);
    }

    #[test]
    fn test_debug_redacts_private_key() {
        let rendered = format!("{:?}", activation(0, 5));
        assert!(!rendered.contains("c2VjcmV0"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn test_status_parsing() {
        assert_eq!(ActivationStatus::from_str("blocked").unwrap(), ActivationStatus::Blocked);
        assert_eq!(ActivationStatus::Removed.to_string(), "REMOVED");
        assert!(ActivationStatus::Active.is_usable());
        assert!(!ActivationStatus::Pending.is_usable());
    }
}
