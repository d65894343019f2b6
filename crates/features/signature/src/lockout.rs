//! Counter, failed-attempt and status transitions applied to an activation per attempt.

use chrono::{DateTime, Utc};
use csign_domain::{Activation, ActivationStatus, ReasonCode, VerificationOutcome};

/// What a verification attempt established about the activation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attempt {
    /// The application version is missing, unsupported, or belongs to another application.
    InvalidApplication,
    /// The activation is not `ACTIVE`.
    InvalidState,
    /// The signature validated at `counter`.
    Verified { counter: u64 },
    /// No counter of the window validated the signature.
    Mismatch,
}

impl Attempt {
    #[must_use]
    pub const fn reason(self) -> ReasonCode {
        match self {
            Self::InvalidApplication => ReasonCode::ActivationInvalidApplication,
            Self::InvalidState => ReasonCode::ActivationInvalidState,
            Self::Verified { .. } => ReasonCode::SignatureOk,
            Self::Mismatch => ReasonCode::SignatureDoesNotMatch,
        }
    }

    #[must_use]
    pub const fn is_valid(self) -> bool {
        matches!(self, Self::Verified { .. })
    }

    /// Whether the caller may learn the activation's real status and user.
    #[must_use]
    pub const fn discloses_activation(self) -> bool {
        matches!(self, Self::Verified { .. } | Self::Mismatch)
    }
}

impl From<VerificationOutcome> for Attempt {
    fn from(outcome: VerificationOutcome) -> Self {
        match (outcome.valid, outcome.counter, outcome.reason) {
            (true, Some(counter), _) => Self::Verified { counter },
            (_, _, ReasonCode::ActivationInvalidApplication) => Self::InvalidApplication,
            (_, _, ReasonCode::ActivationInvalidState) => Self::InvalidState,
            _ => Self::Mismatch,
        }
    }
}

/// Applies `attempt` to `activation`. The counter never decreases and `BLOCKED` is never left.
pub fn apply(activation: &mut Activation, attempt: Attempt, now: DateTime<Utc>) {
    match attempt {
        Attempt::InvalidApplication | Attempt::InvalidState => {
            activation.counter = activation.counter.saturating_add(1);
        },
        Attempt::Verified { counter } => {
            activation.counter = activation.counter.max(counter.saturating_add(1));
            activation.failed_attempts = 0;
        },
        Attempt::Mismatch => {
            activation.counter = activation.counter.saturating_add(1);
            activation.failed_attempts = activation.failed_attempts.saturating_add(1);
            if activation.failed_attempts >= activation.max_failed_attempts {
                activation.status = ActivationStatus::Blocked;
            }
        },
    }
    activation.timestamp_last_used = Some(now);
}
