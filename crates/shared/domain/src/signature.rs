use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString, IntoStaticStr};

/// Authentication factors a signature has to prove, in signing order.
///
/// Labels are matched case-insensitively: `"POSSESSION_KNOWLEDGE"` and
/// `"possession_knowledge"` select the same type.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum SignatureType {
    Possession,
    Knowledge,
    Biometry,
    PossessionKnowledge,
    PossessionBiometry,
    PossessionKnowledgeBiometry,
}

impl SignatureType {
    /// Number of factor keys that jointly produce the signature.
    #[must_use]
    pub const fn factor_count(self) -> usize {
        match self {
            Self::Possession | Self::Knowledge | Self::Biometry => 1,
            Self::PossessionKnowledge | Self::PossessionBiometry => 2,
            Self::PossessionKnowledgeBiometry => 3,
        }
    }
}

/// Machine-readable reason attached to every audited verification attempt.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ReasonCode {
    SignatureOk,
    SignatureDoesNotMatch,
    ActivationInvalidState,
    ActivationInvalidApplication,
}

/// Result of probing the replay window for one request.
///
/// Never persisted on its own; consumed by the lockout state machine and the audit trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerificationOutcome {
    pub valid: bool,
    /// Lowest counter at which the signature validated.
    pub counter: Option<u64>,
    pub reason: ReasonCode,
}

impl VerificationOutcome {
    #[must_use]
    pub const fn accepted(counter: u64) -> Self {
        Self { valid: true, counter: Some(counter), reason: ReasonCode::SignatureOk }
    }

    #[must_use]
    pub const fn rejected(reason: ReasonCode) -> Self {
        Self { valid: false, counter: None, reason }
    }
}
