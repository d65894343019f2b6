use crate::error::{SignatureError, SignatureErrorExt};
use crate::lockout::{self, Attempt};
use crate::repository::{ActivationRepository, ApplicationVersionRepository, RepositoryError};
use crate::window::ReplayWindow;
use chrono::{DateTime, Utc};
use csign_audit::{AuditSink, SignatureAuditRecord};
use csign_crypto::prelude::{
    derive_master_secret, derive_signature_keys, parse_signature_type, seal_vault_key,
    validate_signature_format,
};
use csign_domain::config::SignatureConfig;
use csign_domain::constants::{PAYLOAD_SEPARATOR, UNKNOWN_USER_ID};
use csign_domain::{Activation, ActivationStatus, ApplicationVersion, SignatureType};
use csign_kernel::sync::KeyedLocks;
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

/// Response to a signature verification request.
///
/// Unknown activations, activations that are not `ACTIVE`, and requests from an
/// application version that may not use the activation all produce the same
/// [`VerificationResult::concealed`] shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationResult {
    pub activation_id: String,
    pub status: ActivationStatus,
    pub remaining_attempts: u64,
    pub signature_valid: bool,
    pub user_id: String,
}

impl VerificationResult {
    #[must_use]
    pub fn concealed(activation_id: &str) -> Self {
        Self {
            activation_id: activation_id.to_owned(),
            status: ActivationStatus::Removed,
            remaining_attempts: 0,
            signature_valid: false,
            user_id: UNKNOWN_USER_ID.to_owned(),
        }
    }

    fn after(activation: &Activation, attempt: Attempt) -> Self {
        if !attempt.discloses_activation() {
            return Self::concealed(&activation.activation_id);
        }
        Self {
            activation_id: activation.activation_id.clone(),
            status: activation.status,
            remaining_attempts: activation.remaining_attempts(),
            signature_valid: attempt.is_valid(),
            user_id: activation.user_id.clone(),
        }
    }
}

/// Response to a vault unlock request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VaultUnlockResult {
    #[serde(flatten)]
    pub verification: VerificationResult,
    /// Base64 vault encryption key sealed under the transport key; present only when the
    /// signature was valid.
    pub encrypted_vault_key: Option<String>,
}

/// Verifies multi-factor signatures against stored activations.
///
/// Calls for one activation id are serialized in-process; the repository's revision check
/// covers writers in other processes, and a lost race restarts the whole
/// read-verify-write cycle.
#[derive(Debug)]
pub struct SignatureService<A, V, S> {
    activations: A,
    versions: V,
    audit: S,
    window: ReplayWindow,
    save_attempts: u32,
    locks: KeyedLocks,
}

/// Builder for [`SignatureService`]; `build` is available once all collaborators are set.
#[derive(Debug)]
pub struct SignatureServiceBuilder<A, V, S> {
    activations: A,
    versions: V,
    audit: S,
    config: SignatureConfig,
}

#[derive(Clone, Copy)]
struct Request<'a> {
    activation_id: &'a str,
    signature_type: SignatureType,
    signature: &'a str,
    data: &'a [u8],
    application_key: &'a str,
    unlock: bool,
}

struct Evaluation {
    attempt: Attempt,
    payload: Vec<u8>,
    sealed_vault_key: Option<String>,
}

impl SignatureService<(), (), ()> {
    #[must_use]
    pub fn builder() -> SignatureServiceBuilder<(), (), ()> {
        SignatureServiceBuilder {
            activations: (),
            versions: (),
            audit: (),
            config: SignatureConfig::default(),
        }
    }
}

impl<A, V, S> SignatureServiceBuilder<A, V, S> {
    pub fn activations<R: ActivationRepository>(self, repo: R) -> SignatureServiceBuilder<R, V, S> {
        SignatureServiceBuilder {
            activations: repo,
            versions: self.versions,
            audit: self.audit,
            config: self.config,
        }
    }

    pub fn application_versions<R: ApplicationVersionRepository>(
        self,
        repo: R,
    ) -> SignatureServiceBuilder<A, R, S> {
        SignatureServiceBuilder {
            activations: self.activations,
            versions: repo,
            audit: self.audit,
            config: self.config,
        }
    }

    pub fn audit<T: AuditSink>(self, sink: T) -> SignatureServiceBuilder<A, V, T> {
        SignatureServiceBuilder {
            activations: self.activations,
            versions: self.versions,
            audit: sink,
            config: self.config,
        }
    }

    #[must_use]
    pub fn config(mut self, config: SignatureConfig) -> Self {
        self.config = config;
        self
    }
}

impl<A, V, S> SignatureServiceBuilder<A, V, S>
where
    A: ActivationRepository,
    V: ApplicationVersionRepository,
    S: AuditSink,
{
    /// # Errors
    /// Returns [`SignatureError::InvalidConfiguration`] for a lookahead outside
    /// `1..=MAX_LOOKAHEAD` or zero save attempts.
    pub fn build(self) -> Result<SignatureService<A, V, S>, SignatureError> {
        let window = ReplayWindow::new(self.config.lookahead).context("signature.lookahead")?;
        if self.config.save_attempts == 0 {
            return Err(SignatureError::InvalidConfiguration {
                message: "save_attempts must be at least 1".into(),
                context: Some("signature.save_attempts".into()),
            });
        }

        Ok(SignatureService {
            activations: self.activations,
            versions: self.versions,
            audit: self.audit,
            window,
            save_attempts: self.config.save_attempts,
            locks: KeyedLocks::default(),
        })
    }
}

impl<A, V, S> SignatureService<A, V, S>
where
    A: ActivationRepository,
    V: ApplicationVersionRepository,
    S: AuditSink,
{
    /// Verifies `signature` over `data` for an activation and records the attempt.
    ///
    /// The signed payload is `data || '&' || application_secret`. Every call that reaches a
    /// known activation advances its counter, is saved, and leaves one audit record.
    ///
    /// # Errors
    /// * [`SignatureError::Crypto`] for an unknown signature type, a signature whose shape
    ///   does not match the type, or undecodable stored keys. Nothing is saved or audited.
    /// * [`SignatureError::Repository`] if loading or saving fails.
    /// * [`SignatureError::Conflict`] if every save attempt lost a concurrent race.
    /// * [`SignatureError::Audit`] if the record could not be written. The activation has
    ///   already been saved at that point.
    #[instrument(skip_all, fields(activation_id = %activation_id, signature_type = %signature_type))]
    pub async fn verify_signature(
        &self,
        activation_id: &str,
        signature_type: &str,
        signature: &str,
        data: &[u8],
        application_key: &str,
    ) -> Result<VerificationResult, SignatureError> {
        let request =
            Self::request(activation_id, signature_type, signature, data, application_key, false)?;
        let (result, _) = self.process(request).await?;
        Ok(result)
    }

    /// Runs [`Self::verify_signature`] and, if the signature is valid, also returns the
    /// activation's vault encryption key sealed under its transport key.
    ///
    /// # Errors
    /// See [`Self::verify_signature`]; sealing failures are reported before anything is saved.
    #[instrument(skip_all, fields(activation_id = %activation_id, signature_type = %signature_type))]
    pub async fn vault_unlock(
        &self,
        activation_id: &str,
        signature_type: &str,
        signature: &str,
        data: &[u8],
        application_key: &str,
    ) -> Result<VaultUnlockResult, SignatureError> {
        let request =
            Self::request(activation_id, signature_type, signature, data, application_key, true)?;
        let (verification, encrypted_vault_key) = self.process(request).await?;
        if encrypted_vault_key.is_some() {
            info!("Vault key released");
        }
        Ok(VaultUnlockResult { verification, encrypted_vault_key })
    }

    fn request<'a>(
        activation_id: &'a str,
        signature_type: &str,
        signature: &'a str,
        data: &'a [u8],
        application_key: &'a str,
        unlock: bool,
    ) -> Result<Request<'a>, SignatureError> {
        let signature_type = parse_signature_type(signature_type)?;
        validate_signature_format(signature, signature_type.factor_count())?;
        Ok(Request { activation_id, signature_type, signature, data, application_key, unlock })
    }

    async fn process(
        &self,
        request: Request<'_>,
    ) -> Result<(VerificationResult, Option<String>), SignatureError> {
        let now = Utc::now();
        let _guard = self.locks.lock(request.activation_id).await;

        for cycle in 1..=self.save_attempts {
            let Some(mut activation) = self.activations.find_by_id(request.activation_id).await?
            else {
                debug!("Unknown activation");
                return Ok((VerificationResult::concealed(request.activation_id), None));
            };
            let version = self.versions.find_by_application_key(request.application_key).await?;

            let evaluation = self.evaluate(&activation, version.as_ref(), request)?;
            lockout::apply(&mut activation, evaluation.attempt, now);

            match self.activations.save(&activation).await {
                Ok(()) => {},
                Err(RepositoryError::RevisionConflict { message, .. }) => {
                    warn!(cycle, %message, "Activation changed concurrently, retrying");
                    continue;
                },
                Err(e) => return Err(e.into()),
            }

            let attempt = evaluation.attempt;
            self.audit
                .record(audit_record(&activation, &request, evaluation.payload, attempt, now))
                .await
                .context("activation already saved")?;

            if attempt.is_valid() {
                info!(reason = %attempt.reason(), counter = activation.counter, "Signature verified");
            } else {
                warn!(
                    reason = %attempt.reason(),
                    status = %activation.status,
                    failed_attempts = activation.failed_attempts,
                    "Signature rejected"
                );
            }

            return Ok((VerificationResult::after(&activation, attempt), evaluation.sealed_vault_key));
        }

        Err(SignatureError::Conflict {
            message: format!(
                "activation {} changed concurrently in {} consecutive cycles",
                request.activation_id, self.save_attempts
            )
            .into(),
            context: None,
        })
    }

    fn evaluate(
        &self,
        activation: &Activation,
        version: Option<&ApplicationVersion>,
        request: Request<'_>,
    ) -> Result<Evaluation, SignatureError> {
        let Some(version) = version.filter(|v| v.admits(&activation.application_id)) else {
            return Ok(Evaluation {
                attempt: Attempt::InvalidApplication,
                payload: signed_payload(request.data, request.application_key),
                sealed_vault_key: None,
            });
        };

        let payload = signed_payload(request.data, &version.application_secret);
        if !activation.status.is_usable() {
            return Ok(Evaluation { attempt: Attempt::InvalidState, payload, sealed_vault_key: None });
        }

        let master =
            derive_master_secret(&activation.server_private_key, &activation.device_public_key)
                .context("stored activation key material")?;
        let keys = derive_signature_keys(request.signature_type, &master);
        let outcome = self.window.verify(&payload, request.signature, &keys, activation.counter)?;

        let attempt = Attempt::from(outcome);
        let sealed_vault_key =
            if request.unlock && attempt.is_valid() { Some(seal_vault_key(&master)?) } else { None };

        Ok(Evaluation { attempt, payload, sealed_vault_key })
    }
}

fn signed_payload(data: &[u8], suffix: &str) -> Vec<u8> {
    let mut payload = Vec::with_capacity(data.len() + 1 + suffix.len());
    payload.extend_from_slice(data);
    payload.push(PAYLOAD_SEPARATOR);
    payload.extend_from_slice(suffix.as_bytes());
    payload
}

fn audit_record(
    activation: &Activation,
    request: &Request<'_>,
    payload: Vec<u8>,
    attempt: Attempt,
    now: DateTime<Utc>,
) -> SignatureAuditRecord {
    SignatureAuditRecord {
        activation_id: activation.activation_id.clone(),
        user_id: activation.user_id.clone(),
        application_id: activation.application_id.clone(),
        signature_type: request.signature_type,
        payload,
        valid: attempt.is_valid(),
        reason: attempt.reason(),
        counter: activation.counter,
        status: activation.status,
        timestamp: now,
    }
}
