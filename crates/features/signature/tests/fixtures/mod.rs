#![allow(dead_code)]

use csign_audit::MemoryAuditLog;
use csign_crypto::prelude::*;
use csign_domain::config::SignatureConfig;
use csign_domain::{Activation, ActivationStatus, ApplicationVersion, SignatureType};
use csign_signature::prelude::*;
use p256::SecretKey;
use std::sync::Arc;

pub const ACTIVATION_ID: &str = "a1";
pub const USER_ID: &str = "u1";
pub const APP_ID: &str = "mobile-banking";
pub const APP_KEY: &str = "app-key-1";
pub const APP_SECRET: &str = "app-secret-1";
pub const DATA: &[u8] = b"POST&/pa/signature/validate&bm9uY2U=";

pub type Service = SignatureService<
    Arc<MemoryActivationRepository>,
    Arc<MemoryApplicationVersionRepository>,
    Arc<MemoryAuditLog>,
>;

/// Device side of an activation: its private key and the server public key.
pub struct Device {
    secret: SecretKey,
    server: SecretKey,
}

impl Device {
    pub fn new() -> Self {
        Self {
            secret: SecretKey::from_slice(&[9u8; 32]).unwrap(),
            server: SecretKey::from_slice(&[7u8; 32]).unwrap(),
        }
    }

    pub fn master(&self) -> MasterSecret {
        agree(&self.secret, &self.server.public_key())
    }

    /// Signs `data || '&' || secret` at `counter`.
    pub fn sign(&self, ty: SignatureType, data: &[u8], secret: &str, counter: u64) -> String {
        let mut payload = data.to_vec();
        payload.push(b'&');
        payload.extend_from_slice(secret.as_bytes());

        let keys = derive_signature_keys(ty, &self.master());
        compute_signature(&payload, &keys, counter).unwrap()
    }

    pub fn activation(&self, counter: u64, failed: u64, max: u64) -> Activation {
        Activation {
            activation_id: ACTIVATION_ID.to_owned(),
            user_id: USER_ID.to_owned(),
            application_id: APP_ID.to_owned(),
            server_private_key: encode_private_key(&self.server),
            device_public_key: encode_public_key(&self.secret.public_key()),
            status: ActivationStatus::Active,
            counter,
            failed_attempts: failed,
            max_failed_attempts: max,
            timestamp_last_used: None,
            revision: 0,
        }
    }
}

pub fn version(application_id: &str, supported: bool) -> ApplicationVersion {
    ApplicationVersion {
        application_id: application_id.to_owned(),
        name: "4.2.0".to_owned(),
        application_key: APP_KEY.to_owned(),
        application_secret: APP_SECRET.to_owned(),
        supported,
    }
}

pub struct World {
    pub activations: Arc<MemoryActivationRepository>,
    pub versions: Arc<MemoryApplicationVersionRepository>,
    pub audit: Arc<MemoryAuditLog>,
    pub service: Service,
    pub device: Device,
}

impl World {
    pub fn new(lookahead: u32) -> Self {
        let activations = Arc::new(MemoryActivationRepository::new());
        let versions = Arc::new(MemoryApplicationVersionRepository::new());
        let audit = Arc::new(MemoryAuditLog::new());
        versions.insert(version(APP_ID, true));

        let service = SignatureService::builder()
            .activations(Arc::clone(&activations))
            .application_versions(Arc::clone(&versions))
            .audit(Arc::clone(&audit))
            .config(SignatureConfig { lookahead, save_attempts: 3 })
            .build()
            .unwrap();

        Self { activations, versions, audit, service, device: Device::new() }
    }

    /// Stores an `ACTIVE` activation.
    pub fn with_activation(self, counter: u64, failed: u64, max: u64) -> Self {
        self.activations.insert(self.device.activation(counter, failed, max));
        self
    }

    pub fn with_status(self, status: ActivationStatus) -> Self {
        let mut activation = self.stored();
        activation.status = status;
        self.activations.insert(activation);
        self
    }

    pub fn stored(&self) -> Activation {
        self.activations.get(ACTIVATION_ID).unwrap()
    }

    pub fn sign(&self, ty: SignatureType, counter: u64) -> String {
        self.device.sign(ty, DATA, APP_SECRET, counter)
    }

    pub async fn verify(&self, ty: &str, signature: &str) -> VerificationResult {
        self.service.verify_signature(ACTIVATION_ID, ty, signature, DATA, APP_KEY).await.unwrap()
    }
}
