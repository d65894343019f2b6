//! Facade crate for Countersign.
//! Re-exports the domain, kernel, crypto and feature slices and wires in-memory setups.
//! Keep this crate thin: it should compose other crates, not implement business logic.
//!
//! ## Usage
//! - Load a [`ServiceConfig`] with [`kernel::config::load_service_config`].
//! - Call [`init_logging`] once per process (feature `logger`).
//! - Build a service with [`in_memory`] or wire your own repositories through
//!   [`signature::SignatureService::builder`].

use csign_audit::MemoryAuditLog;
use csign_domain::config::ServiceConfig;
use csign_signature::{
    MemoryActivationRepository, MemoryApplicationVersionRepository, SignatureError,
    SignatureService,
};
use std::sync::Arc;
use tracing::info;

pub use csign_audit as audit;
pub use csign_crypto as crypto;
pub use csign_domain as domain;
pub use csign_kernel as kernel;
pub use csign_signature as signature;

#[cfg(feature = "logger")]
pub use csign_logger as logger;

/// A [`SignatureService`] backed by the in-memory adapters.
pub type MemorySignatureService = SignatureService<
    Arc<MemoryActivationRepository>,
    Arc<MemoryApplicationVersionRepository>,
    Arc<MemoryAuditLog>,
>;

/// A fully wired in-memory deployment; the stores stay reachable for seeding and inspection.
#[derive(Debug)]
pub struct InMemory {
    pub activations: Arc<MemoryActivationRepository>,
    pub versions: Arc<MemoryApplicationVersionRepository>,
    pub audit: Arc<MemoryAuditLog>,
    pub service: MemorySignatureService,
}

/// Builds a signature service over empty in-memory stores.
///
/// # Errors
/// Returns [`SignatureError::InvalidConfiguration`] if `config.signature` is out of bounds.
pub fn in_memory(config: &ServiceConfig) -> Result<InMemory, SignatureError> {
    let activations = Arc::new(MemoryActivationRepository::new());
    let versions = Arc::new(MemoryApplicationVersionRepository::new());
    let audit = Arc::new(MemoryAuditLog::new());

    let service = SignatureService::builder()
        .activations(Arc::clone(&activations))
        .application_versions(Arc::clone(&versions))
        .audit(Arc::clone(&audit))
        .config(config.signature)
        .build()?;

    info!(lookahead = config.signature.lookahead, "In-memory signature service ready");
    Ok(InMemory { activations, versions, audit, service })
}

/// Installs the global tracing subscriber described by `config.logging`.
///
/// # Errors
/// See [`logger::Logger::init`].
#[cfg(feature = "logger")]
pub fn init_logging(config: &ServiceConfig) -> Result<logger::Logger, logger::LoggerError> {
    logger::Logger::init(&config.logging)
}
