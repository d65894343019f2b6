//! # Signature slice
//!
//! Verifies PowerAuth-style multi-factor signatures sent on behalf of an activation:
//!
//! 1. The application version named by the request's application key must be supported and
//!    belong to the activation's application, and the activation must be `ACTIVE`.
//! 2. Factor keys are derived from the activation's ECDH master secret and the signature
//!    is checked at every counter of a bounded [`ReplayWindow`] ahead of the stored counter.
//! 3. The [`lockout`] rules advance the counter, count failures and block the activation.
//! 4. The activation is saved, then one audit record is written.
//!
//! ```rust
//! use csign_audit::MemoryAuditLog;
//! use csign_signature::prelude::*;
//!
//! # async fn demo() -> Result<(), SignatureError> {
//! let service = SignatureService::builder()
//!     .activations(MemoryActivationRepository::new())
//!     .application_versions(MemoryApplicationVersionRepository::new())
//!     .audit(MemoryAuditLog::new())
//!     .build()?;
//!
//! let result = service
//!     .verify_signature("missing", "possession", "12345678", b"data", "app-key")
//!     .await?;
//! assert_eq!(result.user_id, "unknown");
//! # Ok(())
//! # }
//! ```

mod error;
pub mod lockout;
mod memory;
pub mod repository;
mod service;
mod window;

pub use crate::error::{SignatureError, SignatureErrorExt};
pub use crate::memory::{MemoryActivationRepository, MemoryApplicationVersionRepository};
pub use crate::repository::{ActivationRepository, ApplicationVersionRepository, RepositoryError};
pub use crate::service::{
    SignatureService, SignatureServiceBuilder, VaultUnlockResult, VerificationResult,
};
pub use crate::window::ReplayWindow;

pub mod prelude {
    pub use crate::error::SignatureError;
    pub use crate::memory::{MemoryActivationRepository, MemoryApplicationVersionRepository};
    pub use crate::repository::{ActivationRepository, ApplicationVersionRepository};
    pub use crate::service::{SignatureService, VaultUnlockResult, VerificationResult};
}
