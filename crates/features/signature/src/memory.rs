use crate::repository::{ActivationRepository, ApplicationVersionRepository, RepositoryError};
use csign_domain::{Activation, ApplicationVersion};
use fxhash::FxHashMap;
use parking_lot::RwLock;
use tracing::trace;

/// Process-local activation store with revision-checked saves.
#[derive(Debug, Default)]
pub struct MemoryActivationRepository {
    rows: RwLock<FxHashMap<String, Activation>>,
}

impl MemoryActivationRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `activation` as-is, replacing any previous record with the same id.
    pub fn insert(&self, activation: Activation) {
        self.rows.write().insert(activation.activation_id.clone(), activation);
    }

    /// Snapshot of the stored record.
    #[must_use]
    pub fn get(&self, activation_id: &str) -> Option<Activation> {
        self.rows.read().get(activation_id).cloned()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.read().len()
    }
}

impl ActivationRepository for MemoryActivationRepository {
    async fn find_by_id(&self, activation_id: &str) -> Result<Option<Activation>, RepositoryError> {
        Ok(self.get(activation_id))
    }

    async fn save(&self, activation: &Activation) -> Result<(), RepositoryError> {
        let mut rows = self.rows.write();
        let stored = rows.get_mut(&activation.activation_id).ok_or_else(|| {
            RepositoryError::NotFound {
                message: activation.activation_id.clone().into(),
                context: Some("activation must exist before it is saved".into()),
            }
        })?;

        if stored.revision != activation.revision {
            return Err(RepositoryError::RevisionConflict {
                message: format!(
                    "activation {} is at revision {}, save was based on {}",
                    activation.activation_id, stored.revision, activation.revision
                )
                .into(),
                context: None,
            });
        }

        *stored = Activation { revision: activation.revision + 1, ..activation.clone() };
        trace!(activation_id = %activation.activation_id, revision = stored.revision, "Activation saved");
        Ok(())
    }
}

/// Process-local application version catalogue keyed by application key.
#[derive(Debug, Default)]
pub struct MemoryApplicationVersionRepository {
    by_key: RwLock<FxHashMap<String, ApplicationVersion>>,
}

impl MemoryApplicationVersionRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, version: ApplicationVersion) {
        self.by_key.write().insert(version.application_key.clone(), version);
    }

    /// Flips the `supported` flag; returns `false` if the key is unknown.
    pub fn set_supported(&self, application_key: &str, supported: bool) -> bool {
        self.by_key.write().get_mut(application_key).map(|v| v.supported = supported).is_some()
    }
}

impl ApplicationVersionRepository for MemoryApplicationVersionRepository {
    async fn find_by_application_key(
        &self,
        application_key: &str,
    ) -> Result<Option<ApplicationVersion>, RepositoryError> {
        Ok(self.by_key.read().get(application_key).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use csign_domain::ActivationStatus;

    fn activation() -> Activation {
        Activation {
            activation_id: "a1".to_owned(),
            user_id: "u1".to_owned(),
            application_id: "app".to_owned(),
            server_private_key: String::new(),
            device_public_key: String::new(),
            status: ActivationStatus::Active,
            counter: 0,
            failed_attempts: 0,
            max_failed_attempts: 5,
            timestamp_last_used: None,
            revision: 0,
        }
    }

    #[tokio::test]
    async fn test_save_bumps_revision() {
        let repo = MemoryActivationRepository::new();
        repo.insert(activation());

        let mut loaded = repo.find_by_id("a1").await.unwrap().unwrap();
        loaded.counter = 3;
        repo.save(&loaded).await.unwrap();

        let stored = repo.get("a1").unwrap();
        assert_eq!((stored.counter, stored.revision), (3, 1));
    }

    #[tokio::test]
    async fn test_stale_save_is_rejected() {
        let repo = MemoryActivationRepository::new();
        repo.insert(activation());

        let first = repo.find_by_id("a1").await.unwrap().unwrap();
        let second = first.clone();

        repo.save(&Activation { counter: 1, ..first }).await.unwrap();
        let err = repo.save(&Activation { counter: 2, ..second }).await.unwrap_err();

        assert!(matches!(err, RepositoryError::RevisionConflict { .. }));
        assert_eq!(repo.get("a1").unwrap().counter, 1);
    }

    #[tokio::test]
    async fn test_saving_unknown_activation_fails() {
        let repo = MemoryActivationRepository::new();
        assert!(matches!(repo.save(&activation()).await, Err(RepositoryError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_versions_by_key() {
        let repo = MemoryApplicationVersionRepository::new();
        repo.insert(ApplicationVersion {
            application_id: "app".to_owned(),
            name: "1.0".to_owned(),
            application_key: "key".to_owned(),
            application_secret: "secret".to_owned(),
            supported: true,
        });

        assert!(repo.set_supported("key", false));
        assert!(!repo.set_supported("other", false));

        let found = repo.find_by_application_key("key").await.unwrap().unwrap();
        assert!(!found.supported);
        assert!(repo.find_by_application_key("other").await.unwrap().is_none());
    }
}
