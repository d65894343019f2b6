//! Persistence contracts consumed by the signature service.

use csign_domain::{Activation, ApplicationVersion};
use std::borrow::Cow;
use std::future::Future;
use std::sync::Arc;

#[csign_derive::csign_error]
pub enum RepositoryError {
    /// The stored revision moved on since the record was read.
    #[error("Revision conflict{}: {message}", format_context(.context))]
    RevisionConflict { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Record not found{}: {message}", format_context(.context))]
    NotFound { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Storage unavailable{}: {message}", format_context(.context))]
    Unavailable { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Internal repository error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

/// Storage of activation records.
///
/// `save` is a compare-and-swap on [`Activation::revision`]: it succeeds only if the stored
/// revision still equals the revision of the passed record, and bumps the stored revision.
/// Otherwise it fails with [`RepositoryError::RevisionConflict`] and stores nothing.
pub trait ActivationRepository: Send + Sync {
    fn find_by_id(
        &self,
        activation_id: &str,
    ) -> impl Future<Output = Result<Option<Activation>, RepositoryError>> + Send;

    fn save(&self, activation: &Activation)
    -> impl Future<Output = Result<(), RepositoryError>> + Send;
}

/// Lookup of application versions by their public application key.
pub trait ApplicationVersionRepository: Send + Sync {
    fn find_by_application_key(
        &self,
        application_key: &str,
    ) -> impl Future<Output = Result<Option<ApplicationVersion>, RepositoryError>> + Send;
}

impl<R: ActivationRepository> ActivationRepository for Arc<R> {
    fn find_by_id(
        &self,
        activation_id: &str,
    ) -> impl Future<Output = Result<Option<Activation>, RepositoryError>> + Send {
        R::find_by_id(self, activation_id)
    }

    fn save(
        &self,
        activation: &Activation,
    ) -> impl Future<Output = Result<(), RepositoryError>> + Send {
        R::save(self, activation)
    }
}

impl<R: ApplicationVersionRepository> ApplicationVersionRepository for Arc<R> {
    fn find_by_application_key(
        &self,
        application_key: &str,
    ) -> impl Future<Output = Result<Option<ApplicationVersion>, RepositoryError>> + Send {
        R::find_by_application_key(self, application_key)
    }
}
