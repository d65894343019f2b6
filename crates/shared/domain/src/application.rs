use serde::{Deserialize, Serialize};
use std::fmt;

/// A released version of a client application.
///
/// The application key identifies the version in every signed request; the secret is mixed
/// into the signed payload so that only genuine builds of the application produce it.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationVersion {
    pub application_id: String,
    pub name: String,
    pub application_key: String,
    pub application_secret: String,
    pub supported: bool,
}

impl ApplicationVersion {
    /// Returns `true` if the version is supported and belongs to `application_id`.
    #[must_use]
    pub fn admits(&self, application_id: &str) -> bool {
        self.supported && self.application_id == application_id
    }
}

impl fmt::Debug for ApplicationVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApplicationVersion")
            .field("application_id", &self.application_id)
            .field("name", &self.name)
            .field("application_key", &self.application_key)
            .field("application_secret", &"<redacted>")
            .field("supported", &self.supported)
            .finish()
    }
}
