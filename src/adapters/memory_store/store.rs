use crate::domain::{CredentialError, CredentialObject, LabelSelector, LookupMode, Result};
use crate::ports::SecretStorePort;
use async_trait::async_trait;
use log::debug;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Namespace used for point lookups that do not name one.
pub const DEFAULT_NAMESPACE: &str = "default";

/// Secret store kept in memory, seeded up front
///
/// Stands in for a management cluster in tests and offline tooling. It can
/// pretend to only support listing, or to be unreachable.
#[derive(Default)]
pub struct InMemorySecretStore {
    objects: Vec<CredentialObject>,
    mode: LookupMode,
    failure: Option<String>,
    requests: AtomicUsize,
}

impl InMemorySecretStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_objects(mut self, objects: impl IntoIterator<Item = CredentialObject>) -> Self {
        self.objects.extend(objects);
        self
    }

    pub fn with_lookup_mode(mut self, mode: LookupMode) -> Self {
        self.mode = mode;
        self
    }

    /// Make every request fail as if the store could not be reached
    pub fn with_failure(mut self, reason: impl Into<String>) -> Self {
        self.failure = Some(reason.into());
        self
    }

    /// Number of get and list requests served so far
    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    fn begin_request(&self) -> Result<()> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        match &self.failure {
            Some(reason) => Err(CredentialError::store_unavailable(reason.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl SecretStorePort for InMemorySecretStore {
    async fn get_secret(&self, namespace: &str, name: &str) -> Result<Option<CredentialObject>> {
        self.begin_request()?;

        let namespace = if namespace.is_empty() { DEFAULT_NAMESPACE } else { namespace };
        debug!("Getting secret {}/{}", namespace, name);

        Ok(self
            .objects
            .iter()
            .find(|object| object.namespace == namespace && object.name == name)
            .cloned())
    }

    async fn list_secrets(&self, namespace: &str, selector: &LabelSelector) -> Result<Vec<CredentialObject>> {
        self.begin_request()?;

        debug!("Listing secrets in {:?} matching {}", namespace, selector);

        Ok(self
            .objects
            .iter()
            .filter(|object| namespace.is_empty() || object.namespace == namespace)
            .filter(|object| selector.matches(&object.labels))
            .cloned()
            .collect())
    }

    fn lookup_mode(&self) -> LookupMode {
        self.mode
    }
}
