use crate::domain::{CredentialObject, LabelSelector, LookupMode, Result};
use async_trait::async_trait;

/// Port for reading secrets from the management cluster
#[async_trait]
pub trait SecretStorePort: Send + Sync {
    /// Get a single secret by name
    ///
    /// Returns None if the secret does not exist. An empty namespace means the
    /// store's default namespace. Every error is a store failure.
    async fn get_secret(&self, namespace: &str, name: &str) -> Result<Option<CredentialObject>>;

    /// List secrets carrying the given label
    ///
    /// An empty namespace lists across every namespace the store can see.
    async fn list_secrets(&self, namespace: &str, selector: &LabelSelector) -> Result<Vec<CredentialObject>>;

    /// How single secrets should be looked up in this store
    fn lookup_mode(&self) -> LookupMode {
        LookupMode::Point
    }
}
