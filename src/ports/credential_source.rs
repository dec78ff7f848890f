use crate::domain::{ClusterIdentity, CredentialKind, Kubeconfig, Result};
use async_trait::async_trait;

/// Port for fetching one kind of kubeconfig for a workload cluster
#[async_trait]
pub trait CredentialSourcePort: Send + Sync {
    /// Fetch the payload of the `kind` credential bound to `identity`
    async fn fetch_credential(&self, identity: &ClusterIdentity, kind: CredentialKind) -> Result<Kubeconfig>;
}
