use std::sync::Arc;

use tracing::{debug, info};

use super::{ClusterAccessor, ClusterIdentity, CredentialError, CredentialKind, GetKubeconfigOptions, Kubeconfig, Result};
use crate::ports::{CredentialSourcePort, SecretStorePort};

/// Picks which kubeconfig of a workload cluster to hand out.
///
/// When the user kubeconfig is preferred and does not exist, the primary one
/// is returned instead. Any other failure on the user kubeconfig is final.
#[derive(Clone)]
pub struct KubeconfigService {
    source: Arc<dyn CredentialSourcePort>,
}

impl KubeconfigService {
    pub fn new(source: Arc<dyn CredentialSourcePort>) -> Self {
        Self { source }
    }

    /// Build a service reading secrets straight from `store`.
    pub fn from_store(store: Arc<dyn SecretStorePort>) -> Self {
        Self::new(Arc::new(ClusterAccessor::new(store)))
    }

    pub async fn get_kubeconfig(&self, options: &GetKubeconfigOptions) -> Result<Kubeconfig> {
        let identity = ClusterIdentity::new(options.workload_cluster_name.as_str(), options.namespace.as_str())?;
        self.resolve_kubeconfig(&identity, options.user_kubeconfig).await
    }

    #[tracing::instrument(skip_all, fields(cluster = %identity, prefer_user = prefer_user))]
    pub async fn resolve_kubeconfig(&self, identity: &ClusterIdentity, prefer_user: bool) -> Result<Kubeconfig> {
        if !prefer_user {
            return self.source.fetch_credential(identity, CredentialKind::Primary).await;
        }

        match self.source.fetch_credential(identity, CredentialKind::User).await {
            Ok(kubeconfig) => Ok(kubeconfig),
            Err(CredentialError::NotFound { name, .. }) => {
                info!("User kubeconfig {} not found, using the cluster kubeconfig", name);
                self.source.fetch_credential(identity, CredentialKind::Primary).await
            }
            Err(e) => {
                debug!("User kubeconfig lookup failed: {}", e);
                Err(e)
            }
        }
    }
}
