use std::path::PathBuf;

use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::{Client, Config};
use log::debug;

use crate::domain::{CredentialError, Result};

/// Which kubeconfig and context reach the management cluster
///
/// With neither set, the usual discovery applies: `KUBECONFIG`,
/// `~/.kube/config`, then the in-cluster service account.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManagementKubeconfig {
    pub path: Option<PathBuf>,
    pub context: Option<String>,
}

impl ManagementKubeconfig {
    fn options(&self) -> KubeConfigOptions {
        KubeConfigOptions {
            context: self.context.clone(),
            ..Default::default()
        }
    }
}

/// Build a client for the management cluster
pub async fn connect(management: &ManagementKubeconfig) -> Result<Client> {
    let config = match (&management.path, &management.context) {
        (Some(path), _) => {
            debug!("Using management kubeconfig {}", path.display());
            let kubeconfig = Kubeconfig::read_from(path).map_err(|e| {
                CredentialError::store_unavailable(format!("failed to read kubeconfig {}: {}", path.display(), e))
            })?;
            Config::from_custom_kubeconfig(kubeconfig, &management.options())
                .await
                .map_err(|e| CredentialError::store_unavailable(format!("invalid kubeconfig: {}", e)))?
        }
        (None, Some(context)) => {
            debug!("Using management kubeconfig context {}", context);
            Config::from_kubeconfig(&management.options())
                .await
                .map_err(|e| CredentialError::store_unavailable(format!("context {:?}: {}", context, e)))?
        }
        (None, None) => Config::infer()
            .await
            .map_err(|e| CredentialError::store_unavailable(format!("no management cluster configured: {}", e)))?,
    };

    Client::try_from(config).map_err(|e| CredentialError::store_unavailable(format!("failed to create client: {}", e)))
}
