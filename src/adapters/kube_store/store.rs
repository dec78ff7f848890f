use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use k8s_openapi::api::core::v1::Secret;
use kube::api::{Api, ListParams};
use kube::Client;
use log::debug;

use crate::domain::{CredentialError, CredentialObject, LabelSelector, Result};
use crate::ports::SecretStorePort;

/// Secret store backed by the management cluster's API server
#[derive(Clone)]
pub struct KubeSecretStore {
    client: Client,
    request_timeout: Duration,
}

impl KubeSecretStore {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    pub fn new(client: Client) -> Self {
        Self {
            client,
            request_timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, request_timeout: Duration) -> Self {
        self.request_timeout = request_timeout;
        self
    }

    fn namespaced(&self, namespace: &str) -> Api<Secret> {
        if namespace.is_empty() {
            Api::default_namespaced(self.client.clone())
        } else {
            Api::namespaced(self.client.clone(), namespace)
        }
    }
}

#[async_trait]
impl SecretStorePort for KubeSecretStore {
    async fn get_secret(&self, namespace: &str, name: &str) -> Result<Option<CredentialObject>> {
        debug!("Getting secret {} in namespace {:?}", name, namespace);

        let api = self.namespaced(namespace);
        let secret = bounded(self.request_timeout, "get secret", api.get_opt(name)).await?;
        Ok(secret.map(to_credential_object))
    }

    async fn list_secrets(&self, namespace: &str, selector: &LabelSelector) -> Result<Vec<CredentialObject>> {
        debug!("Listing secrets in namespace {:?} matching {}", namespace, selector);

        let api: Api<Secret> = if namespace.is_empty() {
            Api::all(self.client.clone())
        } else {
            Api::namespaced(self.client.clone(), namespace)
        };
        let params = ListParams::default().labels(&selector.to_string());
        let secrets = bounded(self.request_timeout, "list secrets", api.list(&params)).await?;
        Ok(secrets.items.into_iter().map(to_credential_object).collect())
    }
}

/// Run an API call under `timeout`, mapping every failure to `StoreUnavailable`
async fn bounded<T, F>(timeout: Duration, operation: &str, call: F) -> Result<T>
where
    F: Future<Output = kube::Result<T>>,
{
    match tokio::time::timeout(timeout, call).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(kube::Error::Api(response))) => Err(CredentialError::store_unavailable(format!(
            "{} rejected by API server: {} ({} {})",
            operation, response.message, response.code, response.reason
        ))),
        Ok(Err(e)) => Err(CredentialError::store_unavailable(format!("{} failed: {}", operation, e))),
        Err(_) => Err(CredentialError::store_unavailable(format!(
            "{} timed out after {:?}",
            operation, timeout
        ))),
    }
}

fn to_credential_object(secret: Secret) -> CredentialObject {
    let metadata = secret.metadata;
    CredentialObject {
        name: metadata.name.unwrap_or_default(),
        namespace: metadata.namespace.unwrap_or_default(),
        labels: metadata.labels.unwrap_or_default(),
        secret_type: secret.type_,
        data: secret
            .data
            .unwrap_or_default()
            .into_iter()
            .map(|(key, value)| (key, value.0))
            .collect(),
    }
}
