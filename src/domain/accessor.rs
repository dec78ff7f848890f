use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use super::{
    ClusterIdentity, CredentialError, CredentialKind, CredentialObject, Kubeconfig, LookupMode, Result,
    KUBECONFIG_DATA_KEY,
};
use crate::ports::{CredentialSourcePort, SecretStorePort};

/// Reads workload cluster kubeconfig secrets out of the management store.
#[derive(Clone)]
pub struct ClusterAccessor {
    store: Arc<dyn SecretStorePort>,
}

impl ClusterAccessor {
    pub fn new(store: Arc<dyn SecretStorePort>) -> Self {
        Self { store }
    }

    async fn find_object(&self, identity: &ClusterIdentity, kind: CredentialKind) -> Result<CredentialObject> {
        let name = kind.object_name(identity.name());

        match self.store.lookup_mode() {
            LookupMode::Point => self
                .store
                .get_secret(identity.namespace(), &name)
                .await?
                .ok_or_else(|| CredentialError::not_found(name, identity.namespace())),
            LookupMode::List => {
                let selector = kind.selector(identity.name());
                let mut candidates: Vec<CredentialObject> = self
                    .store
                    .list_secrets(identity.namespace(), &selector)
                    .await?
                    .into_iter()
                    .filter(|object| kind.matches(identity.name(), object))
                    .collect();

                match candidates.len() {
                    0 => Err(CredentialError::not_found(name, identity.namespace())),
                    1 => Ok(candidates.remove(0)),
                    _ => Err(CredentialError::Ambiguous {
                        cluster: identity.name().to_string(),
                        namespace: identity.namespace().to_string(),
                        kind,
                        matches: candidates.iter().map(CredentialObject::qualified_name).collect(),
                    }),
                }
            }
        }
    }
}

#[async_trait]
impl CredentialSourcePort for ClusterAccessor {
    async fn fetch_credential(&self, identity: &ClusterIdentity, kind: CredentialKind) -> Result<Kubeconfig> {
        let object = self.find_object(identity, kind).await?;

        let payload = object.data(KUBECONFIG_DATA_KEY).ok_or_else(|| CredentialError::Malformed {
            name: object.name.clone(),
            namespace: object.namespace.clone(),
            key: KUBECONFIG_DATA_KEY.to_string(),
        })?;

        debug!(
            secret = %object.qualified_name(),
            kind = %kind,
            bytes = payload.len(),
            "Read kubeconfig secret"
        );
        Ok(Kubeconfig::from(payload.to_vec()))
    }
}
