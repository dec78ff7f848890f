#![cfg(test)]
#![allow(dead_code)]

use capi_kubeconfig::domain::{
    ClusterIdentity, CredentialObject, CLUSTER_NAME_LABEL, CLUSTER_SECRET_TYPE, KUBECONFIG_DATA_KEY,
};

pub const VALID_KUBECONFIG: &str = r#"
clusters:
- cluster:
    certificate-authority-data: stuff
    server: https://test-cluster-api:6443
  name: test1
contexts:
- context:
    cluster: test1
    user: test1-admin
  name: test1-admin@test1
current-context: test1-admin@test1
kind: Config
preferences: {}
users:
- name: test1-admin
  user:
    client-certificate-data: stuff-cert-data
    client-key-data: stuff-key-data
"#;

// Not valid YAML on purpose, payloads are never parsed.
pub const VALID_USER_KUBECONFIG: &str = r#"
clusters:
- cluster:
    certificate-authority-data: randomstring
    server: https://test-cluster-api.us-east-1.eks.amazonaws.com
  name: test1
current-context: test1-admin@test1
kind: Config
users
- name: test1-admin-user
"#;

pub fn identity() -> ClusterIdentity {
    ClusterIdentity::new("test1", "test").expect("valid identity")
}

pub fn primary_secret(payload: &[u8]) -> CredentialObject {
    CredentialObject::new("test1-kubeconfig", "test")
        .with_label(CLUSTER_NAME_LABEL, "test1")
        .with_data(KUBECONFIG_DATA_KEY, payload.to_vec())
}

pub fn user_secret(payload: &[u8]) -> CredentialObject {
    CredentialObject::new("test1-user-kubeconfig", "test")
        .with_label(CLUSTER_NAME_LABEL, "test1")
        .with_type(CLUSTER_SECRET_TYPE)
        .with_data(KUBECONFIG_DATA_KEY, payload.to_vec())
}

/// A user secret whose payload sits under the wrong key.
pub fn malformed_user_secret() -> CredentialObject {
    CredentialObject::new("test1-user-kubeconfig", "test")
        .with_label(CLUSTER_NAME_LABEL, "test1")
        .with_type(CLUSTER_SECRET_TYPE)
        .with_data("kubeconfig", VALID_USER_KUBECONFIG.as_bytes().to_vec())
}

/// User secret labelled `<cluster>-user`, as some providers create it.
pub fn user_labelled_user_secret(payload: &[u8]) -> CredentialObject {
    CredentialObject::new("test1-user-kubeconfig", "test")
        .with_label(CLUSTER_NAME_LABEL, "test1-user")
        .with_type(CLUSTER_SECRET_TYPE)
        .with_data(KUBECONFIG_DATA_KEY, payload.to_vec())
}
