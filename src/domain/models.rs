use std::collections::BTreeMap;
use std::fmt;

use super::{CredentialError, Result};

/// Data key holding the kubeconfig document inside a cluster secret.
pub const KUBECONFIG_DATA_KEY: &str = "value";

/// Label binding a secret to the cluster it belongs to.
pub const CLUSTER_NAME_LABEL: &str = "cluster.x-k8s.io/cluster-name";

/// Secret type set on secrets generated for a cluster.
pub const CLUSTER_SECRET_TYPE: &str = "cluster.x-k8s.io/secret";

/// Name and namespace of a workload cluster in the management cluster.
///
/// An empty namespace defers to the store's default namespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClusterIdentity {
    name: String,
    namespace: String,
}

impl ClusterIdentity {
    pub fn new(name: impl Into<String>, namespace: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(CredentialError::InvalidIdentity("cluster name must not be empty".into()));
        }
        Ok(Self {
            name,
            namespace: namespace.into(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }
}

impl fmt::Display for ClusterIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.namespace.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{}/{}", self.namespace, self.name)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CredentialKind {
    /// The cluster's own admin kubeconfig.
    Primary,
    /// The narrower kubeconfig handed out to users, when the provider creates one.
    User,
}

impl CredentialKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CredentialKind::Primary => "primary",
            CredentialKind::User => "user",
        }
    }

    /// Suffix appended to the cluster name to form the secret name.
    pub fn purpose(&self) -> &'static str {
        match self {
            CredentialKind::Primary => "kubeconfig",
            CredentialKind::User => "user-kubeconfig",
        }
    }

    pub fn object_name(&self, cluster: &str) -> String {
        format!("{}-{}", cluster, self.purpose())
    }

    /// Cluster-name label values a secret of this kind may carry.
    ///
    /// User secrets are labelled either with the cluster name or with
    /// `<cluster>-user`.
    pub fn binding_labels(&self, cluster: &str) -> Vec<String> {
        match self {
            CredentialKind::Primary => vec![cluster.to_string()],
            CredentialKind::User => vec![cluster.to_string(), format!("{}-user", cluster)],
        }
    }

    /// Selector listing every secret that may be this kind of credential for `cluster`.
    pub fn selector(&self, cluster: &str) -> LabelSelector {
        LabelSelector::any_of(CLUSTER_NAME_LABEL, self.binding_labels(cluster))
    }

    /// Whether `object` is this kind of credential for `cluster`.
    ///
    /// The name must carry the kind's purpose, the binding label must be one
    /// of the kind's forms, and a typed secret must be a cluster secret.
    pub fn matches(&self, cluster: &str, object: &CredentialObject) -> bool {
        object.name == self.object_name(cluster)
            && self.selector(cluster).matches(&object.labels)
            && object.secret_type.as_deref().map_or(true, |t| t == CLUSTER_SECRET_TYPE)
    }
}

impl fmt::Display for CredentialKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A secret as read from the management store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CredentialObject {
    pub name: String,
    pub namespace: String,
    pub labels: BTreeMap<String, String>,
    pub secret_type: Option<String>,
    pub data: BTreeMap<String, Vec<u8>>,
}

impl CredentialObject {
    pub fn new(name: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            ..Default::default()
        }
    }

    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels.insert(key.into(), value.into());
        self
    }

    pub fn with_type(mut self, secret_type: impl Into<String>) -> Self {
        self.secret_type = Some(secret_type.into());
        self
    }

    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    pub fn data(&self, key: &str) -> Option<&[u8]> {
        self.data.get(key).map(Vec::as_slice)
    }

    pub fn is_bound_to(&self, cluster: &str) -> bool {
        self.labels.get(CLUSTER_NAME_LABEL).map(String::as_str) == Some(cluster)
    }

    pub fn qualified_name(&self) -> String {
        format!("{}/{}", self.namespace, self.name)
    }
}

/// Selector on a single label, rendered as `key=value` or `key in (a,b)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelSelector {
    pub key: String,
    pub values: Vec<String>,
}

impl LabelSelector {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::any_of(key, vec![value.into()])
    }

    pub fn any_of(key: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            key: key.into(),
            values,
        }
    }

    pub fn cluster(name: &str) -> Self {
        Self::new(CLUSTER_NAME_LABEL, name)
    }

    pub fn matches(&self, labels: &BTreeMap<String, String>) -> bool {
        labels.get(&self.key).map_or(false, |value| self.values.contains(value))
    }
}

impl fmt::Display for LabelSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.values.as_slice() {
            [value] => write!(f, "{}={}", self.key, value),
            values => write!(f, "{} in ({})", self.key, values.join(",")),
        }
    }
}

/// How a store can be queried for a single secret.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LookupMode {
    /// Direct get by name and namespace.
    #[default]
    Point,
    /// Only label-filtered listing is available.
    List,
}

/// Raw kubeconfig bytes, exactly as stored.
#[derive(Clone, PartialEq, Eq)]
pub struct Kubeconfig(Vec<u8>);

impl Kubeconfig {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<u8>> for Kubeconfig {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

// Payloads carry credentials, keep them out of debug output.
impl fmt::Debug for Kubeconfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Kubeconfig({} bytes)", self.0.len())
    }
}

/// Request shape handed over by the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetKubeconfigOptions {
    pub workload_cluster_name: String,
    pub namespace: String,
    pub user_kubeconfig: bool,
}

impl GetKubeconfigOptions {
    pub fn new(workload_cluster_name: impl Into<String>) -> Self {
        Self {
            workload_cluster_name: workload_cluster_name.into(),
            namespace: String::new(),
            user_kubeconfig: true,
        }
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    pub fn with_user_kubeconfig(mut self, user_kubeconfig: bool) -> Self {
        self.user_kubeconfig = user_kubeconfig;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_names_follow_purpose() {
        assert_eq!(CredentialKind::Primary.object_name("test1"), "test1-kubeconfig");
        assert_eq!(CredentialKind::User.object_name("test1"), "test1-user-kubeconfig");
    }

    #[test]
    fn test_empty_cluster_name_is_rejected() {
        let err = ClusterIdentity::new("  ", "test").unwrap_err();
        assert!(matches!(err, CredentialError::InvalidIdentity(_)));
        assert!(ClusterIdentity::new("test1", "").is_ok());
    }

    #[test]
    fn test_user_kind_accepts_user_label_and_cluster_type() {
        let labelled_user = CredentialObject::new("test1-user-kubeconfig", "test")
            .with_label(CLUSTER_NAME_LABEL, "test1-user")
            .with_type(CLUSTER_SECRET_TYPE);
        let foreign_type = CredentialObject::new("test1-user-kubeconfig", "test")
            .with_label(CLUSTER_NAME_LABEL, "test1")
            .with_type("kubernetes.io/service-account-token");
        let primary_with_user_label =
            CredentialObject::new("test1-kubeconfig", "test").with_label(CLUSTER_NAME_LABEL, "test1-user");

        assert!(CredentialKind::User.matches("test1", &labelled_user));
        assert!(!CredentialKind::User.matches("test1", &foreign_type));
        assert!(!CredentialKind::Primary.matches("test1", &primary_with_user_label));
    }

    #[test]
    fn test_kind_selectors_render_for_listing() {
        assert_eq!(
            CredentialKind::Primary.selector("test1").to_string(),
            "cluster.x-k8s.io/cluster-name=test1"
        );
        assert_eq!(
            CredentialKind::User.selector("test1").to_string(),
            "cluster.x-k8s.io/cluster-name in (test1,test1-user)"
        );
    }

    #[test]
    fn test_kind_matches_requires_name_and_label() {
        let bound = CredentialObject::new("test1-user-kubeconfig", "test").with_label(CLUSTER_NAME_LABEL, "test1");
        let unbound = CredentialObject::new("test1-user-kubeconfig", "test");

        assert!(CredentialKind::User.matches("test1", &bound));
        assert!(!CredentialKind::Primary.matches("test1", &bound));
        assert!(!CredentialKind::User.matches("test1", &unbound));
        assert!(!CredentialKind::User.matches("test", &bound));
    }

    #[test]
    fn test_label_selector_renders_as_equality() {
        let selector = LabelSelector::cluster("test1");
        assert_eq!(selector.to_string(), "cluster.x-k8s.io/cluster-name=test1");

        let mut labels = BTreeMap::new();
        labels.insert(CLUSTER_NAME_LABEL.to_string(), "test1".to_string());
        assert!(selector.matches(&labels));
        labels.insert(CLUSTER_NAME_LABEL.to_string(), "test2".to_string());
        assert!(!selector.matches(&labels));
    }

    #[test]
    fn test_kubeconfig_debug_hides_payload() {
        let kubeconfig = Kubeconfig::from(b"client-key-data: secret".to_vec());
        assert_eq!(format!("{:?}", kubeconfig), "Kubeconfig(23 bytes)");
    }
}
