use std::fmt;

use super::CredentialKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialError {
    /// No credential object exists under the derived name.
    NotFound { name: String, namespace: String },
    /// The object exists but carries no payload under the expected data key.
    Malformed { name: String, namespace: String, key: String },
    /// The management store could not answer (I/O, API, timeout, cancellation).
    StoreUnavailable(String),
    /// More than one object matched a single identity and kind.
    Ambiguous {
        cluster: String,
        namespace: String,
        kind: CredentialKind,
        matches: Vec<String>,
    },
    InvalidIdentity(String),
}

impl CredentialError {
    pub fn not_found(name: impl Into<String>, namespace: impl Into<String>) -> Self {
        CredentialError::NotFound {
            name: name.into(),
            namespace: namespace.into(),
        }
    }

    pub fn store_unavailable(msg: impl Into<String>) -> Self {
        CredentialError::StoreUnavailable(msg.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, CredentialError::NotFound { .. })
    }
}

impl fmt::Display for CredentialError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CredentialError::NotFound { name, namespace } => {
                write!(f, "secret {} not found in namespace {:?}", name, namespace)
            }
            CredentialError::Malformed { name, namespace, key } => write!(
                f,
                "secret {} in namespace {:?} has no {:?} data key",
                name, namespace, key
            ),
            CredentialError::StoreUnavailable(msg) => write!(f, "Management cluster unavailable: {}", msg),
            CredentialError::Ambiguous {
                cluster,
                namespace,
                kind,
                matches,
            } => write!(
                f,
                "found {} {} kubeconfig secrets for cluster {} in namespace {:?}: {}",
                matches.len(),
                kind,
                cluster,
                namespace,
                matches.join(", ")
            ),
            CredentialError::InvalidIdentity(msg) => write!(f, "Invalid cluster identity: {}", msg),
        }
    }
}

impl std::error::Error for CredentialError {}

pub type Result<T> = std::result::Result<T, CredentialError>;
