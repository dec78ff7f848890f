use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const APP_NAME: &str = "capi-kubeconfig";

/// Persisted defaults, overridden by command line flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Kubeconfig of the management cluster. Discovery rules apply when unset.
    pub kubeconfig: Option<PathBuf>,
    pub kubeconfig_context: Option<String>,
    pub request_timeout_secs: u64,
    /// Return the user kubeconfig when it exists.
    pub prefer_user: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            kubeconfig: None,
            kubeconfig_context: None,
            request_timeout_secs: 30,
            prefer_user: true,
        }
    }
}

impl AppConfig {
    /// Load from the per-user configuration directory, writing defaults on first use.
    pub fn load() -> Result<Self, confy::ConfyError> {
        confy::load(APP_NAME, None)
    }

    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, confy::ConfyError> {
        confy::load_path(path)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
