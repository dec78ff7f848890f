pub mod kube_store;
pub mod memory_store;

pub use kube_store::{KubeSecretStore, ManagementKubeconfig};
pub use memory_store::InMemorySecretStore;
