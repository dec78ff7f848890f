mod client;
mod store;

pub use client::{connect, ManagementKubeconfig};
pub use store::KubeSecretStore;
