mod store;

pub use store::{InMemorySecretStore, DEFAULT_NAMESPACE};
