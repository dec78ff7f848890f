pub mod credential_source;
pub mod secret_store;

pub use credential_source::CredentialSourcePort;
pub use secret_store::SecretStorePort;
