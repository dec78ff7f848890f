pub mod accessor;
pub mod errors;
pub mod models;
pub mod service;

pub use accessor::ClusterAccessor;
pub use errors::*;
pub use models::*;
pub use service::KubeconfigService;
