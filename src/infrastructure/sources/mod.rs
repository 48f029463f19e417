//! Deployment source clients

mod file_store;

pub use file_store::FileDeploymentStore;
