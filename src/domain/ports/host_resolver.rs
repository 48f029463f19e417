//! Host Resolver Port
//!
//! A resolver turns one host-search descriptor into zero or more host
//! records. Failures are isolated per search by the orchestrator.

use crate::domain::entities::{HostSearch, ObjectRecord};

/// Hosts found by one search, keyed by host name
pub type ResolvedHosts = Vec<(String, ObjectRecord)>;

/// Error returned by a resolver
#[derive(Debug, Clone)]
pub struct ResolverError(pub String);

impl std::fmt::Display for ResolverError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ResolverError {}

/// Host-search plugin
pub trait HostResolver: Send + Sync {
    /// Short name for logs
    fn name(&self) -> &str;

    fn search(&self, search: &HostSearch) -> Result<ResolvedHosts, ResolverError>;
}
