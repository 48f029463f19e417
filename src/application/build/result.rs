//! Build Result

use serde::Serialize;

use crate::domain::entities::ShardingConfig;
use crate::domain::ports::IngestMode;

/// What a completed build produced
#[derive(Debug, Clone, Serialize)]
pub struct BuildReport {
    pub deployment: String,
    pub sub_deployment: Option<String>,
    pub mode: IngestMode,
    pub sharding: Option<ShardingConfig>,
    /// Staged artifact names, in write order
    pub written: Vec<String>,
    /// Steps skipped because their source section was empty
    pub skipped: Vec<String>,
    /// Host searches that produced nothing, with the reason
    pub resolver_warnings: Vec<String>,
    /// Hosts were replayed from the local cache
    pub replayed_from_cache: bool,
    pub hosts: usize,
    pub services: usize,
}

impl BuildReport {
    pub fn new(deployment: impl Into<String>, mode: IngestMode) -> Self {
        Self {
            deployment: deployment.into(),
            sub_deployment: None,
            mode,
            sharding: None,
            written: Vec::new(),
            skipped: Vec::new(),
            resolver_warnings: Vec::new(),
            replayed_from_cache: false,
            hosts: 0,
            services: 0,
        }
    }

    pub fn has_warnings(&self) -> bool {
        !self.resolver_warnings.is_empty()
    }
}
