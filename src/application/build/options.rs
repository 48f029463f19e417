//! Build Options
//!
//! Per-call parameters of a deployment build.

/// Options for one `DeploymentOrchestrator::build` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildRequest {
    /// Deployment to build
    pub deployment: String,
    /// Build from this revision of the revision store instead of the live source
    pub revision: Option<String>,
    /// Incremental rebuild: replay cached hosts instead of querying resolvers
    pub diff: bool,
    /// Write whatever is available even when critical data is empty
    pub force: bool,
    /// Shard position for this monitoring instance
    pub shard_position: Option<u32>,
}

impl BuildRequest {
    pub fn new(deployment: impl Into<String>) -> Self {
        Self {
            deployment: deployment.into(),
            revision: None,
            diff: false,
            force: false,
            shard_position: None,
        }
    }

    pub fn with_revision(mut self, revision: Option<String>) -> Self {
        self.revision = revision;
        self
    }

    pub fn with_diff(mut self, diff: bool) -> Self {
        self.diff = diff;
        self
    }

    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    pub fn with_shard_position(mut self, position: Option<u32>) -> Self {
        self.shard_position = position;
        self
    }
}
