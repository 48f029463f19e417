//! Build Context
//!
//! Everything one build carries from step to step: the deployment being
//! built (sub-deployment filter and sharding included), the request flags,
//! and a mutable borrow of the orchestrator's host cache.

use crate::domain::entities::Deployment;
use crate::domain::services::LocalCache;

use super::options::BuildRequest;

pub struct BuildContext<'c> {
    pub deployment: Deployment,
    pub diff: bool,
    pub force: bool,
    pub cache: &'c mut LocalCache,
}

impl<'c> BuildContext<'c> {
    pub fn new(deployment: Deployment, request: &BuildRequest, cache: &'c mut LocalCache) -> Self {
        Self {
            deployment,
            diff: request.diff,
            force: request.force,
            cache,
        }
    }

    /// Cached hosts replace resolver queries for this build
    pub fn replays_cache(&self) -> bool {
        self.diff && !self.cache.is_empty()
    }

    /// Resolver results should be mirrored into the cache
    pub fn mirrors_cache(&self) -> bool {
        self.diff
    }

    pub fn sub_deployment(&self) -> Option<&str> {
        self.deployment.sub_deployment()
    }
}
