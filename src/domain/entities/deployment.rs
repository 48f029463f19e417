//! Deployment entity

use serde::Serialize;

/// Partitioning of one deployment's hosts across N monitoring instances
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShardingConfig {
    key: String,
    count: u32,
    position: u32,
}

impl ShardingConfig {
    pub fn new(key: impl Into<String>, count: u32, position: u32) -> Self {
        Self {
            key: key.into(),
            count,
            position,
        }
    }

    /// Host field whose value decides the shard
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn position(&self) -> u32 {
        self.position
    }
}

/// A named target monitoring environment
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Deployment {
    id: String,
    sub_deployment: Option<String>,
    sharding: Option<ShardingConfig>,
}

impl Deployment {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            sub_deployment: None,
            sharding: None,
        }
    }

    pub fn with_sub_deployment(mut self, sub_deployment: Option<String>) -> Self {
        self.sub_deployment = sub_deployment;
        self
    }

    pub fn with_sharding(mut self, sharding: Option<ShardingConfig>) -> Self {
        self.sharding = sharding;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn sub_deployment(&self) -> Option<&str> {
        self.sub_deployment.as_deref()
    }

    pub fn sharding(&self) -> Option<&ShardingConfig> {
        self.sharding.as_ref()
    }

    /// Whether a source record tagged with `tag` belongs to this deployment.
    ///
    /// Untagged records always apply; tagged records apply only when no
    /// sub-deployment filter is active or the tags match.
    pub fn accepts(&self, tag: Option<&str>) -> bool {
        match (self.sub_deployment(), tag) {
            (Some(active), Some(tag)) => active == tag,
            _ => true,
        }
    }
}
