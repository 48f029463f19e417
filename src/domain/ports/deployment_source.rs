//! Deployment Source Port
//!
//! One ingestion interface, two implementations: the live API source and
//! the revision store. The orchestrator picks one by whether a revision was
//! requested; everything downstream is shared.

use serde::Serialize;

use crate::domain::entities::{Deployment, DeploymentDocument, ShardingConfig};
use crate::error::NagstageError;

/// Error returned by a source client
#[derive(Debug, Clone)]
pub enum SourceError {
    /// The deployment (or revision) is unknown to the source
    NotFound(String),
    /// Transport or storage failure
    Unavailable(String),
    /// Payload did not parse
    Malformed(String),
}

impl std::fmt::Display for SourceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(msg) => write!(f, "not found: {}", msg),
            Self::Unavailable(msg) => write!(f, "unavailable: {}", msg),
            Self::Malformed(msg) => write!(f, "malformed payload: {}", msg),
        }
    }
}

impl std::error::Error for SourceError {}

impl From<SourceError> for NagstageError {
    fn from(err: SourceError) -> Self {
        NagstageError::Source(err.to_string())
    }
}

/// Which source a build reads from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IngestMode {
    Live,
    Revision,
}

/// Shard layout registered for a deployment in the revision store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentInfo {
    pub shard_key: String,
    pub shard_count: u32,
}

/// Live desired-state API
pub trait LiveApiClient {
    fn fetch(
        &self,
        deployment: &str,
        sub_deployment: Option<&str>,
    ) -> Result<DeploymentDocument, SourceError>;
}

/// Historical revision store
pub trait RevisionStore {
    /// `include_disabled` mirrors the store's full-document flag
    fn fetch(
        &self,
        deployment: &str,
        revision: &str,
        include_disabled: bool,
    ) -> Result<DeploymentDocument, SourceError>;

    fn deployment_info(&self, deployment: &str) -> Result<DeploymentInfo, SourceError>;
}

/// Ingestion interface used by the orchestrator
pub trait DeploymentSource {
    fn mode(&self) -> IngestMode;

    /// Fetch the desired-state document
    fn fetch(&self, deployment: &Deployment) -> Result<DeploymentDocument, SourceError>;

    /// Sharding to enable for this build, if any
    fn sharding(
        &self,
        deployment: &Deployment,
        document: &DeploymentDocument,
    ) -> Result<Option<ShardingConfig>, SourceError>;
}

/// Live source: sharding comes from the document when the process enables it
pub struct LiveSource<'a, C: LiveApiClient + ?Sized> {
    client: &'a C,
    shard_position: Option<u32>,
}

impl<'a, C: LiveApiClient + ?Sized> LiveSource<'a, C> {
    /// `shard_position` is `None` when this process does not shard
    pub fn new(client: &'a C, shard_position: Option<u32>) -> Self {
        Self {
            client,
            shard_position,
        }
    }
}

impl<C: LiveApiClient + ?Sized> DeploymentSource for LiveSource<'_, C> {
    fn mode(&self) -> IngestMode {
        IngestMode::Live
    }

    fn fetch(&self, deployment: &Deployment) -> Result<DeploymentDocument, SourceError> {
        self.client.fetch(deployment.id(), deployment.sub_deployment())
    }

    fn sharding(
        &self,
        _deployment: &Deployment,
        document: &DeploymentDocument,
    ) -> Result<Option<ShardingConfig>, SourceError> {
        Ok(self
            .shard_position
            .and_then(|position| document.miscsettings.sharding(position)))
    }
}

/// Revision source: sharding only when a position is requested explicitly
pub struct RevisionSource<'a, S: RevisionStore + ?Sized> {
    store: &'a S,
    revision: String,
    shard_position: Option<u32>,
}

impl<'a, S: RevisionStore + ?Sized> RevisionSource<'a, S> {
    pub fn new(store: &'a S, revision: impl Into<String>, shard_position: Option<u32>) -> Self {
        Self {
            store,
            revision: revision.into(),
            shard_position,
        }
    }
}

impl<S: RevisionStore + ?Sized> DeploymentSource for RevisionSource<'_, S> {
    fn mode(&self) -> IngestMode {
        IngestMode::Revision
    }

    fn fetch(&self, deployment: &Deployment) -> Result<DeploymentDocument, SourceError> {
        self.store.fetch(deployment.id(), &self.revision, true)
    }

    fn sharding(
        &self,
        deployment: &Deployment,
        _document: &DeploymentDocument,
    ) -> Result<Option<ShardingConfig>, SourceError> {
        let Some(position) = self.shard_position else {
            return Ok(None);
        };
        let info = self.store.deployment_info(deployment.id())?;
        Ok(Some(ShardingConfig::new(
            info.shard_key,
            info.shard_count,
            position,
        )))
    }
}
