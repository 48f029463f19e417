//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod deployment_source;
pub mod file_system;
pub mod host_resolver;
pub mod transformer;

pub use deployment_source::{
    DeploymentInfo, DeploymentSource, IngestMode, LiveApiClient, LiveSource, RevisionSource,
    RevisionStore, SourceError,
};
pub use file_system::{FileSystem, FsError, FsResult};
pub use host_resolver::{HostResolver, ResolvedHosts, ResolverError};
pub use transformer::{HostTransformer, TransformerFactory};
