//! Domain Entities

mod artifact;
mod deployment;
mod document;
mod object;

pub use artifact::{Artifact, ArtifactFile};
pub use deployment::{Deployment, ShardingConfig};
pub(crate) use document::json_u32;
pub use document::{
    collection_from_section, section_is_empty, DeploymentDocument, HostSearch, MiscSettings,
};
pub use object::{
    Encoding, FieldValue, ObjectCollection, ObjectKind, ObjectRecord, RecordKey,
    BROKER_MODULE_PREFIX,
};
