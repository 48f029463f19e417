//! Domain Services
//!
//! Stateless rules plus the orchestrator-owned host cache.

pub mod differ;
pub mod local_cache;
pub mod resolver_registry;
pub mod writer;

pub use differ::{diff_lines, unified, DiffSummary};
pub use local_cache::LocalCache;
pub use resolver_registry::{ResolverRegistry, AWS_EC2_FAMILY, RIGHTSCALE_FAMILY};
pub use writer::{ConfigWriter, GearmanConfigs, ARTIFACT_MODE, DEFAULT_HOST_TEMPLATE, FILE_HEADER};
