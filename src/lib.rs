//! nagstage - build-and-promote engine for Nagios monitoring configuration
//!
//! A deployment document (fetched live or from a stored revision) is
//! rendered into a per-deployment staging tree, verified with the Nagios
//! checker, and promoted file by file into the production tree.
//!
//! ## Layers
//!
//! - `domain` - entities, value objects, ports and the config writer
//! - `infrastructure` - local filesystem, processes, sources, resolvers
//! - `application` - build, validation, promotion and inspection use cases
//! - `presentation` - CLI definition, wiring and output rendering

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod presentation;

// Re-exports for convenience
pub use application::{
    restart_service, staged_configs, BuildReport, BuildRequest, DeploymentOrchestrator,
    PromotionEngine, PromotionReport, ValidationReport, ValidationRunner,
};
pub use config::Config;
pub use domain::value_objects::Layout;
pub use error::{NagstageError, NagstageResult};
