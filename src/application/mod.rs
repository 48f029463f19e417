//! Application Layer
//!
//! Use cases that orchestrate the business flow.
//! This layer:
//! - Depends on Domain layer (entities, services, ports)
//! - Does NOT contain formatting rules (those are in the writer service)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Use Cases
//!
//! - `DeploymentOrchestrator` - Ingest, transform and stage a deployment
//! - `ValidationRunner` - Run the checker against staged artifacts
//! - `PromotionEngine` - Move changed artifacts into the live tree
//! - `staged_configs` - Read staged artifacts back for display
//! - `restart_service` - Restart the monitoring service

pub mod build;
pub mod inspect;
pub mod promote;
pub mod service;
pub mod validate;

pub use build::{BuildContext, BuildReport, BuildRequest, DeploymentOrchestrator};
pub use inspect::{staged_configs, StagedConfig};
pub use promote::{PreviewEntry, PromotionEngine, PromotionReport};
pub use service::restart_service;
pub use validate::{ValidationReport, ValidationRunner, TESTING_TEMPLATE};
