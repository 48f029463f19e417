//! Use Case Factory
//!
//! Creates use cases with infrastructure dependencies wired up.
//! This is the dependency injection point for the application.

use std::sync::Arc;

use crate::application::DeploymentOrchestrator;
use crate::config::Config;
use crate::infrastructure::{basic_factory, default_registry, FileDeploymentStore, LocalFs};

/// Type alias for the concrete orchestrator with all dependencies
pub type ConcreteOrchestrator = DeploymentOrchestrator<LocalFs>;

/// Create a build orchestrator from configuration
///
/// The file-backed store serves both live documents and revisions.
pub fn create_orchestrator(config: &Config) -> ConcreteOrchestrator {
    let store = Arc::new(FileDeploymentStore::new(&config.sources.root));

    DeploymentOrchestrator::new(
        LocalFs::new(),
        config.layout(),
        store.clone(),
        store,
        Box::new(basic_factory),
    )
    .with_registry(default_registry())
    .with_default_host_template(&config.hosts.default_template)
    .with_live_sharding(config.live_shard_position())
}
