//! Host-search resolvers

mod json_file;

use std::sync::Arc;

use crate::domain::services::ResolverRegistry;

pub use json_file::{JsonFileResolver, JSON_FILE_TYPE};

/// Registry with every resolver this build ships
pub fn default_registry() -> ResolverRegistry {
    let mut registry = ResolverRegistry::new();
    registry.register_type(JSON_FILE_TYPE, Arc::new(JsonFileResolver::new()));
    registry
}
