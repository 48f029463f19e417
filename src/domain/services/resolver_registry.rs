//! Resolver Registry
//!
//! Maps a host-search `location` to the resolver that serves it. Identifier
//! families (regex patterns) are checked first, in registration order; then
//! the identifier itself is looked up as a resolver type name.

use std::collections::BTreeMap;
use std::sync::Arc;

use regex::Regex;

use crate::domain::ports::HostResolver;
use crate::error::{NagstageError, NagstageResult};

/// RightScale-style locations: `RS-<account>-<array>`
pub const RIGHTSCALE_FAMILY: &str = r"^RS-(\w+)-(\w+)$";

/// EC2-style locations: `AWSEC2-<account>-<region>`
pub const AWS_EC2_FAMILY: &str = r"^AWSEC2-(\w+)-(\w+)$";

/// Explicit location → resolver table
#[derive(Default, Clone)]
pub struct ResolverRegistry {
    families: Vec<(Regex, Arc<dyn HostResolver>)>,
    types: BTreeMap<String, Arc<dyn HostResolver>>,
}

impl ResolverRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Route every location matching `pattern` to `resolver`
    pub fn register_family(
        &mut self,
        pattern: &str,
        resolver: Arc<dyn HostResolver>,
    ) -> Result<(), regex::Error> {
        self.families.push((Regex::new(pattern)?, resolver));
        Ok(())
    }

    /// Route the exact location `type_name` to `resolver`
    pub fn register_type(&mut self, type_name: impl Into<String>, resolver: Arc<dyn HostResolver>) {
        self.types.insert(type_name.into(), resolver);
    }

    /// Resolver for a location, or `ResolverNotFound`
    pub fn resolve(&self, location: &str) -> NagstageResult<Arc<dyn HostResolver>> {
        self.families
            .iter()
            .find(|(pattern, _)| pattern.is_match(location))
            .map(|(_, resolver)| resolver)
            .or_else(|| self.types.get(location))
            .cloned()
            .ok_or_else(|| NagstageError::ResolverNotFound {
                location: location.to_string(),
            })
    }

    pub fn is_empty(&self) -> bool {
        self.families.is_empty() && self.types.is_empty()
    }
}

impl std::fmt::Debug for ResolverRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolverRegistry")
            .field(
                "families",
                &self.families.iter().map(|(p, r)| (p.as_str(), r.name())).collect::<Vec<_>>(),
            )
            .field("types", &self.types.keys().collect::<Vec<_>>())
            .finish()
    }
}
