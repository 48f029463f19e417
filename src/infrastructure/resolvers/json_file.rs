//! JSON file host resolver
//!
//! `srchparam` names a JSON file holding an object of host name → host
//! attributes. Registered under the `JsonFile` type name.

use std::fs;

use serde_json::{Map, Value};

use crate::domain::entities::{HostSearch, ObjectRecord};
use crate::domain::ports::{HostResolver, ResolvedHosts, ResolverError};

pub const JSON_FILE_TYPE: &str = "JsonFile";

#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFileResolver;

impl JsonFileResolver {
    pub fn new() -> Self {
        Self
    }
}

impl HostResolver for JsonFileResolver {
    fn name(&self) -> &str {
        JSON_FILE_TYPE
    }

    fn search(&self, search: &HostSearch) -> Result<ResolvedHosts, ResolverError> {
        if search.srchparam.is_empty() {
            return Err(ResolverError("empty search parameter".into()));
        }
        let text = fs::read_to_string(&search.srchparam)
            .map_err(|e| ResolverError(format!("{}: {}", search.srchparam, e)))?;
        let hosts: Map<String, Value> = serde_json::from_str(&text)
            .map_err(|e| ResolverError(format!("{}: {}", search.srchparam, e)))?;

        Ok(hosts
            .iter()
            .filter_map(|(host, attrs)| {
                let attrs = attrs.as_object()?;
                Some((host.clone(), ObjectRecord::from_json(attrs)))
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn reads_hosts_in_file_order() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("hosts.json");
        fs::write(
            &path,
            r#"{"web02": {"address": "10.0.0.2"}, "web01": {"address": "10.0.0.1"}, "junk": 3}"#,
        )
        .unwrap();

        let search = HostSearch::new(JSON_FILE_TYPE, path.to_string_lossy());
        let hosts = JsonFileResolver::new().search(&search).unwrap();

        let names: Vec<&str> = hosts.iter().map(|(h, _)| h.as_str()).collect();
        assert_eq!(names, vec!["web02", "web01"]);
        assert_eq!(hosts[1].1.get_str("address"), Some("10.0.0.1"));
    }

    #[test]
    fn missing_file_is_a_resolver_error() {
        let search = HostSearch::new(JSON_FILE_TYPE, "/nonexistent/hosts.json");
        assert!(JsonFileResolver::new().search(&search).is_err());
    }
}
