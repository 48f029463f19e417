//! Local host cache
//!
//! Snapshot of hosts resolved per resolver module, kept so a diff rebuild
//! can replay host imports without querying sources again.

use std::collections::BTreeMap;

use crate::domain::entities::ObjectRecord;

/// module → host → record
#[derive(Debug, Clone, Default)]
pub struct LocalCache {
    modules: BTreeMap<String, BTreeMap<String, ObjectRecord>>,
}

impl LocalCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remember a host resolved by `module`
    pub fn record(&mut self, module: &str, host: &str, record: ObjectRecord) {
        self.modules
            .entry(module.to_string())
            .or_default()
            .insert(host.to_string(), record);
    }

    /// Every cached host, ordered by module then host
    pub fn hosts(&self) -> impl Iterator<Item = (&str, &str, &ObjectRecord)> {
        self.modules.iter().flat_map(|(module, hosts)| {
            hosts
                .iter()
                .map(move |(host, record)| (module.as_str(), host.as_str(), record))
        })
    }

    pub fn clear(&mut self) {
        self.modules.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.modules.values().all(BTreeMap::is_empty)
    }

    /// Total number of cached hosts
    pub fn len(&self) -> usize {
        self.modules.values().map(BTreeMap::len).sum()
    }
}
