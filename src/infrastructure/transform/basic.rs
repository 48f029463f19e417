//! Basic host/service transformer
//!
//! A straightforward expansion engine: hosts are keyed by name, node
//! templates attach services to hosts whose names match a pattern, and
//! dependencies/escalations survive only while their hosts do.

use std::collections::{BTreeMap, BTreeSet};

use regex::Regex;
use sha2::{Digest, Sha256};
use tracing::warn;

use crate::domain::entities::{FieldValue, ObjectCollection, ObjectKind, ObjectRecord, ShardingConfig};
use crate::domain::ports::HostTransformer;

/// Placeholder replaced by the host name in alias templates
pub const HOST_PLACEHOLDER: &str = "%HOST%";

#[derive(Debug, Default)]
pub struct BasicTransformer {
    alias_template: Option<String>,
    negate: Option<Regex>,
    sharding: Option<ShardingConfig>,
    hosts: BTreeMap<String, ObjectRecord>,
    services: Vec<(String, ObjectRecord)>,
    attachments: Vec<(Regex, Vec<String>)>,
    dependencies: Vec<(String, ObjectRecord)>,
    escalations: Vec<(String, ObjectRecord)>,
}

impl BasicTransformer {
    pub fn new() -> Self {
        Self::default()
    }

    fn admits(&self, host: &str, record: &ObjectRecord) -> bool {
        if self.negate.as_ref().is_some_and(|re| re.is_match(host)) {
            return false;
        }
        match &self.sharding {
            Some(sharding) => {
                let value = record.get_str(sharding.key()).unwrap_or(host);
                shard_of(value, sharding.count()) == sharding.position()
            }
            None => true,
        }
    }

    fn attached_hosts(&self, name: &str, service: &ObjectRecord, hosts: &[String]) -> Vec<String> {
        let description = service.get_str("service_description");
        let mut matched = BTreeSet::new();

        for (pattern, services) in &self.attachments {
            let carries = services
                .iter()
                .any(|s| s == name || Some(s.as_str()) == description);
            if carries {
                matched.extend(hosts.iter().filter(|h| pattern.is_match(h)).cloned());
            }
        }
        for host in field_items(service.get("host_name")) {
            if hosts.contains(&host) {
                matched.insert(host);
            }
        }
        matched.into_iter().collect()
    }
}

/// Shard index of a key value: SHA-256 prefix modulo `count`
pub fn shard_of(value: &str, count: u32) -> u32 {
    if count == 0 {
        return 0;
    }
    let digest = Sha256::digest(value.as_bytes());
    let mut prefix = [0u8; 8];
    prefix.copy_from_slice(&digest[..8]);
    (u64::from_be_bytes(prefix) % u64::from(count)) as u32
}

fn field_items(value: Option<&FieldValue>) -> Vec<String> {
    match value {
        Some(FieldValue::Scalar(s)) => s
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
        Some(FieldValue::List(items)) => items.iter().filter(|s| !s.is_empty()).cloned().collect(),
        _ => Vec::new(),
    }
}

fn host_names(hosts: &ObjectCollection) -> Vec<String> {
    hosts.records().map(|(key, _)| key.to_string()).collect()
}

/// Keep records whose `host_name` is absent or names known hosts
fn filter_by_hosts(
    kind: ObjectKind,
    records: &[(String, ObjectRecord)],
    hosts: &[String],
) -> ObjectCollection {
    let mut collection = ObjectCollection::new(kind);
    for (key, record) in records {
        if !record.has_value("host_name") {
            collection.insert(key.clone(), record.clone());
            continue;
        }
        let known: Vec<String> = field_items(record.get("host_name"))
            .into_iter()
            .filter(|h| hosts.contains(h))
            .collect();
        if known.is_empty() {
            continue;
        }
        let mut record = record.clone();
        record.set("host_name", FieldValue::List(known));
        collection.insert(key.clone(), record);
    }
    collection
}

impl HostTransformer for BasicTransformer {
    fn set_alias_template(&mut self, template: Option<&str>) {
        self.alias_template = template.filter(|t| !t.is_empty()).map(str::to_string);
    }

    fn set_global_negate(&mut self, negate: Option<&str>) {
        self.negate = negate
            .filter(|n| !n.is_empty())
            .and_then(|pattern| match Regex::new(pattern) {
                Ok(re) => Some(re),
                Err(err) => {
                    warn!(pattern, error = %err, "ignoring invalid deployment negate pattern");
                    None
                }
            });
    }

    fn enable_sharding(&mut self, sharding: &ShardingConfig) {
        self.sharding = Some(sharding.clone());
    }

    fn import_host(&mut self, host: &str, record: &ObjectRecord) {
        if host.is_empty() || !self.admits(host, record) {
            return;
        }
        let mut record = record.clone();
        record.remove("subdeployment");
        if !record.has_value("host_name") {
            record.set("host_name", FieldValue::scalar(host));
        }
        if !record.has_value("alias") {
            if let Some(template) = &self.alias_template {
                record.set(
                    "alias",
                    FieldValue::scalar(template.replace(HOST_PLACEHOLDER, host)),
                );
            }
        }
        self.hosts.insert(host.to_string(), record);
    }

    fn import_static_host(&mut self, record: &ObjectRecord) {
        if let Some(host) = record.get_str("host_name").map(str::to_string) {
            self.import_host(&host, record);
        }
    }

    fn scrub_hosts(&mut self) {
        self.hosts.retain(|_, record| record.has_value("address"));
    }

    fn import_services(&mut self, services: &ObjectCollection) {
        self.services.extend(
            services
                .records()
                .map(|(key, record)| (key.to_string(), record.clone())),
        );
    }

    fn import_node_templates(
        &mut self,
        templates: &[(String, ObjectRecord)],
        sub_deployment: Option<&str>,
    ) {
        for (key, template) in templates {
            if let (Some(active), Some(tag)) = (sub_deployment, template.get_str("subdeployment")) {
                if active != tag {
                    continue;
                }
            }
            let Some(pattern) = template.get_str("regex") else {
                continue;
            };
            match Regex::new(pattern) {
                Ok(re) => self
                    .attachments
                    .push((re, field_items(template.get("services")))),
                Err(err) => warn!(template = %key, error = %err, "ignoring node template"),
            }
        }
    }

    fn import_service_dependencies(&mut self, dependencies: &ObjectCollection) {
        self.dependencies.extend(
            dependencies
                .records()
                .map(|(key, record)| (key.to_string(), record.clone())),
        );
    }

    fn import_service_escalations(&mut self, escalations: &ObjectCollection) {
        self.escalations.extend(
            escalations
                .records()
                .map(|(key, record)| (key.to_string(), record.clone())),
        );
    }

    fn hosts(&self) -> ObjectCollection {
        let mut collection = ObjectCollection::new(ObjectKind::Host);
        for (name, record) in &self.hosts {
            collection.insert(name.clone(), record.clone());
        }
        collection
    }

    fn services(&self, hosts: &ObjectCollection) -> ObjectCollection {
        let names = host_names(hosts);
        let mut collection = ObjectCollection::new(ObjectKind::Service);
        for (key, service) in &self.services {
            let attached = self.attached_hosts(key, service, &names);
            if attached.is_empty() {
                continue;
            }
            let mut record = service.clone();
            record.remove("subdeployment");
            record.set("host_name", FieldValue::List(attached));
            collection.insert(key.clone(), record);
        }
        collection
    }

    fn service_dependencies(&self, hosts: &ObjectCollection) -> ObjectCollection {
        filter_by_hosts(
            ObjectKind::ServiceDependency,
            &self.dependencies,
            &host_names(hosts),
        )
    }

    fn service_escalations(&self, hosts: &ObjectCollection) -> ObjectCollection {
        filter_by_hosts(
            ObjectKind::ServiceEscalation,
            &self.escalations,
            &host_names(hosts),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn host(address: &str) -> ObjectRecord {
        ObjectRecord::new().with("address", FieldValue::scalar(address))
    }

    fn template(regex: &str, services: &[&str]) -> (String, ObjectRecord) {
        (
            regex.to_string(),
            ObjectRecord::new()
                .with("regex", FieldValue::scalar(regex))
                .with("services", FieldValue::list(services.iter().copied())),
        )
    }

    #[test]
    fn alias_template_substitutes_host() {
        let mut t = BasicTransformer::new();
        t.set_alias_template(Some("%HOST% (web)"));
        t.import_host("web01", &host("10.0.0.1"));

        let hosts = t.hosts();
        let record = hosts.get("web01").unwrap();
        assert_eq!(record.get_str("alias"), Some("web01 (web)"));
        assert_eq!(record.get_str("host_name"), Some("web01"));
    }

    #[test]
    fn negate_excludes_matching_hosts() {
        let mut t = BasicTransformer::new();
        t.set_global_negate(Some("^db"));
        t.import_host("db01", &host("10.0.0.9"));
        t.import_host("web01", &host("10.0.0.1"));
        assert_eq!(host_names(&t.hosts()), vec!["web01"]);
    }

    #[test]
    fn sharding_partitions_hosts() {
        let names: Vec<String> = (0..20).map(|i| format!("web{:02}", i)).collect();
        let mut total = 0;
        for position in 0..3 {
            let mut t = BasicTransformer::new();
            t.enable_sharding(&ShardingConfig::new("host_name", 3, position));
            for name in &names {
                t.import_host(name, &host("10.0.0.1"));
            }
            for kept in host_names(&t.hosts()) {
                assert_eq!(shard_of(&kept, 3), position);
            }
            total += t.hosts().len();
        }
        assert_eq!(total, names.len());
    }

    #[test]
    fn scrub_drops_hosts_without_address() {
        let mut t = BasicTransformer::new();
        t.import_host("web01", &host("10.0.0.1"));
        t.import_host("ghost", &ObjectRecord::new());
        t.scrub_hosts();
        assert_eq!(host_names(&t.hosts()), vec!["web01"]);
    }

    #[test]
    fn static_hosts_key_by_host_name() {
        let mut t = BasicTransformer::new();
        t.import_static_host(&host("10.0.0.5").with("host_name", FieldValue::scalar("lb01")));
        t.import_static_host(&host("10.0.0.6"));
        assert_eq!(host_names(&t.hosts()), vec!["lb01"]);
    }

    #[test]
    fn node_templates_attach_services() {
        let mut t = BasicTransformer::new();
        t.import_host("web01", &host("10.0.0.1"));
        t.import_host("web02", &host("10.0.0.2"));
        t.import_host("db01", &host("10.0.0.3"));
        t.import_services(&ObjectCollection::new(ObjectKind::Service).with(
            "ping",
            ObjectRecord::new().with("service_description", FieldValue::scalar("PING")),
        ));
        t.import_node_templates(&[template("^web", &["ping"])], None);

        let hosts = t.hosts();
        let services = t.services(&hosts);
        let ping = services.get("ping").unwrap();
        assert_eq!(
            ping.get("host_name"),
            Some(&FieldValue::list(["web01", "web02"]))
        );
    }

    #[test]
    fn node_templates_respect_sub_deployment() {
        let mut t = BasicTransformer::new();
        t.import_host("web01", &host("10.0.0.1"));
        t.import_services(
            &ObjectCollection::new(ObjectKind::Service).with("ping", ObjectRecord::new()),
        );
        let (key, record) = template(".*", &["ping"]);
        let tagged = record.with("subdeployment", FieldValue::scalar("west"));
        t.import_node_templates(&[(key, tagged)], Some("east"));

        assert!(t.services(&t.hosts()).is_empty());
    }

    #[test]
    fn dependencies_need_known_hosts() {
        let mut t = BasicTransformer::new();
        t.import_host("web01", &host("10.0.0.1"));
        t.import_service_dependencies(
            &ObjectCollection::new(ObjectKind::ServiceDependency)
                .with("known", ObjectRecord::new().with("host_name", FieldValue::scalar("web01")))
                .with("gone", ObjectRecord::new().with("host_name", FieldValue::scalar("db09")))
                .with("global", ObjectRecord::new().with("service_description", FieldValue::scalar("PING"))),
        );

        let deps = t.service_dependencies(&t.hosts());
        assert!(deps.contains("known"));
        assert!(deps.contains("global"));
        assert!(!deps.contains("gone"));
    }
}
