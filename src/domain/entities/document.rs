//! Deployment document
//!
//! The desired-state description both ingestion sources deliver. Every
//! section is optional; sections may arrive as a JSON object (name-keyed) or
//! a JSON array (index-ordered).

use serde::Deserialize;
use serde_json::{Map, Value};

use super::deployment::ShardingConfig;
use super::object::{FieldValue, ObjectCollection, ObjectKind, ObjectRecord};
use crate::error::{NagstageError, NagstageResult};

/// Deployment-wide settings that steer the transformer
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MiscSettings {
    #[serde(default)]
    pub aliastemplate: Option<String>,
    #[serde(default)]
    pub deploynegate: Option<String>,
    #[serde(default)]
    pub ensharding: Option<String>,
    #[serde(default)]
    pub shardkey: Option<String>,
    #[serde(default)]
    pub shardcount: Option<Value>,
}

impl MiscSettings {
    /// Sharding tuple when the document turns it on
    pub fn sharding(&self, position: u32) -> Option<ShardingConfig> {
        if self.ensharding.as_deref() != Some("on") {
            return None;
        }
        let key = self.shardkey.clone()?;
        let count = self
            .shardcount
            .as_ref()
            .and_then(json_u32)
            .filter(|n| *n > 0)?;
        Some(ShardingConfig::new(key, count, position))
    }
}

pub(crate) fn json_u32(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// One host-search source: where and how to look hosts up
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HostSearch {
    /// Resolver identifier (`RS-<a>-<b>`, `AWSEC2-<a>-<b>`, or a type name)
    pub location: String,
    /// Resolver-specific search parameter
    #[serde(default, alias = "searchparam")]
    pub srchparam: String,
    #[serde(default)]
    pub subdeployment: Option<String>,
    /// Anything else the resolver may need
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl HostSearch {
    pub fn new(location: impl Into<String>, srchparam: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            srchparam: srchparam.into(),
            subdeployment: None,
            extra: Map::new(),
        }
    }
}

/// The full desired-state document
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeploymentDocument {
    #[serde(default)]
    pub miscsettings: MiscSettings,
    #[serde(default)]
    pub timeperiods: Value,
    #[serde(default)]
    pub commands: Value,
    #[serde(default)]
    pub contacttemplates: Value,
    #[serde(default)]
    pub contacts: Value,
    #[serde(default)]
    pub contactgroups: Value,
    #[serde(default)]
    pub hosttemplates: Value,
    #[serde(default)]
    pub hostgroups: Value,
    #[serde(default)]
    pub servicetemplates: Value,
    #[serde(default)]
    pub servicegroups: Value,
    #[serde(default)]
    pub resourcecfg: Value,
    #[serde(default)]
    pub cgicfg: Value,
    #[serde(default)]
    pub modgearmancfg: Value,
    #[serde(default)]
    pub nagioscfg: Value,
    #[serde(default)]
    pub hostsearches: Value,
    #[serde(default)]
    pub statichosts: Value,
    #[serde(default)]
    pub services: Value,
    #[serde(default)]
    pub nodetemplates: Value,
    #[serde(default)]
    pub servicedependencies: Value,
    #[serde(default)]
    pub serviceescalations: Value,
}

impl DeploymentDocument {
    /// Parse a document from JSON text
    pub fn from_json_str(text: &str) -> NagstageResult<Self> {
        serde_json::from_str(text).map_err(|e| NagstageError::InvalidDocument(e.to_string()))
    }

    /// Host searches in document order, keyed by their source id.
    ///
    /// Each entry parses on its own so one malformed search does not hide
    /// the others.
    pub fn host_searches(&self) -> Vec<(String, NagstageResult<HostSearch>)> {
        section_entries(&self.hostsearches)
            .into_iter()
            .map(|(key, value)| {
                let search = HostSearch::deserialize(value).map_err(|e| {
                    NagstageError::InvalidDocument(format!("hostsearches.{}: {}", key, e))
                });
                (key, search)
            })
            .collect()
    }

    /// Static host records in document order, with their sub-deployment tag
    pub fn static_hosts(&self) -> Vec<(String, Option<String>, ObjectRecord)> {
        section_entries(&self.statichosts)
            .into_iter()
            .filter_map(|(key, value)| {
                let map = value.as_object()?;
                let tag = map
                    .get("subdeployment")
                    .and_then(Value::as_str)
                    .map(str::to_string);
                Some((key, tag, ObjectRecord::from_json(map)))
            })
            .collect()
    }

    /// Node template records in document order
    pub fn node_templates(&self) -> Vec<(String, ObjectRecord)> {
        section_entries(&self.nodetemplates)
            .into_iter()
            .filter_map(|(key, value)| Some((key, ObjectRecord::from_json(value.as_object()?))))
            .collect()
    }
}

/// Entries of a section: object → name keys, array → index keys, else none
pub(crate) fn section_entries(section: &Value) -> Vec<(String, &Value)> {
    match section {
        Value::Object(map) => map.iter().map(|(k, v)| (k.clone(), v)).collect(),
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(i, v)| (i.to_string(), v))
            .collect(),
        _ => Vec::new(),
    }
}

/// Whether a section has no entries at all
pub fn section_is_empty(section: &Value) -> bool {
    match section {
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::String(s) => s.is_empty(),
        Value::Null => true,
        _ => false,
    }
}

/// Turn a document section into a typed collection.
///
/// Block kinds take one record per entry. Flat kinds (resource, cgi, main,
/// gearman) take a single settings map and become one record. Encoded fields
/// are tagged here so the writer only has to render.
pub fn collection_from_section(kind: ObjectKind, section: &Value) -> ObjectCollection {
    let mut collection = ObjectCollection::new(kind);
    if kind.is_flat() {
        if let Value::Object(map) = section {
            collection.insert(String::new(), tag_encoded(kind, ObjectRecord::from_json(map)));
        }
        return collection;
    }

    for (name, value) in section_entries(section) {
        let Some(map) = value.as_object() else {
            continue;
        };
        let mut record = tag_encoded(kind, ObjectRecord::from_json(map));
        if kind == ObjectKind::Timeperiod {
            record.remove("times");
            append_time_ranges(&mut record, map.get("times"));
        }
        collection.insert(name, record);
    }
    collection
}

fn tag_encoded(kind: ObjectKind, record: ObjectRecord) -> ObjectRecord {
    let mut tagged = ObjectRecord::new();
    for (key, value) in record.iter() {
        let value = match kind.encoding_of(key) {
            Some(encoding) => value.clone().into_encoded(encoding),
            None => value.clone(),
        };
        tagged.set(key, value);
    }
    tagged
}

fn append_time_ranges(record: &mut ObjectRecord, times: Option<&Value>) {
    let Some(times) = times else {
        return;
    };
    for (_, entry) in section_entries(times) {
        let directive = entry.get("directive").and_then(Value::as_str);
        let range = entry.get("range").and_then(Value::as_str);
        if let (Some(directive), Some(range)) = (directive, range) {
            record.append(directive, FieldValue::scalar(range));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_minimal_document() {
        let doc = DeploymentDocument::from_json_str("{}").unwrap();
        assert!(section_is_empty(&doc.services));
        assert!(doc.host_searches().is_empty());
    }

    #[test]
    fn sharding_requires_on_flag() {
        let misc: MiscSettings = serde_json::from_value(json!({
            "ensharding": "off", "shardkey": "host_name", "shardcount": 4
        }))
        .unwrap();
        assert!(misc.sharding(1).is_none());

        let misc: MiscSettings = serde_json::from_value(json!({
            "ensharding": "on", "shardkey": "host_name", "shardcount": "4"
        }))
        .unwrap();
        let sharding = misc.sharding(1).unwrap();
        assert_eq!(sharding.count(), 4);
        assert_eq!(sharding.position(), 1);
    }

    #[test]
    fn zero_shard_count_disables_sharding() {
        let misc: MiscSettings = serde_json::from_value(json!({
            "ensharding": "on", "shardkey": "host_name", "shardcount": 0
        }))
        .unwrap();
        assert!(misc.sharding(0).is_none());
    }

    #[test]
    fn host_search_accepts_searchparam_alias() {
        let doc: DeploymentDocument = serde_json::from_value(json!({
            "hostsearches": {
                "a1": {"location": "JsonFile", "searchparam": "/tmp/hosts.json"}
            }
        }))
        .unwrap();
        let searches = doc.host_searches();
        assert_eq!(searches[0].1.as_ref().unwrap().srchparam, "/tmp/hosts.json");
    }

    #[test]
    fn timeperiod_times_become_trailing_fields() {
        let section = json!({
            "24x7": {
                "timeperiod_name": "24x7",
                "times": {
                    "t1": {"directive": "monday", "range": "00:00-24:00"},
                    "t2": {"directive": "tuesday", "range": "00:00-24:00"}
                },
                "alias": "Always"
            }
        });
        let collection = collection_from_section(ObjectKind::Timeperiod, &section);
        let record = collection.get("24x7").unwrap();
        let keys: Vec<&str> = record.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["timeperiod_name", "alias", "monday", "tuesday"]);
    }

    #[test]
    fn repeated_time_directives_each_keep_a_line() {
        let section = json!({
            "workhours": {
                "timeperiod_name": "workhours",
                "times": [
                    {"directive": "monday", "range": "09:00-12:00"},
                    {"directive": "monday", "range": "13:00-17:00"}
                ]
            }
        });
        let collection = collection_from_section(ObjectKind::Timeperiod, &section);
        let record = collection.get("workhours").unwrap();
        let fields: Vec<(&str, String)> = record
            .iter()
            .map(|(k, v)| (k, v.render(k).unwrap()))
            .collect();
        assert_eq!(
            fields,
            vec![
                ("timeperiod_name", "workhours".to_string()),
                ("monday", "09:00-12:00".to_string()),
                ("monday", "13:00-17:00".to_string()),
            ]
        );
    }

    #[test]
    fn flat_section_becomes_single_record() {
        let section = json!({"USER1": "L3Vzci9saWI=", "USER2": "c2VjcmV0"});
        let collection = collection_from_section(ObjectKind::ResourceConfig, &section);
        assert_eq!(collection.len(), 1);
        let (_, record) = collection.records().next().unwrap();
        assert!(matches!(record.get("USER1"), Some(FieldValue::Encoded { .. })));
    }

    #[test]
    fn array_sections_are_index_keyed() {
        let section = json!([{"host_name": "a"}, {"host_name": "b"}]);
        let entries = section_entries(&section);
        assert_eq!(entries[1].0, "1");
    }
}
