//! Typed object collections
//!
//! Every section of a deployment document becomes an `ObjectCollection`:
//! an `ObjectKind` plus ordered records of `FieldValue`s. Records keep the
//! order the source delivered them in; sorting is a serialization rule and
//! lives in the writer.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde_json::{Map, Value};

use crate::error::{NagstageError, NagstageResult};

/// How an encoded field must be treated when decoding fails
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /// Always base64 upstream; a decode failure is an error
    Required,
    /// Possibly base64; fall back to the raw value when decoding fails
    Optional,
}

/// A single attribute value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// Plain scalar
    Scalar(String),
    /// Ordered list of scalars
    List(Vec<String>),
    /// Reversibly encoded blob, decoded at write time
    Encoded { raw: String, encoding: Encoding },
}

impl FieldValue {
    pub fn scalar(value: impl Into<String>) -> Self {
        Self::Scalar(value.into())
    }

    pub fn list<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::List(values.into_iter().map(Into::into).collect())
    }

    /// Convert a JSON value. `null` and nested objects have no field form.
    ///
    /// Booleans render as `1`/`0`, numbers as written.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Array(items) => Some(Self::List(
                items.iter().filter_map(scalar_from_json).collect(),
            )),
            Value::Object(_) | Value::Null => None,
            other => scalar_from_json(other).map(Self::Scalar),
        }
    }

    /// Re-tag a scalar as encoded
    pub fn into_encoded(self, encoding: Encoding) -> Self {
        match self {
            Self::Scalar(raw) => Self::Encoded { raw, encoding },
            other => other,
        }
    }

    /// Empty string, empty list, or empty encoded blob
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Scalar(s) => s.is_empty(),
            Self::List(items) => items.iter().all(|s| s.is_empty()),
            Self::Encoded { raw, .. } => raw.is_empty(),
        }
    }

    /// Render the value as it appears in a config file.
    ///
    /// Lists are sorted ascending and comma-joined; encoded blobs are decoded.
    pub fn render(&self, key: &str) -> NagstageResult<String> {
        match self {
            Self::Scalar(s) => Ok(s.clone()),
            Self::List(items) => {
                let mut sorted: Vec<&str> = items
                    .iter()
                    .map(String::as_str)
                    .filter(|s| !s.is_empty())
                    .collect();
                sorted.sort_unstable();
                Ok(sorted.join(","))
            }
            Self::Encoded { raw, encoding } => match decode(raw) {
                Some(decoded) => Ok(decoded),
                None if *encoding == Encoding::Optional => Ok(raw.clone()),
                None => Err(NagstageError::InvalidEncoding {
                    key: key.to_string(),
                }),
            },
        }
    }
}

fn scalar_from_json(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(true) => Some("1".to_string()),
        Value::Bool(false) => Some("0".to_string()),
        _ => None,
    }
}

fn decode(raw: &str) -> Option<String> {
    let bytes = STANDARD.decode(raw.trim()).ok()?;
    String::from_utf8(bytes).ok()
}

/// One object: ordered (key, value) pairs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectRecord {
    fields: Vec<(String, FieldValue)>,
}

impl ObjectRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a record from a JSON object, keeping key order
    pub fn from_json(map: &Map<String, Value>) -> Self {
        let mut record = Self::new();
        for (key, value) in map {
            if let Some(field) = FieldValue::from_json(value) {
                record.set(key.clone(), field);
            }
        }
        record
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: FieldValue) -> Self {
        self.set(key, value);
        self
    }

    /// Insert or replace a field, keeping the original position on replace
    pub fn set(&mut self, key: impl Into<String>, value: FieldValue) {
        let key = key.into();
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((key, value)),
        }
    }

    /// Add a field after the existing ones, even when the key repeats
    pub fn append(&mut self, key: impl Into<String>, value: FieldValue) {
        self.fields.push((key.into(), value));
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Scalar value of a field, if it is a non-empty scalar
    pub fn get_str(&self, key: &str) -> Option<&str> {
        match self.get(key) {
            Some(FieldValue::Scalar(s)) if !s.is_empty() => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn remove(&mut self, key: &str) -> Option<FieldValue> {
        let index = self.fields.iter().position(|(k, _)| k == key)?;
        Some(self.fields.remove(index).1)
    }

    /// Whether a field is present with a non-empty value
    pub fn has_value(&self, key: &str) -> bool {
        self.get(key).is_some_and(|v| !v.is_empty())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Identifier of a record inside its collection
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum RecordKey {
    Name(String),
    Index(usize),
}

impl std::fmt::Display for RecordKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordKey::Name(name) => write!(f, "{}", name),
            RecordKey::Index(i) => write!(f, "{}", i),
        }
    }
}

/// Object types known to the writer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    Timeperiod,
    Command,
    ContactTemplate,
    Contact,
    ContactGroup,
    HostTemplate,
    HostGroup,
    ServiceTemplate,
    ServiceGroup,
    Host,
    Service,
    ServiceDependency,
    ServiceEscalation,
    ResourceConfig,
    CgiConfig,
    MainConfig,
    ModGearmanConfig,
}

/// cgi.cfg keys that may arrive base64 encoded
const CGI_ENCODED_KEYS: &[&str] = &[
    "main_config_file",
    "physical_html_path",
    "ping_syntax",
    "url_html_path",
    "splunk_url",
];

/// nagios.cfg keys that always arrive base64 encoded
const MAIN_ENCODED_KEYS: &[&str] = &[
    "broker_module",
    "cfg_dir",
    "check_result_path",
    "command_file",
    "debug_file",
    "host_perfdata_command",
    "host_perfdata_file",
    "host_perfdata_file_processing_command",
    "host_perfdata_file_template",
    "illegal_macro_output_chars",
    "illegal_object_name_chars",
    "lock_file",
    "log_archive_path",
    "log_file",
    "object_cache_file",
    "ochp_command",
    "ocsp_command",
    "p1_file",
    "precached_object_file",
    "resource_file",
    "service_perfdata_command",
    "service_perfdata_file",
    "service_perfdata_file_processing_command",
    "service_perfdata_file_template",
    "state_retention_file",
    "status_file",
    "temp_file",
    "temp_path",
];

/// Prefix of numbered broker module keys in nagios.cfg sources
pub const BROKER_MODULE_PREFIX: &str = "broker_module_";

impl ObjectKind {
    /// Word used after `define`, or `None` for flat `key=value` files
    pub fn define_name(&self) -> Option<&'static str> {
        match self {
            ObjectKind::Timeperiod => Some("timeperiod"),
            ObjectKind::Command => Some("command"),
            ObjectKind::ContactTemplate | ObjectKind::Contact => Some("contact"),
            ObjectKind::ContactGroup => Some("contactgroup"),
            ObjectKind::HostTemplate | ObjectKind::Host => Some("host"),
            ObjectKind::HostGroup => Some("hostgroup"),
            ObjectKind::ServiceTemplate | ObjectKind::Service => Some("service"),
            ObjectKind::ServiceGroup => Some("servicegroup"),
            ObjectKind::ServiceDependency => Some("servicedependency"),
            ObjectKind::ServiceEscalation => Some("serviceescalation"),
            ObjectKind::ResourceConfig
            | ObjectKind::CgiConfig
            | ObjectKind::MainConfig
            | ObjectKind::ModGearmanConfig => None,
        }
    }

    /// Whether records of this kind come from a flat settings map
    pub fn is_flat(&self) -> bool {
        self.define_name().is_none()
    }

    /// How a field of this kind is encoded upstream, if at all
    pub fn encoding_of(&self, key: &str) -> Option<Encoding> {
        match self {
            ObjectKind::Command if key == "command_line" => Some(Encoding::Required),
            ObjectKind::ResourceConfig => Some(Encoding::Required),
            ObjectKind::CgiConfig if CGI_ENCODED_KEYS.contains(&key) => Some(Encoding::Optional),
            ObjectKind::MainConfig
                if MAIN_ENCODED_KEYS.contains(&key) || key.starts_with(BROKER_MODULE_PREFIX) =>
            {
                Some(Encoding::Required)
            }
            ObjectKind::ModGearmanConfig if key == "logfile" || key == "p1_file" => {
                Some(Encoding::Required)
            }
            _ => None,
        }
    }
}

/// A named type plus its records
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectCollection {
    kind: ObjectKind,
    records: Vec<(RecordKey, ObjectRecord)>,
}

impl ObjectCollection {
    pub fn new(kind: ObjectKind) -> Self {
        Self {
            kind,
            records: Vec::new(),
        }
    }

    pub fn kind(&self) -> ObjectKind {
        self.kind
    }

    /// Append a name-keyed record
    pub fn insert(&mut self, name: impl Into<String>, record: ObjectRecord) {
        self.records.push((RecordKey::Name(name.into()), record));
    }

    /// Append an index-keyed record
    pub fn push(&mut self, record: ObjectRecord) {
        let index = self.records.len();
        self.records.push((RecordKey::Index(index), record));
    }

    /// Builder-style name-keyed insert
    pub fn with(mut self, name: impl Into<String>, record: ObjectRecord) -> Self {
        self.insert(name, record);
        self
    }

    pub fn records(&self) -> impl Iterator<Item = (&RecordKey, &ObjectRecord)> {
        self.records.iter().map(|(k, r)| (k, r))
    }

    pub fn get(&self, name: &str) -> Option<&ObjectRecord> {
        self.records
            .iter()
            .find(|(k, _)| matches!(k, RecordKey::Name(n) if n == name))
            .map(|(_, r)| r)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn from_json_keeps_zero_and_false() {
        assert_eq!(FieldValue::from_json(&json!(0)), Some(FieldValue::scalar("0")));
        assert_eq!(FieldValue::from_json(&json!(false)), Some(FieldValue::scalar("0")));
        assert_eq!(FieldValue::from_json(&json!(true)), Some(FieldValue::scalar("1")));
        assert_eq!(FieldValue::from_json(&Value::Null), None);
    }

    #[test]
    fn list_renders_sorted_and_joined() {
        let value = FieldValue::list(["web", "app", "db"]);
        assert_eq!(value.render("hostgroups").unwrap(), "app,db,web");
    }

    #[test]
    fn required_encoding_decodes() {
        let value = FieldValue::scalar("L2Jpbi90cnVl").into_encoded(Encoding::Required);
        assert_eq!(value.render("command_line").unwrap(), "/bin/true");
    }

    #[test]
    fn required_encoding_rejects_garbage() {
        let value = FieldValue::scalar("not base64!").into_encoded(Encoding::Required);
        let err = value.render("command_line").unwrap_err();
        assert!(matches!(err, NagstageError::InvalidEncoding { key } if key == "command_line"));
    }

    #[test]
    fn optional_encoding_falls_back_to_raw() {
        let value = FieldValue::scalar("/usr/local/nagios/etc/nagios.cfg")
            .into_encoded(Encoding::Optional);
        assert_eq!(
            value.render("main_config_file").unwrap(),
            "/usr/local/nagios/etc/nagios.cfg"
        );
    }

    #[test]
    fn record_set_replaces_in_place() {
        let mut record = ObjectRecord::new()
            .with("a", FieldValue::scalar("1"))
            .with("b", FieldValue::scalar("2"));
        record.set("a", FieldValue::scalar("3"));
        let keys: Vec<&str> = record.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(record.get_str("a"), Some("3"));
    }

    #[test]
    fn encoding_rules_per_kind() {
        assert_eq!(
            ObjectKind::MainConfig.encoding_of("broker_module_2"),
            Some(Encoding::Required)
        );
        assert_eq!(ObjectKind::MainConfig.encoding_of("log_level"), None);
        assert_eq!(
            ObjectKind::CgiConfig.encoding_of("splunk_url"),
            Some(Encoding::Optional)
        );
        assert_eq!(ObjectKind::Command.encoding_of("command_name"), None);
    }
}
