//! `define <type> { ... }` rendering

use crate::domain::entities::{FieldValue, ObjectCollection, ObjectKind, ObjectRecord};
use crate::error::NagstageResult;

use super::format::field_line;

/// Highest numbered check_command argument
pub const MAX_CHECK_ARGS: usize = 32;

const CHECK_ARG_PREFIX: &str = "carg";

/// How a kind's fields are laid out
#[derive(Debug, Clone, Copy)]
enum Layout {
    /// Exactly these fields, always, in this order
    Fixed(&'static [&'static str]),
    /// Source order is kept
    Ordered,
    /// Fields sorted by key
    Sorted,
}

/// Per-kind rendering rules
#[derive(Debug, Clone, Copy)]
struct Rules {
    layout: Layout,
    /// Keys never written
    skip: &'static [&'static str],
    /// When set, only these keys are written
    only: Option<&'static [&'static str]>,
    /// Fold `cargN` into `check_command`
    check_args: bool,
    /// Write a `name` line next to this key
    mirror_as_name: Option<&'static str>,
}

impl Rules {
    const fn sorted(skip: &'static [&'static str]) -> Self {
        Self {
            layout: Layout::Sorted,
            skip,
            only: None,
            check_args: false,
            mirror_as_name: None,
        }
    }

    fn for_kind(kind: ObjectKind) -> Self {
        match kind {
            ObjectKind::Timeperiod => Self {
                layout: Layout::Ordered,
                mirror_as_name: Some("timeperiod_name"),
                ..Self::sorted(&["deployment"])
            },
            ObjectKind::Command => Self {
                layout: Layout::Ordered,
                only: Some(&["command_name", "command_line"]),
                ..Self::sorted(&[])
            },
            ObjectKind::HostGroup => Self {
                layout: Layout::Fixed(&["hostgroup_name", "alias"]),
                ..Self::sorted(&[])
            },
            ObjectKind::ServiceGroup => Self {
                layout: Layout::Fixed(&["servicegroup_name", "alias"]),
                ..Self::sorted(&[])
            },
            ObjectKind::ServiceTemplate => Self {
                check_args: true,
                ..Self::sorted(&["deployment", "alias"])
            },
            ObjectKind::Service => Self {
                check_args: true,
                ..Self::sorted(&["name"])
            },
            ObjectKind::ContactTemplate
            | ObjectKind::Contact
            | ObjectKind::ContactGroup
            | ObjectKind::HostTemplate => Self::sorted(&["deployment"]),
            _ => Self::sorted(&[]),
        }
    }

    fn writes(&self, key: &str) -> bool {
        if self.skip.contains(&key) {
            return false;
        }
        if self.check_args && is_check_arg(key) {
            return false;
        }
        self.only.map_or(true, |only| only.contains(&key))
    }
}

fn is_check_arg(key: &str) -> bool {
    key.starts_with(CHECK_ARG_PREFIX)
}

/// Render a block collection. Hosts and services are ordered by record id.
pub fn render_blocks(
    collection: &ObjectCollection,
    default_host_template: &str,
) -> NagstageResult<String> {
    let define = collection.kind().define_name().unwrap_or("object");
    let rules = Rules::for_kind(collection.kind());

    let mut records: Vec<_> = collection.records().collect();
    if matches!(collection.kind(), ObjectKind::Host | ObjectKind::Service) {
        records.sort_by(|a, b| a.0.cmp(b.0));
    }

    let mut out = String::new();
    for (_, record) in records {
        out.push_str(&format!("define {} {{\n", define));
        out.push_str(&render_fields(&rules, record)?);
        if collection.kind() == ObjectKind::Host && !record.has_value("use") {
            out.push_str(&field_line("use", default_host_template));
        }
        out.push_str("}\n\n");
    }
    Ok(out)
}

fn render_fields(rules: &Rules, record: &ObjectRecord) -> NagstageResult<String> {
    let mut out = String::new();

    if let Layout::Fixed(keys) = rules.layout {
        for key in keys {
            let value = match record.get(key) {
                Some(value) => value.render(key)?,
                None => String::new(),
            };
            out.push_str(&field_line(key, &value));
        }
        return Ok(out);
    }

    let mut fields: Vec<(&str, &FieldValue)> = record.iter().collect();
    if let Layout::Sorted = rules.layout {
        fields.sort_by(|a, b| a.0.cmp(b.0));
    }

    for (key, value) in fields {
        if !rules.writes(key) || value.is_empty() {
            continue;
        }
        let mut rendered = value.render(key)?;
        if rules.check_args && key == "check_command" {
            rendered.push_str(&check_arguments(record)?);
        }
        if rules.mirror_as_name == Some(key) {
            out.push_str(&field_line("name", &rendered));
        }
        out.push_str(&field_line(key, &rendered));
    }
    Ok(out)
}

/// `!arg` suffix for every non-empty `carg1`..`carg32`, ascending
fn check_arguments(record: &ObjectRecord) -> NagstageResult<String> {
    let mut suffix = String::new();
    for i in 1..=MAX_CHECK_ARGS {
        let key = format!("{}{}", CHECK_ARG_PREFIX, i);
        if let Some(value) = record.get(&key).filter(|v| !v.is_empty()) {
            suffix.push('!');
            suffix.push_str(&value.render(&key)?);
        }
    }
    Ok(suffix)
}
