//! Line-level formatting shared by every artifact

/// Opening lines of every generated file
pub const FILE_HEADER: &str = "# This file has been autogenerated, any changes you make to this file\n# will be overridden the next time the consumer runs\n\n";

/// Column the value starts at, counted after the leading tab
pub const VALUE_COLUMN: usize = 36;

/// Mode bits set on every written artifact
pub const ARTIFACT_MODE: u32 = 0o644;

/// One attribute line inside a `define` block.
///
/// Keys shorter than the value column are space-padded up to it; longer
/// keys are separated from the value by a single tab.
pub fn field_line(key: &str, value: &str) -> String {
    if key.len() >= VALUE_COLUMN {
        format!("\t{}\t{}\n", key, value)
    } else {
        format!("\t{}{}{}\n", key, " ".repeat(VALUE_COLUMN - key.len()), value)
    }
}

/// One `key=value` line of a flat settings file
pub fn setting_line(key: &str, value: &str) -> String {
    format!("{}={}\n", key, value)
}
