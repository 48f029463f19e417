//! Configuration loading

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::value_objects::ConfigWarning;
use crate::error::{NagstageError, NagstageResult};

use super::types::Config;

/// Environment variable naming a config file
pub const CONFIG_ENV: &str = "NAGSTAGE_CONFIG";

/// File name under the user config directory
pub const USER_CONFIG_FILE: &str = "nagstage/config.toml";

/// Every key the schema knows, for typo suggestions
const KNOWN_KEYS: &[&str] = &[
    "paths",
    "staging_root",
    "production_root",
    "object_dir",
    "gearman_root",
    "binaries",
    "checker",
    "service_control",
    "validation",
    "template",
    "check_result_path",
    "hosts",
    "default_template",
    "sharding",
    "enabled",
    "position",
    "sources",
    "root",
];

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> NagstageResult<(Config, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path)?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);

    let config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| NagstageError::Config {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|dotted| {
            let leaf = dotted.rsplit('.').next().unwrap_or(&dotted).to_string();
            ConfigWarning {
                file: path.to_path_buf(),
                line: find_line_number(&content, &leaf),
                suggestion: suggest_key(&leaf),
                key: dotted,
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Explicit path, then `NAGSTAGE_CONFIG`, then the user config, then defaults
pub fn discover(explicit: Option<&Path>) -> NagstageResult<(Config, Vec<ConfigWarning>)> {
    let from_env = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
    let path = match (explicit, from_env) {
        (Some(path), _) => Some(path.to_path_buf()),
        (None, Some(path)) => Some(path),
        (None, None) => dirs::config_dir()
            .map(|dir| dir.join(USER_CONFIG_FILE))
            .filter(|path| path.exists()),
    };

    let (config, warnings) = match path {
        Some(path) => load_with_warnings(&path)?,
        None => (Config::default(), Vec::new()),
    };
    Ok((with_env_overrides(config), warnings))
}

/// Apply environment variable overrides (NAGSTAGE_* prefix)
pub fn with_env_overrides(config: Config) -> Config {
    apply_overrides(config, |name| std::env::var_os(name).map(PathBuf::from))
}

pub(super) fn apply_overrides(
    mut config: Config,
    lookup: impl Fn(&str) -> Option<PathBuf>,
) -> Config {
    if let Some(path) = lookup("NAGSTAGE_STAGING_ROOT") {
        config.paths.staging_root = path;
    }
    if let Some(path) = lookup("NAGSTAGE_PRODUCTION_ROOT") {
        config.paths.production_root = path;
    }
    if let Some(path) = lookup("NAGSTAGE_CHECKER") {
        config.binaries.checker = path;
    }
    if let Some(path) = lookup("NAGSTAGE_SERVICE_CONTROL") {
        config.binaries.service_control = path;
    }
    if let Some(path) = lookup("NAGSTAGE_SOURCES_ROOT") {
        config.sources.root = path;
    }
    config
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    content
        .lines()
        .position(|line| line.trim_start().starts_with(needle))
        .map(|i| i + 1)
}

fn suggest_key(unknown: &str) -> Option<String> {
    KNOWN_KEYS
        .iter()
        .map(|candidate| (*candidate, levenshtein(unknown, candidate)))
        .min_by_key(|(_, dist)| *dist)
        .filter(|(_, dist)| *dist <= 2)
        .map(|(candidate, _)| candidate.to_string())
}

fn levenshtein(a: &str, b: &str) -> usize {
    let a = a.as_bytes();
    let b = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0usize; b.len() + 1];

    for (i, &ac) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b.iter().enumerate() {
            let cost = usize::from(ac != bc);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}
