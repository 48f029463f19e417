//! Configuration type definitions

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{ConfigWarning, Layout};
use crate::error::NagstageResult;

use super::loader;

/// Staging and production trees
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    pub staging_root: PathBuf,
    pub production_root: PathBuf,
    /// Object directory name inside both trees
    pub object_dir: String,
    pub gearman_root: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            staging_root: PathBuf::from("/tmp/saigon"),
            production_root: PathBuf::from("/usr/local/nagios/etc"),
            object_dir: "objects".to_string(),
            gearman_root: PathBuf::from("/usr/local/etc"),
        }
    }
}

/// External programs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BinariesConfig {
    pub checker: PathBuf,
    pub service_control: PathBuf,
}

impl Default for BinariesConfig {
    fn default() -> Self {
        Self {
            checker: PathBuf::from("/usr/local/nagios/bin/nagios"),
            service_control: PathBuf::from("/etc/init.d/nagios"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Testing template on disk; the packaged one is used when unset
    pub template: Option<PathBuf>,
    pub check_result_path: String,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            template: None,
            check_result_path: crate::application::validate::DEFAULT_CHECK_RESULT_PATH.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostsConfig {
    /// `use` template for hosts that name none
    pub default_template: String,
}

impl Default for HostsConfig {
    fn default() -> Self {
        Self {
            default_template: crate::domain::services::DEFAULT_HOST_TEMPLATE.to_string(),
        }
    }
}

/// Process-level switch for sharding live ingestion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ShardingSwitch {
    pub enabled: bool,
    pub position: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourcesConfig {
    /// Root of the file-backed deployment store
    pub root: PathBuf,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("/var/lib/nagstage"),
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub paths: PathsConfig,

    #[serde(default)]
    pub binaries: BinariesConfig,

    #[serde(default)]
    pub validation: ValidationConfig,

    #[serde(default)]
    pub hosts: HostsConfig,

    #[serde(default)]
    pub sharding: ShardingSwitch,

    #[serde(default)]
    pub sources: SourcesConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> NagstageResult<Self> {
        let (config, _warnings) = loader::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> NagstageResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Load from an explicit path, `NAGSTAGE_CONFIG`, the user config, or
    /// defaults, then apply environment overrides
    pub fn discover(explicit: Option<&Path>) -> NagstageResult<(Self, Vec<ConfigWarning>)> {
        loader::discover(explicit)
    }

    /// Apply environment variable overrides (NAGSTAGE_* prefix)
    pub fn with_env_overrides(self) -> Self {
        loader::with_env_overrides(self)
    }

    pub fn layout(&self) -> Layout {
        Layout::new(
            &self.paths.staging_root,
            &self.paths.production_root,
            &self.paths.object_dir,
            &self.paths.gearman_root,
        )
    }

    /// Shard position for live ingestion, when the switch is on
    pub fn live_shard_position(&self) -> Option<u32> {
        self.sharding.enabled.then_some(self.sharding.position)
    }
}
