//! Configuration module for nagstage
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (NAGSTAGE_*)
//! 3. Config file (`--config`, `NAGSTAGE_CONFIG`, or the user config dir)
//! 4. Built-in defaults (lowest priority)

mod loader;
mod types;

pub use crate::domain::value_objects::ConfigWarning;

pub use loader::{CONFIG_ENV, USER_CONFIG_FILE};
pub use types::{
    BinariesConfig, Config, HostsConfig, PathsConfig, ShardingSwitch, SourcesConfig,
    ValidationConfig,
};
