//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `fs/` - Local file system and directory permission checks
//! - `process` - Blocking external command execution
//! - `sources/` - File-backed live/revision deployment store
//! - `resolvers/` - Host-search resolvers
//! - `transform/` - Host/service transformer

pub mod fs;
pub mod process;
pub mod resolvers;
pub mod sources;
pub mod transform;

// Re-export for convenience
pub use fs::{LocalFs, PermissionGuard};
pub use process::{run_captured, CommandOutcome};
pub use resolvers::{default_registry, JsonFileResolver};
pub use sources::FileDeploymentStore;
pub use transform::{basic_factory, BasicTransformer};
