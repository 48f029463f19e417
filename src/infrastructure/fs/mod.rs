//! File System Implementations
//!
//! The local FileSystem port implementation and the directory checks built
//! on top of it.

mod local;
mod permissions;

pub use local::LocalFs;
pub use permissions::{PermissionGuard, DIR_MODE};
