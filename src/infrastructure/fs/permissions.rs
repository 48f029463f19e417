//! Permission Guard
//!
//! Eligibility checks for the staging and production trees. Each check
//! creates what is missing with mode 0755, resets the mode, and confirms the
//! directory accepts new files. Callers run these before any other side
//! effect.

use std::path::Path;

use crate::domain::ports::FileSystem;
use crate::domain::value_objects::Layout;
use crate::error::{NagstageError, NagstageResult};

/// Mode for every directory the guard manages
pub const DIR_MODE: u32 = 0o755;

pub struct PermissionGuard<'a, FS: FileSystem> {
    fs: &'a FS,
    layout: &'a Layout,
}

impl<'a, FS: FileSystem> PermissionGuard<'a, FS> {
    pub fn new(fs: &'a FS, layout: &'a Layout) -> Self {
        Self { fs, layout }
    }

    /// `<staging>/<deployment>/<object_dir>` exists and is writable
    pub fn prepare_staging(&self, deployment: &str) -> NagstageResult<()> {
        let root = self.layout.staging_dir(deployment);
        let objects = self.layout.staging_object_dir(deployment);

        self.ensure_dir(&objects, "unable to make directory for staging at")?;
        self.chmod(&root)?;
        self.chmod(&objects)?;
        self.require_writable(&root, "write permissions aren't set up properly for")?;
        self.require_writable(&objects, "write permissions aren't set up properly for")
    }

    /// Production root and object dir exist and are writable
    pub fn prepare_production(&self) -> NagstageResult<()> {
        let root = self.layout.production_root();
        let objects = self.layout.production_object_dir();

        self.ensure_dir(&objects, "unable to make or find directory for")?;
        self.chmod(root)?;
        self.chmod(&objects)?;
        self.require_writable(&objects, "unable to write to directory")?;
        self.require_writable(root, "unable to write to directory")
    }

    /// Gearman config directory exists and is writable
    pub fn prepare_gearman(&self) -> NagstageResult<()> {
        let root = self.layout.gearman_root();
        self.ensure_dir(root, "unable to make or find directory for")?;
        self.chmod(root)?;
        self.require_writable(root, "unable to write to directory")
    }

    fn ensure_dir(&self, dir: &Path, reason: &str) -> NagstageResult<()> {
        if self.fs.exists(dir) {
            return Ok(());
        }
        self.fs
            .create_dir_all(dir, DIR_MODE)
            .map_err(|_| NagstageError::permission(dir, reason))
    }

    fn chmod(&self, dir: &Path) -> NagstageResult<()> {
        // A directory owned by someone else can still be writable for us.
        if let Err(err) = self.fs.set_mode(dir, DIR_MODE) {
            tracing::debug!(path = %dir.display(), error = %err, "unable to reset directory mode");
        }
        Ok(())
    }

    fn require_writable(&self, dir: &Path, reason: &str) -> NagstageResult<()> {
        if self.fs.is_writable(dir) {
            Ok(())
        } else {
            Err(NagstageError::permission(dir, reason))
        }
    }
}
