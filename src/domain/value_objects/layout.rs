//! Directory layout of staging and production trees
//!
//! ```text
//! <staging_root>/<deployment>/<object_dir>/*.cfg
//! <staging_root>/<deployment>/{resource.cfg, cgi.cfg, nagios.cfg.in, ...}
//! <production_root>/<object_dir>/*.cfg
//! <production_root>/{resource.cfg, cgi.cfg, nagios.cfg}
//! ```

use std::path::{Path, PathBuf};

/// Resolved roots for one installation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    staging_root: PathBuf,
    production_root: PathBuf,
    object_dir: String,
    gearman_root: PathBuf,
}

impl Layout {
    pub fn new(
        staging_root: impl Into<PathBuf>,
        production_root: impl Into<PathBuf>,
        object_dir: impl Into<String>,
        gearman_root: impl Into<PathBuf>,
    ) -> Self {
        Self {
            staging_root: staging_root.into(),
            production_root: production_root.into(),
            object_dir: object_dir.into(),
            gearman_root: gearman_root.into(),
        }
    }

    pub fn staging_root(&self) -> &Path {
        &self.staging_root
    }

    pub fn production_root(&self) -> &Path {
        &self.production_root
    }

    pub fn gearman_root(&self) -> &Path {
        &self.gearman_root
    }

    /// `<staging_root>/<deployment>`
    pub fn staging_dir(&self, deployment: &str) -> PathBuf {
        self.staging_root.join(deployment)
    }

    /// `<staging_root>/<deployment>/<object_dir>`
    pub fn staging_object_dir(&self, deployment: &str) -> PathBuf {
        self.staging_dir(deployment).join(&self.object_dir)
    }

    /// `<production_root>/<object_dir>`
    pub fn production_object_dir(&self) -> PathBuf {
        self.production_root.join(&self.object_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn staging_paths_include_deployment() {
        let layout = Layout::new("/tmp/saigon", "/usr/local/nagios/etc", "objects", "/usr/local/etc");
        assert_eq!(
            layout.staging_object_dir("prod"),
            PathBuf::from("/tmp/saigon/prod/objects")
        );
        assert_eq!(
            layout.production_object_dir(),
            PathBuf::from("/usr/local/nagios/etc/objects")
        );
    }
}
