//! Config Writer
//!
//! Renders typed object collections into the Nagios object grammar and
//! writes them as artifacts. Rendering is pure and deterministic: the same
//! collections always produce the same bytes, which promotion relies on
//! when it compares hashes.

mod blocks;
mod flat;
mod format;

use std::path::Path;

use tracing::debug;

use crate::domain::entities::{ObjectCollection, ObjectKind};
use crate::domain::ports::FileSystem;
use crate::error::NagstageResult;

pub use blocks::MAX_CHECK_ARGS;
pub use flat::GearmanConfigs;
pub use format::{field_line, setting_line, ARTIFACT_MODE, FILE_HEADER, VALUE_COLUMN};

/// Template injected into hosts that do not name one
pub const DEFAULT_HOST_TEMPLATE: &str = "generic-server";

/// Renders collections and writes them through a `FileSystem`
pub struct ConfigWriter<'a, FS: FileSystem> {
    fs: &'a FS,
    default_host_template: String,
}

impl<'a, FS: FileSystem> ConfigWriter<'a, FS> {
    pub fn new(fs: &'a FS) -> Self {
        Self {
            fs,
            default_host_template: DEFAULT_HOST_TEMPLATE.to_string(),
        }
    }

    pub fn with_default_host_template(mut self, template: impl Into<String>) -> Self {
        self.default_host_template = template.into();
        self
    }

    /// Full file text for a collection, header included.
    ///
    /// Gearman settings need two files; use `render_gearman` for them.
    pub fn render(&self, collection: &ObjectCollection) -> NagstageResult<String> {
        let body = if collection.kind().is_flat() {
            flat::render_settings(collection)?
        } else {
            blocks::render_blocks(collection, &self.default_host_template)?
        };
        Ok(format!("{}{}", FILE_HEADER, body))
    }

    /// Neb and worker file texts, headers included
    pub fn render_gearman(&self, collection: &ObjectCollection) -> NagstageResult<GearmanConfigs> {
        let configs = flat::render_gearman(collection)?;
        Ok(GearmanConfigs {
            neb: format!("{}{}", FILE_HEADER, configs.neb),
            worker: format!("{}{}", FILE_HEADER, configs.worker),
        })
    }

    /// Render and write one artifact
    pub fn serialize(&self, collection: &ObjectCollection, target: &Path) -> NagstageResult<()> {
        let text = self.render(collection)?;
        self.write(target, &text)?;
        debug!(
            kind = ?collection.kind(),
            records = collection.len(),
            path = %target.display(),
            "artifact written"
        );
        Ok(())
    }

    /// Render and write the gearman pair
    pub fn serialize_gearman(
        &self,
        collection: &ObjectCollection,
        neb_target: &Path,
        worker_target: &Path,
    ) -> NagstageResult<()> {
        debug_assert_eq!(collection.kind(), ObjectKind::ModGearmanConfig);
        let configs = self.render_gearman(collection)?;
        self.write(neb_target, &configs.neb)?;
        self.write(worker_target, &configs.worker)?;
        Ok(())
    }

    fn write(&self, target: &Path, text: &str) -> NagstageResult<()> {
        self.fs.write(target, text, ARTIFACT_MODE)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{FieldValue, ObjectRecord};
    use crate::infrastructure::fs::LocalFs;
    use std::os::unix::fs::PermissionsExt;
    use tempfile::tempdir;

    fn hosts() -> ObjectCollection {
        ObjectCollection::new(ObjectKind::Host).with(
            "web01",
            ObjectRecord::new()
                .with("host_name", FieldValue::scalar("web01"))
                .with("address", FieldValue::scalar("10.0.0.1")),
        )
    }

    #[test]
    fn render_starts_with_header() {
        let fs = LocalFs::new();
        let text = ConfigWriter::new(&fs).render(&hosts()).unwrap();
        assert!(text.starts_with(FILE_HEADER));
        assert!(text.contains("define host {\n"));
    }

    #[test]
    fn custom_default_template() {
        let fs = LocalFs::new();
        let text = ConfigWriter::new(&fs)
            .with_default_host_template("linux-server")
            .render(&hosts())
            .unwrap();
        assert!(text.contains(&field_line("use", "linux-server")));
    }

    #[test]
    fn serialize_sets_artifact_mode() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("hosts.cfg");
        let fs = LocalFs::new();
        ConfigWriter::new(&fs).serialize(&hosts(), &target).unwrap();

        let mode = std::fs::metadata(&target).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, ARTIFACT_MODE);
    }

    #[test]
    fn serialize_into_missing_dir_fails() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("missing").join("hosts.cfg");
        let fs = LocalFs::new();
        assert!(ConfigWriter::new(&fs).serialize(&hosts(), &target).is_err());
    }
}
