//! Promotion Engine
//!
//! For each manifest artifact: skip when nothing is staged, skip when the
//! staged and live hashes match, otherwise move the staged file over the
//! live one. There is no cross-artifact transaction; an error leaves the
//! artifacts already moved in place.

use tracing::{debug, info};

use crate::domain::entities::{Artifact, ArtifactFile};
use crate::domain::ports::FileSystem;
use crate::domain::services::{diff_lines, unified};
use crate::domain::value_objects::Layout;
use crate::error::NagstageResult;
use crate::infrastructure::fs::PermissionGuard;

use super::result::{PreviewEntry, PromotionReport};

pub struct PromotionEngine<'a, FS: FileSystem> {
    fs: &'a FS,
    layout: &'a Layout,
}

impl<'a, FS: FileSystem> PromotionEngine<'a, FS> {
    pub fn new(fs: &'a FS, layout: &'a Layout) -> Self {
        Self { fs, layout }
    }

    /// Promote every changed artifact of a deployment
    pub fn promote(&self, deployment: &str) -> NagstageResult<PromotionReport> {
        PermissionGuard::new(self.fs, self.layout).prepare_production()?;

        let mut report = PromotionReport::new(deployment);
        for artifact in Artifact::promotion_manifest() {
            let file = ArtifactFile::new(artifact, self.layout, deployment);
            if !self.fs.exists(&file.staging_path) {
                report.not_staged.push(file.name().to_string());
                continue;
            }

            let staged = self.fs.hash(&file.staging_path)?;
            let live = self.fs.hash(&file.production_path)?;
            if staged == live {
                debug!(artifact = file.name(), "unchanged, skipping");
                report.unchanged.push(file.name().to_string());
                continue;
            }

            self.fs.rename(&file.staging_path, &file.production_path)?;
            info!(
                artifact = file.name(),
                hash = %staged,
                path = %file.production_path.display(),
                "promoted"
            );
            report.changed.push(file.name().to_string());
        }
        Ok(report)
    }

    /// What `promote` would change, without touching either tree
    pub fn preview(&self, deployment: &str) -> NagstageResult<Vec<PreviewEntry>> {
        let mut entries = Vec::new();
        for artifact in Artifact::promotion_manifest() {
            let file = ArtifactFile::new(artifact, self.layout, deployment);
            if !self.fs.exists(&file.staging_path) {
                entries.push(PreviewEntry {
                    artifact: file.name().to_string(),
                    staged: false,
                    changed: false,
                    summary: Default::default(),
                    diff: String::new(),
                });
                continue;
            }

            let staged = self.fs.read(&file.staging_path)?;
            let live = if self.fs.exists(&file.production_path) {
                self.fs.read(&file.production_path)?
            } else {
                String::new()
            };
            let changed = self.fs.hash(&file.staging_path)? != self.fs.hash(&file.production_path)?;
            let diff = if changed {
                unified(&live, &staged, file.name())
            } else {
                String::new()
            };

            entries.push(PreviewEntry {
                artifact: file.name().to_string(),
                staged: true,
                changed,
                summary: diff_lines(&live, &staged),
                diff,
            });
        }
        Ok(entries)
    }
}
