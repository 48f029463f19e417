//! Staged config inspection
//!
//! Reads back every artifact a build stages, gearman files included, for
//! display. `nagios.cfg` is read from its staged `nagios.cfg.in` input.

use serde::Serialize;

use crate::domain::entities::{Artifact, ArtifactFile};
use crate::domain::ports::FileSystem;
use crate::domain::value_objects::{ContentHash, Layout};
use crate::error::NagstageResult;

/// One staged artifact and its contents
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StagedConfig {
    pub name: String,
    /// `None` when the artifact is not staged
    pub contents: Option<String>,
    pub hash: Option<ContentHash>,
}

/// Staged artifacts of a deployment: object files, core files, then gearman
pub fn staged_configs<FS: FileSystem>(
    fs: &FS,
    layout: &Layout,
    deployment: &str,
) -> NagstageResult<Vec<StagedConfig>> {
    Artifact::staged_set()
        .map(|artifact| -> NagstageResult<StagedConfig> {
            let mut file = ArtifactFile::new(artifact, layout, deployment);
            let contents = if fs.exists(&file.staging_path) {
                let text = fs.read(&file.staging_path)?;
                file.hash = Some(ContentHash::from_content(&text));
                Some(text)
            } else {
                None
            };
            Ok(StagedConfig {
                name: file.name().to_string(),
                contents,
                hash: file.hash,
            })
        })
        .collect()
}
