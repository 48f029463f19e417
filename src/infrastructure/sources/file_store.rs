//! File-backed deployment store
//!
//! Serves both ingestion interfaces from a directory of JSON documents:
//!
//! ```text
//! <root>/<deployment>.json                      live document
//! <root>/<deployment>/revisions/<revision>.json historical revisions
//! <root>/<deployment>/info.json                 {"shardkey", "shardcount"}
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value;

use crate::domain::entities::{json_u32, DeploymentDocument};
use crate::domain::ports::{DeploymentInfo, LiveApiClient, RevisionStore, SourceError};

#[derive(Debug, Clone)]
pub struct FileDeploymentStore {
    root: PathBuf,
}

#[derive(Debug, Deserialize)]
struct InfoFile {
    #[serde(default)]
    shardkey: Option<String>,
    #[serde(default)]
    shardcount: Option<Value>,
}

impl FileDeploymentStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn live_path(&self, deployment: &str) -> PathBuf {
        self.root.join(format!("{}.json", deployment))
    }

    pub fn revision_path(&self, deployment: &str, revision: &str) -> PathBuf {
        self.root
            .join(deployment)
            .join("revisions")
            .join(format!("{}.json", revision))
    }

    pub fn info_path(&self, deployment: &str) -> PathBuf {
        self.root.join(deployment).join("info.json")
    }

    fn read(&self, path: &Path) -> Result<String, SourceError> {
        fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => SourceError::NotFound(path.display().to_string()),
            _ => SourceError::Unavailable(format!("{}: {}", path.display(), e)),
        })
    }

    fn load_document(&self, path: &Path) -> Result<DeploymentDocument, SourceError> {
        let text = self.read(path)?;
        DeploymentDocument::from_json_str(&text)
            .map_err(|e| SourceError::Malformed(format!("{}: {}", path.display(), e)))
    }
}

impl LiveApiClient for FileDeploymentStore {
    // One document per deployment; sub-deployment filtering happens on import.
    fn fetch(
        &self,
        deployment: &str,
        _sub_deployment: Option<&str>,
    ) -> Result<DeploymentDocument, SourceError> {
        self.load_document(&self.live_path(deployment))
    }
}

impl RevisionStore for FileDeploymentStore {
    // Revision files always hold the full document.
    fn fetch(
        &self,
        deployment: &str,
        revision: &str,
        _include_disabled: bool,
    ) -> Result<DeploymentDocument, SourceError> {
        self.load_document(&self.revision_path(deployment, revision))
    }

    fn deployment_info(&self, deployment: &str) -> Result<DeploymentInfo, SourceError> {
        let path = self.info_path(deployment);
        let info: InfoFile = serde_json::from_str(&self.read(&path)?)
            .map_err(|e| SourceError::Malformed(format!("{}: {}", path.display(), e)))?;

        let shard_key = info
            .shardkey
            .filter(|k| !k.is_empty())
            .ok_or_else(|| SourceError::Malformed(format!("{}: missing shardkey", path.display())))?;
        let shard_count = info
            .shardcount
            .as_ref()
            .and_then(json_u32)
            .filter(|n| *n > 0)
            .ok_or_else(|| {
                SourceError::Malformed(format!("{}: missing or invalid shardcount", path.display()))
            })?;

        Ok(DeploymentInfo {
            shard_key,
            shard_count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn live_fetch_reads_deployment_document() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("prod.json"),
            r#"{"miscsettings": {"aliastemplate": "%HOST%"}}"#,
        )
        .unwrap();
        let store = FileDeploymentStore::new(dir.path());

        let doc = LiveApiClient::fetch(&store, "prod", None).unwrap();
        assert_eq!(doc.miscsettings.aliastemplate.as_deref(), Some("%HOST%"));
    }

    #[test]
    fn missing_live_document_is_not_found() {
        let dir = tempdir().unwrap();
        let store = FileDeploymentStore::new(dir.path());
        let err = LiveApiClient::fetch(&store, "nope", None).unwrap_err();
        assert!(matches!(err, SourceError::NotFound(_)));
    }

    #[test]
    fn revision_fetch_reads_revision_file() {
        let dir = tempdir().unwrap();
        let store = FileDeploymentStore::new(dir.path());
        let path = store.revision_path("prod", "12");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, r#"{"services": {"ping": {"name": "ping"}}}"#).unwrap();

        let doc = RevisionStore::fetch(&store, "prod", "12", true).unwrap();
        assert!(doc.services.is_object());
    }

    #[test]
    fn malformed_document_is_reported() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("prod.json"), "{not json").unwrap();
        let store = FileDeploymentStore::new(dir.path());
        let err = LiveApiClient::fetch(&store, "prod", None).unwrap_err();
        assert!(matches!(err, SourceError::Malformed(_)));
    }

    #[test]
    fn deployment_info_accepts_string_count() {
        let dir = tempdir().unwrap();
        let store = FileDeploymentStore::new(dir.path());
        fs::create_dir_all(dir.path().join("prod")).unwrap();
        fs::write(
            store.info_path("prod"),
            r#"{"shardkey": "host_name", "shardcount": "4"}"#,
        )
        .unwrap();

        let info = store.deployment_info("prod").unwrap();
        assert_eq!(info.shard_key, "host_name");
        assert_eq!(info.shard_count, 4);
    }

    #[test]
    fn deployment_info_rejects_zero_count() {
        let dir = tempdir().unwrap();
        let store = FileDeploymentStore::new(dir.path());
        fs::create_dir_all(dir.path().join("prod")).unwrap();
        fs::write(
            store.info_path("prod"),
            r#"{"shardkey": "host_name", "shardcount": 0}"#,
        )
        .unwrap();
        assert!(store.deployment_info("prod").is_err());
    }
}
