//! Promotion Result

use serde::Serialize;

use crate::domain::services::DiffSummary;

/// Outcome of one promotion
#[derive(Debug, Clone, Default, Serialize)]
pub struct PromotionReport {
    pub deployment: String,
    /// Artifacts moved over their live copy, in manifest order
    pub changed: Vec<String>,
    /// Staged artifacts identical to the live copy
    pub unchanged: Vec<String>,
    /// Manifest artifacts with nothing staged
    pub not_staged: Vec<String>,
}

impl PromotionReport {
    pub fn new(deployment: impl Into<String>) -> Self {
        Self {
            deployment: deployment.into(),
            ..Self::default()
        }
    }

    pub fn has_changes(&self) -> bool {
        !self.changed.is_empty()
    }
}

/// What promoting one artifact would do
#[derive(Debug, Clone, Serialize)]
pub struct PreviewEntry {
    pub artifact: String,
    pub staged: bool,
    pub changed: bool,
    pub summary: DiffSummary,
    /// Unified diff, live → staged; empty when unchanged
    #[serde(skip_serializing_if = "String::is_empty")]
    pub diff: String,
}
