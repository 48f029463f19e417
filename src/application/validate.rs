//! Validation Use Case
//!
//! Materializes a verification `nagios.cfg` for a staged deployment and runs
//! the checker binary against it:
//! - No staged `nagios.cfg.in`: fill the packaged testing template
//! - Staged `nagios.cfg.in`: copy it, pointing `cfg_dir` at the staged
//!   objects and `check_result_path` at a scratch directory

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use crate::domain::entities::Artifact;
use crate::domain::ports::FileSystem;
use crate::domain::services::ARTIFACT_MODE;
use crate::domain::value_objects::Layout;
use crate::error::{NagstageError, NagstageResult};
use crate::infrastructure::fs::PermissionGuard;
use crate::infrastructure::process::run_captured;

/// Testing configuration shipped with the binary
pub const TESTING_TEMPLATE: &str = include_str!("../assets/testing-nagios.cfg");

/// Default scratch directory for check results during verification
pub const DEFAULT_CHECK_RESULT_PATH: &str = "/var/tmp";

const CFG_DIR_PLACEHOLDER: &str = "cfg_dir=%CHANGEME%";
const RESOURCE_PLACEHOLDER: &str = "resource_file=%CHANGEME%";

/// Checker run against one staged deployment
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    pub deployment: String,
    pub config: PathBuf,
    pub output: Vec<String>,
    pub exit_code: i32,
}

impl ValidationReport {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

pub struct ValidationRunner<'a, FS: FileSystem> {
    fs: &'a FS,
    layout: &'a Layout,
    checker: PathBuf,
    template: Option<PathBuf>,
    check_result_path: String,
}

impl<'a, FS: FileSystem> ValidationRunner<'a, FS> {
    pub fn new(fs: &'a FS, layout: &'a Layout, checker: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            layout,
            checker: checker.into(),
            template: None,
            check_result_path: DEFAULT_CHECK_RESULT_PATH.to_string(),
        }
    }

    /// Read the testing template from disk instead of the packaged copy
    pub fn with_template(mut self, template: Option<PathBuf>) -> Self {
        self.template = template;
        self
    }

    pub fn with_check_result_path(mut self, path: impl Into<String>) -> Self {
        self.check_result_path = path.into();
        self
    }

    /// Write the verification config and run `<checker> -v -x <config>`
    pub fn validate(&self, deployment: &str) -> NagstageResult<ValidationReport> {
        if !self.fs.exists(&self.checker) {
            return Err(NagstageError::MissingBinary {
                role: "checker binary",
                path: self.checker.clone(),
            });
        }
        PermissionGuard::new(self.fs, self.layout).prepare_staging(deployment)?;

        let config = self.materialize(deployment)?;
        let config_arg = config.to_string_lossy().into_owned();
        let outcome = run_captured(&self.checker, &["-v", "-x", &config_arg])?;
        info!(deployment, exit_code = outcome.exit_code, "checker finished");

        Ok(ValidationReport {
            deployment: deployment.to_string(),
            config,
            output: outcome.output,
            exit_code: outcome.exit_code,
        })
    }

    /// Write the staged verification `nagios.cfg` and return its path
    pub fn materialize(&self, deployment: &str) -> NagstageResult<PathBuf> {
        let staged_main = Artifact::MainConfig.staging_path(self.layout, deployment);
        let target = Artifact::VerifyConfig.staging_path(self.layout, deployment);
        let object_dir = self.layout.staging_object_dir(deployment);

        let text = if self.fs.exists(&staged_main) {
            let source = self.fs.read(&staged_main)?;
            self.rewrite_staged(&source, &object_dir)
        } else {
            let template = self.template_text()?;
            let staged_resource = Artifact::Resource.staging_path(self.layout, deployment);
            let resource = if self.fs.exists(&staged_resource) {
                staged_resource
            } else {
                Artifact::Resource.production_path(self.layout)
            };
            fill_template(&template, &object_dir, &resource)
        };

        self.fs.write(&target, &text, ARTIFACT_MODE)?;
        Ok(target)
    }

    fn template_text(&self) -> NagstageResult<String> {
        match &self.template {
            Some(path) => Ok(self.fs.read(path)?),
            None => Ok(TESTING_TEMPLATE.to_string()),
        }
    }

    fn rewrite_staged(&self, source: &str, object_dir: &Path) -> String {
        map_lines(source, |line| {
            if line.starts_with("cfg_dir=") {
                Some(format!("cfg_dir={}", object_dir.display()))
            } else if line.starts_with("check_result_path=") {
                Some(format!("check_result_path={}", self.check_result_path))
            } else {
                None
            }
        })
    }
}

fn fill_template(template: &str, object_dir: &Path, resource: &Path) -> String {
    map_lines(template, |line| match line {
        CFG_DIR_PLACEHOLDER => Some(format!("cfg_dir={}", object_dir.display())),
        RESOURCE_PLACEHOLDER => Some(format!("resource_file={}", resource.display())),
        _ => None,
    })
}

/// Replace whole lines, keeping every line ending as it was
fn map_lines(text: &str, replace: impl Fn(&str) -> Option<String>) -> String {
    text.split('\n')
        .map(|line| replace(line).unwrap_or_else(|| line.to_string()))
        .collect::<Vec<_>>()
        .join("\n")
}
