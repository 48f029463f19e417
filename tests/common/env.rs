//! Isolated test environment for nagstage.

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::Command;

use nagstage::config::Config;
use nagstage::Layout;
use serde_json::Value;
use tempfile::TempDir;

/// Result of running the nagstage CLI
#[derive(Debug)]
pub struct TestResult {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    pub fn is_success(&self) -> bool {
        self.exit_code == 0
    }

    pub fn json(&self) -> Value {
        serde_json::from_str(&self.stdout)
            .unwrap_or_else(|e| panic!("stdout is not JSON ({}):\n{}", e, self.stdout))
    }
}

/// Temp directory holding every tree nagstage touches
pub struct TestEnv {
    pub root: TempDir,
    pub config: Config,
}

impl TestEnv {
    pub fn new() -> Self {
        let root = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.paths.staging_root = root.path().join("stage");
        config.paths.production_root = root.path().join("prod");
        config.paths.gearman_root = root.path().join("gearman");
        config.sources.root = root.path().join("sources");
        config.binaries.checker = root.path().join("bin/nagios");
        config.binaries.service_control = root.path().join("bin/nagios-init");
        std::fs::create_dir_all(&config.sources.root).unwrap();
        Self { root, config }
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.root.path().join(relative)
    }

    pub fn layout(&self) -> Layout {
        self.config.layout()
    }

    /// Store the live document for `deployment`
    pub fn write_live(&self, deployment: &str, document: &Value) {
        let path = self.config.sources.root.join(format!("{}.json", deployment));
        std::fs::write(path, serde_json::to_string_pretty(document).unwrap()).unwrap();
    }

    /// Store a revision document for `deployment`
    pub fn write_revision(&self, deployment: &str, revision: &str, document: &Value) {
        let dir = self.config.sources.root.join(deployment).join("revisions");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(
            dir.join(format!("{}.json", revision)),
            serde_json::to_string_pretty(document).unwrap(),
        )
        .unwrap();
    }

    /// Write a host file for the `JsonFile` resolver and return its path
    pub fn write_hosts(&self, name: &str, hosts: &Value) -> String {
        let path = self.path(name);
        std::fs::write(&path, hosts.to_string()).unwrap();
        path.to_string_lossy().into_owned()
    }

    pub fn staged(&self, deployment: &str, relative: &str) -> Option<String> {
        std::fs::read_to_string(self.layout().staging_dir(deployment).join(relative)).ok()
    }

    pub fn live(&self, relative: &str) -> Option<String> {
        std::fs::read_to_string(self.layout().production_root().join(relative)).ok()
    }

    /// Write the config as TOML for CLI runs
    pub fn write_config(&self) -> PathBuf {
        let path = self.path("nagstage.toml");
        std::fs::write(&path, toml::to_string(&self.config).unwrap()).unwrap();
        path
    }

    /// Run the nagstage binary against this environment's config file
    pub fn run(&self, args: &[&str]) -> TestResult {
        let config = self.write_config();
        let output = Command::new(env!("CARGO_BIN_EXE_nagstage"))
            .arg("--config")
            .arg(&config)
            .args(args)
            .env_remove("NAGSTAGE_CONFIG")
            .env_remove("NAGSTAGE_STAGING_ROOT")
            .env_remove("NAGSTAGE_PRODUCTION_ROOT")
            .env_remove("NAGSTAGE_CHECKER")
            .env_remove("NAGSTAGE_SERVICE_CONTROL")
            .env_remove("NAGSTAGE_SOURCES_ROOT")
            .env_remove("RUST_LOG")
            .output()
            .unwrap();
        TestResult {
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }
}

/// Write an executable shell script
pub fn write_script(path: &Path, body: &str) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, format!("#!/bin/sh\n{}", body)).unwrap();
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755)).unwrap();
}
