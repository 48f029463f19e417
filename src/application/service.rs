//! Service restart

use std::path::Path;

use tracing::info;

use crate::domain::ports::FileSystem;
use crate::error::{NagstageError, NagstageResult};
use crate::infrastructure::process::{run_captured, CommandOutcome};

/// Run `<service_control> restart`, capturing output and exit status
pub fn restart_service<FS: FileSystem>(
    fs: &FS,
    service_control: &Path,
) -> NagstageResult<CommandOutcome> {
    if !fs.exists(service_control) {
        return Err(NagstageError::MissingBinary {
            role: "service control script",
            path: service_control.to_path_buf(),
        });
    }
    let outcome = run_captured(service_control, &["restart"])?;
    info!(exit_code = outcome.exit_code, "service restart finished");
    Ok(outcome)
}
