//! External process execution
//!
//! Runs the checker and the service-control script, blocking until they
//! exit. Both streams share one capture file, so lines keep the order the
//! program wrote them in.

use std::io::{Read, Seek, SeekFrom};
use std::os::unix::process::ExitStatusExt;
use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};

use serde::Serialize;

use crate::error::NagstageResult;

/// Captured result of one external command
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandOutcome {
    pub output: Vec<String>,
    pub exit_code: i32,
}

impl CommandOutcome {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Run `program args...` and capture its combined output
pub fn run_captured(program: &Path, args: &[&str]) -> NagstageResult<CommandOutcome> {
    tracing::debug!(program = %program.display(), ?args, "running command");
    let mut capture = tempfile::tempfile()?;
    let status = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::from(capture.try_clone()?))
        .stderr(Stdio::from(capture.try_clone()?))
        .status()?;

    let mut bytes = Vec::new();
    capture.seek(SeekFrom::Start(0))?;
    capture.read_to_end(&mut bytes)?;
    let lines = String::from_utf8_lossy(&bytes)
        .lines()
        .map(str::to_string)
        .collect();

    Ok(CommandOutcome {
        output: lines,
        exit_code: exit_code(status),
    })
}

/// Shell-style exit code: 128 + signal when killed by a signal
fn exit_code(status: ExitStatus) -> i32 {
    status
        .code()
        .or_else(|| status.signal().map(|sig| 128 + sig))
        .unwrap_or(-1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn captures_interleaved_output_in_write_order() {
        let outcome = run_captured(
            Path::new("/bin/sh"),
            &["-c", "echo one; echo two >&2; echo three; exit 3"],
        )
        .unwrap();
        assert_eq!(outcome.output, vec!["one", "two", "three"]);
        assert_eq!(outcome.exit_code, 3);
        assert!(!outcome.success());
    }

    #[test]
    fn missing_program_is_io_error() {
        let err = run_captured(Path::new("/nonexistent/checker"), &[]).unwrap_err();
        assert!(matches!(err, crate::error::NagstageError::Io(_)));
    }
}
