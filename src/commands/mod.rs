pub mod build;
pub mod promote;
pub mod restart;
pub mod show;
pub mod validate;

use std::io::Write;
use std::process::ExitCode;

use anyhow::Result;
use serde::Serialize;

use nagstage::config::Config;
use nagstage::presentation::output::{write_json, Icons, OutputFormat};

/// Settings every command shares
pub struct CommandContext {
    pub config: Config,
    pub format: OutputFormat,
    pub verbose: u8,
    pub icons: Icons,
}

impl CommandContext {
    pub fn new(config: Config, json: bool, verbose: u8) -> Self {
        Self {
            config,
            format: OutputFormat::from_flag(json),
            verbose,
            icons: Icons::detect(),
        }
    }

    /// Print `value` as JSON, or the text rendering otherwise
    pub fn emit<T: Serialize>(&self, value: &T, text: impl FnOnce() -> String) -> Result<()> {
        let mut out = std::io::stdout().lock();
        match self.format {
            OutputFormat::Json => write_json(&mut out, value)?,
            OutputFormat::Text => out.write_all(text().as_bytes())?,
        }
        Ok(())
    }
}

/// Exit code for an external command's status
pub fn exit_code(code: i32) -> ExitCode {
    match code {
        0 => ExitCode::SUCCESS,
        1..=255 => ExitCode::from(code as u8),
        _ => ExitCode::FAILURE,
    }
}
