use std::process::ExitCode;

use anyhow::Result;

use nagstage::application::restart_service;
use nagstage::infrastructure::LocalFs;
use nagstage::presentation::output::render_restart;

use super::{exit_code, CommandContext};

pub fn cmd_restart(ctx: &CommandContext) -> Result<ExitCode> {
    let outcome = restart_service(&LocalFs::new(), &ctx.config.binaries.service_control)?;

    ctx.emit(&outcome, || render_restart(&outcome, ctx.icons))?;
    Ok(exit_code(outcome.exit_code))
}
