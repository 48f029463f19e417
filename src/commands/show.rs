use std::process::ExitCode;

use anyhow::Result;

use nagstage::application::staged_configs;
use nagstage::infrastructure::LocalFs;
use nagstage::presentation::output::render_staged;

use super::CommandContext;

pub fn cmd_show(ctx: &CommandContext, deployment: &str) -> Result<ExitCode> {
    let layout = ctx.config.layout();
    let configs = staged_configs(&LocalFs::new(), &layout, deployment)?;

    ctx.emit(&configs, || render_staged(&configs))?;
    Ok(ExitCode::SUCCESS)
}
