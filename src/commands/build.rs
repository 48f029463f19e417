use std::process::ExitCode;

use anyhow::Result;

use nagstage::application::BuildRequest;
use nagstage::presentation::factory::create_orchestrator;
use nagstage::presentation::output::render_build;

use super::CommandContext;

pub fn cmd_build(
    ctx: &CommandContext,
    deployment: &str,
    revision: Option<String>,
    diff: bool,
    force: bool,
    shard_position: Option<u32>,
    sub_deployment: Option<String>,
) -> Result<ExitCode> {
    let mut orchestrator = create_orchestrator(&ctx.config);
    orchestrator.set_sub_deployment(sub_deployment);

    let request = BuildRequest::new(deployment)
        .with_revision(revision)
        .with_diff(diff)
        .with_force(force)
        .with_shard_position(shard_position);
    let report = orchestrator.build(&request)?;

    ctx.emit(&report, || render_build(&report, ctx.icons, ctx.verbose))?;
    Ok(ExitCode::SUCCESS)
}
