use std::process::ExitCode;

use anyhow::Result;

use nagstage::application::PromotionEngine;
use nagstage::infrastructure::LocalFs;
use nagstage::presentation::output::{render_preview, render_promotion};

use super::CommandContext;

pub fn cmd_promote(ctx: &CommandContext, deployment: &str) -> Result<ExitCode> {
    let fs = LocalFs::new();
    let layout = ctx.config.layout();

    let report = PromotionEngine::new(&fs, &layout).promote(deployment)?;

    ctx.emit(&report, || render_promotion(&report, ctx.icons, ctx.verbose))?;
    Ok(ExitCode::SUCCESS)
}

pub fn cmd_diff(ctx: &CommandContext, deployment: &str) -> Result<ExitCode> {
    let fs = LocalFs::new();
    let layout = ctx.config.layout();

    let entries = PromotionEngine::new(&fs, &layout).preview(deployment)?;

    ctx.emit(&entries, || render_preview(&entries))?;
    Ok(ExitCode::SUCCESS)
}
