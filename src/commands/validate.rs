use std::process::ExitCode;

use anyhow::Result;

use nagstage::application::ValidationRunner;
use nagstage::infrastructure::LocalFs;
use nagstage::presentation::output::render_validation;

use super::{exit_code, CommandContext};

/// Exit status mirrors the checker's
pub fn cmd_test(ctx: &CommandContext, deployment: &str) -> Result<ExitCode> {
    let fs = LocalFs::new();
    let layout = ctx.config.layout();
    let validation = &ctx.config.validation;

    let report = ValidationRunner::new(&fs, &layout, &ctx.config.binaries.checker)
        .with_template(validation.template.clone())
        .with_check_result_path(&validation.check_result_path)
        .validate(deployment)?;

    ctx.emit(&report, || render_validation(&report, ctx.icons))?;
    Ok(exit_code(report.exit_code))
}
