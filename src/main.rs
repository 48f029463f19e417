//! nagstage CLI - build, validate and promote Nagios configuration
//!
//! Usage: nagstage <COMMAND>
//!
//! Commands:
//!   build    Build a deployment into its staging directory
//!   test     Run the checker against the staged configuration
//!   promote  Move changed staged artifacts into production
//!   diff     Preview staged vs live differences
//!   show     Print every staged artifact
//!   restart  Restart the monitoring service

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use nagstage::config::Config;
use nagstage::presentation::{Cli, Commands};

mod commands;

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let (config, warnings) = Config::discover(cli.config.as_deref())?;
    for warning in &warnings {
        tracing::warn!("{}", warning);
    }
    let ctx = commands::CommandContext::new(config, cli.json, cli.verbose);

    match cli.command {
        Commands::Build {
            deployment,
            revision,
            diff,
            force,
            shard_position,
            sub_deployment,
        } => commands::build::cmd_build(
            &ctx,
            &deployment,
            revision,
            diff,
            force,
            shard_position,
            sub_deployment,
        ),
        Commands::Test { deployment } => commands::validate::cmd_test(&ctx, &deployment),
        Commands::Promote { deployment } => commands::promote::cmd_promote(&ctx, &deployment),
        Commands::Diff { deployment } => commands::promote::cmd_diff(&ctx, &deployment),
        Commands::Show { deployment } => commands::show::cmd_show(&ctx, &deployment),
        Commands::Restart => commands::restart::cmd_restart(&ctx),
    }
}

/// Log to stderr; `RUST_LOG` wins over `-v`
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
