//! CLI Argument Parsing
//!
//! Global flags (`--config`, `--json`, `--verbose`) are inherited by all
//! subcommands.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// nagstage - build, validate and promote Nagios configuration
#[derive(Parser, Debug)]
#[command(name = "nagstage")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (defaults to $NAGSTAGE_CONFIG, then the user config)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Output format for CI
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build a deployment into its staging directory
    Build {
        deployment: String,

        /// Build from a stored revision instead of the live source
        #[arg(long)]
        revision: Option<String>,

        /// Incremental rebuild: replay cached host searches
        #[arg(long)]
        diff: bool,

        /// Write whatever was produced even when critical data is missing
        #[arg(short, long)]
        force: bool,

        /// Shard position to build
        #[arg(long, value_name = "N")]
        shard_position: Option<u32>,

        /// Only include records tagged with this sub-deployment
        #[arg(long)]
        sub_deployment: Option<String>,
    },

    /// Run the checker against the staged configuration
    Test { deployment: String },

    /// Move changed staged artifacts into production
    Promote { deployment: String },

    /// Preview staged vs live differences
    Diff { deployment: String },

    /// Print every staged artifact
    Show { deployment: String },

    /// Restart the monitoring service
    Restart,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_build_defaults() {
        let cli = Cli::try_parse_from(["nagstage", "build", "east"]).unwrap();
        if let Commands::Build {
            deployment,
            revision,
            diff,
            force,
            shard_position,
            sub_deployment,
        } = cli.command
        {
            assert_eq!(deployment, "east");
            assert_eq!(revision, None);
            assert!(!diff);
            assert!(!force);
            assert_eq!(shard_position, None);
            assert_eq!(sub_deployment, None);
        } else {
            panic!("Expected Build command");
        }
    }

    #[test]
    fn test_cli_parse_build_flags() {
        let cli = Cli::try_parse_from([
            "nagstage",
            "build",
            "east",
            "--revision",
            "42",
            "--diff",
            "-f",
            "--shard-position",
            "1",
            "--sub-deployment",
            "west",
        ])
        .unwrap();
        if let Commands::Build {
            revision,
            diff,
            force,
            shard_position,
            sub_deployment,
            ..
        } = cli.command
        {
            assert_eq!(revision.as_deref(), Some("42"));
            assert!(diff);
            assert!(force);
            assert_eq!(shard_position, Some(1));
            assert_eq!(sub_deployment.as_deref(), Some("west"));
        } else {
            panic!("Expected Build command");
        }
    }

    #[test]
    fn test_cli_global_flags_after_subcommand() {
        let cli =
            Cli::try_parse_from(["nagstage", "promote", "east", "--json", "-vv", "--config", "/etc/n.toml"])
                .unwrap();
        assert!(cli.json);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.config, Some(PathBuf::from("/etc/n.toml")));
        assert!(matches!(cli.command, Commands::Promote { ref deployment } if deployment == "east"));
    }

    #[test]
    fn test_cli_requires_subcommand() {
        assert!(Cli::try_parse_from(["nagstage"]).is_err());
        assert!(Cli::try_parse_from(["nagstage", "test"]).is_err());
    }

    #[test]
    fn test_cli_parse_restart() {
        let cli = Cli::try_parse_from(["nagstage", "restart"]).unwrap();
        assert!(matches!(cli.command, Commands::Restart));
    }
}
