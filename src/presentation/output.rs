//! Output Rendering
//!
//! Text renderers return strings so the binary decides where they go.
//! JSON output is one pretty-printed document per command.

use std::io::Write;

use serde::Serialize;

use crate::application::{
    BuildReport, PreviewEntry, PromotionReport, StagedConfig, ValidationReport,
};
use crate::infrastructure::CommandOutcome;

/// Output format for rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output for scripting
    Json,
}

impl OutputFormat {
    pub fn from_flag(json: bool) -> Self {
        if json {
            Self::Json
        } else {
            Self::Text
        }
    }
}

/// Icons for output rendering
#[derive(Debug, Clone, Copy)]
pub struct Icons {
    check: &'static str,
    cross: &'static str,
    write: &'static str,
    skip: &'static str,
    warn: &'static str,
}

impl Icons {
    pub fn unicode() -> Self {
        Self {
            check: "✓",
            cross: "✗",
            write: "→",
            skip: "○",
            warn: "!",
        }
    }

    pub fn ascii() -> Self {
        Self {
            check: "[OK]",
            cross: "[FAIL]",
            write: "->",
            skip: "[ ]",
            warn: "[!]",
        }
    }

    /// Unicode on a terminal, ASCII when piped
    pub fn detect() -> Self {
        use is_terminal::IsTerminal;
        if std::io::stdout().is_terminal() {
            Self::unicode()
        } else {
            Self::ascii()
        }
    }
}

/// Write `value` as pretty JSON followed by a newline
pub fn write_json<W: Write, T: Serialize>(out: &mut W, value: &T) -> std::io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)
}

pub fn render_build(report: &BuildReport, icons: Icons, verbose: u8) -> String {
    let mut out = String::new();
    out.push_str(&format!("{} Built {}", icons.check, report.deployment));
    if let Some(sub) = &report.sub_deployment {
        out.push_str(&format!(" ({})", sub));
    }
    out.push('\n');
    out.push('\n');

    let source = match report.mode {
        crate::domain::ports::IngestMode::Live => "live",
        crate::domain::ports::IngestMode::Revision => "revision",
    };
    out.push_str(&format!("  Source: {}", source));
    if report.replayed_from_cache {
        out.push_str(" (hosts replayed from cache)");
    }
    out.push('\n');
    if let Some(sharding) = &report.sharding {
        out.push_str(&format!(
            "  Shard: {} of {} by '{}'\n",
            sharding.position(),
            sharding.count(),
            sharding.key()
        ));
    }
    out.push_str(&format!(
        "  {} hosts, {} services\n",
        report.hosts, report.services
    ));

    if !report.written.is_empty() {
        out.push_str(&format!("\n  Written ({}):\n", report.written.len()));
        for name in &report.written {
            out.push_str(&format!("    {} {}\n", icons.write, name));
        }
    }
    if !report.skipped.is_empty() && verbose > 0 {
        out.push_str(&format!("\n  Skipped ({}):\n", report.skipped.len()));
        for name in &report.skipped {
            out.push_str(&format!("    {} {}\n", icons.skip, name));
        }
    }
    if report.has_warnings() {
        out.push_str(&format!("\n  Warnings ({}):\n", report.resolver_warnings.len()));
        for warning in &report.resolver_warnings {
            out.push_str(&format!("    {} {}\n", icons.warn, warning));
        }
    }
    out
}

pub fn render_validation(report: &ValidationReport, icons: Icons) -> String {
    let mut out = String::new();
    for line in &report.output {
        out.push_str(line);
        out.push('\n');
    }
    if report.success() {
        out.push_str(&format!("{} {} passed verification\n", icons.check, report.deployment));
    } else {
        out.push_str(&format!(
            "{} {} failed verification (exit {})\n",
            icons.cross, report.deployment, report.exit_code
        ));
    }
    out
}

pub fn render_promotion(report: &PromotionReport, icons: Icons, verbose: u8) -> String {
    let mut out = String::new();
    if !report.has_changes() {
        out.push_str(&format!("{} {} already up-to-date\n", icons.check, report.deployment));
    } else {
        out.push_str(&format!(
            "{} Promoted {} ({} changed)\n",
            icons.check,
            report.deployment,
            report.changed.len()
        ));
        for name in &report.changed {
            out.push_str(&format!("    {} {}\n", icons.write, name));
        }
    }
    if verbose > 0 && !report.unchanged.is_empty() {
        out.push_str(&format!("  Unchanged ({}):\n", report.unchanged.len()));
        for name in &report.unchanged {
            out.push_str(&format!("    {} {}\n", icons.skip, name));
        }
    }
    out
}

pub fn render_preview(entries: &[PreviewEntry]) -> String {
    let mut out = String::new();
    let mut changed = 0;
    for entry in entries.iter().filter(|e| e.changed) {
        changed += 1;
        out.push_str(&format!(
            "{} (+{} -{})\n",
            entry.artifact, entry.summary.additions, entry.summary.deletions
        ));
        out.push_str(&entry.diff);
        if !entry.diff.ends_with('\n') {
            out.push('\n');
        }
    }
    if changed == 0 {
        out.push_str("No changes to promote\n");
    }
    out
}

pub fn render_staged(configs: &[StagedConfig]) -> String {
    let mut out = String::new();
    for config in configs {
        out.push_str(&format!("==> {} <==\n", config.name));
        match &config.contents {
            Some(text) => {
                out.push_str(text);
                if !text.ends_with('\n') {
                    out.push('\n');
                }
            }
            None => out.push_str("(not staged)\n"),
        }
        out.push('\n');
    }
    out
}

pub fn render_restart(outcome: &CommandOutcome, icons: Icons) -> String {
    let mut out = String::new();
    for line in &outcome.output {
        out.push_str(line);
        out.push('\n');
    }
    if outcome.success() {
        out.push_str(&format!("{} service restarted\n", icons.check));
    } else {
        out.push_str(&format!(
            "{} service restart failed (exit {})\n",
            icons.cross, outcome.exit_code
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::IngestMode;
    use crate::domain::services::DiffSummary;

    #[test]
    fn output_format_from_flag() {
        assert_eq!(OutputFormat::default(), OutputFormat::Text);
        assert_eq!(OutputFormat::from_flag(true), OutputFormat::Json);
    }

    #[test]
    fn build_lists_written_and_hides_skipped_unless_verbose() {
        let mut report = BuildReport::new("east", IngestMode::Live);
        report.written = vec!["hosts.cfg".into()];
        report.skipped = vec!["contacts.cfg".into()];
        report.resolver_warnings = vec!["no hosts for Static".into()];
        report.hosts = 2;

        let quiet = render_build(&report, Icons::ascii(), 0);
        assert!(quiet.starts_with("[OK] Built east\n"));
        assert!(quiet.contains("  2 hosts, 0 services\n"));
        assert!(quiet.contains("    -> hosts.cfg\n"));
        assert!(!quiet.contains("contacts.cfg"));
        assert!(quiet.contains("    [!] no hosts for Static\n"));

        let verbose = render_build(&report, Icons::ascii(), 1);
        assert!(verbose.contains("    [ ] contacts.cfg\n"));
    }

    #[test]
    fn preview_prints_only_changed_entries() {
        let entries = vec![
            PreviewEntry {
                artifact: "hosts.cfg".into(),
                staged: true,
                changed: true,
                summary: DiffSummary {
                    additions: 1,
                    deletions: 0,
                },
                diff: "+line2\n".into(),
            },
            PreviewEntry {
                artifact: "commands.cfg".into(),
                staged: true,
                changed: false,
                summary: DiffSummary::default(),
                diff: String::new(),
            },
        ];
        assert_eq!(render_preview(&entries), "hosts.cfg (+1 -0)\n+line2\n");
        assert_eq!(render_preview(&entries[1..]), "No changes to promote\n");
    }

    #[test]
    fn validation_failure_shows_exit_code() {
        let report = ValidationReport {
            deployment: "east".into(),
            config: "/tmp/saigon/east/nagios.cfg".into(),
            output: vec!["Error: bad".into()],
            exit_code: 1,
        };
        assert_eq!(
            render_validation(&report, Icons::ascii()),
            "Error: bad\n[FAIL] east failed verification (exit 1)\n"
        );
    }

    #[test]
    fn json_is_newline_terminated() {
        let mut buf = Vec::new();
        write_json(&mut buf, &serde_json::json!({"ok": true})).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "{\n  \"ok\": true\n}\n");
    }
}
