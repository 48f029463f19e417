//! Differ Domain Service
//!
//! Line-level comparison between a staged artifact and its live copy, used
//! to preview what a promotion would change.

use serde::Serialize;
use similar::{ChangeTag, TextDiff};

/// Line counts of a diff
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DiffSummary {
    pub additions: usize,
    pub deletions: usize,
}

impl DiffSummary {
    pub fn has_changes(&self) -> bool {
        self.additions > 0 || self.deletions > 0
    }
}

impl std::fmt::Display for DiffSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "+{}, -{}", self.additions, self.deletions)
    }
}

/// Compute the line diff between the live and staged text
pub fn diff_lines(live: &str, staged: &str) -> DiffSummary {
    let mut summary = DiffSummary::default();
    for change in TextDiff::from_lines(live, staged).iter_all_changes() {
        match change.tag() {
            ChangeTag::Delete => summary.deletions += 1,
            ChangeTag::Insert => summary.additions += 1,
            ChangeTag::Equal => {}
        }
    }
    summary
}

/// Unified diff text, live → staged
pub fn unified(live: &str, staged: &str, name: &str) -> String {
    TextDiff::from_lines(live, staged)
        .unified_diff()
        .header(&format!("live/{}", name), &format!("staged/{}", name))
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_text_has_no_changes() {
        assert!(!diff_lines("a\nb\n", "a\nb\n").has_changes());
    }

    #[test]
    fn modified_line_counts_both_ways() {
        let summary = diff_lines("line1\n", "modified\n");
        assert_eq!(summary, DiffSummary { additions: 1, deletions: 1 });
        assert_eq!(summary.to_string(), "+1, -1");
    }

    #[test]
    fn unified_names_both_sides() {
        let text = unified("a\n", "b\n", "hosts.cfg");
        assert!(text.contains("live/hosts.cfg"));
        assert!(text.contains("staged/hosts.cfg"));
    }
}
