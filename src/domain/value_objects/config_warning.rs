//! Configuration warning value object.

use std::path::PathBuf;

/// Non-fatal configuration warning surfaced to CLI users.
///
/// Produced while loading `config.toml`, currently only for keys the
/// configuration schema does not know.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    /// Dotted path of the unknown key (`paths.stagin_root`)
    pub key: String,
    pub file: PathBuf,
    /// 1-indexed line of the first occurrence, if found
    pub line: Option<usize>,
    /// Closest known key
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown config key '{}' in {}", self.key, self.file.display())?;
        if let Some(line) = self.line {
            write!(f, ":{}", line)?;
        }
        if let Some(suggestion) = &self.suggestion {
            write!(f, " (did you mean '{}'?)", suggestion)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_line_and_suggestion() {
        let warning = ConfigWarning {
            key: "paths.stagin_root".to_string(),
            file: PathBuf::from("/etc/nagstage.toml"),
            line: Some(2),
            suggestion: Some("staging_root".to_string()),
        };
        assert_eq!(
            warning.to_string(),
            "unknown config key 'paths.stagin_root' in /etc/nagstage.toml:2 (did you mean 'staging_root'?)"
        );
    }
}
