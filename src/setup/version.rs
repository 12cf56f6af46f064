//! Config version tracking.
//!
//! The first line of `ugtt.toml` records which release wrote it. Comparing that against the
//! running binary decides whether the file needs to be written or re-stamped.

use anyhow::anyhow;
use regex::Regex;
use std::fmt;
use std::path::Path;

/// Current application version from Cargo.toml
pub const CURRENT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// `major.minor.patch`, ordered field by field
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd)]
struct SemanticVersion {
    major: u32,
    minor: u32,
    patch: u32,
}

impl SemanticVersion {
    fn parse(version: &str) -> anyhow::Result<Self> {
        let mut numbers = version.trim().split('.').map(|part| {
            part.parse::<u32>()
                .map_err(|_| anyhow!("Invalid version component '{part}' in '{version}'"))
        });

        let (Some(major), Some(minor), Some(patch), None) =
            (numbers.next(), numbers.next(), numbers.next(), numbers.next())
        else {
            return Err(anyhow!(
                "Invalid version format: '{version}'. Expected 'major.minor.patch'"
            ));
        };

        Ok(SemanticVersion {
            major: major?,
            minor: minor?,
            patch: patch?,
        })
    }
}

impl fmt::Display for SemanticVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// What has to happen to the config file before the app runs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetupAction {
    /// No config file yet
    Install,
    /// File was written by an older release, or carries no version at all
    Migrate { from: String },
    UpToDate,
}

/// Extracts the version from a first line of the form `config_version = "X.Y.Z"`.
fn version_on_first_line(content: &str) -> anyhow::Result<Option<String>> {
    let Some(first_line) = content.lines().next() else {
        return Ok(None);
    };

    let regex = Regex::new(r#"^\s*config_version\s*=\s*"([^"]+)""#)?;
    Ok(regex.captures(first_line).map(|caps| caps[1].to_string()))
}

/// Compares the config file's recorded version with the running binary.
///
/// # Errors
/// - If the file exists but cannot be read
/// - If a recorded version is not `major.minor.patch`
pub fn check(config_path: &Path) -> anyhow::Result<SetupAction> {
    if !config_path.exists() {
        return Ok(SetupAction::Install);
    }

    let content = std::fs::read_to_string(config_path)?;
    let Some(recorded) = version_on_first_line(&content)? else {
        return Ok(SetupAction::Migrate {
            from: "unknown (unversioned config)".to_string(),
        });
    };

    let recorded_parsed = SemanticVersion::parse(&recorded)?;
    let current_parsed = SemanticVersion::parse(CURRENT_VERSION)?;

    if recorded_parsed < current_parsed {
        Ok(SetupAction::Migrate { from: recorded })
    } else {
        if recorded_parsed > current_parsed {
            tracing::warn!(
                "Config version {} is newer than app version {}",
                recorded_parsed,
                current_parsed
            );
        }
        Ok(SetupAction::UpToDate)
    }
}

/// Rewrites the file with the current version as its first line, keeping everything else.
pub fn stamp_current_version(config_path: &Path) -> anyhow::Result<()> {
    let content = std::fs::read_to_string(config_path)?;
    let body: Vec<&str> = content
        .lines()
        .filter(|line| !line.trim_start().starts_with("config_version"))
        .collect();

    let mut stamped = version_line();
    if !body.is_empty() {
        stamped.push('\n');
        stamped.push_str(&body.join("\n"));
    }
    stamped.push('\n');

    std::fs::write(config_path, stamped)?;
    Ok(())
}

pub fn version_line() -> String {
    format!(r#"config_version = "{CURRENT_VERSION}""#)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_semantic_version_parse() {
        let v = SemanticVersion::parse(" 1.12.3 ").unwrap();
        assert_eq!((v.major, v.minor, v.patch), (1, 12, 3));
        assert_eq!(v.to_string(), "1.12.3");
    }

    #[test]
    fn test_semantic_version_ordering() {
        let parse = |s| SemanticVersion::parse(s).unwrap();
        assert!(parse("0.0.9") < parse("0.1.0"));
        assert!(parse("0.9.9") < parse("1.0.0"));
        assert!(parse("0.1.10") > parse("0.1.9"));
    }

    #[test]
    fn test_invalid_version_format() {
        assert!(SemanticVersion::parse("0.1").is_err());
        assert!(SemanticVersion::parse("0.1.2.3").is_err());
        assert!(SemanticVersion::parse("a.b.c").is_err());
    }

    #[test]
    fn test_check_missing_file_installs() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(check(&dir.path().join("ugtt.toml")).unwrap(), SetupAction::Install);
    }

    #[test]
    fn test_check_current_and_old_versions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ugtt.toml");

        std::fs::write(&path, format!("{}\n[polling]\n", version_line())).unwrap();
        assert_eq!(check(&path).unwrap(), SetupAction::UpToDate);

        std::fs::write(&path, "config_version = \"0.0.1\"\n[polling]\n").unwrap();
        assert_eq!(
            check(&path).unwrap(),
            SetupAction::Migrate { from: "0.0.1".to_string() }
        );

        std::fs::write(&path, "# config_version = \"0.0.1\"\n").unwrap();
        assert!(matches!(check(&path).unwrap(), SetupAction::Migrate { .. }));
    }

    #[test]
    fn test_stamp_replaces_old_version_and_keeps_body() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ugtt.toml");
        std::fs::write(&path, "config_version = \"0.0.1\"\n[polling]\ninterval_secs = 2\n").unwrap();

        stamp_current_version(&path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with(&version_line()));
        assert!(content.contains("interval_secs = 2"));
        assert_eq!(content.matches("config_version").count(), 1);
        assert_eq!(check(&path).unwrap(), SetupAction::UpToDate);
    }
}
