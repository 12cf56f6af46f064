//! First-run setup.
//!
//! Writes the default configuration when none exists and re-stamps older files with the
//! current version.

pub mod version;

use std::path::Path;

use version::SetupAction;

/// Embedded default configuration template.
pub const DEFAULT_CONFIG: &str = include_str!("../../environments/ugtt.toml");

/// Brings the config file at `config_path` up to date.
///
/// # Errors
/// Returns an error if the file cannot be read, parsed for its version, or written.
pub fn ensure_config(config_path: &Path) -> anyhow::Result<()> {
    match version::check(config_path)? {
        SetupAction::Install => {
            write_default_config(config_path)?;
            tracing::info!("Wrote default configuration to {}", config_path.display());
        }
        SetupAction::Migrate { from } => {
            version::stamp_current_version(config_path)?;
            tracing::info!(
                "Config migrated from version {} to {}",
                from,
                version::CURRENT_VERSION
            );
        }
        SetupAction::UpToDate => {
            tracing::debug!("Config version up to date ({})", version::CURRENT_VERSION);
        }
    }
    Ok(())
}

fn write_default_config(config_path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let full_config = format!("{}\n{}", version::version_line(), DEFAULT_CONFIG);
    std::fs::write(config_path, full_config)?;
    Ok(())
}
