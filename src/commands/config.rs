//! Opens `ugtt.toml` in the user's editor.

use std::process::Command;

use crate::config::{get_config_path, UgttConfig};
use crate::setup;

/// Opens the configuration file, writing the default template first if it does not exist.
///
/// The editor is `$EDITOR`, then nano, then vi.
///
/// # Errors
/// - If no editor can be found or executed
pub fn handle_config() -> anyhow::Result<()> {
    let config_path = get_config_path()?;
    setup::ensure_config(&config_path)?;

    tracing::info!("Opening config file: {}", config_path.display());

    let editor = find_editor()?;
    tracing::debug!("Using editor: {}", editor);

    let status = Command::new(&editor)
        .arg(&config_path)
        .status()
        .map_err(|e| {
            anyhow::anyhow!(
                "Failed to open editor '{editor}': {e}. Make sure the editor is installed and accessible."
            )
        })?;

    if !status.success() {
        return Err(anyhow::anyhow!(
            "Editor exited with error code: {}",
            status.code().unwrap_or(-1)
        ));
    }

    match UgttConfig::load_from(&config_path) {
        Ok(config) => tracing::info!(
            "Config file edited: base_url={}, poll every {}s up to {} times",
            config.api.base_url,
            config.polling.interval_secs,
            config.polling.max_attempts
        ),
        Err(e) => {
            tracing::warn!("Edited config does not parse: {e}");
            eprintln!("Warning: {e}");
        }
    }
    Ok(())
}

fn find_editor() -> anyhow::Result<String> {
    if let Some(editor) = std::env::var("EDITOR").ok().filter(|e| !e.trim().is_empty()) {
        return Ok(editor);
    }

    ["nano", "vi"]
        .into_iter()
        .find(|editor| is_editor_available(editor))
        .map(str::to_string)
        .ok_or_else(|| anyhow::anyhow!("No editor found. Please set the $EDITOR environment variable."))
}

/// Checks if an editor is available in the system PATH.
fn is_editor_available(editor: &str) -> bool {
    Command::new("which")
        .arg(editor)
        .output()
        .map(|output| output.status.success())
        .unwrap_or(false)
}
