//! Configuration file management for ugtt.
//!
//! Settings live in `~/.config/ugtt/ugtt.toml`. Every field has a default, so a missing file
//! or a partially filled one still yields a complete configuration.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::transcription::PollPolicy;

/// Sunbird API connection settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiConfig {
    /// Base URL of the Sunbird API, without the `/v2/...` path
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Upper bound for a single HTTP request, in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Upper bound for establishing a connection, in seconds
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://api.sunbird.ai".to_string()
}

fn default_request_timeout_secs() -> u64 {
    60
}

fn default_connect_timeout_secs() -> u64 {
    10
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

/// Job status polling settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PollingConfig {
    /// Fixed wait before each status check, in seconds
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
    /// Number of status checks before giving up
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
}

fn default_interval_secs() -> u64 {
    5
}

fn default_max_attempts() -> u32 {
    30
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
            max_attempts: default_max_attempts(),
        }
    }
}

impl PollingConfig {
    /// Converts to the poll budget; at least one status check is always made.
    pub fn policy(&self) -> PollPolicy {
        PollPolicy {
            interval: Duration::from_secs(self.interval_secs),
            max_attempts: self.max_attempts.max(1),
        }
    }
}

/// Audio pre-flight settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AudioConfig {
    /// Longest audio accepted for upload, in seconds
    #[serde(default = "default_max_duration_secs")]
    pub max_duration_secs: u64,
}

fn default_max_duration_secs() -> u64 {
    300
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            max_duration_secs: default_max_duration_secs(),
        }
    }
}

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UgttConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config_version: Option<String>,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub polling: PollingConfig,
    #[serde(default)]
    pub audio: AudioConfig,
}

impl UgttConfig {
    /// Loads configuration from the user's config directory.
    ///
    /// Falls back to defaults when the file does not exist.
    ///
    /// # Errors
    /// - If the home directory cannot be determined
    /// - If the file exists but cannot be read
    /// - If the TOML is malformed
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(&get_config_path()?)
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            tracing::debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {e}", path.display()))?;
        let config: UgttConfig = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Invalid configuration in {}: {e}", path.display()))?;
        Ok(config)
    }
}

/// Retrieves the path to the config file, creating its directory if needed.
///
/// # Errors
/// - If the home directory cannot be determined
/// - If the config directory cannot be created
pub fn get_config_path() -> anyhow::Result<PathBuf> {
    let config_dir = dirs::home_dir()
        .ok_or_else(|| anyhow::anyhow!("Could not determine home directory"))?
        .join(".config")
        .join("ugtt");

    fs::create_dir_all(&config_dir)
        .map_err(|e| anyhow::anyhow!("Failed to create config directory: {e}"))?;

    Ok(config_dir.join("ugtt.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = UgttConfig::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, UgttConfig::default());
        assert_eq!(config.polling.policy(), PollPolicy::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "config_version = \"0.1.0\"\n\n[polling]\ninterval_secs = 2\n\n[api]\nbase_url = \"http://localhost:9000\""
        )
        .unwrap();

        let config = UgttConfig::load_from(file.path()).unwrap();
        assert_eq!(config.config_version.as_deref(), Some("0.1.0"));
        assert_eq!(config.polling.interval_secs, 2);
        assert_eq!(config.polling.max_attempts, 30);
        assert_eq!(config.api.base_url, "http://localhost:9000");
        assert_eq!(config.api.request_timeout_secs, 60);
        assert_eq!(config.audio.max_duration_secs, 300);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[polling\ninterval_secs = ").unwrap();
        let err = UgttConfig::load_from(file.path()).unwrap_err();
        assert!(err.to_string().contains("Invalid configuration"));
    }

    #[test]
    fn test_zero_attempts_still_polls_once() {
        let polling = PollingConfig {
            interval_secs: 1,
            max_attempts: 0,
        };
        assert_eq!(polling.policy().max_attempts, 1);
    }

    #[test]
    fn test_embedded_template_matches_defaults() {
        let template: UgttConfig = toml::from_str(crate::setup::DEFAULT_CONFIG).unwrap();
        assert_eq!(template.api, ApiConfig::default());
        assert_eq!(template.polling, PollingConfig::default());
        assert_eq!(template.audio, AudioConfig::default());
    }
}
