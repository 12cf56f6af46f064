//! Configuration management for ugtt.
//!
//! Loads the TOML configuration file from the user's config directory. Credentials are never
//! stored here; the API token comes from the environment, a flag or a prompt.

pub mod file;

pub use file::{get_config_path, ApiConfig, UgttConfig};
