//! Command handlers for ugtt.
//!
//! # Commands
//! - `transcribe`: Submit an audio file to Sunbird and wait for the transcript
//! - `translate`: Look up a phrase in the built-in phrase book
//! - `languages`: List supported languages
//! - `config`: Open the configuration file in the user's editor
//! - `logs`: Display recent log entries

pub mod config;
pub mod languages;
pub mod logs;
pub mod transcribe;
pub mod translate;

pub use config::handle_config;
pub use languages::handle_languages;
pub use logs::handle_logs;
pub use transcribe::{handle_transcribe, TranscribeArgs};
pub use translate::{handle_translate, TranslateArgs};
