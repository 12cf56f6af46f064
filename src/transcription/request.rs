//! The immutable input of one transcription run.

use std::path::{Path, PathBuf};

use secrecy::{ExposeSecret, SecretString};

use super::error::TranscriptionError;
use crate::language::Language;

/// Audio file, target language and access token for a single invocation
#[derive(Debug)]
pub struct TranscriptionRequest {
    audio_path: PathBuf,
    language: Language,
    token: SecretString,
}

impl TranscriptionRequest {
    /// Builds a request from a user-supplied language name.
    ///
    /// The name is title-cased before matching. Unsupported names and blank tokens are rejected
    /// here, before anything touches the network. File existence is checked at submission time.
    pub fn new(
        audio_path: impl Into<PathBuf>,
        language: &str,
        token: SecretString,
    ) -> Result<Self, TranscriptionError> {
        let language = Language::from_user_input(language)?;
        Self::with_language(audio_path, language, token)
    }

    pub fn with_language(
        audio_path: impl Into<PathBuf>,
        language: Language,
        token: SecretString,
    ) -> Result<Self, TranscriptionError> {
        if token.expose_secret().trim().is_empty() {
            return Err(TranscriptionError::MissingCredential);
        }
        Ok(Self {
            audio_path: audio_path.into(),
            language,
            token,
        })
    }

    pub fn audio_path(&self) -> &Path {
        &self.audio_path
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn token(&self) -> &SecretString {
        &self.token
    }

    /// Base name sent as the multipart file name
    pub fn file_name(&self) -> String {
        self.audio_path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string()
    }
}
