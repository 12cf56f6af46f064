//! Error type for the transcription client.
//!
//! Every failure carries an [`ErrorKind`] so callers can branch on the category instead of
//! matching message text.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::language::UnsupportedLanguage;

/// Broad category of a transcription failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Rejected before any network call was made
    LocalValidation,
    /// Non-success HTTP status or a failed connection
    Transport,
    /// The service answered successfully but the body was unusable
    InvalidResponse,
    /// The service reported the job as failed
    ServiceReported,
    /// The poll budget ran out before a terminal status was seen
    Timeout,
}

#[derive(Debug, Error)]
pub enum TranscriptionError {
    #[error(transparent)]
    UnsupportedLanguage(#[from] UnsupportedLanguage),

    #[error("File '{}' does not exist.", .0.display())]
    FileNotFound(PathBuf),

    #[error("Failed to read audio file '{}': {source}", .path.display())]
    UnreadableFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No API token provided. Cannot proceed without authentication.")]
    MissingCredential,

    #[error("API request failed with status code {status}: {body}")]
    SubmitRejected { status: u16, body: String },

    #[error("Error checking job status (status code {status}): {body}")]
    StatusRejected { status: u16, body: String },

    #[error("{0}")]
    Network(String),

    #[error("Failed to get job ID from API response.")]
    MissingJobId,

    #[error("Unexpected response from the transcription service: {0}")]
    InvalidResponse(String),

    #[error("Transcription job failed. Reason: {reason}")]
    JobFailed { reason: String },

    #[error("Transcription timed out after {attempts} status checks ({} seconds). Please try again later.", .waited.as_secs())]
    TimedOut { attempts: u32, waited: Duration },
}

impl TranscriptionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TranscriptionError::UnsupportedLanguage(_)
            | TranscriptionError::FileNotFound(_)
            | TranscriptionError::UnreadableFile { .. }
            | TranscriptionError::MissingCredential => ErrorKind::LocalValidation,
            TranscriptionError::SubmitRejected { .. }
            | TranscriptionError::StatusRejected { .. }
            | TranscriptionError::Network(_) => ErrorKind::Transport,
            TranscriptionError::MissingJobId | TranscriptionError::InvalidResponse(_) => {
                ErrorKind::InvalidResponse
            }
            TranscriptionError::JobFailed { .. } => ErrorKind::ServiceReported,
            TranscriptionError::TimedOut { .. } => ErrorKind::Timeout,
        }
    }

    /// Converts a reqwest failure into a readable network error.
    pub(crate) fn from_reqwest(e: reqwest::Error, during: &str) -> Self {
        let message = if e.is_connect() {
            format!("Failed to connect to the Sunbird API server while {during}. Check your internet connection.")
        } else if e.is_timeout() {
            format!("Request to the Sunbird API timed out while {during}. The API server is not responding.")
        } else if e.is_decode() {
            return TranscriptionError::InvalidResponse(format!("could not decode reply while {during}: {e}"));
        } else {
            format!("Sunbird API network error while {during}: {e}")
        };
        TranscriptionError::Network(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds() {
        assert_eq!(
            TranscriptionError::FileNotFound(PathBuf::from("x.mp3")).kind(),
            ErrorKind::LocalValidation
        );
        assert_eq!(
            TranscriptionError::from(UnsupportedLanguage("Swahili".into())).kind(),
            ErrorKind::LocalValidation
        );
        assert_eq!(
            TranscriptionError::SubmitRejected { status: 500, body: String::new() }.kind(),
            ErrorKind::Transport
        );
        assert_eq!(TranscriptionError::MissingJobId.kind(), ErrorKind::InvalidResponse);
        assert_eq!(
            TranscriptionError::JobFailed { reason: "bad audio".into() }.kind(),
            ErrorKind::ServiceReported
        );
        assert_eq!(
            TranscriptionError::TimedOut { attempts: 30, waited: Duration::from_secs(150) }.kind(),
            ErrorKind::Timeout
        );
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            TranscriptionError::SubmitRejected { status: 401, body: "bad token".into() }.to_string(),
            "API request failed with status code 401: bad token"
        );
        assert_eq!(
            TranscriptionError::JobFailed { reason: "Unknown error".into() }.to_string(),
            "Transcription job failed. Reason: Unknown error"
        );
        assert!(TranscriptionError::TimedOut { attempts: 30, waited: Duration::from_secs(150) }
            .to_string()
            .ends_with("Please try again later."));
    }
}
