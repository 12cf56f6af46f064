//! Sunbird API client.
//!
//! Two calls make up the whole contract:
//! 1. `POST /v2/transcribe` uploads the audio as multipart form data and returns a job id
//! 2. `GET /v2/jobs/{id}` reports the job's status and, once completed, its transcript
//!
//! Both carry a bearer token, and both run on a client with request and connect timeouts
//! so a hung connection cannot stall the poll loop.

use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use super::error::TranscriptionError;
use super::job::StatusSource;
use super::request::TranscriptionRequest;
use crate::config::ApiConfig;

/// Task discriminator expected by the transcribe endpoint
const SPEECH_TO_TEXT_TASK: &str = "speech2text";

/// Content type declared for the uploaded audio part
const AUDIO_MIME: &str = "audio/mpeg";

/// JSON payload of the `parameters` form field
#[derive(Debug, Serialize)]
struct SubmitParameters<'a> {
    language: &'a str,
}

/// Reply from the transcribe endpoint
#[derive(Debug, Deserialize)]
struct SubmitReply {
    #[serde(default)]
    id: Option<serde_json::Value>,
}

/// Reply from the job status endpoint
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatusReply {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub results: Option<JobResults>,
    /// Usually a string, but structured errors are passed through as well
    #[serde(default)]
    pub error: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct JobResults {
    #[serde(default)]
    pub transcription: Option<String>,
}

impl StatusReply {
    pub fn transcription(&self) -> Option<&str> {
        self.results.as_ref()?.transcription.as_deref()
    }

    /// The service's failure reason as text. Non-string errors are rendered as JSON.
    pub fn failure_reason(&self) -> Option<String> {
        match self.error.as_ref()? {
            serde_json::Value::Null => None,
            serde_json::Value::String(reason) => Some(reason.clone()),
            other => Some(other.to_string()),
        }
    }
}

/// Identifier the service assigns to a submitted job
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobId(String);

impl JobId {
    pub fn new(id: impl Into<String>) -> Self {
        JobId(id.into())
    }

    /// Accepts string or numeric ids; empty strings, zero, null and other shapes are rejected.
    fn from_json(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::String(s) if !s.is_empty() => Some(JobId::new(s.as_str())),
            serde_json::Value::Number(n) if n.as_f64() != Some(0.0) => Some(JobId::new(n.to_string())),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for JobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// HTTP client bound to one Sunbird base URL
#[derive(Debug, Clone)]
pub struct SunbirdClient {
    http: reqwest::Client,
    base_url: String,
}

impl SunbirdClient {
    /// Creates a client with the configured timeouts.
    pub fn new(config: &ApiConfig) -> Result<Self, TranscriptionError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()
            .map_err(|e| TranscriptionError::Network(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Uploads the audio and returns the id of the created job.
    ///
    /// The file is read inside this call and released before it returns. A missing file is
    /// reported without sending anything.
    ///
    /// # Errors
    /// - [`TranscriptionError::FileNotFound`] / [`TranscriptionError::UnreadableFile`] for local file problems
    /// - [`TranscriptionError::SubmitRejected`] for a non-success status, with the raw body
    /// - [`TranscriptionError::Network`] for connection failures and timeouts
    /// - [`TranscriptionError::MissingJobId`] when a success reply carries no usable id
    pub async fn submit(&self, request: &TranscriptionRequest) -> Result<JobId, TranscriptionError> {
        let path = request.audio_path();
        match tokio::fs::try_exists(path).await {
            Ok(true) => {}
            Ok(false) => return Err(TranscriptionError::FileNotFound(path.to_path_buf())),
            Err(source) => {
                return Err(TranscriptionError::UnreadableFile {
                    path: path.to_path_buf(),
                    source,
                })
            }
        }

        let audio_data = tokio::fs::read(path)
            .await
            .map_err(|source| TranscriptionError::UnreadableFile {
                path: path.to_path_buf(),
                source,
            })?;

        let parameters = serde_json::to_string(&SubmitParameters {
            language: request.language().code(),
        })
        .map_err(|e| TranscriptionError::InvalidResponse(format!("could not encode parameters: {e}")))?;

        let audio_part = reqwest::multipart::Part::bytes(audio_data)
            .file_name(request.file_name())
            .mime_str(AUDIO_MIME)
            .map_err(|e| TranscriptionError::Network(format!("Failed to create file part for upload: {e}")))?;

        let form = reqwest::multipart::Form::new()
            .text("task", SPEECH_TO_TEXT_TASK)
            .text("parameters", parameters.clone())
            .part("audio", audio_part);

        let url = format!("{}/v2/transcribe", self.base_url);
        tracing::debug!(
            "Sunbird API Call:\n  URL: {}\n  Method: POST\n  Headers:\n    Authorization: Bearer <redacted>\n  Body parameters: task={}, parameters={}",
            url,
            SPEECH_TO_TEXT_TASK,
            parameters
        );

        let response = self
            .http
            .post(&url)
            .bearer_auth(request.token().expose_secret())
            .multipart(form)
            .send()
            .await
            .map_err(|e| TranscriptionError::from_reqwest(e, "uploading audio"))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| TranscriptionError::from_reqwest(e, "reading the upload reply"))?;

        if !status.is_success() {
            tracing::error!("Sunbird transcribe request rejected ({status}): {body}");
            return Err(TranscriptionError::SubmitRejected {
                status: status.as_u16(),
                body,
            });
        }

        let reply: SubmitReply = serde_json::from_str(&body)
            .map_err(|e| TranscriptionError::InvalidResponse(format!("could not parse upload reply: {e}")))?;

        let job_id = reply
            .id
            .as_ref()
            .and_then(JobId::from_json)
            .ok_or(TranscriptionError::MissingJobId)?;

        tracing::info!("Transcription job submitted, id: {job_id}");
        Ok(job_id)
    }

    /// Fetches the current status of a job once.
    pub async fn job_status(
        &self,
        job_id: &JobId,
        token: &SecretString,
    ) -> Result<StatusReply, TranscriptionError> {
        let url = self.job_url(job_id)?;

        let response = self
            .http
            .get(url)
            .bearer_auth(token.expose_secret())
            .send()
            .await
            .map_err(|e| TranscriptionError::from_reqwest(e, "checking job status"))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
            tracing::error!("Sunbird status request rejected ({status}): {body}");
            return Err(TranscriptionError::StatusRejected {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<StatusReply>()
            .await
            .map_err(|e| TranscriptionError::from_reqwest(e, "reading job status"))
    }
}

impl SunbirdClient {
    /// `{base}/v2/jobs/{id}`, with the id escaped as a single path segment.
    fn job_url(&self, job_id: &JobId) -> Result<reqwest::Url, TranscriptionError> {
        let mut url = reqwest::Url::parse(&self.base_url).map_err(|e| {
            TranscriptionError::Network(format!("Invalid API base URL '{}': {e}", self.base_url))
        })?;
        url.path_segments_mut()
            .map_err(|_| {
                TranscriptionError::Network(format!("API base URL '{}' cannot take a path", self.base_url))
            })?
            .pop_if_empty()
            .extend(["v2", "jobs", job_id.as_str()]);
        Ok(url)
    }
}

/// A submitted job together with what is needed to ask about it.
pub struct SubmittedJob<'a> {
    client: &'a SunbirdClient,
    token: &'a SecretString,
    id: JobId,
}

impl<'a> SubmittedJob<'a> {
    pub fn new(client: &'a SunbirdClient, token: &'a SecretString, id: JobId) -> Self {
        Self { client, token, id }
    }
}

#[async_trait]
impl StatusSource for SubmittedJob<'_> {
    fn job_id(&self) -> &JobId {
        &self.id
    }

    async fn fetch_status(&self) -> Result<StatusReply, TranscriptionError> {
        self.client.job_status(&self.id, self.token).await
    }
}
