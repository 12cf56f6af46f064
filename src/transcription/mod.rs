//! Speech-to-text through the Sunbird API.
//!
//! A run is one submission followed by a bounded poll loop. The job is never resubmitted,
//! whatever happens while polling.

pub mod api;
pub mod error;
pub mod job;
pub mod request;

pub use api::{JobId, SubmittedJob, SunbirdClient};
pub use error::TranscriptionError;
pub use job::{poll_job, JobState, PollPolicy};
pub use request::TranscriptionRequest;

/// Progress notifications emitted while a transcription runs
#[derive(Debug)]
pub enum Progress<'a> {
    Uploading { request: &'a TranscriptionRequest },
    Submitted { job_id: &'a JobId },
    Poll { state: &'a JobState, max_attempts: u32 },
}

/// Submits the audio and polls until the job reaches a terminal state.
///
/// # Errors
/// Local validation, transport, invalid-response, service-reported and timeout failures,
/// each distinguishable through [`TranscriptionError::kind`].
pub async fn transcribe<F>(
    client: &SunbirdClient,
    request: &TranscriptionRequest,
    policy: &PollPolicy,
    mut on_progress: F,
) -> Result<String, TranscriptionError>
where
    F: FnMut(Progress<'_>),
{
    tracing::info!(
        "Transcribing {} in {} ({})",
        request.audio_path().display(),
        request.language(),
        request.language().code()
    );

    on_progress(Progress::Uploading { request });
    let job_id = client.submit(request).await?;
    on_progress(Progress::Submitted { job_id: &job_id });

    let job = SubmittedJob::new(client, request.token(), job_id);
    let state = poll_job(&job, policy, |state| {
        on_progress(Progress::Poll {
            state,
            max_attempts: policy.max_attempts,
        })
    })
    .await;

    state.into_result(policy)
}

/// Renders a finished run as the single line shown to the user.
pub fn describe(result: &Result<String, TranscriptionError>) -> String {
    match result {
        Ok(text) => text.clone(),
        Err(e) => format!("Error: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcription::error::ErrorKind;
    use crate::config::ApiConfig;
    use secrecy::SecretString;
    use std::io::Write;
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn fast_policy(max_attempts: u32) -> PollPolicy {
        PollPolicy {
            interval: Duration::from_millis(5),
            max_attempts,
        }
    }

    fn client(server: &MockServer) -> SunbirdClient {
        SunbirdClient::new(&ApiConfig {
            base_url: server.uri(),
            request_timeout_secs: 5,
            connect_timeout_secs: 5,
        })
        .unwrap()
    }

    fn audio_file() -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".wav").tempfile().unwrap();
        file.write_all(b"RIFFfake").unwrap();
        file
    }

    fn token() -> SecretString {
        SecretString::from("tok".to_string())
    }

    async fn mount_submit(server: &MockServer) {
        Mock::given(method("POST"))
            .and(path("/v2/transcribe"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "id": "abc" })))
            .expect(1)
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn processing_twice_then_completed_yields_transcript() {
        let server = MockServer::start().await;
        mount_submit(&server).await;

        Mock::given(method("GET"))
            .and(path("/v2/jobs/abc"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "status": "processing" })))
            .up_to_n_times(2)
            .expect(2)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v2/jobs/abc"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "completed",
                "results": { "transcription": "hello" }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let file = audio_file();
        let request = TranscriptionRequest::new(file.path(), "Luganda", token()).unwrap();
        let mut events = Vec::new();

        let result = transcribe(&client(&server), &request, &fast_policy(30), |p| {
            events.push(match p {
                Progress::Uploading { .. } => "upload",
                Progress::Submitted { .. } => "submitted",
                Progress::Poll { state, .. } if state.is_terminal() => "done",
                Progress::Poll { .. } => "poll",
            })
        })
        .await;

        assert_eq!(result.unwrap(), "hello");
        assert_eq!(events, vec!["upload", "submitted", "poll", "poll", "done"]);
    }

    #[tokio::test]
    async fn thirty_processing_replies_time_out() {
        let server = MockServer::start().await;
        mount_submit(&server).await;

        Mock::given(method("GET"))
            .and(path("/v2/jobs/abc"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "status": "processing" })))
            .expect(30)
            .mount(&server)
            .await;

        let file = audio_file();
        let request = TranscriptionRequest::new(file.path(), "Acholi", token()).unwrap();
        let result = transcribe(&client(&server), &request, &fast_policy(30), |_| {}).await;

        let err = result.as_ref().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Timeout);
        assert!(describe(&result).starts_with("Error: Transcription timed out"));
        assert!(describe(&result).ends_with("Please try again later."));
    }

    #[tokio::test]
    async fn unsupported_language_makes_no_network_calls() {
        let server = MockServer::start().await;
        Mock::given(wiremock::matchers::any())
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let file = audio_file();
        for name in ["Swahili", "Kinyarwanda", "", "lug"] {
            let err = TranscriptionRequest::new(file.path(), name, token()).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::LocalValidation);
        }
    }

    #[tokio::test]
    async fn missing_file_makes_no_network_calls() {
        let server = MockServer::start().await;
        Mock::given(wiremock::matchers::any())
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let request = TranscriptionRequest::new("/no/such/clip.mp3", "Ateso", token()).unwrap();
        let result = transcribe(&client(&server), &request, &fast_policy(30), |_| {}).await;

        assert_eq!(result.unwrap_err().kind(), ErrorKind::LocalValidation);
    }

    #[test]
    fn describe_passes_text_through_unchanged() {
        assert_eq!(describe(&Ok("Weebale".to_string())), "Weebale");
        assert_eq!(
            describe(&Err(TranscriptionError::MissingJobId)),
            "Error: Failed to get job ID from API response."
        );
    }
}
