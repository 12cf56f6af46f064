//! Job status polling.
//!
//! After submission a job moves through a small state machine:
//!
//! ```text
//! Submitted -> Polling* -> Completed | Failed | TimedOut | PollError
//! ```
//!
//! Each iteration sleeps a fixed interval, asks for the status once and applies
//! [`JobState::advance`]. A failed status request ends the loop at once; it is never retried.
//! The worst-case wall time is therefore `max_attempts * interval` plus request time.

use std::time::Duration;

use async_trait::async_trait;

use super::api::{JobId, StatusReply};
use super::error::TranscriptionError;

/// Text returned when a job completes without a transcript
pub const NO_TRANSCRIPTION_PLACEHOLDER: &str = "No transcription available";

/// Reason used when a failed job does not say why
const UNKNOWN_FAILURE_REASON: &str = "Unknown error";

/// Where poll replies come from.
#[async_trait]
pub trait StatusSource: Send + Sync {
    fn job_id(&self) -> &JobId;

    /// Performs exactly one status request.
    async fn fetch_status(&self) -> Result<StatusReply, TranscriptionError>;
}

/// Fixed-interval poll budget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    pub interval: Duration,
    pub max_attempts: u32,
}

impl PollPolicy {
    /// Upper bound on time spent sleeping between polls
    pub fn worst_case_wait(&self) -> Duration {
        self.interval * self.max_attempts
    }
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(5),
            max_attempts: 30,
        }
    }
}

#[derive(Debug)]
pub enum JobState {
    Submitted,
    /// Last observed status was not terminal
    Polling { attempt: u32, status: Option<String> },
    Completed { transcript: String },
    Failed { reason: String },
    TimedOut { attempts: u32 },
    PollError { attempt: u32, error: TranscriptionError },
}

impl JobState {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, JobState::Submitted | JobState::Polling { .. })
    }

    /// Applies the result of poll number `attempt` (1-based).
    pub fn advance(
        attempt: u32,
        reply: Result<StatusReply, TranscriptionError>,
        max_attempts: u32,
    ) -> JobState {
        let reply = match reply {
            Ok(reply) => reply,
            Err(error) => return JobState::PollError { attempt, error },
        };

        match reply.status.as_deref() {
            Some("completed") => JobState::Completed {
                transcript: reply
                    .transcription()
                    .unwrap_or(NO_TRANSCRIPTION_PLACEHOLDER)
                    .to_string(),
            },
            Some("failed") => JobState::Failed {
                reason: reply
                    .failure_reason()
                    .unwrap_or_else(|| UNKNOWN_FAILURE_REASON.to_string()),
            },
            _ if attempt >= max_attempts => JobState::TimedOut { attempts: attempt },
            _ => JobState::Polling {
                attempt,
                status: reply.status.clone(),
            },
        }
    }

    /// Collapses a terminal state into the caller-facing result.
    ///
    /// Non-terminal states cannot be projected and are reported as a timeout of zero attempts;
    /// [`poll_job`] never returns one.
    pub fn into_result(self, policy: &PollPolicy) -> Result<String, TranscriptionError> {
        match self {
            JobState::Completed { transcript } => Ok(transcript),
            JobState::Failed { reason } => Err(TranscriptionError::JobFailed { reason }),
            JobState::PollError { error, .. } => Err(error),
            JobState::TimedOut { attempts } => Err(TranscriptionError::TimedOut {
                attempts,
                waited: policy.interval * attempts,
            }),
            JobState::Submitted | JobState::Polling { .. } => Err(TranscriptionError::TimedOut {
                attempts: 0,
                waited: Duration::ZERO,
            }),
        }
    }
}

/// Polls until a terminal state is reached, reporting every observed state to `on_progress`.
///
/// The sleep is a tokio timer, so dropping the returned future cancels the wait.
pub async fn poll_job<S, F>(source: &S, policy: &PollPolicy, mut on_progress: F) -> JobState
where
    S: StatusSource + ?Sized,
    F: FnMut(&JobState),
{
    let mut state = JobState::Submitted;
    let mut attempt: u32 = 0;

    while !state.is_terminal() {
        attempt += 1;
        tokio::time::sleep(policy.interval).await;

        let reply = source.fetch_status().await;
        state = JobState::advance(attempt, reply, policy.max_attempts);

        match &state {
            JobState::Polling { status, .. } => tracing::debug!(
                "Poll attempt {}/{}: status={}, id={}",
                attempt,
                policy.max_attempts,
                status.as_deref().unwrap_or("none"),
                source.job_id()
            ),
            JobState::PollError { attempt, error } => tracing::error!(
                "Status check {attempt}/{} for job {} failed: {error}",
                policy.max_attempts,
                source.job_id()
            ),
            JobState::TimedOut { attempts } => tracing::warn!(
                "Job {} still not finished after {attempts} attempts",
                source.job_id()
            ),
            _ => tracing::info!("Job {} finished after {attempt} attempts", source.job_id()),
        }

        on_progress(&state);
    }

    state
}
