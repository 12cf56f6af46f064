//! Transcribe an audio file through the Sunbird API.
//!
//! Resolves the API token, asks for whatever the command line did not provide, runs the
//! submit/poll cycle and delivers the transcript to stdout, a file or the clipboard.

use std::path::PathBuf;
use std::process;
use std::time::Duration;

use cliclack::{input, intro, log, outro, outro_cancel, password};
use console::style;
use secrecy::SecretString;

use crate::audio::{self, LengthCheck};
use crate::clipboard::copy_to_clipboard;
use crate::config::UgttConfig;
use crate::language::Language;
use crate::transcription::{self, JobState, Progress, SunbirdClient, TranscriptionError, TranscriptionRequest};

/// Environment variable consulted first for the API token
pub const TOKEN_ENV_VAR: &str = "SUNBIRD_API_TOKEN";

/// Command-line inputs of `ugtt transcribe`
#[derive(Debug, Default)]
pub struct TranscribeArgs {
    pub file: Option<PathBuf>,
    pub language: Option<String>,
    pub token: Option<String>,
    pub clipboard: bool,
    pub output: Option<String>,
}

/// Runs one transcription from the command line.
///
/// Local validation failures (token, file, language, audio length) return an error before
/// anything is uploaded. Failures after submission are shown to the user and exit with code 1.
pub async fn handle_transcribe(args: TranscribeArgs) -> anyhow::Result<()> {
    tracing::info!("=== ugtt Transcribe Command ===");

    let token = resolve_token(std::env::var(TOKEN_ENV_VAR).ok(), args.token, prompt_for_token)?;

    intro(style(" transcribe ").on_white().black())?;

    let audio_path = match args.file {
        Some(path) => path,
        None => PathBuf::from(
            input("Path to the audio file (less than 5 minutes):")
                .interact::<String>()?
                .trim(),
        ),
    };
    if !audio_path.exists() {
        return Err(TranscriptionError::FileNotFound(audio_path).into());
    }

    let config_data = UgttConfig::load().map_err(|err| {
        tracing::error!("Failed to load configuration: {err}");
        anyhow::anyhow!("Configuration error: {err}")
    })?;

    let limit = Duration::from_secs(config_data.audio.max_duration_secs);
    let check = audio::check_length(&audio_path, limit);
    if let Some(rejection) = check.rejection() {
        return Err(anyhow::anyhow!(rejection));
    }
    if let LengthCheck::Skipped(reason) = &check {
        log::warning(format!("Could not check the audio length: {reason}"))?;
    }

    let language_name = match args.language {
        Some(name) => name,
        None => input(format!("Target language ({}):", Language::choices())).interact::<String>()?,
    };
    let request = TranscriptionRequest::new(&audio_path, &language_name, token).map_err(|e| match e {
        TranscriptionError::UnsupportedLanguage(_) => anyhow::anyhow!(
            "Unsupported language. Please choose one of: {}",
            Language::choices()
        ),
        other => other.into(),
    })?;
    let language = request.language();
    let client = SunbirdClient::new(&config_data.api)?;
    let policy = config_data.polling.policy();
    tracing::debug!(
        "Polling every {}s, giving up after {}s",
        policy.interval.as_secs(),
        policy.worst_case_wait().as_secs()
    );

    let job = transcription::transcribe(&client, &request, &policy, report_progress);
    let result = tokio::select! {
        result = job => result,
        _ = tokio::signal::ctrl_c() => {
            tracing::warn!("Transcription cancelled by user");
            outro_cancel("Transcription cancelled.")?;
            process::exit(130);
        }
    };

    let message = transcription::describe(&result);
    if let Err(e) = &result {
        tracing::error!("Transcription failed ({:?}): {e}", e.kind());
        outro_cancel(&message)?;
        process::exit(1);
    }

    outro(format!("Audio transcription text in {language}:"))?;
    deliver(&message, args.clipboard, args.output)
}

/// Picks the first non-blank token from the environment, the flag, then the prompt.
///
/// The prompt only runs when both earlier sources are blank.
fn resolve_token<P>(
    env_value: Option<String>,
    flag_value: Option<String>,
    prompt: P,
) -> anyhow::Result<SecretString>
where
    P: FnOnce() -> anyhow::Result<String>,
{
    let non_blank = |value: Option<String>| value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

    if let Some(token) = non_blank(env_value) {
        tracing::debug!("Using API token from {TOKEN_ENV_VAR}");
        return Ok(SecretString::from(token));
    }
    if let Some(token) = non_blank(flag_value) {
        tracing::debug!("Using API token from --token");
        return Ok(SecretString::from(token));
    }

    match non_blank(Some(prompt()?)) {
        Some(token) => Ok(SecretString::from(token)),
        None => {
            tracing::error!("No API token provided");
            Err(TranscriptionError::MissingCredential.into())
        }
    }
}

fn prompt_for_token() -> anyhow::Result<String> {
    log::warning(format!(
        "No API token found in the environment or on the command line.\nYou can set it with: export {TOKEN_ENV_VAR}='your_token'"
    ))?;
    let token = password("Enter your Sunbird API access token:")
        .allow_empty()
        .interact()?;
    Ok(token)
}

/// Shows submission and poll progress on stderr.
fn report_progress(progress: Progress<'_>) {
    let shown = match progress {
        Progress::Uploading { request } => log::step(format!(
            "Uploading audio file and requesting transcription in {}...",
            request.language()
        )),
        Progress::Submitted { job_id } => log::step(format!(
            "Transcription job submitted successfully. Job ID: {job_id}\nProcessing audio (this may take a moment)..."
        )),
        Progress::Poll {
            state: JobState::Polling { attempt, status },
            max_attempts,
        } => log::info(format!(
            "Job status: {}. Waiting for completion... ({attempt}/{max_attempts})",
            status.as_deref().unwrap_or("unknown")
        )),
        Progress::Poll { .. } => Ok(()),
    };
    if let Err(e) = shown {
        tracing::debug!("Could not display progress: {e}");
    }
}

/// Writes the transcript to a file, the clipboard, or stdout, in that order of preference.
fn deliver(text: &str, clipboard: bool, output_file: Option<String>) -> anyhow::Result<()> {
    if let Some(file_path) = output_file {
        std::fs::write(&file_path, text)
            .map_err(|e| anyhow::anyhow!("Failed to write to file '{file_path}': {e}"))?;
        tracing::debug!("Transcribed text written to file: {file_path}");
        return Ok(());
    }

    if clipboard {
        match copy_to_clipboard(text) {
            Ok(()) => return Ok(()),
            Err(e) => tracing::warn!("Failed to copy to clipboard: {e}"),
        }
    }

    println!("{text}");
    tracing::debug!("Transcribed text printed to stdout");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    fn no_prompt() -> anyhow::Result<String> {
        panic!("prompt must not run")
    }

    #[test]
    fn test_env_wins_over_flag() {
        let token = resolve_token(Some("from-env".into()), Some("from-flag".into()), no_prompt).unwrap();
        assert_eq!(token.expose_secret(), "from-env");
    }

    #[test]
    fn test_flag_used_when_env_blank() {
        let token = resolve_token(Some("   ".into()), Some(" from-flag ".into()), no_prompt).unwrap();
        assert_eq!(token.expose_secret(), "from-flag");
    }

    #[test]
    fn test_prompt_is_last_resort() {
        let token = resolve_token(None, None, || Ok("typed\n".to_string())).unwrap();
        assert_eq!(token.expose_secret(), "typed");
    }

    #[test]
    fn test_no_token_anywhere_is_fatal() {
        let err = resolve_token(None, Some(String::new()), || Ok(String::new())).unwrap_err();
        let err = err.downcast::<TranscriptionError>().unwrap();
        assert!(matches!(err, TranscriptionError::MissingCredential));
    }

    #[test]
    fn test_deliver_writes_output_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");

        deliver("Oli otya", false, Some(path.display().to_string())).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "Oli otya");
    }
}
