//! Audio length pre-flight check.
//!
//! The Sunbird API only accepts short clips, so the duration is measured with `ffprobe`
//! before uploading. Decoding is left entirely to ffprobe; when it is not installed the
//! check is skipped and the service has the final word.

use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Duration;

use anyhow::{anyhow, Result};

/// Outcome of the length check
#[derive(Debug, Clone, PartialEq)]
pub enum LengthCheck {
    WithinLimit(Duration),
    TooLong { duration: Duration, limit: Duration },
    /// ffprobe missing or unable to read the file
    Skipped(String),
}

impl LengthCheck {
    /// Message shown when the clip is rejected
    pub fn rejection(&self) -> Option<String> {
        match self {
            LengthCheck::TooLong { duration, limit } => Some(format!(
                "Audio file is {:.2} minutes long. Maximum allowed length is {} minutes.",
                duration.as_secs_f64() / 60.0,
                format_minutes(*limit)
            )),
            _ => None,
        }
    }
}

fn format_minutes(limit: Duration) -> String {
    let minutes = limit.as_secs_f64() / 60.0;
    if minutes.fract() == 0.0 {
        format!("{minutes:.0}")
    } else {
        format!("{minutes:.2}")
    }
}

/// Measures `audio_path` and compares it with `limit`.
pub fn check_length(audio_path: &Path, limit: Duration) -> LengthCheck {
    let ffprobe = match find_ffprobe() {
        Ok(path) => path,
        Err(e) => {
            tracing::warn!("Skipping audio length check: {e}");
            return LengthCheck::Skipped(e.to_string());
        }
    };

    match probe_duration(&ffprobe, audio_path) {
        Ok(duration) => classify(duration, limit),
        Err(e) => {
            tracing::warn!("Skipping audio length check: {e}");
            LengthCheck::Skipped(e.to_string())
        }
    }
}

fn classify(duration: Duration, limit: Duration) -> LengthCheck {
    tracing::debug!("Audio duration: {:.2}s (limit {}s)", duration.as_secs_f64(), limit.as_secs());
    if duration > limit {
        LengthCheck::TooLong { duration, limit }
    } else {
        LengthCheck::WithinLimit(duration)
    }
}

/// Runs ffprobe and reads the container duration in seconds.
fn probe_duration(ffprobe: &Path, audio_path: &Path) -> Result<Duration> {
    let output = Command::new(ffprobe)
        .args([
            "-v",
            "error",
            "-show_entries",
            "format=duration",
            "-of",
            "default=noprint_wrappers=1:nokey=1",
        ])
        .arg(audio_path)
        .output()
        .map_err(|e| anyhow!("Failed to run ffprobe: {e}"))?;

    if !output.status.success() {
        return Err(anyhow!(
            "ffprobe could not read {}: {}",
            audio_path.display(),
            String::from_utf8_lossy(&output.stderr).trim()
        ));
    }

    parse_duration(&String::from_utf8_lossy(&output.stdout))
}

fn parse_duration(stdout: &str) -> Result<Duration> {
    let seconds: f64 = stdout
        .trim()
        .parse()
        .map_err(|_| anyhow!("Unexpected ffprobe output: '{}'", stdout.trim()))?;

    Duration::try_from_secs_f64(seconds)
        .map_err(|_| anyhow!("Unexpected ffprobe duration: {seconds}"))
}

/// Locates the ffprobe binary, checking standard install locations before PATH.
pub fn find_ffprobe() -> Result<PathBuf> {
    let candidates: &[&str] = if cfg!(target_os = "macos") {
        &[
            "/opt/homebrew/bin/ffprobe",
            "/usr/local/bin/ffprobe",
            "/usr/bin/ffprobe",
        ]
    } else if cfg!(target_os = "linux") {
        &["/usr/bin/ffprobe", "/usr/local/bin/ffprobe", "/snap/bin/ffprobe"]
    } else if cfg!(target_os = "windows") {
        &[
            "C:\\ffmpeg\\bin\\ffprobe.exe",
            "C:\\Program Files\\ffmpeg\\bin\\ffprobe.exe",
        ]
    } else {
        &[]
    };

    if let Some(path) = candidates.iter().map(PathBuf::from).find(|p| p.exists()) {
        tracing::debug!("Found ffprobe at: {}", path.display());
        return Ok(path);
    }

    find_in_path("ffprobe")
}

/// Searches PATH using `which` (or `where` on Windows).
fn find_in_path(binary_name: &str) -> Result<PathBuf> {
    let search_cmd = if cfg!(target_os = "windows") { "where" } else { "which" };

    let output = Command::new(search_cmd)
        .arg(binary_name)
        .output()
        .map_err(|e| anyhow!("Failed to search PATH for {binary_name}: {e}"))?;

    let found = String::from_utf8_lossy(&output.stdout);
    let first = found.lines().next().unwrap_or_default().trim();
    if output.status.success() && !first.is_empty() {
        return Ok(PathBuf::from(first));
    }

    Err(anyhow!(
        "{binary_name} not found. Install ffmpeg to enable the audio length check."
    ))
}
