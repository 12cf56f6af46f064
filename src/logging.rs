//! Structured logging for ugtt using the tracing crate.
//!
//! Writes to daily-rotated files under the XDG state directory. Nothing is logged to the
//! terminal, where stdout carries the transcription and stderr carries the prompts.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing_appender::rolling;
use tracing_subscriber::prelude::*;

/// File name prefix of every log file
pub const LOG_FILE_PREFIX: &str = "ugtt.log";

/// Number of daily log files kept on disk
const MAX_LOG_FILES: usize = 7;

/// Keeps the non-blocking writer alive for the program lifetime.
static APPENDER_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();

/// Initializes file-based logging.
///
/// Log level is controlled by `RUST_LOG` (defaults to "info").
///
/// # Errors
/// - If the log directory cannot be determined or created
/// - If logging was already initialized
pub fn init_logging() -> anyhow::Result<()> {
    let log_dir = log_dir()?;
    fs::create_dir_all(&log_dir)?;

    if let Err(e) = cleanup_old_logs(&log_dir) {
        eprintln!("Warning: Failed to cleanup old logs: {e}");
    }

    let file_appender = rolling::daily(&log_dir, LOG_FILE_PREFIX);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    APPENDER_GUARD
        .set(guard)
        .map_err(|_| anyhow::anyhow!("Logging already initialized"))?;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_target(true)
                .with_level(true)
                .with_ansi(false),
        )
        .init();

    tracing::debug!("Logging initialized. Log directory: {}", log_dir.display());
    Ok(())
}

/// Log directory: `$XDG_STATE_HOME/ugtt`, or `~/.local/state/ugtt`.
///
/// # Errors
/// - If the home directory cannot be determined
pub fn log_dir() -> anyhow::Result<PathBuf> {
    if let Ok(xdg_state) = std::env::var("XDG_STATE_HOME") {
        if !xdg_state.is_empty() {
            return Ok(PathBuf::from(xdg_state).join("ugtt"));
        }
    }

    let home = dirs::home_dir().ok_or_else(|| anyhow::anyhow!("Could not determine home directory"))?;
    Ok(home.join(".local/state/ugtt"))
}

/// Rotated log files (`ugtt.log.YYYY-MM-DD`) in `log_dir`, newest first.
pub fn rotated_logs(log_dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let mut log_files: Vec<_> = fs::read_dir(log_dir)?
        .filter_map(|entry| {
            let path = entry.ok()?.path();
            let file_name = path.file_name()?.to_string_lossy().to_string();
            let date = file_name.strip_prefix(LOG_FILE_PREFIX)?.strip_prefix('.')?;
            if date.matches('-').count() != 2 {
                return None;
            }
            let modified = fs::metadata(&path).ok()?.modified().ok()?;
            Some((path, modified))
        })
        .collect();

    log_files.sort_by(|a, b| b.1.cmp(&a.1));
    Ok(log_files.into_iter().map(|(path, _)| path).collect())
}

/// Deletes all but the newest [`MAX_LOG_FILES`] log files.
fn cleanup_old_logs(log_dir: &Path) -> anyhow::Result<()> {
    for path in rotated_logs(log_dir)?.iter().skip(MAX_LOG_FILES) {
        if let Err(e) = fs::remove_file(path) {
            tracing::warn!("Failed to delete old log file {}: {}", path.display(), e);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, SystemTime};

    fn touch(dir: &Path, name: &str, age_days: u64) {
        let path = dir.join(name);
        fs::write(&path, "line\n").unwrap();
        let mtime = SystemTime::now() - Duration::from_secs(age_days * 86_400);
        fs::File::options()
            .write(true)
            .open(&path)
            .unwrap()
            .set_modified(mtime)
            .unwrap();
    }

    #[test]
    fn test_rotated_logs_ignores_other_files() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "ugtt.log.2026-10-01", 2);
        touch(dir.path(), "ugtt.log.2026-10-02", 1);
        touch(dir.path(), "ugtt.toml", 0);
        touch(dir.path(), "other.log.2026-10-02", 0);

        let logs = rotated_logs(dir.path()).unwrap();
        let names: Vec<_> = logs
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["ugtt.log.2026-10-02", "ugtt.log.2026-10-01"]);
    }

    #[test]
    fn test_cleanup_keeps_newest_seven() {
        let dir = tempfile::tempdir().unwrap();
        for day in 1..=10 {
            touch(dir.path(), &format!("ugtt.log.2026-10-{day:02}"), 10 - day);
        }

        cleanup_old_logs(dir.path()).unwrap();

        let remaining = rotated_logs(dir.path()).unwrap();
        assert_eq!(remaining.len(), MAX_LOG_FILES);
        assert!(!dir.path().join("ugtt.log.2026-10-01").exists());
        assert!(dir.path().join("ugtt.log.2026-10-10").exists());
    }
}
