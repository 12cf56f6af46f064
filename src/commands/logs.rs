//! Display recent log entries.

use std::fs;
use std::path::Path;

use anyhow::anyhow;

use crate::logging::{log_dir, rotated_logs};

const DEFAULT_LINES: usize = 50;

/// Prints the tail of the newest log file.
///
/// # Errors
/// - If the log directory cannot be determined
/// - If the log directory or newest log file cannot be read
pub fn handle_logs() -> anyhow::Result<()> {
    let log_dir = log_dir()?;

    if !log_dir.exists() {
        println!("Log directory does not exist yet: {}", log_dir.display());
        println!("Logs will be created when the application runs.");
        return Ok(());
    }

    let Some(log_file) = rotated_logs(&log_dir)?.into_iter().next() else {
        println!("No log files found in: {}", log_dir.display());
        println!("Run 'ugtt transcribe' or 'ugtt translate' to generate logs.");
        return Ok(());
    };

    let content =
        fs::read_to_string(&log_file).map_err(|e| anyhow!("Failed to read log file: {e}"))?;
    if content.is_empty() {
        println!("Log file is empty: {}", log_file.display());
        return Ok(());
    }

    print_tail(&log_file, &content, DEFAULT_LINES);
    Ok(())
}

fn tail(content: &str, count: usize) -> (Vec<&str>, usize) {
    let lines: Vec<&str> = content.lines().collect();
    let total = lines.len();
    let start = total.saturating_sub(count);
    (lines[start..].to_vec(), total)
}

fn print_tail(log_file: &Path, content: &str, count: usize) {
    let (shown, total) = tail(content, count);

    if shown.len() < total {
        println!("Showing last {} of {total} lines:", shown.len());
    } else {
        println!("Showing all {total} lines:");
    }
    println!("Full log file at: {}", log_file.display());
    println!();

    for line in shown {
        println!("{line}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tail_keeps_last_lines() {
        let content: String = (1..=60).map(|n| format!("line {n}\n")).collect();
        let (shown, total) = tail(&content, DEFAULT_LINES);
        assert_eq!(total, 60);
        assert_eq!(shown.len(), 50);
        assert_eq!(shown[0], "line 11");
        assert_eq!(shown[49], "line 60");
    }

    #[test]
    fn test_tail_short_file_shows_everything() {
        let (shown, total) = tail("a\nb\n", DEFAULT_LINES);
        assert_eq!(total, 2);
        assert_eq!(shown, vec!["a", "b"]);
    }
}
