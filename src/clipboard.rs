//! Clipboard output for transcriptions.
//!
//! Pipes text into the first available clipboard tool: pbcopy (macOS), wl-copy (Wayland)
//! or xclip (X11).

use std::io::Write;
use std::process::{Command, Stdio};

use anyhow::anyhow;

/// A clipboard program and how to drive it
struct ClipboardTool {
    program: &'static str,
    args: &'static [&'static str],
    /// pbcopy exits once the text is stored. wl-copy and xclip -quiet keep serving the
    /// selection, so they are never waited on.
    waits_for_exit: bool,
}

/// Tools in the order they are tried
fn clipboard_tools() -> Vec<ClipboardTool> {
    let mut tools = Vec::new();
    if cfg!(target_os = "macos") {
        tools.push(ClipboardTool {
            program: "pbcopy",
            args: &[],
            waits_for_exit: true,
        });
    }
    tools.push(ClipboardTool {
        program: "wl-copy",
        args: &["--type", "text/plain", "--trim-newline"],
        waits_for_exit: false,
    });
    tools.push(ClipboardTool {
        program: "xclip",
        args: &["-selection", "clipboard", "-in", "-quiet"],
        waits_for_exit: false,
    });
    tools
}

/// Copies text to the system clipboard.
///
/// # Errors
/// - If no clipboard tool accepted the text
pub fn copy_to_clipboard(text: &str) -> anyhow::Result<()> {
    for tool in clipboard_tools() {
        match pipe_into(&tool, text) {
            Ok(()) => {
                tracing::debug!("Transcribed text copied to clipboard via {}", tool.program);
                return Ok(());
            }
            Err(e) => tracing::debug!("{} did not take the text: {e}", tool.program),
        }
    }

    Err(anyhow!(
        "No clipboard tool available (install wl-clipboard or xclip)"
    ))
}

fn pipe_into(tool: &ClipboardTool, text: &str) -> anyhow::Result<()> {
    let mut child = Command::new(tool.program)
        .args(tool.args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .spawn()
        .map_err(|e| anyhow!("could not start {}: {e}", tool.program))?;

    let mut stdin = child
        .stdin
        .take()
        .ok_or_else(|| anyhow!("{} has no stdin", tool.program))?;
    stdin.write_all(text.as_bytes())?;
    drop(stdin);

    if tool.waits_for_exit {
        let status = child.wait()?;
        if !status.success() {
            return Err(anyhow!("{} exited with {status}", tool.program));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    #[test]
    fn test_failing_tool_is_not_reported_as_copied() {
        let failing = ClipboardTool {
            program: "false",
            args: &[],
            waits_for_exit: true,
        };
        assert!(pipe_into(&failing, "Oli otya").is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_tool_that_exits_cleanly_succeeds() {
        let cat = ClipboardTool {
            program: "cat",
            args: &[],
            waits_for_exit: true,
        };
        pipe_into(&cat, "Oli otya").unwrap();
    }

    #[test]
    fn test_missing_tool_is_an_error() {
        let missing = ClipboardTool {
            program: "ugtt-no-such-clipboard-tool",
            args: &[],
            waits_for_exit: false,
        };
        assert!(pipe_into(&missing, "x").is_err());
    }
}
