//! Pane capture and keystroke delivery.

use tracing::debug;

use crate::error::TmuxError;
use crate::runner::TmuxRunner;

/// Capture the last `lines` lines of a pane's buffer, scrollback
/// included (`-S -<lines>`). The caller owns the tradeoff between
/// window depth and the risk of the sentinel scrolling out of view.
pub fn capture_pane(
    runner: &impl TmuxRunner,
    pane_id: &str,
    lines: u32,
) -> Result<Vec<String>, TmuxError> {
    let start_line = format!("-{lines}");
    let output = runner.run(&["capture-pane", "-p", "-S", &start_line, "-t", pane_id])?;
    Ok(output.lines().map(String::from).collect())
}

/// Deliver one line of text to a pane byte-for-byte and submit it.
///
/// The text goes through `send-keys -l` so tmux performs no key-name
/// interpretation; the wrapped command arrives exactly as encoded. The
/// newline is a separate `Enter` keypress.
pub fn send_line(runner: &impl TmuxRunner, pane_id: &str, text: &str) -> Result<(), TmuxError> {
    debug!(pane_id, len = text.len(), "sending line");
    runner.run(&["send-keys", "-t", pane_id, "-l", text])?;
    runner.run(&["send-keys", "-t", pane_id, "Enter"])?;
    Ok(())
}
