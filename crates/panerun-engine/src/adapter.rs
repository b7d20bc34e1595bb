//! Collaborator traits consumed by the protocol. Enables mock
//! injection for IO-free tests; the tmux-backed implementations live in
//! the runtime crate.

use panerun_core::{ExecError, Target};

/// Narrow contract over one terminal-multiplexer pane.
///
/// The pane is an exclusively-owned resource for the duration of one
/// attempt; mutual exclusion across concurrent callers targeting the
/// same pane is the caller's responsibility.
pub trait PaneAdapter: Send + Sync {
    /// Deliver one line of text to the pane, byte-for-byte, followed by
    /// a newline submission.
    fn send_line(&self, target: &Target, text: &str) -> Result<(), ExecError>;

    /// Capture the last `lines` lines of the pane's buffer.
    fn snapshot(&self, target: &Target, lines: u32) -> Result<Vec<String>, ExecError>;

    /// Whether the target currently resolves to exactly one live pane.
    fn exists(&self, target: &Target) -> Result<bool, ExecError>;
}

impl<T: PaneAdapter + ?Sized> PaneAdapter for &T {
    fn send_line(&self, target: &Target, text: &str) -> Result<(), ExecError> {
        (**self).send_line(target, text)
    }

    fn snapshot(&self, target: &Target, lines: u32) -> Result<Vec<String>, ExecError> {
        (**self).snapshot(target, lines)
    }

    fn exists(&self, target: &Target) -> Result<bool, ExecError> {
        (**self).exists(target)
    }
}

/// Pre-flight shell syntax gate. A rejected command never reaches the
/// pane, saving a full poll cycle on something guaranteed to fail.
pub trait SyntaxValidator: Send + Sync {
    fn is_valid(&self, command: &str) -> bool;
}

impl<T: SyntaxValidator + ?Sized> SyntaxValidator for &T {
    fn is_valid(&self, command: &str) -> bool {
        (**self).is_valid(command)
    }
}
