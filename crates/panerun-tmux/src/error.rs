//! Error types for the tmux backend.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TmuxError {
    #[error("tmux command failed: {0}")]
    CommandFailed(String),

    #[error("failed to parse list-panes line {line_num}: {detail}")]
    ParseError { line_num: usize, detail: String },

    #[error("tmux io error: {0}")]
    Io(#[from] std::io::Error),
}

impl TmuxError {
    /// True when the failure means no tmux server is running at all —
    /// callers treat that as "no panes" rather than a hard error.
    pub fn is_no_server(&self) -> bool {
        match self {
            Self::CommandFailed(msg) => {
                msg.contains("no server running") || msg.contains("error connecting to")
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_server_detection() {
        let err = TmuxError::CommandFailed(
            "exit code 1: no server running on /tmp/tmux-1000/default".to_string(),
        );
        assert!(err.is_no_server());
        let err = TmuxError::CommandFailed("exit code 1: can't find pane: %9".to_string());
        assert!(!err.is_no_server());
    }
}
