//! Protocol error taxonomy.
//!
//! Only fatal conditions are errors: retriable outcomes (timeout,
//! transient exit codes) travel inside `ExecResult` so the retry
//! controller can decide what to do with them.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExecError {
    /// Target string could not be parsed.
    #[error("invalid target: {0}")]
    InvalidTarget(String),

    /// Target parsed but does not resolve to exactly one live pane.
    #[error("target not found: {0}")]
    TargetNotFound(String),

    /// Request invariant violated (zero timeout, empty capture window).
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Pre-flight syntax validation rejected the command before any
    /// pane interaction.
    #[error("invalid shell syntax: {0}")]
    InvalidSyntax(String),

    /// Pane disappeared mid-poll.
    #[error("pane lost: {0}")]
    PaneLost(String),

    /// Sentinel line matched the marker prefix but carried a malformed
    /// status token. The encoder generates that token, so this is an
    /// internal bug, never caller error.
    #[error("protocol violation: {0}")]
    ProtocolViolation(String),

    /// Terminal adapter failure (tmux subprocess, transport).
    #[error("adapter error: {0}")]
    Adapter(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl ExecError {
    /// Process exit code for the CLI contract.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidTarget(_) | Self::TargetNotFound(_) | Self::InvalidRequest(_) => 2,
            Self::InvalidSyntax(_) => 3,
            Self::PaneLost(_) => 4,
            Self::ProtocolViolation(_) => 5,
            Self::Adapter(_) | Self::Io(_) => 1,
        }
    }
}
