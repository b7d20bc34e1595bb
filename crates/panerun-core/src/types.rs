//! Core data model: targets, requests, results.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ExecError;

// ─── Target ───────────────────────────────────────────────────────

/// Address of one tmux pane: session, optional window index, optional
/// pane index. Reduced forms (`session`, `session:window`) resolve to
/// the active window/pane at resolution time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Target {
    pub session: String,
    pub window: Option<u32>,
    pub pane: Option<u32>,
}

impl Target {
    pub fn new(session: impl Into<String>) -> Self {
        Self {
            session: session.into(),
            window: None,
            pane: None,
        }
    }

    #[must_use]
    pub fn with_window(mut self, window: u32) -> Self {
        self.window = Some(window);
        self
    }

    #[must_use]
    pub fn with_pane(mut self, pane: u32) -> Self {
        self.pane = Some(pane);
        self
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.window, self.pane) {
            (Some(w), Some(p)) => write!(f, "{}:{}.{}", self.session, w, p),
            (Some(w), None) => write!(f, "{}:{}", self.session, w),
            _ => f.write_str(&self.session),
        }
    }
}

impl FromStr for Target {
    type Err = ExecError;

    /// Accepted forms: `session`, `session:window`, `session:window.pane`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ExecError::InvalidTarget("empty target".to_string()));
        }

        let (session, rest) = match s.split_once(':') {
            None => (s, None),
            Some((sess, rest)) => (sess, Some(rest)),
        };
        if session.is_empty() {
            return Err(ExecError::InvalidTarget(format!(
                "missing session name: {s}"
            )));
        }

        let mut target = Target::new(session);
        if let Some(rest) = rest {
            let (win, pane) = match rest.split_once('.') {
                None => (rest, None),
                Some((w, p)) => (w, Some(p)),
            };
            let window: u32 = win.parse().map_err(|_| {
                ExecError::InvalidTarget(format!("bad window index {win:?} in {s}"))
            })?;
            target = target.with_window(window);
            if let Some(p) = pane {
                let pane: u32 = p.parse().map_err(|_| {
                    ExecError::InvalidTarget(format!("bad pane index {p:?} in {s}"))
                })?;
                target = target.with_pane(pane);
            }
        }
        Ok(target)
    }
}

// ─── Execution request ────────────────────────────────────────────

/// One execution request against a Target.
#[derive(Debug, Clone)]
pub struct ExecRequest {
    pub command: String,
    pub timeout: Duration,
    pub max_retries: u32,
    pub base_backoff: Duration,
    /// Inter-poll sleep; the final sleep is capped by the deadline.
    pub poll_interval: Duration,
    /// Snapshot depth in lines; output larger than this can scroll the
    /// sentinel out of the capture window and surface as a timeout.
    pub capture_lines: u32,
}

impl ExecRequest {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            timeout: Duration::from_secs(30),
            max_retries: 0,
            base_backoff: Duration::from_secs(1),
            poll_interval: Duration::from_millis(100),
            capture_lines: 2000,
        }
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    #[must_use]
    pub fn with_base_backoff(mut self, base_backoff: Duration) -> Self {
        self.base_backoff = base_backoff;
        self
    }

    #[must_use]
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    #[must_use]
    pub fn with_capture_lines(mut self, capture_lines: u32) -> Self {
        self.capture_lines = capture_lines;
        self
    }

    /// Check request invariants before any pane interaction.
    pub fn validate(&self) -> Result<(), ExecError> {
        if self.command.trim().is_empty() {
            return Err(ExecError::InvalidSyntax("empty command".to_string()));
        }
        if self.timeout.is_zero() {
            return Err(ExecError::InvalidRequest(
                "timeout must be greater than zero".to_string(),
            ));
        }
        if self.poll_interval.is_zero() {
            return Err(ExecError::InvalidRequest(
                "poll interval must be greater than zero".to_string(),
            ));
        }
        if self.capture_lines == 0 {
            return Err(ExecError::InvalidRequest(
                "capture window must be at least one line".to_string(),
            ));
        }
        Ok(())
    }
}

// ─── Execution result ─────────────────────────────────────────────

/// Final result of one `execute` call. Constructed once the sentinel is
/// matched or retries are exhausted; serialized verbatim as the CLI's
/// success JSON. Never mutated after construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecResult {
    pub output: String,
    pub exit_code: i32,
    pub duration_ms: u64,
    pub attempts: u32,
    pub retried: bool,
    pub timed_out: bool,
}

/// Outcome of a readiness check. Failure reasons are part of the JSON
/// body, not the error taxonomy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadyReport {
    pub ready: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub duration_ms: u64,
}

impl ReadyReport {
    pub fn ready(duration_ms: u64) -> Self {
        Self {
            ready: true,
            reason: None,
            duration_ms,
        }
    }

    pub fn not_ready(reason: impl Into<String>, duration_ms: u64) -> Self {
        Self {
            ready: false,
            reason: Some(reason.into()),
            duration_ms,
        }
    }
}
