//! Marker generation and command wrapping.
//!
//! A marker is a single-use, high-entropy token emitted on its own line
//! after the user's command finishes, carrying the shell's exit status.
//! Wrapping happens in exactly one place so the escaping contract stays
//! auditable: the marker alphabet is `[A-Za-z0-9_]`, which no shell
//! layer needs to escape.

use std::fmt;

use rand::Rng;
use rand::distributions::Alphanumeric;

/// Token prefix; makes markers recognizable in a capture without
/// weakening uniqueness (the entropy lives in the random suffix).
const MARKER_PREFIX: &str = "PANERUN_";

/// Random suffix length. 20 alphanumeric chars ≈ 119 bits of entropy;
/// a collision with ordinary command output is negligible.
const MARKER_SUFFIX_LEN: usize = 20;

/// Delimiter between the marker and the exit-status token.
pub const MARKER_DELIM: char = ':';

/// A single-use completion marker, generated fresh per attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marker(String);

impl Marker {
    /// Generate a fresh marker from the thread-local CSPRNG.
    pub fn generate() -> Self {
        let suffix: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(MARKER_SUFFIX_LEN)
            .map(char::from)
            .collect();
        Self(format!("{MARKER_PREFIX}{suffix}"))
    }

    /// Construct from a known token (tests, replay).
    pub fn from_token(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Wrap a command so the pane emits `<MARKER>:<status>` on its own line
/// after the command finishes. The command itself is delivered
/// unmodified; `$?` is expanded by the pane's shell at emit time, so no
/// side channel is needed to recover the exit status.
pub fn encode(command: &str, marker: &Marker) -> String {
    format!("{command}; echo \"{marker}{MARKER_DELIM}$?\"")
}

/// Inverse of [`encode`]: recover the original command from a wrapped
/// statement. Returns `None` if the suffix does not match the marker.
pub fn decode<'a>(wrapped: &'a str, marker: &Marker) -> Option<&'a str> {
    let suffix = format!("; echo \"{marker}{MARKER_DELIM}$?\"");
    wrapped.strip_suffix(suffix.as_str())
}
