//! Sentinel grammar and result extraction.
//!
//! Structured state is recovered from raw terminal text by one small
//! line grammar instead of ad hoc matching. Scanning a snapshot from
//! the bottom, each line falls into one of three cases:
//!
//! - `<MARKER>:<integer>`   — the sentinel; the integer is the exit status
//! - `<MARKER>:$?…`         — a wrapped fragment of the command echo; skipped
//! - `<MARKER>:<garbage>`   — protocol violation (the encoder generates
//!   this token, so malformation is an internal bug)
//!
//! Lines not starting with the marker are ordinary pane content.

use crate::error::ExecError;
use crate::marker::{MARKER_DELIM, Marker};

/// Position and payload of a matched sentinel line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SentinelMatch {
    pub line_idx: usize,
    pub exit_code: i32,
}

/// Captured stdout region plus the parsed exit code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub output: String,
    pub exit_code: i32,
}

/// Scan snapshot lines (bottom-up) for the sentinel.
///
/// Returns `Ok(None)` while the sentinel has not appeared yet.
pub fn find_sentinel(lines: &[String], marker: &Marker) -> Result<Option<SentinelMatch>, ExecError> {
    for (idx, line) in lines.iter().enumerate().rev() {
        let trimmed = line.trim();
        let Some(rest) = trimmed.strip_prefix(marker.as_str()) else {
            continue;
        };
        let Some(token) = rest.strip_prefix(MARKER_DELIM) else {
            // Marker at line start without delimiter: the echo wrapped
            // mid-statement. Not a sentinel candidate.
            continue;
        };
        if token.starts_with("$?") {
            // Unexpanded `$?` — the command echo itself, wrapped so the
            // marker landed at a line boundary.
            continue;
        }
        return match token.parse::<i32>() {
            Ok(exit_code) => Ok(Some(SentinelMatch {
                line_idx: idx,
                exit_code,
            })),
            Err(_) => Err(ExecError::ProtocolViolation(format!(
                "sentinel line {} carries malformed status token {token:?}",
                idx + 1
            ))),
        };
    }
    Ok(None)
}

/// Extract the command's stdout region and exit code from a snapshot in
/// which the sentinel has appeared.
///
/// The stdout region is every line strictly between the command echo
/// (nearest line above the sentinel containing the marker — the wrapped
/// command embeds it) and the sentinel line. Original line breaks and
/// ordering are preserved; the echo line and the sentinel line are
/// never included. If the echo has scrolled out of the capture window,
/// the region starts at the top of the window.
pub fn extract(lines: &[String], marker: &Marker) -> Result<Option<Extraction>, ExecError> {
    let Some(sentinel) = find_sentinel(lines, marker)? else {
        return Ok(None);
    };

    let echo_idx = lines[..sentinel.line_idx]
        .iter()
        .rposition(|l| l.contains(marker.as_str()));
    let start = echo_idx.map_or(0, |i| i + 1);

    let body = &lines[start..sentinel.line_idx];
    let output = if body.is_empty() {
        String::new()
    } else {
        let mut joined = body.join("\n");
        joined.push('\n');
        joined
    };

    Ok(Some(Extraction {
        output,
        exit_code: sentinel.exit_code,
    }))
}
