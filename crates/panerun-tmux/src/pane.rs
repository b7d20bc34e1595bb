//! Pane listing and Target → pane-id resolution.

use serde::{Deserialize, Serialize};

use panerun_core::Target;

use crate::error::TmuxError;
use crate::runner::TmuxRunner;

/// Tab-delimited format string for `tmux list-panes -a -F`.
pub const LIST_PANES_FORMAT: &str =
    "#{session_name}\t#{window_index}\t#{pane_index}\t#{pane_id}\t#{window_active}\t#{pane_active}";

/// One row of `list-panes -a` output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaneEntry {
    pub session_name: String,
    pub window_index: u32,
    pub pane_index: u32,
    pub pane_id: String,
    pub window_active: bool,
    pub pane_active: bool,
}

/// Execute `tmux list-panes -a` and parse the output. A missing tmux
/// server means no panes, not an error.
pub fn list_panes(runner: &impl TmuxRunner) -> Result<Vec<PaneEntry>, TmuxError> {
    match runner.run(&["list-panes", "-a", "-F", LIST_PANES_FORMAT]) {
        Ok(output) => parse_list_panes_output(&output),
        Err(e) if e.is_no_server() => Ok(Vec::new()),
        Err(e) => Err(e),
    }
}

/// Parse the raw output of `tmux list-panes -a -F <FORMAT>`.
pub fn parse_list_panes_output(output: &str) -> Result<Vec<PaneEntry>, TmuxError> {
    let mut panes = Vec::new();
    for (idx, line) in output.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        panes.push(parse_line(trimmed, idx + 1)?);
    }
    Ok(panes)
}

fn parse_line(line: &str, line_num: usize) -> Result<PaneEntry, TmuxError> {
    let parts: Vec<&str> = line.split('\t').collect();
    if parts.len() < 6 {
        return Err(TmuxError::ParseError {
            line_num,
            detail: format!("expected 6 tab-separated fields, got {}", parts.len()),
        });
    }

    let field_u32 = |idx: usize, name: &str| -> Result<u32, TmuxError> {
        parts[idx].parse().map_err(|_| TmuxError::ParseError {
            line_num,
            detail: format!("bad {name}: {:?}", parts[idx]),
        })
    };

    Ok(PaneEntry {
        session_name: parts[0].to_string(),
        window_index: field_u32(1, "window_index")?,
        pane_index: field_u32(2, "pane_index")?,
        pane_id: parts[3].to_string(),
        window_active: parse_bool(parts[4]),
        pane_active: parse_bool(parts[5]),
    })
}

fn parse_bool(s: &str) -> bool {
    matches!(s.trim(), "1" | "true")
}

/// Resolve a Target to the id of its one live pane.
///
/// Reduced targets pick the active window and/or active pane. Returns
/// `Ok(None)` when nothing (or, for malformed server state, more than
/// one pane) matches — the Target invariant requires exactly one.
pub fn resolve_target(
    runner: &impl TmuxRunner,
    target: &Target,
) -> Result<Option<String>, TmuxError> {
    let panes = list_panes(runner)?;
    let matches: Vec<&PaneEntry> = panes
        .iter()
        .filter(|p| p.session_name == target.session)
        .filter(|p| match target.window {
            Some(w) => p.window_index == w,
            None => p.window_active,
        })
        .filter(|p| match target.pane {
            Some(idx) => p.pane_index == idx,
            None => p.pane_active,
        })
        .collect();

    match matches.as_slice() {
        [pane] => Ok(Some(pane.pane_id.clone())),
        _ => Ok(None),
    }
}
