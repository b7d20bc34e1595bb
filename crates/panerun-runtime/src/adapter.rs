//! Tmux-backed `PaneAdapter`: wires the engine's collaborator trait to
//! the panerun-tmux IO boundary, translating backend errors into the
//! protocol taxonomy.

use panerun_core::{ExecError, Target};
use panerun_engine::PaneAdapter;
use panerun_tmux::{TmuxError, TmuxProcess, TmuxRunner, capture_pane, resolve_target, send_line};

pub struct TmuxPaneAdapter<R: TmuxRunner = TmuxProcess> {
    runner: R,
}

impl<R: TmuxRunner> TmuxPaneAdapter<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }

    /// Resolve on every call so a pane killed mid-protocol is noticed
    /// at the next interaction instead of silently targeting a reused id.
    fn pane_id(&self, target: &Target) -> Result<Option<String>, ExecError> {
        resolve_target(&self.runner, target).map_err(|e| map_err(target, e))
    }
}

fn map_err(target: &Target, e: TmuxError) -> ExecError {
    match &e {
        TmuxError::CommandFailed(msg)
            if msg.contains("can't find pane") || msg.contains("can't find session") =>
        {
            ExecError::PaneLost(format!("{target}: {msg}"))
        }
        _ => ExecError::Adapter(e.to_string()),
    }
}

impl<R: TmuxRunner> PaneAdapter for TmuxPaneAdapter<R> {
    fn send_line(&self, target: &Target, text: &str) -> Result<(), ExecError> {
        let Some(pane_id) = self.pane_id(target)? else {
            return Err(ExecError::PaneLost(target.to_string()));
        };
        send_line(&self.runner, &pane_id, text).map_err(|e| map_err(target, e))
    }

    fn snapshot(&self, target: &Target, lines: u32) -> Result<Vec<String>, ExecError> {
        let Some(pane_id) = self.pane_id(target)? else {
            return Err(ExecError::PaneLost(target.to_string()));
        };
        capture_pane(&self.runner, &pane_id, lines).map_err(|e| map_err(target, e))
    }

    fn exists(&self, target: &Target) -> Result<bool, ExecError> {
        Ok(self.pane_id(target)?.is_some())
    }
}
