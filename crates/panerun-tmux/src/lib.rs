//! panerun-tmux: tmux backend IO boundary.
//! Subprocess execution, pane listing and target resolution, capture
//! and literal keystroke delivery. No protocol logic.

pub mod error;
pub mod io;
pub mod pane;
pub mod runner;

pub use error::TmuxError;
pub use io::{capture_pane, send_line};
pub use pane::{LIST_PANES_FORMAT, PaneEntry, list_panes, parse_list_panes_output, resolve_target};
pub use runner::{TmuxProcess, TmuxRunner};
