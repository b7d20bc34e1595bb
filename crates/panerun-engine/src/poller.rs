//! Completion poller: watch a pane's snapshots for the sentinel.

use std::time::Duration;

use tokio::time::{Instant, sleep};
use tracing::trace;

use panerun_core::extract::SentinelMatch;
use panerun_core::marker::Marker;
use panerun_core::{ExecError, Target, find_sentinel};

use crate::adapter::PaneAdapter;

/// Terminal states of one poll cycle: `RUNNING -> READY | TIMEOUT |
/// PANE_LOST`. `PaneLost` is reported as an outcome here and promoted
/// to a fatal error by the controller.
#[derive(Debug)]
pub enum PollOutcome {
    /// Sentinel observed; carries the snapshot it was found in.
    Ready {
        lines: Vec<String>,
        sentinel: SentinelMatch,
    },
    /// Deadline passed with no sentinel in the capture window.
    TimedOut,
    /// Pane disappeared mid-poll.
    PaneLost,
}

/// Poll the pane until the sentinel appears, the deadline passes, or
/// the pane dies. The inter-poll sleep is capped at the remaining time
/// so the final iteration never overshoots the deadline.
///
/// Within one attempt any sentinel emitted before the deadline will be
/// observed: each snapshot captures the full current tail of a
/// linearly-appended stream.
pub async fn poll_for_sentinel(
    adapter: &dyn PaneAdapter,
    target: &Target,
    marker: &Marker,
    deadline: Instant,
    poll_interval: Duration,
    capture_lines: u32,
) -> Result<PollOutcome, ExecError> {
    loop {
        if !adapter.exists(target)? {
            return Ok(PollOutcome::PaneLost);
        }

        let lines = adapter.snapshot(target, capture_lines)?;
        if let Some(sentinel) = find_sentinel(&lines, marker)? {
            trace!(%target, line = sentinel.line_idx, exit_code = sentinel.exit_code, "sentinel observed");
            return Ok(PollOutcome::Ready { lines, sentinel });
        }

        let now = Instant::now();
        if now >= deadline {
            return Ok(PollOutcome::TimedOut);
        }
        sleep(poll_interval.min(deadline - now)).await;
    }
}
