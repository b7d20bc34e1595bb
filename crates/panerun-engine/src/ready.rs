//! Readiness gate: decide whether a pane is idle and able to accept a
//! new command, without sending anything into it.

use std::time::Duration;

use tokio::time::{Instant, sleep};
use tracing::trace;

use panerun_core::{ExecError, ReadyReport, Target, is_idle_prompt, last_nonblank};

use crate::adapter::PaneAdapter;

/// Parameters for one readiness check.
#[derive(Debug, Clone)]
pub struct ReadyParams {
    pub timeout: Duration,
    pub poll_interval: Duration,
    pub capture_lines: u32,
    /// Marker prompt previously installed for this pane; when set it
    /// replaces the generic shell-prompt heuristic.
    pub prompt_marker: Option<String>,
}

impl Default for ReadyParams {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            poll_interval: Duration::from_millis(100),
            capture_lines: 50,
            prompt_marker: None,
        }
    }
}

/// Poll the pane until its last non-blank line looks like an idle
/// prompt. Failure reasons travel in the report body, not the error
/// taxonomy, so the CLI can always emit the readiness JSON shape.
pub async fn wait_ready(
    adapter: &dyn PaneAdapter,
    target: &Target,
    params: &ReadyParams,
) -> Result<ReadyReport, ExecError> {
    let started = Instant::now();

    if !adapter.exists(target)? {
        return Ok(ReadyReport::not_ready(
            "invalid_target",
            started.elapsed().as_millis() as u64,
        ));
    }

    let deadline = started + params.timeout;
    loop {
        if !adapter.exists(target)? {
            return Ok(ReadyReport::not_ready(
                "pane_lost",
                started.elapsed().as_millis() as u64,
            ));
        }

        let lines = adapter.snapshot(target, params.capture_lines)?;
        if let Some(line) = last_nonblank(&lines) {
            if is_idle_prompt(line, params.prompt_marker.as_deref()) {
                trace!(%target, line, "idle prompt matched");
                return Ok(ReadyReport::ready(started.elapsed().as_millis() as u64));
            }
        }

        let now = Instant::now();
        if now >= deadline {
            return Ok(ReadyReport::not_ready(
                "timeout",
                started.elapsed().as_millis() as u64,
            ));
        }
        sleep(params.poll_interval.min(deadline - now)).await;
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    struct FramePane {
        frames: Mutex<Vec<Vec<String>>>,
        alive: Mutex<Vec<bool>>,
    }

    impl FramePane {
        fn new(frames: Vec<Vec<&str>>) -> Self {
            Self {
                frames: Mutex::new(
                    frames
                        .into_iter()
                        .map(|f| f.into_iter().map(String::from).collect())
                        .collect(),
                ),
                alive: Mutex::new(vec![]),
            }
        }

        /// Script the `exists` answers; the last one repeats.
        fn with_liveness(self, answers: &[bool]) -> Self {
            *self.alive.lock().expect("lock") = answers.to_vec();
            self
        }
    }

    impl PaneAdapter for FramePane {
        fn send_line(&self, _: &Target, _: &str) -> Result<(), ExecError> {
            panic!("readiness gate must never send");
        }

        fn snapshot(&self, _: &Target, _: u32) -> Result<Vec<String>, ExecError> {
            let mut frames = self.frames.lock().expect("lock");
            if frames.len() > 1 {
                Ok(frames.remove(0))
            } else {
                Ok(frames.first().cloned().unwrap_or_default())
            }
        }

        fn exists(&self, _: &Target) -> Result<bool, ExecError> {
            let mut alive = self.alive.lock().expect("lock");
            if alive.is_empty() {
                return Ok(true);
            }
            if alive.len() > 1 {
                Ok(alive.remove(0))
            } else {
                Ok(alive[0])
            }
        }
    }

    fn target() -> Target {
        Target::new("main")
    }

    #[tokio::test(start_paused = true)]
    async fn idle_pane_is_ready_immediately() {
        let pane = FramePane::new(vec![vec!["output", "user@host:~$ ", ""]]);
        let report = wait_ready(&pane, &target(), &ReadyParams::default())
            .await
            .expect("check ok");
        assert!(report.ready);
        assert_eq!(report.reason, None);
        assert!(report.duration_ms < 100);
    }

    #[tokio::test(start_paused = true)]
    async fn readiness_is_idempotent() {
        let params = ReadyParams::default();
        for _ in 0..2 {
            let pane = FramePane::new(vec![vec!["user@host:~$ "]]);
            let report = wait_ready(&pane, &target(), &params)
                .await
                .expect("check ok");
            assert!(report.ready);
            assert!(report.duration_ms < 100);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn busy_then_idle() {
        let pane = FramePane::new(vec![
            vec!["compiling..."],
            vec!["compiling..."],
            vec!["done", "user@host:~$ "],
        ]);
        let report = wait_ready(&pane, &target(), &ReadyParams::default())
            .await
            .expect("check ok");
        assert!(report.ready);
        assert!(report.duration_ms >= 200);
    }

    #[tokio::test(start_paused = true)]
    async fn timeout_when_never_idle() {
        let pane = FramePane::new(vec![vec!["still running..."]]);
        let params = ReadyParams {
            timeout: Duration::from_millis(500),
            ..ReadyParams::default()
        };
        let started = Instant::now();
        let report = wait_ready(&pane, &target(), &params)
            .await
            .expect("check ok");
        assert!(!report.ready);
        assert_eq!(report.reason.as_deref(), Some("timeout"));
        assert!(started.elapsed() <= Duration::from_millis(600));
    }

    #[tokio::test(start_paused = true)]
    async fn unresolvable_target_reports_invalid_target() {
        let pane = FramePane::new(vec![]).with_liveness(&[false]);
        let report = wait_ready(&pane, &target(), &ReadyParams::default())
            .await
            .expect("check ok");
        assert!(!report.ready);
        assert_eq!(report.reason.as_deref(), Some("invalid_target"));
    }

    #[tokio::test(start_paused = true)]
    async fn death_mid_poll_reports_pane_lost() {
        let pane =
            FramePane::new(vec![vec!["busy"]]).with_liveness(&[true, true, true, false]);
        let report = wait_ready(&pane, &target(), &ReadyParams::default())
            .await
            .expect("check ok");
        assert!(!report.ready);
        assert_eq!(report.reason.as_deref(), Some("pane_lost"));
    }

    #[tokio::test(start_paused = true)]
    async fn installed_marker_prompt_gates_readiness() {
        let pane = FramePane::new(vec![vec!["continue? >"]]);
        let params = ReadyParams {
            timeout: Duration::from_millis(300),
            prompt_marker: Some("::panerun::".to_string()),
            ..ReadyParams::default()
        };
        let report = wait_ready(&pane, &target(), &params)
            .await
            .expect("check ok");
        // `>` would satisfy the generic heuristic; the installed marker
        // must win, and this pane never shows it.
        assert!(!report.ready);
        assert_eq!(report.reason.as_deref(), Some("timeout"));
    }
}
