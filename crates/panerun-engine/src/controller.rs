//! Retry/backoff controller: owns the attempt sequence around one
//! encode → send → poll → extract cycle.

use tokio::time::{Instant, sleep};
use tracing::{debug, warn};

use panerun_core::marker::Marker;
use panerun_core::retry::{FailureClass, backoff_delay, classify_exit};
use panerun_core::{ExecError, ExecRequest, ExecResult, Target, encode, extract};

use crate::adapter::{PaneAdapter, SyntaxValidator};
use crate::poller::{PollOutcome, poll_for_sentinel};

/// Stateless across invocations: everything an execution needs lives in
/// the request; the pane is the only side effect.
pub struct ExecController<'a> {
    adapter: &'a dyn PaneAdapter,
    validator: &'a dyn SyntaxValidator,
}

impl<'a> ExecController<'a> {
    pub fn new(adapter: &'a dyn PaneAdapter, validator: &'a dyn SyntaxValidator) -> Self {
        Self { adapter, validator }
    }

    /// Run the command on the target pane and return the structured
    /// result once the sentinel is matched or retries are exhausted.
    ///
    /// Fatal conditions (`InvalidSyntax`, `TargetNotFound`, `PaneLost`,
    /// `ProtocolViolation`) surface as errors without retry; timeouts
    /// and transient exit codes are retried with exponential backoff up
    /// to `max_retries`.
    pub async fn execute(
        &self,
        target: &Target,
        req: &ExecRequest,
    ) -> Result<ExecResult, ExecError> {
        req.validate()?;
        if !self.validator.is_valid(&req.command) {
            return Err(ExecError::InvalidSyntax(req.command.clone()));
        }
        if !self.adapter.exists(target)? {
            return Err(ExecError::TargetNotFound(target.to_string()));
        }

        let started = Instant::now();
        let mut attempt: u32 = 1;
        loop {
            // Fresh marker per attempt: a stale sentinel from a previous
            // attempt in the same pane can never satisfy this poll.
            let marker = Marker::generate();
            let wrapped = encode(&req.command, &marker);
            debug!(%target, attempt, marker = %marker, "submitting wrapped command");
            self.adapter.send_line(target, &wrapped)?;

            let deadline = Instant::now() + req.timeout;
            let outcome = poll_for_sentinel(
                self.adapter,
                target,
                &marker,
                deadline,
                req.poll_interval,
                req.capture_lines,
            )
            .await?;

            let result = match outcome {
                PollOutcome::PaneLost => {
                    return Err(ExecError::PaneLost(target.to_string()));
                }
                PollOutcome::TimedOut => {
                    warn!(%target, attempt, timeout_ms = req.timeout.as_millis() as u64, "no sentinel before deadline");
                    self.result(String::new(), -1, true, started, attempt)
                }
                PollOutcome::Ready { lines, .. } => {
                    let ex = extract(&lines, &marker)?.ok_or_else(|| {
                        ExecError::ProtocolViolation(
                            "sentinel matched during poll but absent at extraction".to_string(),
                        )
                    })?;
                    self.result(ex.output, ex.exit_code, false, started, attempt)
                }
            };

            if result.exit_code == 0 && !result.timed_out {
                return Ok(result);
            }

            let retriable = result.timed_out
                || classify_exit(result.exit_code) == FailureClass::Transient;
            if !retriable || attempt >= req.max_retries + 1 {
                return Ok(result);
            }

            let delay = backoff_delay(req.base_backoff, attempt);
            debug!(%target, attempt, delay_ms = delay.as_millis() as u64, exit_code = result.exit_code, "transient outcome, backing off before retry");
            sleep(delay).await;
            attempt += 1;
        }
    }

    fn result(
        &self,
        output: String,
        exit_code: i32,
        timed_out: bool,
        started: Instant,
        attempt: u32,
    ) -> ExecResult {
        ExecResult {
            output,
            exit_code,
            duration_ms: started.elapsed().as_millis() as u64,
            attempts: attempt,
            retried: attempt > 1,
            timed_out,
        }
    }
}
