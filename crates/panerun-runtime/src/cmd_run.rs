//! `panerun run` — execute a command in a pane, print the result JSON.

use std::time::Duration;

use panerun_core::{ExecError, ExecRequest, ExecResult, Target};
use panerun_engine::{ExecController, PaneAdapter};

use crate::cli::RunOpts;
use crate::syntax::BashSyntaxValidator;

/// Returns the process exit code: 0 whenever the protocol completed and
/// a JSON result was printed (the command's own status travels inside
/// `exit_code`); the fatal-error code otherwise.
pub async fn cmd_run(adapter: &dyn PaneAdapter, opts: &RunOpts) -> anyhow::Result<i32> {
    match run_inner(adapter, opts).await {
        Ok(result) => {
            print_result(&result)?;
            Ok(0)
        }
        Err(e) => {
            eprintln!("panerun: {e}");
            Ok(e.exit_code())
        }
    }
}

async fn run_inner(adapter: &dyn PaneAdapter, opts: &RunOpts) -> Result<ExecResult, ExecError> {
    let target: Target = opts.target.parse()?;
    let req = ExecRequest::new(&opts.command)
        .with_timeout(parse_secs(opts.timeout_secs, "timeout")?)
        .with_max_retries(opts.max_retries)
        .with_base_backoff(parse_secs(opts.backoff_secs, "backoff")?)
        .with_poll_interval(Duration::from_millis(opts.poll_interval_ms))
        .with_capture_lines(opts.capture_lines);

    let validator = BashSyntaxValidator::default();
    ExecController::new(adapter, &validator)
        .execute(&target, &req)
        .await
}

fn print_result(result: &ExecResult) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string(result)?);
    Ok(())
}

fn parse_secs(value: f64, what: &str) -> Result<Duration, ExecError> {
    Duration::try_from_secs_f64(value)
        .map_err(|_| ExecError::InvalidRequest(format!("bad {what} seconds: {value}")))
}
