//! `panerun ready` — readiness check, always answered with a JSON body.

use std::time::Duration;

use anyhow::Context as _;

use panerun_core::{ReadyReport, Target};
use panerun_engine::{PaneAdapter, ReadyParams, wait_ready};

use crate::cli::ReadyOpts;
use crate::store::{ContextStore, PROMPT_MARKER_KEY};

/// Exit code 0 when ready, 1 otherwise; every failure reason travels in
/// the JSON body per the readiness contract.
pub async fn cmd_ready(
    adapter: &dyn PaneAdapter,
    store: &dyn ContextStore,
    opts: &ReadyOpts,
) -> anyhow::Result<i32> {
    let report = match opts.target.parse::<Target>() {
        Err(_) => ReadyReport::not_ready("invalid_target", 0),
        Ok(target) => {
            // Store failures must not block a readiness probe; fall back
            // to the generic prompt heuristic.
            let prompt_marker = store
                .get(&target.to_string(), PROMPT_MARKER_KEY)
                .unwrap_or_default();
            let params = ReadyParams {
                timeout: Duration::try_from_secs_f64(opts.timeout_secs)
                    .with_context(|| format!("bad timeout seconds: {}", opts.timeout_secs))?,
                poll_interval: Duration::from_millis(opts.poll_interval_ms),
                capture_lines: opts.capture_lines,
                prompt_marker,
            };
            wait_ready(adapter, &target, &params).await?
        }
    };

    println!("{}", serde_json::to_string(&report)?);
    Ok(if report.ready { 0 } else { 1 })
}
