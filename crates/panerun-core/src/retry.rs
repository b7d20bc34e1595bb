//! Transient-failure classification and the backoff schedule.

use std::time::Duration;

/// Exit codes treated as transient: 124 is the GNU `timeout` style
/// code, 255 the ssh/connection-failure convention. Deterministic
/// application failures (1, 2, 127, …) are permanent and never retried.
const TRANSIENT_EXIT_CODES: &[i32] = &[124, 255];

/// Whether a non-zero exit outcome should be retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureClass {
    Transient,
    Permanent,
}

/// Classify a sentinel-observed exit code.
pub fn classify_exit(exit_code: i32) -> FailureClass {
    if TRANSIENT_EXIT_CODES.contains(&exit_code) {
        FailureClass::Transient
    } else {
        FailureClass::Permanent
    }
}

/// Backoff before retry N (1-based attempt that just failed):
/// `base * 2^(attempt-1)`, saturating instead of overflowing.
pub fn backoff_delay(base: Duration, attempt: u32) -> Duration {
    let factor = 1u32.checked_shl(attempt.saturating_sub(1)).unwrap_or(u32::MAX);
    base.checked_mul(factor).unwrap_or(Duration::MAX)
}
