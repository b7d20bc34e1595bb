//! panerun-core: pure protocol logic for pane command execution.
//! Target addressing, marker encoding, sentinel extraction, retry
//! classification, and idle-prompt heuristics. No IO, no async.

pub mod error;
pub mod extract;
pub mod marker;
pub mod readiness;
pub mod retry;
pub mod types;

pub use error::ExecError;
pub use extract::{Extraction, SentinelMatch, extract, find_sentinel};
pub use marker::{Marker, decode, encode};
pub use readiness::{is_idle_prompt, last_nonblank};
pub use retry::{FailureClass, backoff_delay, classify_exit};
pub use types::{ExecRequest, ExecResult, ReadyReport, Target};
