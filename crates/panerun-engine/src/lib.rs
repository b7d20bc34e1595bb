//! panerun-engine: the async protocol driver.
//! Owns the completion poller, the retry/backoff controller, and the
//! readiness gate; talks to the pane only through the `PaneAdapter`
//! collaborator trait.

pub mod adapter;
pub mod controller;
pub mod poller;
pub mod ready;

pub use adapter::{PaneAdapter, SyntaxValidator};
pub use controller::ExecController;
pub use poller::{PollOutcome, poll_for_sentinel};
pub use ready::{ReadyParams, wait_ready};
