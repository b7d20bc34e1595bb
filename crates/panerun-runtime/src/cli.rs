//! CLI definition using clap derive.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "panerun",
    about = "run shell commands inside tmux panes and get structured results"
)]
pub struct Cli {
    /// tmux server socket path (tmux -S)
    #[arg(long, global = true)]
    pub tmux_socket: Option<String>,

    /// tmux server socket name (tmux -L); ignored when a socket path is set
    #[arg(long, global = true)]
    pub tmux_socket_name: Option<String>,

    /// Context store file (default: $XDG_DATA_HOME/panerun/context.json)
    #[arg(long, global = true)]
    pub context_file: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Execute a command in a pane and print the structured result (JSON)
    Run(RunOpts),
    /// Check whether a pane is idle and able to accept a new command
    Ready(ReadyOpts),
    /// Per-target key-value metadata store
    Context {
        #[command(subcommand)]
        action: ContextAction,
    },
}

#[derive(clap::Args)]
pub struct RunOpts {
    /// Target pane: session[:window[.pane]]
    pub target: String,

    /// Shell command to execute, delivered as one opaque string
    pub command: String,

    /// Per-attempt completion timeout in seconds
    #[arg(long, default_value_t = 30.0)]
    pub timeout_secs: f64,

    /// Retries for transient outcomes (timeouts, transient exit codes)
    #[arg(long, default_value_t = 0)]
    pub max_retries: u32,

    /// Base backoff in seconds; doubles per attempt
    #[arg(long, default_value_t = 1.0)]
    pub backoff_secs: f64,

    /// Sleep between snapshot polls in milliseconds
    #[arg(long, default_value_t = 100)]
    pub poll_interval_ms: u64,

    /// Snapshot depth in lines; must exceed the largest expected output
    #[arg(long, default_value_t = 2000)]
    pub capture_lines: u32,
}

#[derive(clap::Args)]
pub struct ReadyOpts {
    /// Target pane: session[:window[.pane]]
    pub target: String,

    /// Timeout in seconds
    #[arg(long, default_value_t = 10.0)]
    pub timeout_secs: f64,

    /// Sleep between snapshot polls in milliseconds
    #[arg(long, default_value_t = 100)]
    pub poll_interval_ms: u64,

    /// Snapshot depth in lines
    #[arg(long, default_value_t = 50)]
    pub capture_lines: u32,
}

#[derive(Subcommand)]
pub enum ContextAction {
    /// Print the value stored for a key
    Get { target: String, key: String },
    /// Store a value for a key
    Set {
        target: String,
        key: String,
        value: String,
    },
    /// Remove a key
    Delete { target: String, key: String },
    /// List stored entries, optionally for one target
    List { target: Option<String> },
}

/// Default context-store path under the XDG data directory.
pub fn default_context_path() -> String {
    if let Ok(dir) = std::env::var("XDG_DATA_HOME") {
        return format!("{dir}/panerun/context.json");
    }
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    format!("{home}/.local/share/panerun/context.json")
}
