//! panerun: run shell commands inside tmux panes and get structured
//! results back. Single binary wiring the protocol engine to the tmux
//! backend, the bash syntax gate, and the file context store.

use clap::Parser;

use panerun_tmux::TmuxProcess;

mod adapter;
mod cli;
mod cmd_context;
mod cmd_ready;
mod cmd_run;
mod store;
mod syntax;

use adapter::TmuxPaneAdapter;
use store::FileContextStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = cli::Cli::parse();

    let filter = std::env::var("PANERUN_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| "warn".to_string());
    // Diagnostics on stderr; stdout carries only the JSON contract.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();

    let mut runner = TmuxProcess::default();
    if let Some(ref path) = args.tmux_socket {
        runner = runner.with_socket_path(path);
    } else if let Some(ref name) = args.tmux_socket_name {
        runner = runner.with_socket_name(name);
    }
    let adapter = TmuxPaneAdapter::new(runner);

    let store_path = args
        .context_file
        .clone()
        .unwrap_or_else(cli::default_context_path);
    let store = FileContextStore::new(store_path);

    let exit_code = match args.command {
        cli::Command::Run(opts) => cmd_run::cmd_run(&adapter, &opts).await?,
        cli::Command::Ready(opts) => cmd_ready::cmd_ready(&adapter, &store, &opts).await?,
        cli::Command::Context { action } => cmd_context::cmd_context(&store, &action)?,
    };

    if exit_code != 0 {
        std::process::exit(exit_code);
    }
    Ok(())
}
