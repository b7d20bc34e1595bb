//! TmuxRunner trait and the real subprocess implementation.
//! The trait boundary is what keeps every other crate testable without
//! a live tmux server.

use tracing::trace;

use crate::error::TmuxError;

/// Executes one tmux subcommand and returns its stdout.
pub trait TmuxRunner: Send + Sync {
    fn run(&self, args: &[&str]) -> Result<String, TmuxError>;
}

impl<T: TmuxRunner + ?Sized> TmuxRunner for &T {
    fn run(&self, args: &[&str]) -> Result<String, TmuxError> {
        (**self).run(args)
    }
}

/// Real tmux invocation via `std::process::Command`.
pub struct TmuxProcess {
    tmux_bin: String,
    socket_path: Option<String>,
    socket_name: Option<String>,
}

impl TmuxProcess {
    pub fn new(tmux_bin: impl Into<String>) -> Self {
        Self {
            tmux_bin: tmux_bin.into(),
            socket_path: None,
            socket_name: None,
        }
    }

    /// Use an explicit server socket path (`tmux -S`). Takes precedence
    /// over a socket name.
    #[must_use]
    pub fn with_socket_path(mut self, path: impl Into<String>) -> Self {
        self.socket_path = Some(path.into());
        self
    }

    /// Use a named server socket (`tmux -L`).
    #[must_use]
    pub fn with_socket_name(mut self, name: impl Into<String>) -> Self {
        self.socket_name = Some(name.into());
        self
    }
}

impl Default for TmuxProcess {
    fn default() -> Self {
        Self::new("tmux")
    }
}

impl TmuxRunner for TmuxProcess {
    fn run(&self, args: &[&str]) -> Result<String, TmuxError> {
        let mut cmd = std::process::Command::new(&self.tmux_bin);
        if let Some(ref path) = self.socket_path {
            cmd.args(["-S", path]);
        } else if let Some(ref name) = self.socket_name {
            cmd.args(["-L", name]);
        }
        cmd.args(args);
        trace!(?args, "running tmux");
        let output = cmd.output().map_err(TmuxError::Io)?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(TmuxError::CommandFailed(format!(
                "exit code {}: {}",
                output.status.code().unwrap_or(-1),
                stderr.trim()
            )));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults() {
        let tmux = TmuxProcess::default();
        assert_eq!(tmux.tmux_bin, "tmux");
        assert!(tmux.socket_path.is_none());
        assert!(tmux.socket_name.is_none());
    }

    #[test]
    fn socket_overrides() {
        let tmux = TmuxProcess::default()
            .with_socket_path("/tmp/pr.sock")
            .with_socket_name("ignored-when-path-set");
        assert_eq!(tmux.socket_path.as_deref(), Some("/tmp/pr.sock"));
        assert_eq!(tmux.socket_name.as_deref(), Some("ignored-when-path-set"));
    }

    #[test]
    fn blanket_ref_impl() {
        struct Mock;
        impl TmuxRunner for Mock {
            fn run(&self, _args: &[&str]) -> Result<String, TmuxError> {
                Ok("ok".to_string())
            }
        }
        let mock = Mock;
        let r: &Mock = &mock;
        assert_eq!(r.run(&[]).expect("ok"), "ok");
    }
}
