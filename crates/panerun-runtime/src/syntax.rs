//! Pre-flight shell syntax validation via `bash -n`.

use tracing::debug;

use panerun_engine::SyntaxValidator;

/// Validates command syntax without executing it. The gate exists to
/// avoid spending a full poll cycle on a command guaranteed to fail;
/// when bash itself cannot be spawned the command passes through.
pub struct BashSyntaxValidator {
    bash_bin: String,
}

impl BashSyntaxValidator {
    pub fn new(bash_bin: impl Into<String>) -> Self {
        Self {
            bash_bin: bash_bin.into(),
        }
    }
}

impl Default for BashSyntaxValidator {
    fn default() -> Self {
        Self::new("bash")
    }
}

impl SyntaxValidator for BashSyntaxValidator {
    fn is_valid(&self, command: &str) -> bool {
        let status = std::process::Command::new(&self.bash_bin)
            .args(["-n", "-c", command])
            .stdin(std::process::Stdio::null())
            .stdout(std::process::Stdio::null())
            .stderr(std::process::Stdio::null())
            .status();
        match status {
            Ok(s) => s.success(),
            Err(e) => {
                debug!(error = %e, "syntax validator unavailable, passing command through");
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_wellformed_commands() {
        let v = BashSyntaxValidator::default();
        for cmd in [
            "echo hello",
            "if true; then echo yes; fi",
            "grep -r 'needle' . | wc -l",
        ] {
            assert!(v.is_valid(cmd), "{cmd:?} should be valid");
        }
    }

    #[test]
    fn rejects_malformed_commands() {
        let v = BashSyntaxValidator::default();
        for cmd in ["echo 'unterminated", "if true; then", "fi;; esac"] {
            assert!(!v.is_valid(cmd), "{cmd:?} should be invalid");
        }
    }

    #[test]
    fn missing_shell_passes_through() {
        let v = BashSyntaxValidator::new("panerun-no-such-shell");
        assert!(v.is_valid("echo 'unterminated"));
    }
}
