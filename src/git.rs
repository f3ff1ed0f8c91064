use std::ffi::OsString;
use std::process::Command;

use anyhow::{ensure, Context, Result};
use tracing::debug;

/// Thin wrapper around the `git` binary. Values are passed as separate
/// arguments, never through a shell, so usernames and emails need no quoting.
pub struct Git {
    program: OsString,
}

impl Default for Git {
    fn default() -> Self {
        Self {
            program: "git".into(),
        }
    }
}

impl Git {
    #[cfg(test)]
    pub fn with_program(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Writes `user.name` and `user.email` into the global git config.
    pub fn set_global_identity(&self, username: &str, email: &str) -> Result<()> {
        self.set_global("user.name", username)?;
        self.set_global("user.email", email)
    }

    fn set_global(&self, key: &str, value: &str) -> Result<()> {
        debug!(key, value, "updating global git config");
        let status = Command::new(&self.program)
            .args(["config", "--global", key, value])
            .status()
            .with_context(|| format!("failed to run {:?}", self.program))?;
        ensure!(
            status.success(),
            "`git config --global {key}` exited with {status}"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg(unix)]
    fn succeeding_tool_is_ok() {
        Git::with_program("true")
            .set_global_identity("alice", "alice@example.com")
            .unwrap();
    }

    #[test]
    #[cfg(unix)]
    fn failing_tool_is_an_error() {
        let err = Git::with_program("false")
            .set_global_identity("alice", "alice@example.com")
            .unwrap_err();
        assert!(err.to_string().contains("user.name"));
    }

    #[test]
    fn missing_tool_is_an_error() {
        assert!(Git::with_program("git-ident-no-such-binary")
            .set_global_identity("alice", "alice@example.com")
            .is_err());
    }

    #[test]
    #[cfg(unix)]
    fn values_are_passed_as_plain_arguments() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::TempDir::new().unwrap();
        let log = dir.path().join("log");
        let fake_git = dir.path().join("fake-git");
        std::fs::write(
            &fake_git,
            format!("#!/bin/sh\necho \"$@\" >> {}\n", log.display()),
        )
        .unwrap();
        let mut perms = std::fs::metadata(&fake_git).unwrap().permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(&fake_git, perms).unwrap();

        Git::with_program(&fake_git)
            .set_global_identity("alice \"$(whoami)\"", "alice@example.com")
            .unwrap();

        let log = std::fs::read_to_string(&log).unwrap();
        let lines: Vec<&str> = log.lines().collect();
        assert_eq!(
            lines,
            [
                "config --global user.name alice \"$(whoami)\"",
                "config --global user.email alice@example.com",
            ]
        );
    }
}
