//! Git command execution.
//!
//! All operations shell out to the system `git` binary, inheriting the user's
//! existing git config, hooks and identity. Commands run one at a time and
//! block the caller until they exit; no timeout is applied.

use std::path::PathBuf;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use crate::error::GitError;

/// Captured result of a git invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GitOutput {
    pub stdout: String,
    pub stderr: String,
    /// Exit code, or None if the process was terminated by a signal.
    pub code: Option<i32>,
}

impl GitOutput {
    /// Successful output with the given stdout.
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: String::new(),
            code: Some(0),
        }
    }

    /// Failed output with the given exit code and stderr.
    pub fn failed(code: i32, stderr: impl Into<String>) -> Self {
        Self {
            stdout: String::new(),
            stderr: stderr.into(),
            code: Some(code),
        }
    }

    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// Stdout and stderr joined, trimmed. Git writes some diagnostics
    /// (e.g. "nothing to commit") to stdout and others to stderr.
    pub fn combined(&self) -> String {
        let stdout = self.stdout.trim();
        let stderr = self.stderr.trim();
        match (stdout.is_empty(), stderr.is_empty()) {
            (false, false) => format!("{stdout}\n{stderr}"),
            (false, true) => stdout.to_string(),
            (true, _) => stderr.to_string(),
        }
    }

    /// Convert a non-zero exit into [`GitError::CommandFailed`].
    pub fn into_result(self, command: &str) -> Result<Self, GitError> {
        if self.success() {
            Ok(self)
        } else {
            Err(GitError::CommandFailed {
                command: command.to_string(),
                code: self.code,
                stderr: self.combined(),
            })
        }
    }
}

/// Trait for executing git commands.
///
/// This abstraction allows mocking the git subprocess in tests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GitExecutor: Send + Sync {
    /// Run `git <args>` and capture its output. Only spawn failures are errors;
    /// a non-zero exit is reported through [`GitOutput::code`].
    async fn run(&self, args: &[String]) -> Result<GitOutput, GitError>;
}

/// Default executor that calls the real git CLI inside a work tree.
pub struct DefaultExecutor {
    workdir: PathBuf,
}

impl DefaultExecutor {
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: workdir.into(),
        }
    }
}

#[async_trait]
impl GitExecutor for DefaultExecutor {
    async fn run(&self, args: &[String]) -> Result<GitOutput, GitError> {
        debug!("git {}", args.join(" "));

        let output = Command::new("git")
            .args(args)
            .current_dir(&self.workdir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(GitError::SpawnFailed)?;

        Ok(GitOutput {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            code: output.status.code(),
        })
    }
}

/// Check that the git CLI is installed and accessible.
pub fn check_git_installed() -> Result<(), GitError> {
    which::which("git").map(|_| ()).map_err(|_| GitError::NotInstalled)
}

/// Build an argument vector from string literals.
pub(crate) fn git_args(args: &[&str]) -> Vec<String> {
    args.iter().map(|a| a.to_string()).collect()
}

/// Stage every change in the work tree (`git add -A`).
pub async fn stage_all<E: GitExecutor + ?Sized>(git: &E) -> Result<(), GitError> {
    git.run(&git_args(&["add", "-A"]))
        .await?
        .into_result("add")?;
    Ok(())
}

/// Create a commit with the given message. The raw output is returned either
/// way so callers can report git's own diagnostics on failure.
pub async fn commit<E: GitExecutor + ?Sized>(
    git: &E,
    message: &str,
) -> Result<GitOutput, GitError> {
    git.run(&git_args(&["commit", "-m", message])).await
}

/// Abbreviated hash of HEAD.
pub async fn short_head<E: GitExecutor + ?Sized>(git: &E) -> Result<String, GitError> {
    let output = git
        .run(&git_args(&["rev-parse", "--short", "HEAD"]))
        .await?
        .into_result("rev-parse")?;
    Ok(output.stdout.trim().to_string())
}
