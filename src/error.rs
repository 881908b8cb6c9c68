//! Error types for commitwatch modules using thiserror.

use thiserror::Error;

/// Errors from git operations.
#[derive(Error, Debug)]
pub enum GitError {
    #[error("git not found on PATH. Install git and make sure it is executable.")]
    NotInstalled,

    #[error("Failed to spawn git process: {0}")]
    SpawnFailed(#[source] std::io::Error),

    #[error("git {command} exited with {}: {stderr}",
             code.map_or("unknown status".to_string(), |c| format!("code {c}")))]
    CommandFailed {
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("Failed to open repository: {0}")]
    OpenRepository(#[source] git2::Error),

    #[error("Bare repository not supported (no working tree to watch)")]
    BareRepository,
}
