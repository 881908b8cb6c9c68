//! Repository discovery.

use std::path::{Path, PathBuf};

use git2::Repository;

use crate::error::GitError;

/// Find the repository containing `path` and return its working tree root.
///
/// Walks up parent directories like `git` itself does. Bare repositories are
/// rejected since there is nothing to watch.
pub fn resolve_workdir(path: &Path) -> Result<PathBuf, GitError> {
    let repo = Repository::discover(path).map_err(GitError::OpenRepository)?;
    repo.workdir()
        .map(Path::to_path_buf)
        .ok_or(GitError::BareRepository)
}
