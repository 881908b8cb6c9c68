//! Working tree change listing from `git status --porcelain -z`.

use std::fmt;

use tracing::debug;

use crate::error::GitError;
use crate::git::executor::{GitExecutor, git_args};

/// Status of a changed path, from the two-character porcelain code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeStatus {
    /// `??`
    Untracked,
    /// `A`
    Added,
    /// `M`, staged or unstaged
    Modified,
    /// `MM`: modified in the index and again in the work tree
    ModifiedStagedAndUnstaged,
    /// `D`
    Deleted,
    /// Any other code (renames, copies, partially staged additions, conflicts).
    Other(String),
}

impl ChangeStatus {
    /// Classify a raw porcelain status code. Surrounding spaces are ignored,
    /// so ` M` and `M ` are both [`ChangeStatus::Modified`].
    pub fn from_code(code: &str) -> Self {
        match code.trim() {
            "??" => Self::Untracked,
            "A" => Self::Added,
            "M" => Self::Modified,
            "MM" => Self::ModifiedStagedAndUnstaged,
            "D" => Self::Deleted,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn code(&self) -> &str {
        match self {
            Self::Untracked => "??",
            Self::Added => "A",
            Self::Modified => "M",
            Self::ModifiedStagedAndUnstaged => "MM",
            Self::Deleted => "D",
            Self::Other(code) => code,
        }
    }

    pub fn is_added(&self) -> bool {
        matches!(self, Self::Untracked | Self::Added)
    }

    pub fn is_modified(&self) -> bool {
        matches!(self, Self::Modified | Self::ModifiedStagedAndUnstaged)
    }

    pub fn is_deleted(&self) -> bool {
        matches!(self, Self::Deleted)
    }
}

impl fmt::Display for ChangeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A single changed path in the working tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Change {
    pub status: ChangeStatus,
    pub path: String,
}

impl Change {
    pub fn new(status: ChangeStatus, path: impl Into<String>) -> Self {
        Self {
            status,
            path: path.into(),
        }
    }

    /// Build a change from a raw porcelain code, e.g. `Change::from_code("??", "a.ts")`.
    pub fn from_code(code: &str, path: impl Into<String>) -> Self {
        Self::new(ChangeStatus::from_code(code), path)
    }
}

/// Parse `git status --porcelain -z` output into changes, preserving order.
///
/// Records are NUL-terminated and paths are never quoted. Renames and copies
/// carry the original path as an extra record after the new one.
pub fn parse_porcelain(output: &str) -> Vec<Change> {
    let mut changes = Vec::new();
    let mut records = output.split('\0');

    while let Some(record) = records.next() {
        let Some(change) = parse_porcelain_record(record) else {
            continue;
        };
        if change.status.code().contains(['R', 'C']) {
            records.next();
        }
        changes.push(change);
    }

    changes
}

fn parse_porcelain_record(record: &str) -> Option<Change> {
    let code = record.get(..2)?;
    let path = record.get(3..)?;
    if path.is_empty() {
        return None;
    }
    Some(Change::from_code(code, path))
}

/// List working tree changes in the order git reports them.
///
/// Untracked directories are expanded to their files so every new file gets
/// its own change record. A failed status query is an error, distinct from a
/// clean tree (`Ok(vec![])`).
pub async fn list_changes<E: GitExecutor + ?Sized>(git: &E) -> Result<Vec<Change>, GitError> {
    let output = git
        .run(&git_args(&["status", "--porcelain", "-z", "--untracked-files=all"]))
        .await?
        .into_result("status")?;

    let changes = parse_porcelain(&output.stdout);
    for change in &changes {
        debug!("{} {}", change.status, change.path);
    }
    Ok(changes)
}
