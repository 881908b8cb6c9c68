//! commitwatch - A CLI tool that watches a git working tree and auto-commits changes.
//!
//! # Overview
//!
//! commitwatch polls `git status` on a fixed interval. When the tree is dirty it
//! stages everything, derives a conventional commit message from the changed
//! paths and the added lines of their diffs, and commits.

pub mod commit;
pub mod config;
pub mod error;
pub mod git;
pub mod watch;

// Re-export commonly used types
pub use commit::{Category, CommitMessage, CommitType, Insights};
pub use config::WatchConfig;
pub use error::GitError;
pub use git::{Change, ChangeStatus, DefaultExecutor, GitExecutor, GitOutput};
pub use watch::{CycleOutcome, run_cycle, run_watch};
