//! Git operations: command execution, status listing, repository discovery.

pub mod executor;
pub mod repo;
pub mod status;

pub use executor::{DefaultExecutor, GitExecutor, GitOutput, check_git_installed};
pub use repo::resolve_workdir;
pub use status::{Change, ChangeStatus, list_changes, parse_porcelain};
