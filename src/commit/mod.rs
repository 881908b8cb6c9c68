//! Heuristic conventional commit messages from working tree changes.

pub mod category;
pub mod diff;
pub mod message;

pub use category::{Category, categorize};
pub use diff::{Insights, analyze_file, extract_insights, is_source_file};
pub use message::{
    CommitMessage, CommitType, build_commit_message, collect_insights, generate_commit_message,
};
