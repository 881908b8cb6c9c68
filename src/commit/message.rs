//! Conventional commit message synthesis from changes and diff insights.

use std::fmt;
use std::path::Path;

use tracing::{debug, warn};

use crate::commit::category::{Category, categorize};
use crate::commit::diff::{Insights, analyze_file, is_source_file};
use crate::git::executor::GitExecutor;
use crate::git::status::Change;

/// Maximum function names listed in the description.
const MAX_FUNCTIONS: usize = 3;

/// Maximum file stems or declaration labels listed per clause.
const MAX_NAMES: usize = 2;

/// Conventional commit types produced by the synthesizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitType {
    Feat,
    Fix,
    Docs,
    Style,
    Refactor,
    Chore,
}

impl CommitType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CommitType::Feat => "feat",
            CommitType::Fix => "fix",
            CommitType::Docs => "docs",
            CommitType::Style => "style",
            CommitType::Refactor => "refactor",
            CommitType::Chore => "chore",
        }
    }
}

impl fmt::Display for CommitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A synthesized commit message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitMessage {
    pub commit_type: CommitType,
    pub scope: Option<Category>,
    pub description: String,
}

impl CommitMessage {
    /// Format as `type(scope): description`, or `type: description` without a scope.
    pub fn format(&self) -> String {
        match self.scope {
            Some(scope) => format!("{}({}): {}", self.commit_type, scope, self.description),
            None => format!("{}: {}", self.commit_type, self.description),
        }
    }
}

impl fmt::Display for CommitMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format())
    }
}

/// Changes partitioned by kind, in status order.
struct Partition<'a> {
    added: Vec<&'a str>,
    modified: Vec<&'a str>,
    deleted: Vec<&'a str>,
}

impl<'a> Partition<'a> {
    fn new(changes: &'a [Change]) -> Self {
        let paths = |pred: fn(&Change) -> bool| -> Vec<&'a str> {
            changes
                .iter()
                .filter(|c| pred(c))
                .map(|c| c.path.as_str())
                .collect()
        };
        Self {
            added: paths(|c| c.status.is_added()),
            modified: paths(|c| c.status.is_modified()),
            deleted: paths(|c| c.status.is_deleted()),
        }
    }
}

/// Build a commit message from this cycle's changes and merged insights.
///
/// Returns `None` when there are no changes.
pub fn build_commit_message(changes: &[Change], insights: &Insights) -> Option<CommitMessage> {
    if changes.is_empty() {
        return None;
    }

    let partition = Partition::new(changes);
    let scope = changes.iter().find_map(|c| categorize(&c.path));
    let commit_type = select_type(changes, &partition, scope);
    let description = describe(changes.len(), &partition, insights);

    Some(CommitMessage {
        commit_type,
        scope,
        description,
    })
}

fn select_type(
    changes: &[Change],
    partition: &Partition<'_>,
    scope: Option<Category>,
) -> CommitType {
    if !partition.added.is_empty() && partition.modified.is_empty() {
        return CommitType::Feat;
    }
    if !partition.deleted.is_empty()
        && partition.added.is_empty()
        && partition.modified.is_empty()
    {
        return CommitType::Refactor;
    }
    let looks_like_fix = changes.iter().any(|c| {
        let path = c.path.to_lowercase();
        path.contains("fix") || path.contains("bug")
    });
    if looks_like_fix {
        return CommitType::Fix;
    }

    match scope {
        Some(Category::Docs) => CommitType::Docs,
        Some(Category::Config) => CommitType::Chore,
        Some(Category::Styles) => CommitType::Style,
        _ => CommitType::Feat,
    }
}

fn describe(change_count: usize, partition: &Partition<'_>, insights: &Insights) -> String {
    let mut clauses = Vec::new();

    if !insights.added_functions.is_empty() {
        clauses.push(format!("add {}", join_first(&insights.added_functions, MAX_FUNCTIONS)));
    } else if !partition.added.is_empty() {
        clauses.push(format!("add {}", stems(&partition.added)));
    } else if !partition.modified.is_empty() {
        clauses.push(format!("update {}", stems(&partition.modified)));
    }

    if !partition.deleted.is_empty() {
        clauses.push(format!("remove {}", stems(&partition.deleted)));
    }

    if clauses.is_empty() && !insights.key_changes.is_empty() {
        clauses.push(format!("add {}", join_first(&insights.key_changes, MAX_NAMES)));
    }

    if clauses.is_empty() {
        let plural = if change_count == 1 { "" } else { "s" };
        clauses.push(format!("update {change_count} file{plural}"));
    }

    clauses.join("; ")
}

fn join_first(items: &[String], limit: usize) -> String {
    items
        .iter()
        .take(limit)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// File stems of the first paths, e.g. `src/components/Button.tsx` -> `Button`.
fn stems(paths: &[&str]) -> String {
    let stems: Vec<String> = paths
        .iter()
        .take(MAX_NAMES)
        .map(|p| file_stem(p))
        .collect();
    stems.join(", ")
}

fn file_stem(path: &str) -> String {
    Path::new(path)
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string())
}

/// Analyze the diffs of all source files among `changes` and merge the results
/// in change order.
///
/// A diff that cannot be fetched contributes nothing; the failure is logged.
pub async fn collect_insights<E: GitExecutor + ?Sized>(git: &E, changes: &[Change]) -> Insights {
    let mut all = Insights::default();
    for change in changes.iter().filter(|c| is_source_file(&c.path)) {
        match analyze_file(git, &change.path).await {
            Ok(insights) => all.merge(insights),
            Err(e) => warn!("Failed to analyze diff for {}: {}", change.path, e),
        }
    }
    all
}

/// Generate the commit message for a set of changes, querying diffs through `git`.
///
/// Returns the message together with the merged insights it was built from.
pub async fn generate_commit_message<E: GitExecutor + ?Sized>(
    git: &E,
    changes: &[Change],
) -> Option<(CommitMessage, Insights)> {
    let insights = collect_insights(git, changes).await;
    let message = build_commit_message(changes, &insights)?;
    debug!("Synthesized commit message: {}", message);
    Some((message, insights))
}
