//! Diff analysis: extract code-structure signals from added diff lines.
//!
//! This is a heuristic text classifier over raw diff lines, not a parser. Each
//! added line is tested against [`PATTERNS`] in order and the first match wins,
//! so a line contributes to at most one signal.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use tracing::debug;

use crate::error::GitError;
use crate::git::executor::{GitExecutor, git_args};

/// File extensions that are fed to the diff analyzer.
const SOURCE_EXTENSIONS: &[&str] = &[".ts", ".tsx", ".js", ".jsx"];

/// What a matching line contributes to the [`Insights`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Signal {
    /// Function, component or hook name.
    Function,
    /// Declaration recorded as `"<label> <Name>"`.
    KeyChange(&'static str),
    /// Imported module path.
    Import,
}

struct DiffPattern {
    regex: Regex,
    /// Capture group holding the extracted name or path.
    group: usize,
    signal: Signal,
}

impl DiffPattern {
    fn new(pattern: &str, group: usize, signal: Signal) -> Self {
        Self {
            regex: Regex::new(pattern).expect("Invalid regex"),
            group,
            signal,
        }
    }
}

/// Ordered pattern table. Order is precedence.
static PATTERNS: LazyLock<Vec<DiffPattern>> = LazyLock::new(|| {
    vec![
        // function foo / export async function foo
        DiffPattern::new(
            r"^\+\s*(export\s+)?(async\s+)?function\s+(\w+)",
            3,
            Signal::Function,
        ),
        // const foo = (..) => / const foo = async (..) =>
        DiffPattern::new(
            r"^\+\s*(export\s+)?const\s+(\w+)\s*=\s*(\([^)]*\)|async\s*\([^)]*\))\s*=>",
            2,
            Signal::Function,
        ),
        // export default function Button
        DiffPattern::new(
            r"^\+\s*(export\s+)?(default\s+)?function\s+([A-Z]\w+)",
            3,
            Signal::Function,
        ),
        // const useThing =
        DiffPattern::new(
            r"^\+\s*(export\s+)?const\s+(use\w+)\s*=",
            2,
            Signal::Function,
        ),
        DiffPattern::new(
            r"^\+\s*(export\s+)?interface\s+(\w+)",
            2,
            Signal::KeyChange("interface"),
        ),
        DiffPattern::new(
            r"^\+\s*(export\s+)?type\s+(\w+)",
            2,
            Signal::KeyChange("type"),
        ),
        DiffPattern::new(
            r#"^\+\s*import\s+.*from\s+['"]([^'"]+)['"]"#,
            1,
            Signal::Import,
        ),
    ]
});

/// Structural signals extracted from one or more diffs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Insights {
    /// Function, component and hook names.
    pub added_functions: Vec<String>,
    /// Interface and type alias labels, e.g. `"interface Props"`.
    pub key_changes: Vec<String>,
    /// Imported module paths.
    pub added_imports: Vec<String>,
}

impl Insights {
    pub fn is_empty(&self) -> bool {
        self.added_functions.is_empty()
            && self.key_changes.is_empty()
            && self.added_imports.is_empty()
    }

    /// Append another bundle. No deduplication; order is preserved.
    pub fn merge(&mut self, other: Insights) {
        self.added_functions.extend(other.added_functions);
        self.key_changes.extend(other.key_changes);
        self.added_imports.extend(other.added_imports);
    }

    fn record(&mut self, signal: Signal, value: &str) {
        match signal {
            Signal::Function => self.added_functions.push(value.to_string()),
            Signal::KeyChange(label) => self.key_changes.push(format!("{label} {value}")),
            Signal::Import => self.added_imports.push(value.to_string()),
        }
    }
}

/// Whether a path has an extension the diff analyzer understands.
pub fn is_source_file(path: &str) -> bool {
    SOURCE_EXTENSIONS.iter().any(|ext| path.ends_with(ext))
}

/// Extract insights from unified diff text. Only added lines are scanned.
pub fn extract_insights(diff_text: &str) -> Insights {
    let mut insights = Insights::default();

    for line in diff_text.lines() {
        if !line.starts_with('+') || line.starts_with("+++") {
            continue;
        }

        for pattern in PATTERNS.iter() {
            if let Some(value) = pattern
                .regex
                .captures(line)
                .and_then(|caps| caps.get(pattern.group))
            {
                insights.record(pattern.signal, value.as_str());
                break;
            }
        }
    }

    insights
}

/// Build `git diff` arguments for one path. Color is forced off so added lines
/// keep their leading `+`, and the path is matched literally so bracketed route
/// segments like `app/[id]/page.tsx` are not read as globs.
fn diff_args(base: &str, path: &str) -> Vec<String> {
    let pathspec = format!(":(literal){path}");
    git_args(&["diff", "--no-color", base, "--", &pathspec])
}

/// Fetch the diff for a path against HEAD, falling back to the index when that
/// is empty (e.g. no HEAD yet). Exit codes are ignored: an unusable diff is
/// treated as an empty one.
pub async fn fetch_file_diff<E: GitExecutor + ?Sized>(
    git: &E,
    path: &str,
) -> Result<String, GitError> {
    let head = git.run(&diff_args("HEAD", path)).await?;
    if !head.stdout.trim().is_empty() {
        return Ok(head.stdout);
    }

    let cached = git.run(&diff_args("--cached", path)).await?;
    Ok(cached.stdout)
}

/// Fetch and analyze the diff of a single path.
pub async fn analyze_file<E: GitExecutor + ?Sized>(
    git: &E,
    path: &str,
) -> Result<Insights, GitError> {
    let diff_text = fetch_file_diff(git, path).await?;
    let insights = extract_insights(&diff_text);

    debug!(
        "{}: {} function(s), {} declaration(s), {} import(s)",
        path,
        insights.added_functions.len(),
        insights.key_changes.len(),
        insights.added_imports.len()
    );

    Ok(insights)
}
