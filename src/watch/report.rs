//! Console output for the watch loop.
//!
//! The report goes to stdout; tracing logs go to stderr.

use std::io::Write;
use std::path::Path;

use chrono::Local;

use crate::git::status::{Change, ChangeStatus};

use super::CycleOutcome;

const RULE_WIDTH: usize = 50;

/// Glyph shown before each changed path.
pub fn glyph(status: &ChangeStatus) -> char {
    if status.is_added() {
        '+'
    } else if status.is_modified() {
        '~'
    } else if status.is_deleted() {
        '-'
    } else {
        '*'
    }
}

/// Startup banner.
pub fn render_banner(workdir: &Path, started_at: &str) -> String {
    format!(
        "commitwatch started at {}\nWatching: {}\n{}",
        started_at,
        workdir.display(),
        "─".repeat(RULE_WIDTH)
    )
}

fn render_changes(changes: &[Change], timestamp: &str) -> String {
    let mut lines = vec![format!("\n[{}] Changes detected:", timestamp)];
    for change in changes {
        lines.push(format!("  {} {}", glyph(&change.status), change.path));
    }
    lines.join("\n")
}

/// Render a cycle outcome. The idle line starts with a carriage return and has
/// no trailing newline so repeated idle cycles overwrite each other.
pub fn render_outcome(outcome: &CycleOutcome, timestamp: &str) -> String {
    match outcome {
        CycleOutcome::Idle => format!("\r[{}] No changes", timestamp),
        CycleOutcome::StatusFailed(e) => {
            format!("\n[{}] Status check failed: {}", timestamp, e)
        }
        CycleOutcome::Previewed {
            changes,
            message,
            insights,
        } => {
            let insights_json = serde_json::to_string_pretty(insights)
                .unwrap_or_else(|e| format!("<unserializable insights: {e}>"));
            format!(
                "{}\n  Dry run, not committed\n  Message: {}\n  Insights: {}",
                render_changes(changes, timestamp),
                message,
                insights_json
            )
        }
        CycleOutcome::Committed {
            changes,
            message,
            hash,
        } => format!(
            "{}\n  Committed: {}\n  Message: {}",
            render_changes(changes, timestamp),
            hash,
            message
        ),
        CycleOutcome::CommitFailed {
            changes, output, ..
        } => format!(
            "{}\n  Commit failed: {}",
            render_changes(changes, timestamp),
            output
        ),
    }
}

pub fn print_banner(workdir: &Path) {
    let started_at = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    println!("{}", render_banner(workdir, &started_at));
}

pub fn print_outcome(outcome: &CycleOutcome) {
    let timestamp = Local::now().format("%H:%M:%S").to_string();
    let text = render_outcome(outcome, &timestamp);

    let mut stdout = std::io::stdout().lock();
    let result = if matches!(outcome, CycleOutcome::Idle) {
        write!(stdout, "{}", text)
    } else {
        writeln!(stdout, "{}", text)
    };
    // Broken pipes and closed terminals are not worth stopping the loop for.
    let _ = result.and_then(|_| stdout.flush());
}
