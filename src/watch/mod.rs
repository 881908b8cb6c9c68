//! Watch loop: poll the working tree, stage, synthesize a message, commit.
//!
//! Each tick is one strictly sequential cycle. Failures inside a cycle never
//! end the loop; they are reported and the next tick proceeds normally.

pub mod report;

use tracing::{debug, warn};

use crate::commit::{CommitMessage, Insights, generate_commit_message};
use crate::config::WatchConfig;
use crate::error::GitError;
use crate::git::executor::{GitExecutor, commit, short_head, stage_all};
use crate::git::status::{Change, list_changes};

/// Hash shown when the new commit's hash cannot be read back.
const UNKNOWN_HASH: &str = "unknown";

/// Result of a single watch cycle.
#[derive(Debug)]
pub enum CycleOutcome {
    /// Working tree is clean.
    Idle,
    /// The status query failed; treated as idle but reported distinctly.
    StatusFailed(GitError),
    /// Dry run: message synthesized, nothing staged or committed.
    Previewed {
        changes: Vec<Change>,
        message: CommitMessage,
        insights: Insights,
    },
    Committed {
        changes: Vec<Change>,
        message: CommitMessage,
        hash: String,
    },
    /// git refused the commit. `output` is its raw diagnostic text.
    CommitFailed {
        changes: Vec<Change>,
        message: CommitMessage,
        output: String,
    },
}

/// Run one cycle: list changes and, if any, stage everything and commit.
pub async fn run_cycle<E: GitExecutor + ?Sized>(git: &E, config: &WatchConfig) -> CycleOutcome {
    let changes = match list_changes(git).await {
        Ok(changes) => changes,
        Err(e) => {
            warn!("Status query failed, skipping cycle: {}", e);
            return CycleOutcome::StatusFailed(e);
        }
    };

    if changes.is_empty() {
        return CycleOutcome::Idle;
    }

    if config.dry_run {
        let Some((message, insights)) = generate_commit_message(git, &changes).await else {
            return CycleOutcome::Idle;
        };
        return CycleOutcome::Previewed {
            changes,
            message,
            insights,
        };
    }

    // Stage before analysis so new files show up in `git diff HEAD`.
    if let Err(e) = stage_all(git).await {
        warn!("Failed to stage changes: {}", e);
    }

    let Some((message, _)) = generate_commit_message(git, &changes).await else {
        return CycleOutcome::Idle;
    };

    let output = match commit(git, &message.format()).await {
        Ok(output) if output.success() => output,
        Ok(output) => {
            return CycleOutcome::CommitFailed {
                changes,
                message,
                output: output.combined(),
            };
        }
        Err(e) => {
            return CycleOutcome::CommitFailed {
                changes,
                message,
                output: e.to_string(),
            };
        }
    };
    debug!("git commit: {}", output.stdout.trim());

    let hash = match short_head(git).await {
        Ok(hash) => hash,
        Err(e) => {
            warn!("Committed but could not read HEAD: {}", e);
            UNKNOWN_HASH.to_string()
        }
    };

    CycleOutcome::Committed {
        changes,
        message,
        hash,
    }
}

/// Run the watch loop.
///
/// Prints the banner, then runs a cycle every `config.interval` until the
/// process is interrupted. With `config.once` it returns after one cycle.
pub async fn run_watch<E: GitExecutor + ?Sized>(git: &E, config: &WatchConfig) {
    report::print_banner(&config.workdir);

    loop {
        let outcome = run_cycle(git, config).await;
        report::print_outcome(&outcome);

        if config.once {
            return;
        }
        tokio::time::sleep(config.interval).await;
    }
}
