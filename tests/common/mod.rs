//! Shared test utilities for integration tests.
//!
//! Not all functions are used by every test file, but they're shared across tests.
#![allow(dead_code)]

use std::path::Path;

use git2::{Oid, Repository, Signature};

use commitwatch::{DefaultExecutor, WatchConfig};

/// A test git repository builder for integration tests.
pub struct TestRepo {
    pub dir: tempfile::TempDir,
    pub repo: Repository,
}

impl TestRepo {
    /// Create a new empty git repository in a temp directory, with an identity
    /// configured so the git CLI can commit.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp directory");
        let repo = Repository::init(dir.path()).expect("Failed to init git repo");

        let mut config = repo.config().expect("Failed to open repo config");
        config.set_str("user.name", "Test User").expect("Failed to set user.name");
        config
            .set_str("user.email", "test@example.com")
            .expect("Failed to set user.email");
        config
            .set_bool("commit.gpgsign", false)
            .expect("Failed to disable signing");

        Self { dir, repo }
    }

    /// Create a repository with one initial commit containing `files`.
    pub fn with_files(files: &[(&str, &str)]) -> Self {
        let repo = Self::new();
        for (path, contents) in files {
            repo.write(path, contents);
        }
        repo.commit_all("chore: initial commit");
        repo
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write a file relative to the work tree, creating parent directories.
    pub fn write(&self, path: &str, contents: &str) {
        let full = self.dir.path().join(path);
        if let Some(parent) = full.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        std::fs::write(&full, contents).expect("Failed to write test file");
    }

    /// Delete a file relative to the work tree.
    pub fn remove(&self, path: &str) {
        std::fs::remove_file(self.dir.path().join(path)).expect("Failed to remove test file");
    }

    /// Stage everything and commit with git2. Returns the commit OID.
    pub fn commit_all(&self, message: &str) -> Oid {
        let sig =
            Signature::now("Test User", "test@example.com").expect("Failed to create signature");

        let mut index = self.repo.index().expect("Failed to get index");
        index
            .add_all(["*"].iter(), git2::IndexAddOption::DEFAULT, None)
            .expect("Failed to add files");
        index.write().expect("Failed to write index");
        let tree_id = index.write_tree().expect("Failed to write tree");
        let tree = self.repo.find_tree(tree_id).expect("Failed to find tree");

        let parent = self.repo.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<&git2::Commit> = parent.iter().collect();

        self.repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .expect("Failed to create commit")
    }

    /// Message of the current HEAD commit, re-read from disk.
    pub fn head_message(&self) -> Option<String> {
        let repo = Repository::open(self.dir.path()).expect("Failed to reopen repo");
        let commit = repo.head().ok()?.peel_to_commit().ok()?;
        commit.message().map(|m| m.trim_end().to_string())
    }

    /// Number of commits reachable from HEAD.
    pub fn commit_count(&self) -> usize {
        let repo = Repository::open(self.dir.path()).expect("Failed to reopen repo");
        let mut revwalk = repo.revwalk().expect("Failed to create revwalk");
        if revwalk.push_head().is_err() {
            return 0;
        }
        revwalk.count()
    }

    pub fn executor(&self) -> DefaultExecutor {
        DefaultExecutor::new(self.dir.path())
    }

    pub fn config(&self) -> WatchConfig {
        WatchConfig::new(self.dir.path())
    }
}
