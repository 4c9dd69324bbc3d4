//! Point-in-time repository facts produced by the repository inspector.
//!
//! The engine consumes a [`RepositorySnapshot`] read-only. It never looks at
//! raw command output; every failure mode of the inspector is folded into
//! `is_git_repo` and `error`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Branch name reported when `HEAD` is not on a branch.
pub const DETACHED_HEAD: &str = "detached HEAD";

/// A local branch and the time of its newest commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BranchInfo {
    /// Short branch name (e.g. `feature/login`).
    pub name: String,
    /// Committer time of the branch tip.
    pub last_commit_time: DateTime<Utc>,
}

/// Repository facts at one instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositorySnapshot {
    /// Whether the working directory is inside a git repository.
    pub is_git_repo: bool,
    /// Any tracked or untracked change in the working tree.
    pub has_uncommitted_changes: bool,
    /// Any unmerged path in the index.
    pub has_conflicts: bool,
    /// Current branch, or [`DETACHED_HEAD`].
    pub current_branch: String,
    /// Committer time of `HEAD`; `None` for an empty repository.
    pub last_commit_timestamp: Option<DateTime<Utc>>,
    /// Commits on `HEAD` not yet on the upstream.
    pub ahead_count: u32,
    /// Commits on the upstream not yet on `HEAD`.
    pub behind_count: u32,
    /// Local branches with their tip times.
    pub branches: Vec<BranchInfo>,
    /// Top-level directory of the repository.
    pub repo_root_dir: Option<String>,
    /// Diagnostic for the first inspection failure, if any.
    pub error: Option<String>,
}

impl RepositorySnapshot {
    /// Snapshot for a directory that is not (or could not be confirmed as)
    /// a git repository.
    pub fn not_a_repository(error: impl Into<String>) -> Self {
        Self {
            is_git_repo: false,
            has_uncommitted_changes: false,
            has_conflicts: false,
            current_branch: String::new(),
            last_commit_timestamp: None,
            ahead_count: 0,
            behind_count: 0,
            branches: Vec::new(),
            repo_root_dir: None,
            error: Some(error.into()),
        }
    }

    /// A clean repository rooted at `root` with nothing notable going on.
    ///
    /// Useful as a starting point for tests and stub inspectors.
    pub fn clean(root: impl Into<String>) -> Self {
        Self {
            is_git_repo: true,
            has_uncommitted_changes: false,
            has_conflicts: false,
            current_branch: String::from("main"),
            last_commit_timestamp: None,
            ahead_count: 0,
            behind_count: 0,
            branches: Vec::new(),
            repo_root_dir: Some(root.into()),
            error: None,
        }
    }
}
