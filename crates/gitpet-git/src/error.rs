//! Error types for repository inspection.
//!
//! These never reach the mood resolver directly: the inspector folds them
//! into [`RepositorySnapshot::error`](gitpet_types::RepositorySnapshot).

/// Errors from running a single git command.
#[derive(Debug, thiserror::Error)]
pub enum GitError {
    /// The git binary could not be started.
    #[error("failed to run `git {command}`: {source}")]
    Spawn {
        /// The arguments passed to git.
        command: String,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The command did not finish in time and was killed.
    #[error("`git {command}` timed out after {timeout_ms}ms")]
    Timeout {
        /// The arguments passed to git.
        command: String,
        /// The deadline in milliseconds.
        timeout_ms: u64,
    },

    /// The command exited unsuccessfully.
    #[error("`git {command}` failed (exit code {}): {stderr}", .code.map_or_else(|| String::from("none"), |c| c.to_string()))]
    Failed {
        /// The arguments passed to git.
        command: String,
        /// Exit code, if the process exited normally.
        code: Option<i32>,
        /// Trimmed standard error.
        stderr: String,
    },
}

impl GitError {
    /// Whether git reported that the directory is not a repository.
    pub fn is_not_a_repository(&self) -> bool {
        matches!(self, Self::Failed { stderr, .. } if crate::parse::is_not_a_repository(stderr))
    }
}
