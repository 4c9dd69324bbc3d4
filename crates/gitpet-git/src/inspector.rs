//! Repository inspector trait and implementations.
//!
//! The [`RepositoryInspector`] trait abstracts how repository facts are
//! gathered. [`GitInspector`] shells out to git; [`StaticInspector`]
//! returns a fixed snapshot for tests.

use std::future::Future;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use gitpet_types::RepositorySnapshot;
use tokio::process::Command;
use tracing::{debug, warn};

use crate::config::GitConfig;
use crate::error::GitError;
use crate::parse;

/// Diagnostic recorded when the directory is not a repository.
pub const NOT_A_REPOSITORY: &str = "not currently in a git repository";

/// A source of repository snapshots.
///
/// Inspection never fails: problems are reported through
/// `is_git_repo` and `error` on the snapshot.
pub trait RepositoryInspector {
    /// Inspect the repository. Network access (fetch) happens only when
    /// `check_remote` is set.
    fn snapshot(&self, check_remote: bool) -> impl Future<Output = RepositorySnapshot> + Send;
}

/// Inspector that runs the git binary.
#[derive(Debug, Clone)]
pub struct GitInspector {
    config: GitConfig,
    workdir: Option<PathBuf>,
}

impl GitInspector {
    /// Inspect the process's current directory.
    pub const fn new(config: GitConfig) -> Self {
        Self {
            config,
            workdir: None,
        }
    }

    /// Inspect `dir` instead of the current directory.
    #[must_use]
    pub fn in_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.workdir = Some(dir.into());
        self
    }

    /// Run git with `args` under `deadline` and return its stdout.
    async fn git(&self, args: &[&str], deadline: Duration) -> Result<String, GitError> {
        let command = args.join(" ");
        let mut cmd = Command::new(&self.config.binary);
        cmd.args(args)
            .env("GIT_TERMINAL_PROMPT", "0")
            .stdin(Stdio::null())
            .kill_on_drop(true);
        if let Some(dir) = &self.workdir {
            cmd.current_dir(dir);
        }

        let output = match tokio::time::timeout(deadline, cmd.output()).await {
            Ok(result) => result.map_err(|source| GitError::Spawn {
                command: command.clone(),
                source,
            })?,
            Err(_elapsed) => {
                return Err(GitError::Timeout {
                    command,
                    timeout_ms: u64::try_from(deadline.as_millis()).unwrap_or(u64::MAX),
                });
            }
        };

        if !output.status.success() {
            return Err(GitError::Failed {
                command,
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_owned(),
            });
        }
        debug!(command = %command, "git command succeeded");
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    async fn local(&self, args: &[&str]) -> Result<String, GitError> {
        self.git(args, self.config.command_timeout()).await
    }

    /// Gather the snapshot. Separate from the trait method so the
    /// sequencing reads top to bottom.
    async fn inspect(&self, check_remote: bool) -> RepositorySnapshot {
        let root = match self.local(&["rev-parse", "--show-toplevel"]).await {
            Ok(out) => match parse::parse_toplevel(&out) {
                Some(root) => root,
                None => return RepositorySnapshot::not_a_repository("git reported an empty repository root"),
            },
            Err(e) if e.is_not_a_repository() => {
                debug!("not inside a git repository");
                return RepositorySnapshot::not_a_repository(NOT_A_REPOSITORY);
            }
            Err(e) => {
                warn!(error = %e, "could not determine repository root");
                return RepositorySnapshot::not_a_repository(e.to_string());
            }
        };

        let mut snapshot = RepositorySnapshot::clean(root);
        let mut first_error: Option<String> = None;
        let mut note = |what: &str, e: &GitError| {
            warn!(field = what, error = %e, "git command failed, using neutral value");
            first_error.get_or_insert_with(|| e.to_string());
        };

        let (status, log, branch, refs) = tokio::join!(
            self.local(&["status", "--porcelain"]),
            self.local(&["log", "-1", "--format=%ct"]),
            self.local(&["branch", "--show-current"]),
            self.local(&[
                "for-each-ref",
                "--format=%(refname:short)%09%(committerdate:unix)",
                "refs/heads/",
            ]),
        );

        match status {
            Ok(out) => {
                let porcelain = parse::parse_porcelain(&out);
                snapshot.has_uncommitted_changes = porcelain.has_changes;
                snapshot.has_conflicts = porcelain.has_conflicts;
            }
            Err(e) => note("status", &e),
        }
        match log {
            Ok(out) => snapshot.last_commit_timestamp = parse::parse_commit_timestamp(&out),
            // An empty repository has no HEAD to log; not worth an error.
            Err(GitError::Failed { .. }) => debug!("no commits yet"),
            Err(e) => note("log", &e),
        }
        match branch {
            Ok(out) => snapshot.current_branch = parse::parse_current_branch(&out),
            Err(e) => note("branch", &e),
        }
        match refs {
            Ok(out) => snapshot.branches = parse::parse_branches(&out),
            Err(e) => note("for-each-ref", &e),
        }

        if check_remote {
            self.remote_counts(&mut snapshot).await;
        }

        snapshot.error = first_error;
        snapshot
    }

    /// Fetch, then count commits on each side of the upstream. Failures
    /// leave the counts at zero.
    async fn remote_counts(&self, snapshot: &mut RepositorySnapshot) {
        if let Err(e) = self.git(&["fetch", "--quiet"], self.config.fetch_timeout()).await {
            warn!(error = %e, "fetch failed, remote counts may be stale");
        }
        match self
            .local(&["rev-list", "--left-right", "--count", "@{upstream}...HEAD"])
            .await
        {
            Ok(out) => {
                if let Some((behind, ahead)) = parse::parse_left_right(&out) {
                    snapshot.behind_count = behind;
                    snapshot.ahead_count = ahead;
                }
            }
            Err(e) => debug!(error = %e, "no upstream to compare against"),
        }
    }
}

impl RepositoryInspector for GitInspector {
    async fn snapshot(&self, check_remote: bool) -> RepositorySnapshot {
        self.inspect(check_remote).await
    }
}

/// Inspector that always returns the same snapshot.
#[derive(Debug, Clone)]
pub struct StaticInspector {
    snapshot: RepositorySnapshot,
}

impl StaticInspector {
    /// Always answer with `snapshot`.
    pub const fn new(snapshot: RepositorySnapshot) -> Self {
        Self { snapshot }
    }
}

impl RepositoryInspector for StaticInspector {
    fn snapshot(&self, check_remote: bool) -> impl Future<Output = RepositorySnapshot> + Send {
        debug!(check_remote, "static snapshot");
        std::future::ready(self.snapshot.clone())
    }
}
