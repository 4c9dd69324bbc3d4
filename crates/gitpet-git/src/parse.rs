//! Parsers for git plumbing output.
//!
//! Every parser is total: malformed output yields a neutral value rather
//! than an error, so one odd line never blanks the whole snapshot.

use chrono::{DateTime, Utc};
use gitpet_types::{BranchInfo, DETACHED_HEAD};

/// Porcelain `XY` codes that mark an unmerged path.
pub const CONFLICT_CODES: [&str; 7] = ["DD", "AU", "UD", "UA", "DU", "AA", "UU"];

/// Whether git's stderr says the directory is not a repository.
pub fn is_not_a_repository(stderr: &str) -> bool {
    stderr.to_ascii_lowercase().contains("not a git repository")
}

/// Repository root from `rev-parse --show-toplevel`.
pub fn parse_toplevel(stdout: &str) -> Option<String> {
    let root = stdout.trim();
    (!root.is_empty()).then(|| root.to_owned())
}

/// Working-tree state from `status --porcelain`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PorcelainStatus {
    /// Any entry at all.
    pub has_changes: bool,
    /// Any unmerged entry.
    pub has_conflicts: bool,
}

/// Parse `status --porcelain` (v1) output.
pub fn parse_porcelain(stdout: &str) -> PorcelainStatus {
    let mut status = PorcelainStatus::default();
    for line in stdout.lines().filter(|l| !l.trim().is_empty()) {
        status.has_changes = true;
        if line.get(..2).is_some_and(|xy| CONFLICT_CODES.contains(&xy)) {
            status.has_conflicts = true;
        }
    }
    status
}

/// Committer time from `log -1 --format=%ct`. `None` for an empty
/// repository or unparseable output.
pub fn parse_commit_timestamp(stdout: &str) -> Option<DateTime<Utc>> {
    parse_unix_seconds(stdout.trim())
}

/// Current branch from `branch --show-current`; empty means detached.
pub fn parse_current_branch(stdout: &str) -> String {
    let name = stdout.trim();
    if name.is_empty() {
        DETACHED_HEAD.to_owned()
    } else {
        name.to_owned()
    }
}

/// Branches from
/// `for-each-ref --format=%(refname:short)%09%(committerdate:unix) refs/heads/`.
///
/// Lines without a tab or with a non-numeric time are skipped.
pub fn parse_branches(stdout: &str) -> Vec<BranchInfo> {
    stdout
        .lines()
        .filter_map(|line| {
            let (name, secs) = line.trim_end().split_once('\t')?;
            let name = name.trim();
            if name.is_empty() {
                return None;
            }
            Some(BranchInfo {
                name: name.to_owned(),
                last_commit_time: parse_unix_seconds(secs.trim())?,
            })
        })
        .collect()
}

/// `(behind, ahead)` from `rev-list --left-right --count @{upstream}...HEAD`.
pub fn parse_left_right(stdout: &str) -> Option<(u32, u32)> {
    let mut parts = stdout.split_whitespace();
    let behind = parts.next()?.parse().ok()?;
    let ahead = parts.next()?.parse().ok()?;
    Some((behind, ahead))
}

fn parse_unix_seconds(text: &str) -> Option<DateTime<Utc>> {
    let secs: i64 = text.parse().ok()?;
    DateTime::from_timestamp(secs, 0)
}
