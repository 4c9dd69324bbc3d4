//! Inspector settings, the `git` section of `git-pet.yaml`.

use std::time::Duration;

use serde::Deserialize;

/// How git is invoked.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GitConfig {
    /// Program to run (default: `git`).
    pub binary: String,

    /// Deadline for local commands in milliseconds (default: 5000).
    pub command_timeout_ms: u64,

    /// Deadline for `git fetch` in milliseconds (default: 15000).
    pub fetch_timeout_ms: u64,
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            binary: String::from("git"),
            command_timeout_ms: 5_000,
            fetch_timeout_ms: 15_000,
        }
    }
}

impl GitConfig {
    /// Local command deadline.
    pub const fn command_timeout(&self) -> Duration {
        Duration::from_millis(self.command_timeout_ms)
    }

    /// Fetch deadline.
    pub const fn fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.fetch_timeout_ms)
    }
}
