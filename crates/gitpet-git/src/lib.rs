//! Repository inspector for the Git Pet.
//!
//! Runs a handful of read-only git commands (plus an optional fetch) and
//! folds the results into a [`RepositorySnapshot`](gitpet_types::RepositorySnapshot).
//! Independent commands run concurrently, each under its own timeout.
//!
//! # Modules
//!
//! - [`config`] -- Binary and timeout settings ([`GitConfig`])
//! - [`error`] -- Per-command errors ([`GitError`])
//! - [`inspector`] -- The [`RepositoryInspector`] trait, [`GitInspector`], [`StaticInspector`]
//! - [`parse`] -- Parsers for git plumbing output

pub mod config;
pub mod error;
pub mod inspector;
pub mod parse;

pub use config::GitConfig;
pub use error::GitError;
pub use inspector::{GitInspector, NOT_A_REPOSITORY, RepositoryInspector, StaticInspector};
