//! Error types for the state store.
//!
//! Loading never fails outright (an unreadable file falls back to a fresh
//! pet), so these errors surface from saving and from path resolution.

use std::path::PathBuf;

/// Errors that can occur while locating, reading, or writing state.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No per-user configuration directory could be determined.
    #[error("could not determine a configuration directory for the state file")]
    NoStateDir,

    /// A filesystem operation failed.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        /// The path being operated on.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// A serialization or deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The document is valid JSON but not shaped like a state file.
    #[error("malformed state document: {0}")]
    Malformed(String),

    /// The state failed validation and was not written.
    #[error("refusing to save invalid state: {0}")]
    Invalid(#[from] validator::ValidationErrors),

    /// The temporary file could not be moved into place.
    #[error("failed to persist state file: {0}")]
    Persist(#[from] tempfile::PersistError),
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
