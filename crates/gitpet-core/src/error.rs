//! Error types for the session layer.

use gitpet_engine::EngineError;

/// Errors surfaced to the command line.
///
/// Storage and inspection problems are absorbed below this layer (a
/// failed save shows up as `saved: false` on the report); what remains is
/// rejected user input and progression overflow.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The engine rejected an operation.
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// `config get/set` named an option that does not exist.
    #[error("unknown config key '{key}' (known keys: {known})")]
    UnknownConfigKey {
        /// The key as given.
        key: String,
        /// Comma-separated list of recognized keys.
        known: String,
    },

    /// `config set` was given a value of the wrong type.
    #[error("invalid value '{value}' for {key}: expected true or false")]
    InvalidConfigValue {
        /// The key being set.
        key: String,
        /// The rejected value.
        value: String,
    },
}
