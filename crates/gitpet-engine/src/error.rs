//! Error types for the gitpet-engine crate.
//!
//! The engine never panics on bad input; the only failure modes are
//! arithmetic overflow in the progression ledger and rejected user input.

/// Errors that can occur while mutating the pet.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// An arithmetic overflow occurred during a progression computation.
    #[error("arithmetic overflow in progression computation: {context}")]
    ArithmeticOverflow {
        /// Description of what was being computed.
        context: String,
    },

    /// A proposed pet name was rejected.
    #[error("invalid pet name: {reason}")]
    InvalidName {
        /// Why the name was rejected.
        reason: String,
    },
}
