//! Persisted state for the Git Pet.
//!
//! The pet lives in a single JSON document at a fixed per-user location.
//! Every invocation loads it, mutates it, and saves it back in full.
//!
//! Loading never fails: a missing file hatches a new pet, and an
//! unreadable one falls back to defaults (and is preserved on the next
//! save). Stored records are merged field by field over the defaults, so
//! older files pick up new fields automatically.
//!
//! # Modules
//!
//! - [`error`] -- Error types ([`StoreError`])
//! - [`json_store`] -- The file-backed store ([`JsonStateStore`])
//! - [`memory`] -- In-memory store for tests ([`MemoryStateStore`])
//! - [`merge`] -- Field-by-field overlay of stored documents onto defaults

pub mod error;
pub mod json_store;
pub mod memory;
pub mod merge;

use chrono::{DateTime, Utc};
use gitpet_types::PetState;

pub use error::StoreError;
pub use json_store::{JsonStateStore, STATE_FILE_NAME, default_state_dir};
pub use memory::MemoryStateStore;
pub use merge::{MergedState, merge_state};

/// Where a loaded state came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOrigin {
    /// No state existed; a new pet was hatched.
    Fresh,
    /// Read from storage. `repairs` lists fields reset to defaults.
    Stored {
        /// One entry per repaired field.
        repairs: Vec<String>,
    },
    /// Storage was unreadable; defaults are in use.
    Recovered {
        /// Why the stored state could not be used.
        reason: String,
    },
}

/// A state plus where it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedState {
    /// The state.
    pub state: PetState,
    /// Its origin.
    pub origin: LoadOrigin,
}

/// Load/save boundary for the pet state.
///
/// Callers own the lifecycle: load once, mutate, save once.
pub trait StateStore {
    /// Load the state, falling back to a fresh pet born at `now`.
    fn load(&mut self, now: DateTime<Utc>) -> LoadedState;

    /// Persist the full state.
    ///
    /// Invalid states are rejected before anything is written, leaving the
    /// stored state untouched.
    fn save(&mut self, state: &PetState) -> Result<(), StoreError>;
}
