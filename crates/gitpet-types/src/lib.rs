//! Shared type definitions for the Git Pet virtual pet.
//!
//! This crate is the single source of truth for the data that flows between
//! the engine, the state store, the repository inspector, and the command
//! line. It performs no I/O.
//!
//! # Modules
//!
//! - [`enums`] -- The [`Mood`] enumeration
//! - [`pet`] -- The persisted pet record, config record, and state envelope
//! - [`repository`] -- Point-in-time repository snapshot produced by the inspector

pub mod enums;
pub mod pet;
pub mod repository;

// Re-export all public types at crate root for convenience.
pub use enums::Mood;
pub use pet::{
    DEFAULT_PET_NAME, MAX_NAME_LEN, MAX_STAT, PetConfig, PetRecord, PetState, STARTING_STAT,
};
pub use repository::{BranchInfo, DETACHED_HEAD, RepositorySnapshot};
