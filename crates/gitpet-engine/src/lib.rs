//! Decay, mood, and progression rules for the Git Pet.
//!
//! This crate contains the logic layer -- everything that operates on the
//! pet record without touching I/O. It sits between `gitpet-types` (which
//! defines the data) and `gitpet-core` (which owns the load/mutate/save
//! lifecycle). Every function takes the current time as a parameter.
//!
//! # Modules
//!
//! - [`achievements`] -- One-time milestones ([`Achievement`])
//! - [`clock`] -- Fractional-hour helpers
//! - [`config`] -- Tunable constants ([`PetTuning`])
//! - [`decay`] -- Time-based hunger and happiness loss
//! - [`error`] -- Error types ([`EngineError`])
//! - [`events`] -- Hook events and their rewards ([`GitEvent`], [`EventReport`])
//! - [`interactions`] -- Feeding, playing, renaming
//! - [`mood`] -- Prioritized mood rule chain ([`resolve_mood`])
//! - [`progression`] -- Experience, levels, and achievement unlocks
//! - [`stats`] -- Clamped 0--100 stat arithmetic

pub mod achievements;
pub mod clock;
pub mod config;
pub mod decay;
pub mod error;
pub mod events;
pub mod interactions;
pub mod mood;
pub mod progression;
pub mod stats;

pub use achievements::Achievement;
pub use config::{
    DecayConfig, InteractionConfig, LevelingConfig, MoodConfig, PetTuning, RewardConfig,
};
pub use decay::{DecayResult, apply_decay};
pub use error::EngineError;
pub use events::{EventReport, GitEvent, apply_event};
pub use mood::{MoodReason, MoodResolution, old_branches, resolve_mood};
pub use progression::{
    award_experience, exp_required_for_next_level, normalize_experience, unlock_achievement,
};
