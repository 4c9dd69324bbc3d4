//! Session orchestration and settings for the Git Pet.
//!
//! This crate wires the engine to its collaborators. A [`PetSession`]
//! loads the state from a [`StateStore`](gitpet_store::StateStore),
//! gathers repository facts through a
//! [`RepositoryInspector`](gitpet_git::RepositoryInspector), runs the
//! engine, and saves the result. One session serves one invocation.
//!
//! # Modules
//!
//! - [`error`] -- Error types ([`CoreError`])
//! - [`report`] -- Plain-data results of each operation
//! - [`session`] -- The load/mutate/save lifecycle ([`PetSession`])
//! - [`settings`] -- `git-pet.yaml` ([`PetSettings`])

pub mod error;
pub mod report;
pub mod session;
pub mod settings;

pub use error::CoreError;
pub use report::{
    AchievementEntry, AchievementsReport, CareReport, ConfigListing, StatusReport, SummaryReport,
};
pub use session::{CHECK_REMOTE_STATUS, PetSession};
pub use settings::{LoggingConfig, PetSettings, SETTINGS_FILE_NAME, SettingsError};
