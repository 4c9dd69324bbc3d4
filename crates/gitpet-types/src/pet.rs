//! The persisted pet record, its config record, and the state envelope.
//!
//! The on-disk layout is a single JSON document:
//!
//! ```text
//! { "globalPet": { name, mood, hunger, happiness, ... }, "config": { checkRemoteStatus } }
//! ```
//!
//! Field names are camelCase on disk. Unknown fields in either record are
//! kept in an `extra` map so that files written by newer or older versions
//! round-trip without loss.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::enums::Mood;

/// Upper bound of the hunger and happiness stats.
pub const MAX_STAT: u8 = 100;

/// Hunger and happiness of a freshly created pet.
pub const STARTING_STAT: u8 = 50;

/// Maximum pet name length in characters.
pub const MAX_NAME_LEN: usize = 50;

/// Name given to a pet that has never been renamed.
pub const DEFAULT_PET_NAME: &str = "Git Pet";

/// The single global pet.
///
/// `hunger` counts down towards starvation: 100 is full, 0 is starving.
/// `happiness` likewise counts down towards boredom.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PetRecord {
    /// Display name, 1--50 characters.
    #[validate(length(min = 1, max = 50))]
    pub name: String,
    /// Mood derived by the last resolution.
    pub mood: Mood,
    /// Fullness (0--100).
    #[validate(range(max = 100))]
    pub hunger: u8,
    /// Happiness (0--100).
    #[validate(range(max = 100))]
    pub happiness: u8,
    /// When the pet was last fed.
    pub last_fed: Option<DateTime<Utc>>,
    /// When the pet was last played with.
    pub last_played: Option<DateTime<Utc>>,
    /// Timestamp of the newest commit the pet has seen.
    pub last_commit_timestamp: Option<DateTime<Utc>>,
    /// When the pet was created.
    pub created_at: Option<DateTime<Utc>>,
    /// When decay was last charged against the stats.
    pub last_status_update: Option<DateTime<Utc>>,
    /// Cosmetic animation frame owned by the presentation layer.
    pub animation_frame: u32,
    /// Root directory of the repository the pet last looked at.
    pub repo_root_dir: Option<String>,
    /// Current level, starting at 1.
    #[validate(range(min = 1))]
    pub level: u32,
    /// Experience towards the next level.
    pub experience: u32,
    /// Achievement key to unlock time. Entries are never removed or re-timed.
    pub achievements: BTreeMap<String, DateTime<Utc>>,
    /// Fields this version does not understand, preserved verbatim.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl PetRecord {
    /// Create a brand-new pet born at `now`.
    ///
    /// Interaction timestamps start at `now` so a new pet does not decay
    /// from the epoch. `lastCommitTimestamp` and `repoRootDir` start empty.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            name: DEFAULT_PET_NAME.to_owned(),
            mood: Mood::Neutral,
            hunger: STARTING_STAT,
            happiness: STARTING_STAT,
            last_fed: Some(now),
            last_played: Some(now),
            last_commit_timestamp: None,
            created_at: Some(now),
            last_status_update: Some(now),
            animation_frame: 0,
            repo_root_dir: None,
            level: 1,
            experience: 0,
            achievements: BTreeMap::new(),
            extra: BTreeMap::new(),
        }
    }

    /// Whether the achievement with the given key has been unlocked.
    pub fn has_achievement(&self, key: &str) -> bool {
        self.achievements.contains_key(key)
    }
}

/// Persisted user options.
///
/// Only `checkRemoteStatus` is understood; anything else is carried along
/// in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PetConfig {
    /// Whether the inspector may touch the network to compute ahead/behind.
    pub check_remote_status: bool,
    /// Options this version does not understand, preserved verbatim.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// Everything persisted in the state file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PetState {
    /// The single global pet.
    #[validate(nested)]
    pub global_pet: PetRecord,
    /// User options.
    pub config: PetConfig,
    /// Top-level sections this version does not understand.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl PetState {
    /// A fresh state with a new pet born at `now` and default options.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            global_pet: PetRecord::new(now),
            config: PetConfig::default(),
            extra: BTreeMap::new(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::indexing_slicing)]
mod tests {
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    use super::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).single().unwrap_or_default()
    }

    #[test]
    fn new_pet_defaults() {
        let pet = PetRecord::new(now());
        assert_eq!(pet.hunger, 50);
        assert_eq!(pet.happiness, 50);
        assert_eq!(pet.level, 1);
        assert_eq!(pet.experience, 0);
        assert_eq!(pet.mood, Mood::Neutral);
        assert!(pet.achievements.is_empty());
        assert_eq!(pet.created_at, Some(now()));
        assert_eq!(pet.last_commit_timestamp, None);
        assert_eq!(pet.repo_root_dir, None);
    }

    #[test]
    fn persisted_field_names_are_camel_case() {
        let state = PetState::new(now());
        let value = serde_json::to_value(&state).unwrap_or_default();
        let pet = &value["globalPet"];
        for key in [
            "name",
            "mood",
            "hunger",
            "happiness",
            "lastFed",
            "lastPlayed",
            "lastCommitTimestamp",
            "createdAt",
            "lastStatusUpdate",
            "animationFrame",
            "repoRootDir",
            "level",
            "experience",
            "achievements",
        ] {
            assert!(pet.get(key).is_some(), "missing {key}");
        }
        assert_eq!(value["config"]["checkRemoteStatus"], serde_json::json!(false));
    }

    #[test]
    fn unknown_fields_are_preserved() {
        let mut value = serde_json::to_value(PetState::new(now())).unwrap_or_default();
        value["globalPet"]["lastMood"] = serde_json::json!("sad");
        value["config"]["theme"] = serde_json::json!("dark");

        let state: PetState = serde_json::from_value(value).unwrap_or_else(|_| PetState::new(now()));
        assert_eq!(state.global_pet.extra.get("lastMood"), Some(&serde_json::json!("sad")));
        assert_eq!(state.config.extra.get("theme"), Some(&serde_json::json!("dark")));

        let back = serde_json::to_value(&state).unwrap_or_default();
        assert_eq!(back["globalPet"]["lastMood"], serde_json::json!("sad"));
    }

    #[test]
    fn validation_rejects_bad_records() {
        let mut state = PetState::new(now());
        assert!(state.validate().is_ok());

        state.global_pet.name = String::new();
        assert!(state.validate().is_err());

        state.global_pet.name = "x".repeat(51);
        assert!(state.validate().is_err());

        state.global_pet.name = "Byte".to_owned();
        state.global_pet.hunger = 101;
        assert!(state.validate().is_err());

        state.global_pet.hunger = 100;
        state.global_pet.level = 0;
        assert!(state.validate().is_err());
    }
}
