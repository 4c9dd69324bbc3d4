//! What each session operation hands back to the command line.
//!
//! Reports carry plain data only; rendering is the caller's business.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use gitpet_engine::{Achievement, MoodResolution};
use gitpet_types::{PetRecord, RepositorySnapshot};

/// Result of `status`.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusReport {
    /// The pet after decay and mood resolution.
    pub pet: PetRecord,
    /// The mood and why.
    pub resolution: MoodResolution,
    /// The repository facts the mood was derived from.
    pub snapshot: RepositorySnapshot,
    /// Whether the remote ahead/behind check was enabled.
    pub check_remote: bool,
    /// Whether the updated state reached storage.
    pub saved: bool,
}

/// Result of `summary`: a status plus progress and repository detail.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryReport {
    /// The underlying status.
    pub status: StatusReport,
    /// Experience needed for the next level.
    pub exp_required: u32,
    /// Names of stale branches, at most [`SummaryReport::OLD_BRANCH_LIMIT`].
    pub old_branches: Vec<String>,
    /// Total number of stale branches.
    pub old_branch_total: usize,
}

impl SummaryReport {
    /// How many stale branch names a summary lists.
    pub const OLD_BRANCH_LIMIT: usize = 5;
}

/// Result of `feed`, `play`, and `name`.
#[derive(Debug, Clone, PartialEq)]
pub struct CareReport {
    /// The pet after the interaction.
    pub pet: PetRecord,
    /// Whether the updated state reached storage.
    pub saved: bool,
}

/// One row of the achievement listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AchievementEntry {
    /// Persisted key, e.g. `FIRST_COMMIT`.
    pub key: String,
    /// Display name.
    pub name: String,
    /// Description; empty for keys the catalog does not know.
    pub description: String,
    /// Bonus experience the achievement grants.
    pub bonus: u32,
    /// Unlock time, if unlocked.
    pub unlocked_at: Option<DateTime<Utc>>,
}

/// Result of `achievements`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AchievementsReport {
    /// The pet's name.
    pub pet_name: String,
    /// Every catalog achievement, then any unknown unlocked keys.
    pub entries: Vec<AchievementEntry>,
}

impl AchievementsReport {
    /// Entries that have been unlocked, oldest first.
    pub fn unlocked(&self) -> Vec<&AchievementEntry> {
        let mut unlocked: Vec<&AchievementEntry> =
            self.entries.iter().filter(|e| e.unlocked_at.is_some()).collect();
        unlocked.sort_by_key(|e| e.unlocked_at);
        unlocked
    }

    /// Catalog entries still locked.
    pub fn locked(&self) -> Vec<&AchievementEntry> {
        self.entries
            .iter()
            .filter(|e| e.unlocked_at.is_none())
            .collect()
    }

    pub(crate) fn build(pet: &PetRecord, bonus: impl Fn(Achievement) -> u32) -> Self {
        let mut entries: Vec<AchievementEntry> = Achievement::ALL
            .into_iter()
            .map(|a| AchievementEntry {
                key: a.key().to_owned(),
                name: a.name().to_owned(),
                description: a.description().to_owned(),
                bonus: bonus(a),
                unlocked_at: pet.achievements.get(a.key()).copied(),
            })
            .collect();
        entries.extend(
            pet.achievements
                .iter()
                .filter(|(key, _)| Achievement::from_key(key).is_none())
                .map(|(key, at)| AchievementEntry {
                    key: key.clone(),
                    name: gitpet_engine::achievements::display_name(key),
                    description: String::new(),
                    bonus: 0,
                    unlocked_at: Some(*at),
                }),
        );
        Self {
            pet_name: pet.name.clone(),
            entries,
        }
    }
}

/// Result of `config list`: option name to displayed value.
pub type ConfigListing = BTreeMap<String, String>;
