//! Catalog of one-time achievements.
//!
//! Achievements are persisted by key (`FIRST_COMMIT`, ...) in the pet's
//! achievement map. Keys the catalog does not know are still displayed,
//! with a name derived from the key.

use serde::Deserialize;

/// A one-time milestone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Achievement {
    /// First commit with changes since the pet started watching.
    FirstCommit,
    /// First completed merge.
    FirstMerge,
    /// First merge that resolved conflicts.
    FirstConflictResolved,
    /// Reached level 5.
    #[serde(rename = "REACH_LEVEL_5")]
    ReachLevel5,
    /// Reached level 10.
    #[serde(rename = "REACH_LEVEL_10")]
    ReachLevel10,
}

impl Achievement {
    /// Every known achievement, in display order.
    pub const ALL: [Self; 5] = [
        Self::FirstCommit,
        Self::FirstMerge,
        Self::FirstConflictResolved,
        Self::ReachLevel5,
        Self::ReachLevel10,
    ];

    /// Persisted key.
    pub const fn key(self) -> &'static str {
        match self {
            Self::FirstCommit => "FIRST_COMMIT",
            Self::FirstMerge => "FIRST_MERGE",
            Self::FirstConflictResolved => "FIRST_CONFLICT_RESOLVED",
            Self::ReachLevel5 => "REACH_LEVEL_5",
            Self::ReachLevel10 => "REACH_LEVEL_10",
        }
    }

    /// Short display name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::FirstCommit => "First Commit!",
            Self::FirstMerge => "Merge Master!",
            Self::FirstConflictResolved => "Conflict Conqueror!",
            Self::ReachLevel5 => "Level 5!",
            Self::ReachLevel10 => "Level 10!",
        }
    }

    /// One-line description.
    pub const fn description(self) -> &'static str {
        match self {
            Self::FirstCommit => "Made your first commit since Git Pet started watching.",
            Self::FirstMerge => "Successfully merged a branch for the first time.",
            Self::FirstConflictResolved => "Resolved your first merge conflict.",
            Self::ReachLevel5 => "Reached Level 5. Keep it up!",
            Self::ReachLevel10 => "Reached Level 10. Impressive!",
        }
    }

    /// Level at which this achievement unlocks automatically, if any.
    pub const fn level_threshold(self) -> Option<u32> {
        match self {
            Self::ReachLevel5 => Some(5),
            Self::ReachLevel10 => Some(10),
            Self::FirstCommit | Self::FirstMerge | Self::FirstConflictResolved => None,
        }
    }

    /// Look up an achievement by its persisted key.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.key() == key)
    }
}

impl core::fmt::Display for Achievement {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.key())
    }
}

/// Display name for any persisted key, known or not.
///
/// Unknown keys are shown with underscores replaced by spaces.
pub fn display_name(key: &str) -> String {
    Achievement::from_key(key).map_or_else(|| key.replace('_', " "), |a| a.name().to_owned())
}
