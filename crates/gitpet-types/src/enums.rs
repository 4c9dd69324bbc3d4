//! Enumeration types for the Git Pet.

use serde::{Deserialize, Serialize};

/// Categorical label summarising the pet's current emotional state.
///
/// Derived each resolution cycle by the mood resolver and persisted in
/// lowercase (`"neutral"`, `"happy"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    /// Nothing notable going on.
    #[default]
    Neutral,
    /// Needs met, or a fresh commit just landed.
    Happy,
    /// Hungry, or far behind the remote.
    Sad,
    /// Neglected, or the repository has gone stale.
    Bored,
    /// Merge conflicts or long-lived uncommitted work.
    Stressed,
    /// Work in progress: uncommitted changes or unpushed commits.
    Thinking,
    /// Not inside a git repository.
    Confused,
}

impl Mood {
    /// All moods, in declaration order.
    pub const ALL: [Self; 7] = [
        Self::Neutral,
        Self::Happy,
        Self::Sad,
        Self::Bored,
        Self::Stressed,
        Self::Thinking,
        Self::Confused,
    ];

    /// Lowercase label, identical to the persisted form.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Neutral => "neutral",
            Self::Happy => "happy",
            Self::Sad => "sad",
            Self::Bored => "bored",
            Self::Stressed => "stressed",
            Self::Thinking => "thinking",
            Self::Confused => "confused",
        }
    }

    /// Whether this mood blocks the new-commit happiness boost.
    pub const fn is_distressed(self) -> bool {
        matches!(self, Self::Stressed | Self::Sad)
    }
}

impl core::fmt::Display for Mood {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
