//! Tunable constants for decay, mood, leveling, rewards, and interactions.
//!
//! [`PetTuning`] bundles every tunable so that callers (the session, tests)
//! can override defaults. Every struct deserializes with per-field defaults,
//! so a settings file only needs to name the values it changes.

use std::collections::BTreeMap;

use serde::Deserialize;
use validator::Validate;

use crate::achievements::Achievement;

/// Every tunable the engine reads.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Validate)]
pub struct PetTuning {
    /// Time-based decay rates.
    #[serde(default)]
    pub decay: DecayConfig,

    /// Mood rule thresholds.
    #[serde(default)]
    pub mood: MoodConfig,

    /// Level curve and level-up bonuses.
    #[serde(default)]
    #[validate(nested)]
    pub leveling: LevelingConfig,

    /// Experience granted per event and per achievement.
    #[serde(default)]
    pub rewards: RewardConfig,

    /// Stat changes from feeding and playing.
    #[serde(default)]
    pub interactions: InteractionConfig,
}

/// Decay rates, in stat points per hour of neglect.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DecayConfig {
    /// Hunger lost per hour (default: 5.0).
    pub hunger_per_hour: f64,

    /// Happiness lost per hour (default: 4.0).
    pub boredom_per_hour: f64,

    /// Elapsed hours below which decay is skipped (default: 0.005, ~18s).
    ///
    /// Keeps rapid repeated invocations from flickering the stats.
    pub min_elapsed_hours: f64,
}

impl Default for DecayConfig {
    fn default() -> Self {
        Self {
            hunger_per_hour: 5.0,
            boredom_per_hour: 4.0,
            min_elapsed_hours: 0.005,
        }
    }
}

/// Thresholds for the mood rule chain.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MoodConfig {
    /// Behind-count above which the pet is sad (default: 5).
    pub behind_threshold: u32,

    /// Happiness lost when the behind rule fires (default: 15).
    pub behind_happiness_penalty: u8,

    /// Ahead-count above which the pet is thinking (default: 10).
    pub ahead_threshold: u32,

    /// Hours since the last commit after which uncommitted work is
    /// stressful (default: 1.0).
    pub stress_threshold_hours: f64,

    /// Hunger below which the pet is sad (default: 20).
    pub hungry_below: u8,

    /// Happiness below which the pet is bored (default: 30).
    pub low_happiness_below: u8,

    /// Age in weeks after which a branch counts as old (default: 2).
    pub old_branch_weeks: u32,

    /// Old-branch count above which the pet is bored (default: 2).
    pub old_branch_count: usize,

    /// Branches never counted as old.
    pub trunk_branches: Vec<String>,

    /// Hours without a commit after which the pet is bored (default: 6.0).
    pub boredom_threshold_hours: f64,

    /// Multiplier on `boredom_threshold_hours` for the not-played rule
    /// (default: 1.5).
    pub play_boredom_multiplier: f64,

    /// Happiness granted by a newly observed commit (default: 25).
    pub commit_happiness_boost: u8,

    /// Happiness above which needs count as met (default: 85).
    pub happy_happiness_above: u8,

    /// Hunger above which needs count as met (default: 60).
    pub happy_hunger_above: u8,
}

impl Default for MoodConfig {
    fn default() -> Self {
        Self {
            behind_threshold: 5,
            behind_happiness_penalty: 15,
            ahead_threshold: 10,
            stress_threshold_hours: 1.0,
            hungry_below: 20,
            low_happiness_below: 30,
            old_branch_weeks: 2,
            old_branch_count: 2,
            trunk_branches: ["main", "master", "develop", "HEAD"]
                .into_iter()
                .map(String::from)
                .collect(),
            boredom_threshold_hours: 6.0,
            play_boredom_multiplier: 1.5,
            commit_happiness_boost: 25,
            happy_happiness_above: 85,
            happy_hunger_above: 60,
        }
    }
}

impl MoodConfig {
    /// Hours since the last play session after which the pet is bored.
    pub fn play_boredom_hours(&self) -> f64 {
        self.boredom_threshold_hours * self.play_boredom_multiplier
    }

    /// Whether `name` is a trunk branch that never counts as old.
    pub fn is_trunk(&self, name: &str) -> bool {
        self.trunk_branches.iter().any(|trunk| trunk == name)
    }
}

/// Level curve: `base_exp + exp_increment * (level - 1)` experience to
/// advance from `level`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
#[serde(default)]
pub struct LevelingConfig {
    /// Experience to go from level 1 to 2 (default: 100, at least 1).
    #[validate(range(min = 1))]
    pub base_exp: u32,

    /// Extra experience per level (default: 50).
    pub exp_increment: u32,

    /// Happiness granted per level gained (default: 20).
    pub level_up_happiness_bonus: u8,

    /// Hunger granted per level gained (default: 10).
    pub level_up_hunger_bonus: u8,
}

impl Default for LevelingConfig {
    fn default() -> Self {
        Self {
            base_exp: 100,
            exp_increment: 50,
            level_up_happiness_bonus: 20,
            level_up_hunger_bonus: 10,
        }
    }
}

/// Experience granted for hook events and achievement unlocks.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RewardConfig {
    /// A commit that changed files (default: 10).
    pub commit_with_changes: u32,

    /// A completed merge (default: 25).
    pub merge_success: u32,

    /// A merge that resolved conflicts (default: 50).
    pub resolve_conflict: u32,

    /// A push attempt (default: 5).
    pub push_changes: u32,

    /// Deleting an old or merged branch (default: 15).
    pub clean_branch: u32,

    /// Bonus experience per achievement. Achievements without an entry
    /// grant no bonus.
    pub achievement_bonus: BTreeMap<Achievement, u32>,
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self {
            commit_with_changes: 10,
            merge_success: 25,
            resolve_conflict: 50,
            push_changes: 5,
            clean_branch: 15,
            achievement_bonus: BTreeMap::from([
                (Achievement::FirstCommit, 20),
                (Achievement::FirstMerge, 30),
                (Achievement::FirstConflictResolved, 50),
                (Achievement::ReachLevel5, 100),
                (Achievement::ReachLevel10, 250),
            ]),
        }
    }
}

impl RewardConfig {
    /// Bonus experience for unlocking `achievement` (0 if none configured).
    pub fn bonus_for(&self, achievement: Achievement) -> u32 {
        self.achievement_bonus.get(&achievement).copied().unwrap_or(0)
    }
}

/// Stat changes applied by feeding and playing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
    /// Hunger restored by a meal (default: 25).
    pub feed_hunger_gain: u8,

    /// Happiness from a meal (default: 5).
    pub feed_happiness_gain: u8,

    /// Happiness from a play session (default: 20).
    pub play_happiness_gain: u8,

    /// Hunger spent by a play session (default: 8).
    pub play_hunger_cost: u8,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            feed_hunger_gain: 25,
            feed_happiness_gain: 5,
            play_happiness_gain: 20,
            play_hunger_cost: 8,
        }
    }
}
