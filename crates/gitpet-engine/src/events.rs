//! Hook events and the rewards they earn.
//!
//! Hooks invoke the binary with an event name and a few flags. Each
//! recognized event maps to a fixed experience amount and, for
//! first-occurrence events, an achievement. Unknown events are logged and
//! ignored.

use chrono::{DateTime, Utc};
use gitpet_types::PetRecord;
use tracing::{debug, warn};

use crate::achievements::Achievement;
use crate::config::{PetTuning, RewardConfig};
use crate::error::EngineError;
use crate::progression::{award_experience, lifetime_experience, unlock_achievement};

/// A repository event reported by a hook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GitEvent {
    /// `post-commit`.
    Commit {
        /// `--changes`: the commit actually changed files.
        changes: bool,
    },
    /// `post-merge`.
    Merge {
        /// `--was-conflict`: the merge required conflict resolution.
        was_conflict: bool,
    },
    /// `pre-push`.
    PushAttempt,
    /// `branch-deleted`.
    BranchDeleted {
        /// `--was-old`.
        was_old: bool,
        /// `--was-merged`.
        was_merged: bool,
    },
    /// Anything else.
    Unknown(String),
}

impl GitEvent {
    /// Parse an event name and its flags. Never fails.
    pub fn parse<S: AsRef<str>>(name: &str, args: &[S]) -> Self {
        let has = |flag: &str| args.iter().any(|a| a.as_ref() == flag);
        match name {
            "post-commit" => Self::Commit {
                changes: has("--changes"),
            },
            "post-merge" => Self::Merge {
                was_conflict: has("--was-conflict"),
            },
            "pre-push" => Self::PushAttempt,
            "branch-deleted" => Self::BranchDeleted {
                was_old: has("--was-old"),
                was_merged: has("--was-merged"),
            },
            other => Self::Unknown(other.to_owned()),
        }
    }

    /// The hook name this event came from.
    pub fn name(&self) -> &str {
        match self {
            Self::Commit { .. } => "post-commit",
            Self::Merge { .. } => "post-merge",
            Self::PushAttempt => "pre-push",
            Self::BranchDeleted { .. } => "branch-deleted",
            Self::Unknown(name) => name,
        }
    }

    /// Experience and first-occurrence achievement for this event, or
    /// `None` if it earns nothing.
    pub fn reward(&self, rewards: &RewardConfig) -> Option<(u32, Option<Achievement>)> {
        match self {
            Self::Commit { changes: true } => {
                Some((rewards.commit_with_changes, Some(Achievement::FirstCommit)))
            }
            Self::Merge { was_conflict: true } => Some((
                rewards.resolve_conflict,
                Some(Achievement::FirstConflictResolved),
            )),
            Self::Merge {
                was_conflict: false,
            } => Some((rewards.merge_success, Some(Achievement::FirstMerge))),
            Self::PushAttempt => Some((rewards.push_changes, None)),
            Self::BranchDeleted { was_old, was_merged } if *was_old || *was_merged => {
                Some((rewards.clean_branch, None))
            }
            Self::Commit { changes: false } | Self::BranchDeleted { .. } | Self::Unknown(_) => {
                None
            }
        }
    }
}

/// What processing an event did to the pet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventReport {
    /// Whether the event earned anything.
    pub rewarded: bool,
    /// Total experience gained, bonuses included.
    pub experience_gained: u64,
    /// Levels gained.
    pub levels_gained: u32,
    /// Achievements unlocked by this event, in catalog order.
    pub unlocked: Vec<Achievement>,
}

/// Apply an event's rewards to the pet.
///
/// Event experience is awarded before the achievement unlock, so a
/// level-up from the event itself is visible to milestone checks.
pub fn apply_event(
    pet: &mut PetRecord,
    event: &GitEvent,
    now: DateTime<Utc>,
    tuning: &PetTuning,
) -> Result<EventReport, EngineError> {
    let Some((experience, achievement)) = event.reward(&tuning.rewards) else {
        match event {
            GitEvent::Unknown(name) => warn!(event = %name, "unknown event, ignoring"),
            other => debug!(event = other.name(), "event earns nothing, skipping"),
        }
        return Ok(EventReport::default());
    };

    let level_before = pet.level;
    let lifetime_before = lifetime_experience(pet, &tuning.leveling)?;
    let unlocked_before: Vec<Achievement> = Achievement::ALL
        .into_iter()
        .filter(|a| pet.has_achievement(a.key()))
        .collect();

    award_experience(pet, experience, event.name(), now, tuning)?;
    if let Some(achievement) = achievement {
        unlock_achievement(pet, achievement, now, tuning)?;
    }

    let lifetime_after = lifetime_experience(pet, &tuning.leveling)?;
    let unlocked: Vec<Achievement> = Achievement::ALL
        .into_iter()
        .filter(|a| pet.has_achievement(a.key()) && !unlocked_before.contains(a))
        .collect();

    let report = EventReport {
        rewarded: true,
        experience_gained: lifetime_after.saturating_sub(lifetime_before),
        levels_gained: pet.level.saturating_sub(level_before),
        unlocked,
    };
    debug!(
        event = event.name(),
        experience = report.experience_gained,
        levels = report.levels_gained,
        unlocked = report.unlocked.len(),
        "event processed"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    use super::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 4, 2, 18, 30, 0).single().unwrap_or_default()
    }

    fn process(pet: &mut PetRecord, name: &str, args: &[&str]) -> EventReport {
        let event = GitEvent::parse(name, args);
        apply_event(pet, &event, now(), &PetTuning::default()).unwrap_or_default()
    }

    #[test]
    fn parse_recognizes_hooks_and_flags() {
        assert_eq!(
            GitEvent::parse("post-commit", &["--changes"]),
            GitEvent::Commit { changes: true }
        );
        assert_eq!(
            GitEvent::parse::<&str>("post-merge", &[]),
            GitEvent::Merge {
                was_conflict: false
            }
        );
        assert_eq!(
            GitEvent::parse("branch-deleted", &["--was-merged"]),
            GitEvent::BranchDeleted {
                was_old: false,
                was_merged: true
            }
        );
        assert_eq!(
            GitEvent::parse::<&str>("post-rewrite", &[]),
            GitEvent::Unknown("post-rewrite".to_owned())
        );
    }

    #[test]
    fn first_commit_unlocks_achievement() {
        let mut pet = PetRecord::new(now());
        let report = process(&mut pet, "post-commit", &["--changes"]);
        // 10 for the commit + 20 bonus
        assert_eq!(pet.experience, 30);
        assert!(pet.has_achievement("FIRST_COMMIT"));
        assert_eq!(report.unlocked, vec![Achievement::FirstCommit]);
        assert_eq!(report.experience_gained, 30);
        assert!(report.rewarded);
    }

    #[test]
    fn repeated_commit_earns_experience_only() {
        let mut pet = PetRecord::new(now());
        process(&mut pet, "post-commit", &["--changes"]);
        let report = process(&mut pet, "post-commit", &["--changes"]);
        assert_eq!(pet.experience, 40);
        assert!(report.unlocked.is_empty());
        assert_eq!(report.experience_gained, 10);
        assert_eq!(pet.achievements.len(), 1);
    }

    #[test]
    fn commit_without_changes_is_skipped() {
        let mut pet = PetRecord::new(now());
        let before = pet.clone();
        let report = process(&mut pet, "post-commit", &[]);
        assert!(!report.rewarded);
        assert_eq!(pet, before);
    }

    #[test]
    fn conflict_merge_pays_more() {
        let mut pet = PetRecord::new(now());
        let report = process(&mut pet, "post-merge", &["--was-conflict"]);
        // 50 + 50 bonus = 100 -> level 2 with nothing left
        assert_eq!(pet.level, 2);
        assert_eq!(pet.experience, 0);
        assert_eq!(report.levels_gained, 1);
        assert_eq!(report.experience_gained, 100);
        assert_eq!(report.unlocked, vec![Achievement::FirstConflictResolved]);
        assert!(!pet.has_achievement("FIRST_MERGE"));
    }

    #[test]
    fn plain_merge_and_push() {
        let mut pet = PetRecord::new(now());
        process(&mut pet, "post-merge", &[]);
        assert_eq!(pet.experience, 55);
        let push = process(&mut pet, "pre-push", &[]);
        assert_eq!(pet.experience, 60);
        assert!(push.unlocked.is_empty());
    }

    #[test]
    fn branch_cleanup_needs_a_flag() {
        let mut pet = PetRecord::new(now());
        assert!(!process(&mut pet, "branch-deleted", &[]).rewarded);
        assert!(process(&mut pet, "branch-deleted", &["--was-old"]).rewarded);
        assert_eq!(pet.experience, 15);
    }

    #[test]
    fn unknown_event_is_ignored() {
        let mut pet = PetRecord::new(now());
        let before = pet.clone();
        let report = process(&mut pet, "post-checkout", &["--changes"]);
        assert_eq!(report, EventReport::default());
        assert_eq!(pet, before);
    }

    #[test]
    fn level_milestone_reported_alongside_event_achievement() {
        let mut pet = PetRecord::new(now());
        pet.level = 4;
        pet.experience = 245;
        let report = process(&mut pet, "post-commit", &["--changes"]);
        assert_eq!(pet.level, 5);
        // 255 - 250 = 5, + 100 milestone bonus, + 20 first-commit bonus
        assert_eq!(pet.experience, 125);
        assert_eq!(
            report.unlocked,
            vec![Achievement::FirstCommit, Achievement::ReachLevel5]
        );
    }
}
