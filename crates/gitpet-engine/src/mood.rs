//! Mood resolution: pet stats + repository snapshot -> mood and reason.
//!
//! Resolution runs in five steps:
//!
//! 1. Charge decay, then handle the "not a repository" case (`confused`).
//! 2. Adopt the snapshot's repository root.
//! 3. Walk [`MOOD_RULES`] in order; the first rule that matches decides
//!    the mood. Some rules carry a happiness penalty.
//! 4. A newly observed commit boosts happiness unless the pet is
//!    distressed, and is always recorded.
//! 5. Neutral or bored pets with their needs met become happy; a commit
//!    boost makes the pet happy with the highest-precedence reason.
//!
//! The rule table is plain data so the ordering is auditable and each rule
//! can be tested in isolation.

use chrono::{DateTime, Duration, Utc};
use gitpet_types::{BranchInfo, Mood, PetRecord, RepositorySnapshot};
use tracing::{debug, info};

use crate::clock::hours_since;
use crate::config::{MoodConfig, PetTuning};
use crate::decay::apply_decay;
use crate::stats;

/// Why the pet is in its current mood.
///
/// The [`Display`](core::fmt::Display) form is human-readable diagnostic
/// text, not a stable machine contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoodReason {
    /// The working directory is not a git repository.
    NotARepository,
    /// The index has unmerged paths.
    MergeConflicts,
    /// The branch is behind its upstream by this many commits.
    BehindRemote(u32),
    /// The branch is ahead of its upstream by this many commits.
    AheadOfRemote(u32),
    /// Uncommitted changes, and the last commit is old.
    OldUncommittedChanges,
    /// Uncommitted changes.
    UncommittedChanges,
    /// Hunger is low.
    Hungry,
    /// Happiness is low.
    LowHappiness,
    /// This many stale branches are lying around.
    OldBranches(usize),
    /// No commit for a while.
    NoRecentCommit,
    /// No play session for a while.
    NotPlayedRecently,
    /// Hunger and happiness are both high.
    NeedsMet,
    /// A commit the pet had not seen before.
    NewCommit,
    /// Nothing notable.
    Default,
}

impl core::fmt::Display for MoodReason {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotARepository => f.write_str("not in a git repository"),
            Self::MergeConflicts => f.write_str("merge conflicts detected"),
            Self::BehindRemote(n) => write!(f, "behind remote by {n} commits"),
            Self::AheadOfRemote(n) => write!(f, "ahead of remote by {n} commits"),
            Self::OldUncommittedChanges => f.write_str("old uncommitted changes"),
            Self::UncommittedChanges => f.write_str("uncommitted changes present"),
            Self::Hungry => f.write_str("hungry"),
            Self::LowHappiness => f.write_str("low happiness"),
            Self::OldBranches(n) => write!(f, "{n} old branches detected"),
            Self::NoRecentCommit => f.write_str("no recent commit"),
            Self::NotPlayedRecently => f.write_str("not played with recently"),
            Self::NeedsMet => f.write_str("needs met"),
            Self::NewCommit => f.write_str("new commit detected"),
            Self::Default => f.write_str("default"),
        }
    }
}

/// Final outcome of a mood resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoodResolution {
    /// The resolved mood (also written to the pet).
    pub mood: Mood,
    /// Why.
    pub reason: MoodReason,
    /// Name of the rule-table entry that matched, if any.
    pub rule: Option<&'static str>,
    /// Whether a newly observed commit boosted happiness.
    pub commit_boost: bool,
}

/// Outcome of a single matching rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleOutcome {
    /// Mood the rule assigns.
    pub mood: Mood,
    /// Reason the rule reports.
    pub reason: MoodReason,
    /// Happiness removed when the rule fires.
    pub happiness_penalty: u8,
}

impl RuleOutcome {
    const fn new(mood: Mood, reason: MoodReason) -> Self {
        Self {
            mood,
            reason,
            happiness_penalty: 0,
        }
    }
}

/// Everything a rule may look at.
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    /// The pet, after decay.
    pub pet: &'a PetRecord,
    /// The repository facts.
    pub snapshot: &'a RepositorySnapshot,
    /// Resolution time.
    pub now: DateTime<Utc>,
    /// Thresholds.
    pub config: &'a MoodConfig,
}

/// A named predicate -> outcome entry in the rule chain.
#[derive(Debug, Clone, Copy)]
pub struct MoodRule {
    /// Stable name for logging and tests.
    pub name: &'static str,
    /// Returns the outcome when the rule matches.
    pub check: fn(&RuleContext<'_>) -> Option<RuleOutcome>,
}

/// The prioritized rule chain. Earlier entries win.
pub const MOOD_RULES: &[MoodRule] = &[
    MoodRule {
        name: "merge_conflicts",
        check: merge_conflicts,
    },
    MoodRule {
        name: "behind_remote",
        check: behind_remote,
    },
    MoodRule {
        name: "ahead_of_remote",
        check: ahead_of_remote,
    },
    MoodRule {
        name: "uncommitted_changes",
        check: uncommitted_changes,
    },
    MoodRule {
        name: "hungry",
        check: hungry,
    },
    MoodRule {
        name: "low_happiness",
        check: low_happiness,
    },
    MoodRule {
        name: "old_branches",
        check: old_branches_rule,
    },
    MoodRule {
        name: "no_recent_commit",
        check: no_recent_commit,
    },
    MoodRule {
        name: "not_played_recently",
        check: not_played_recently,
    },
];

fn merge_conflicts(ctx: &RuleContext<'_>) -> Option<RuleOutcome> {
    ctx.snapshot
        .has_conflicts
        .then_some(RuleOutcome::new(Mood::Stressed, MoodReason::MergeConflicts))
}

fn behind_remote(ctx: &RuleContext<'_>) -> Option<RuleOutcome> {
    let behind = ctx.snapshot.behind_count;
    (behind > ctx.config.behind_threshold).then_some(RuleOutcome {
        mood: Mood::Sad,
        reason: MoodReason::BehindRemote(behind),
        happiness_penalty: ctx.config.behind_happiness_penalty,
    })
}

fn ahead_of_remote(ctx: &RuleContext<'_>) -> Option<RuleOutcome> {
    let ahead = ctx.snapshot.ahead_count;
    (ahead > ctx.config.ahead_threshold)
        .then_some(RuleOutcome::new(Mood::Thinking, MoodReason::AheadOfRemote(ahead)))
}

fn uncommitted_changes(ctx: &RuleContext<'_>) -> Option<RuleOutcome> {
    if !ctx.snapshot.has_uncommitted_changes {
        return None;
    }
    let stale = hours_since(ctx.snapshot.last_commit_timestamp, ctx.now)
        .is_some_and(|hours| hours > ctx.config.stress_threshold_hours);
    Some(if stale {
        RuleOutcome::new(Mood::Stressed, MoodReason::OldUncommittedChanges)
    } else {
        RuleOutcome::new(Mood::Thinking, MoodReason::UncommittedChanges)
    })
}

fn hungry(ctx: &RuleContext<'_>) -> Option<RuleOutcome> {
    (ctx.pet.hunger < ctx.config.hungry_below)
        .then_some(RuleOutcome::new(Mood::Sad, MoodReason::Hungry))
}

fn low_happiness(ctx: &RuleContext<'_>) -> Option<RuleOutcome> {
    (ctx.pet.happiness < ctx.config.low_happiness_below)
        .then_some(RuleOutcome::new(Mood::Bored, MoodReason::LowHappiness))
}

fn old_branches_rule(ctx: &RuleContext<'_>) -> Option<RuleOutcome> {
    let count = old_branches(ctx.snapshot, ctx.now, ctx.config).len();
    (count > ctx.config.old_branch_count)
        .then_some(RuleOutcome::new(Mood::Bored, MoodReason::OldBranches(count)))
}

fn no_recent_commit(ctx: &RuleContext<'_>) -> Option<RuleOutcome> {
    hours_since(ctx.snapshot.last_commit_timestamp, ctx.now)
        .is_some_and(|hours| hours > ctx.config.boredom_threshold_hours)
        .then_some(RuleOutcome::new(Mood::Bored, MoodReason::NoRecentCommit))
}

fn not_played_recently(ctx: &RuleContext<'_>) -> Option<RuleOutcome> {
    hours_since(ctx.pet.last_played, ctx.now)
        .is_some_and(|hours| hours > ctx.config.play_boredom_hours())
        .then_some(RuleOutcome::new(Mood::Bored, MoodReason::NotPlayedRecently))
}

/// Branches whose tip is older than `old_branch_weeks`, excluding trunk
/// branches and the current branch.
pub fn old_branches<'s>(
    snapshot: &'s RepositorySnapshot,
    now: DateTime<Utc>,
    config: &MoodConfig,
) -> Vec<&'s BranchInfo> {
    let Some(cutoff) = Duration::try_weeks(i64::from(config.old_branch_weeks))
        .and_then(|age| now.checked_sub_signed(age))
    else {
        return Vec::new();
    };
    snapshot
        .branches
        .iter()
        .filter(|b| b.last_commit_time < cutoff)
        .filter(|b| !config.is_trunk(&b.name) && b.name != snapshot.current_branch)
        .collect()
}

/// Walk the rule chain and return the first match with its rule name.
pub fn evaluate_rules(ctx: &RuleContext<'_>) -> Option<(&'static str, RuleOutcome)> {
    MOOD_RULES
        .iter()
        .find_map(|rule| (rule.check)(ctx).map(|outcome| (rule.name, outcome)))
}

/// Resolve the pet's mood against a repository snapshot.
///
/// Charges decay first. Mutates `mood`, `happiness`,
/// `last_commit_timestamp`, and `repo_root_dir` on the pet.
pub fn resolve_mood(
    pet: &mut PetRecord,
    snapshot: &RepositorySnapshot,
    now: DateTime<Utc>,
    tuning: &PetTuning,
) -> MoodResolution {
    apply_decay(pet, now, &tuning.decay);

    // 1. Outside a repository nothing else applies.
    if !snapshot.is_git_repo {
        debug!(error = ?snapshot.error, "not in a git repository");
        pet.mood = Mood::Confused;
        pet.repo_root_dir = None;
        return MoodResolution {
            mood: Mood::Confused,
            reason: MoodReason::NotARepository,
            rule: None,
            commit_boost: false,
        };
    }

    // 2. Follow the pet to whichever repository it is looking at.
    if pet.repo_root_dir != snapshot.repo_root_dir {
        info!(
            from = ?pet.repo_root_dir,
            to = ?snapshot.repo_root_dir,
            "pet associated with repository"
        );
        pet.repo_root_dir.clone_from(&snapshot.repo_root_dir);
    }

    // 3. Prioritized rule chain.
    let ctx = RuleContext {
        pet,
        snapshot,
        now,
        config: &tuning.mood,
    };
    let (mut mood, mut reason, rule) = match evaluate_rules(&ctx) {
        Some((name, outcome)) => {
            pet.happiness = stats::lower(pet.happiness, outcome.happiness_penalty);
            (outcome.mood, outcome.reason, Some(name))
        }
        None => (Mood::Neutral, MoodReason::Default, None),
    };

    // 4. A commit the pet has not seen yet.
    let mut commit_boost = false;
    if let Some(commit_ts) = snapshot.last_commit_timestamp
        && pet.last_commit_timestamp != Some(commit_ts)
    {
        if !mood.is_distressed() {
            pet.happiness = stats::raise(pet.happiness, tuning.mood.commit_happiness_boost);
            commit_boost = true;
        }
        pet.last_commit_timestamp = Some(commit_ts);
    }

    // 5. Happiness override; the commit reason takes final precedence.
    if matches!(mood, Mood::Neutral | Mood::Bored)
        && pet.happiness > tuning.mood.happy_happiness_above
        && pet.hunger > tuning.mood.happy_hunger_above
    {
        mood = Mood::Happy;
        reason = MoodReason::NeedsMet;
    }
    if commit_boost && !mood.is_distressed() {
        mood = Mood::Happy;
        reason = MoodReason::NewCommit;
    }

    pet.mood = mood;
    debug!(
        mood = %mood,
        reason = %reason,
        rule = rule.unwrap_or("none"),
        hunger = pet.hunger,
        happiness = pet.happiness,
        "mood resolved"
    );

    MoodResolution {
        mood,
        reason,
        rule,
        commit_boost,
    }
}

#[cfg(test)]
#[allow(clippy::arithmetic_side_effects)]
mod tests {
    use chrono::TimeZone;
    use gitpet_types::BranchInfo;

    use super::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 5, 20, 15, 0, 0).single().unwrap_or_default()
    }

    fn fresh_pet() -> PetRecord {
        PetRecord::new(now())
    }

    fn repo() -> RepositorySnapshot {
        RepositorySnapshot::clean("/work/repo")
    }

    fn branch(name: &str, age_days: i64) -> BranchInfo {
        BranchInfo {
            name: name.to_owned(),
            last_commit_time: now() - Duration::days(age_days),
        }
    }

    fn resolve(pet: &mut PetRecord, snapshot: &RepositorySnapshot) -> MoodResolution {
        resolve_mood(pet, snapshot, now(), &PetTuning::default())
    }

    #[test]
    fn fresh_pet_in_quiet_repo_is_neutral() {
        let mut pet = fresh_pet();
        let res = resolve(&mut pet, &repo());
        assert_eq!(res.mood, Mood::Neutral);
        assert_eq!(res.reason.to_string(), "default");
        assert_eq!(pet.mood, Mood::Neutral);
        assert_eq!(pet.repo_root_dir.as_deref(), Some("/work/repo"));
    }

    #[test]
    fn conflicts_make_pet_stressed() {
        let mut pet = fresh_pet();
        let mut snap = repo();
        snap.has_conflicts = true;
        let res = resolve(&mut pet, &snap);
        assert_eq!(res.mood, Mood::Stressed);
        assert_eq!(res.reason.to_string(), "merge conflicts detected");
    }

    #[test]
    fn conflicts_outrank_hunger() {
        let mut pet = fresh_pet();
        pet.hunger = 0;
        let mut snap = repo();
        snap.has_conflicts = true;
        assert_eq!(resolve(&mut pet, &snap).mood, Mood::Stressed);
    }

    #[test]
    fn outside_repository_is_confused() {
        let mut pet = fresh_pet();
        pet.repo_root_dir = Some("/old/repo".to_owned());
        let snap = RepositorySnapshot::not_a_repository("not currently in a git repository");
        let res = resolve(&mut pet, &snap);
        assert_eq!(res.mood, Mood::Confused);
        assert_eq!(res.reason.to_string(), "not in a git repository");
        assert_eq!(pet.repo_root_dir, None);
    }

    #[test]
    fn behind_remote_is_sad_and_costs_happiness() {
        let mut pet = fresh_pet();
        let mut snap = repo();
        snap.behind_count = 6;
        let res = resolve(&mut pet, &snap);
        assert_eq!(res.mood, Mood::Sad);
        assert_eq!(res.reason.to_string(), "behind remote by 6 commits");
        assert_eq!(pet.happiness, 35);
    }

    #[test]
    fn behind_penalty_floors_at_zero() {
        let mut pet = fresh_pet();
        pet.happiness = 4;
        let mut snap = repo();
        snap.behind_count = 50;
        resolve(&mut pet, &snap);
        assert_eq!(pet.happiness, 0);
    }

    #[test]
    fn behind_at_threshold_does_not_fire() {
        let mut pet = fresh_pet();
        let mut snap = repo();
        snap.behind_count = 5;
        assert_eq!(resolve(&mut pet, &snap).mood, Mood::Neutral);
        assert_eq!(pet.happiness, 50);
    }

    #[test]
    fn ahead_of_remote_is_thinking() {
        let mut pet = fresh_pet();
        let mut snap = repo();
        snap.ahead_count = 11;
        let res = resolve(&mut pet, &snap);
        assert_eq!(res.mood, Mood::Thinking);
        assert_eq!(res.reason.to_string(), "ahead of remote by 11 commits");
    }

    #[test]
    fn fresh_uncommitted_changes_are_thinking() {
        let mut pet = fresh_pet();
        pet.last_commit_timestamp = Some(now() - Duration::minutes(20));
        let mut snap = repo();
        snap.has_uncommitted_changes = true;
        snap.last_commit_timestamp = pet.last_commit_timestamp;
        let res = resolve(&mut pet, &snap);
        assert_eq!(res.mood, Mood::Thinking);
        assert_eq!(res.reason, MoodReason::UncommittedChanges);
    }

    #[test]
    fn old_uncommitted_changes_are_stressful() {
        let mut pet = fresh_pet();
        pet.last_commit_timestamp = Some(now() - Duration::hours(3));
        let mut snap = repo();
        snap.has_uncommitted_changes = true;
        snap.last_commit_timestamp = pet.last_commit_timestamp;
        let res = resolve(&mut pet, &snap);
        assert_eq!(res.mood, Mood::Stressed);
        assert_eq!(res.reason, MoodReason::OldUncommittedChanges);
    }

    #[test]
    fn uncommitted_changes_in_empty_repo_are_thinking() {
        let mut pet = fresh_pet();
        let mut snap = repo();
        snap.has_uncommitted_changes = true;
        assert_eq!(resolve(&mut pet, &snap).reason, MoodReason::UncommittedChanges);
    }

    #[test]
    fn hungry_pet_is_sad() {
        let mut pet = fresh_pet();
        pet.hunger = 10;
        let res = resolve(&mut pet, &repo());
        assert_eq!(res.mood, Mood::Sad);
        assert_eq!(res.reason, MoodReason::Hungry);
    }

    #[test]
    fn unhappy_pet_is_bored() {
        let mut pet = fresh_pet();
        pet.happiness = 20;
        let res = resolve(&mut pet, &repo());
        assert_eq!(res.mood, Mood::Bored);
        assert_eq!(res.reason, MoodReason::LowHappiness);
    }

    #[test]
    fn three_old_branches_are_boring() {
        let mut pet = fresh_pet();
        let mut snap = repo();
        snap.branches = vec![
            branch("main", 100),
            branch("feature/a", 30),
            branch("feature/b", 20),
            branch("feature/c", 15),
            branch("feature/d", 3),
        ];
        let res = resolve(&mut pet, &snap);
        assert_eq!(res.mood, Mood::Bored);
        assert_eq!(res.reason.to_string(), "3 old branches detected");
    }

    #[test]
    fn current_and_trunk_branches_are_never_old() {
        let mut snap = repo();
        snap.current_branch = "feature/a".to_owned();
        snap.branches = vec![
            branch("main", 100),
            branch("master", 100),
            branch("develop", 100),
            branch("feature/a", 30),
            branch("feature/b", 30),
        ];
        let old = old_branches(&snap, now(), &MoodConfig::default());
        let names: Vec<&str> = old.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["feature/b"]);
    }

    #[test]
    fn stale_last_commit_is_boring() {
        let mut pet = fresh_pet();
        pet.last_commit_timestamp = Some(now() - Duration::hours(7));
        let mut snap = repo();
        snap.last_commit_timestamp = pet.last_commit_timestamp;
        let res = resolve(&mut pet, &snap);
        assert_eq!(res.mood, Mood::Bored);
        assert_eq!(res.reason, MoodReason::NoRecentCommit);
    }

    #[test]
    fn neglected_play_is_boring() {
        let mut pet = fresh_pet();
        pet.last_played = Some(now() - Duration::hours(10));
        let res = resolve(&mut pet, &repo());
        assert_eq!(res.mood, Mood::Bored);
        assert_eq!(res.reason, MoodReason::NotPlayedRecently);
    }

    #[test]
    fn new_commit_boosts_and_makes_happy() {
        let mut pet = fresh_pet();
        let mut snap = repo();
        snap.last_commit_timestamp = Some(now() - Duration::minutes(1));
        let res = resolve(&mut pet, &snap);
        assert!(res.commit_boost);
        assert_eq!(res.mood, Mood::Happy);
        assert_eq!(res.reason, MoodReason::NewCommit);
        assert_eq!(pet.happiness, 75);
        assert_eq!(pet.last_commit_timestamp, snap.last_commit_timestamp);

        // Seen now; no second boost.
        let again = resolve(&mut pet, &snap);
        assert!(!again.commit_boost);
        assert_eq!(pet.happiness, 75);
    }

    #[test]
    fn new_commit_while_stressed_is_recorded_without_boost() {
        let mut pet = fresh_pet();
        let mut snap = repo();
        snap.has_conflicts = true;
        snap.last_commit_timestamp = Some(now() - Duration::minutes(1));
        let res = resolve(&mut pet, &snap);
        assert!(!res.commit_boost);
        assert_eq!(res.mood, Mood::Stressed);
        assert_eq!(pet.happiness, 50);
        assert_eq!(pet.last_commit_timestamp, snap.last_commit_timestamp);
    }

    #[test]
    fn new_commit_overrides_thinking() {
        let mut pet = fresh_pet();
        let mut snap = repo();
        snap.has_uncommitted_changes = true;
        snap.last_commit_timestamp = Some(now() - Duration::minutes(5));
        let res = resolve(&mut pet, &snap);
        assert_eq!(res.mood, Mood::Happy);
        assert_eq!(res.reason, MoodReason::NewCommit);
    }

    #[test]
    fn needs_met_upgrades_neutral_to_happy() {
        let mut pet = fresh_pet();
        pet.happiness = 90;
        pet.hunger = 70;
        let res = resolve(&mut pet, &repo());
        assert_eq!(res.mood, Mood::Happy);
        assert_eq!(res.reason, MoodReason::NeedsMet);
    }

    #[test]
    fn needs_met_does_not_override_thinking() {
        let mut pet = fresh_pet();
        pet.happiness = 90;
        pet.hunger = 70;
        let mut snap = repo();
        snap.ahead_count = 20;
        assert_eq!(resolve(&mut pet, &snap).mood, Mood::Thinking);
    }

    #[test]
    fn commit_reason_beats_needs_met() {
        let mut pet = fresh_pet();
        pet.happiness = 90;
        pet.hunger = 70;
        let mut snap = repo();
        snap.last_commit_timestamp = Some(now() - Duration::minutes(2));
        let res = resolve(&mut pet, &snap);
        assert_eq!(res.reason, MoodReason::NewCommit);
        assert_eq!(pet.happiness, 100);
    }

    #[test]
    fn rule_table_order_is_stable() {
        let names: Vec<&str> = MOOD_RULES.iter().map(|r| r.name).collect();
        assert_eq!(
            names,
            vec![
                "merge_conflicts",
                "behind_remote",
                "ahead_of_remote",
                "uncommitted_changes",
                "hungry",
                "low_happiness",
                "old_branches",
                "no_recent_commit",
                "not_played_recently",
            ]
        );
    }

    #[test]
    fn evaluate_rules_reports_matching_rule() {
        let pet = fresh_pet();
        let mut snap = repo();
        snap.behind_count = 9;
        snap.ahead_count = 40;
        let config = MoodConfig::default();
        let ctx = RuleContext {
            pet: &pet,
            snapshot: &snap,
            now: now(),
            config: &config,
        };
        let matched = evaluate_rules(&ctx).map(|(name, _)| name);
        assert_eq!(matched, Some("behind_remote"));
    }

    #[test]
    fn decay_runs_before_rules() {
        let mut pet = fresh_pet();
        pet.last_fed = Some(now() - Duration::hours(8));
        pet.last_played = Some(now() - Duration::hours(8));
        pet.created_at = Some(now() - Duration::hours(8));
        pet.last_status_update = Some(now() - Duration::hours(8));
        // 50 - 8*5 = 10 -> hungry
        let res = resolve(&mut pet, &repo());
        assert_eq!(pet.hunger, 10);
        assert_eq!(res.reason, MoodReason::Hungry);
    }
}
