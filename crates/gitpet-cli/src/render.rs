//! Plain-text rendering of session reports.
//!
//! Every function writes to the given sink so output can be captured in
//! tests; `main` passes a locked stdout.

use std::io::{self, Write};

use chrono::{DateTime, Utc};
use gitpet_core::{
    AchievementsReport, CareReport, ConfigListing, StatusReport, SummaryReport,
};
use gitpet_engine::EventReport;
use gitpet_types::{MAX_STAT, PetRecord};

/// Mood line plus the two stats.
pub fn status(out: &mut impl Write, report: &StatusReport) -> io::Result<()> {
    let pet = &report.pet;
    writeln!(
        out,
        "{} is {} ({})",
        pet.name, report.resolution.mood, report.resolution.reason
    )?;
    stats(out, pet)?;
    writeln!(out, "  Level:     {}", pet.level)?;
    unsaved(out, report.saved)
}

/// Full picture: stats, progress, activity, and repository facts.
pub fn summary(out: &mut impl Write, report: &SummaryReport, now: DateTime<Utc>) -> io::Result<()> {
    let status = &report.status;
    let pet = &status.pet;
    let snapshot = &status.snapshot;

    writeln!(out, "{} ({})", pet.name, status.resolution.mood)?;
    writeln!(out, "  Reason:    {}", status.resolution.reason)?;
    stats(out, pet)?;
    writeln!(
        out,
        "  Level:     {} ({}/{} exp)",
        pet.level, pet.experience, report.exp_required
    )?;
    writeln!(out, "  Unlocked:  {} achievements", pet.achievements.len())?;

    writeln!(out, "Activity")?;
    writeln!(out, "  Fed:       {}", ago(pet.last_fed, now))?;
    writeln!(out, "  Played:    {}", ago(pet.last_played, now))?;
    writeln!(out, "  Commit:    {}", ago(pet.last_commit_timestamp, now))?;
    writeln!(out, "  Hatched:   {}", ago(pet.created_at, now))?;

    writeln!(out, "Repository")?;
    if !snapshot.is_git_repo {
        writeln!(
            out,
            "  {}",
            snapshot.error.as_deref().unwrap_or("not a git repository")
        )?;
        return unsaved(out, status.saved);
    }
    writeln!(
        out,
        "  Root:      {}",
        snapshot.repo_root_dir.as_deref().unwrap_or("unknown")
    )?;
    writeln!(out, "  Branch:    {}", snapshot.current_branch)?;
    writeln!(out, "  Changes:   {}", yes_no(snapshot.has_uncommitted_changes))?;
    writeln!(out, "  Conflicts: {}", yes_no(snapshot.has_conflicts))?;
    if status.check_remote {
        writeln!(
            out,
            "  Remote:    {} ahead, {} behind",
            snapshot.ahead_count, snapshot.behind_count
        )?;
    } else {
        writeln!(out, "  Remote:    not checked (git-pet config set checkRemoteStatus true)")?;
    }
    if report.old_branch_total > 0 {
        writeln!(out, "  Old branches: {}", report.old_branches.join(", "))?;
        let listed = report.old_branches.len();
        if report.old_branch_total > listed {
            writeln!(out, "    and {} more", report.old_branch_total.saturating_sub(listed))?;
        }
    }
    if let Some(error) = &snapshot.error {
        writeln!(out, "  Warning:   {error}")?;
    }
    unsaved(out, status.saved)
}

/// Result of `feed`.
pub fn fed(out: &mut impl Write, report: &CareReport) -> io::Result<()> {
    writeln!(out, "You fed {}. Yum!", report.pet.name)?;
    stats(out, &report.pet)?;
    unsaved(out, report.saved)
}

/// Result of `play`.
pub fn played(out: &mut impl Write, report: &CareReport) -> io::Result<()> {
    writeln!(out, "You played with {}.", report.pet.name)?;
    stats(out, &report.pet)?;
    unsaved(out, report.saved)
}

/// Result of `name`.
pub fn renamed(out: &mut impl Write, report: &CareReport) -> io::Result<()> {
    writeln!(out, "Your pet is now called {}.", report.pet.name)?;
    unsaved(out, report.saved)
}

/// Unlocked achievements first (oldest first), then the locked ones.
pub fn achievements(out: &mut impl Write, report: &AchievementsReport) -> io::Result<()> {
    let unlocked = report.unlocked();
    writeln!(
        out,
        "{}'s achievements ({} unlocked)",
        report.pet_name,
        unlocked.len()
    )?;
    for entry in &unlocked {
        let when = entry
            .unlocked_at
            .map(|at| at.format("%Y-%m-%d %H:%M UTC").to_string())
            .unwrap_or_default();
        writeln!(out, "  [x] {} (+{} exp, {when})", entry.name, entry.bonus)?;
        if !entry.description.is_empty() {
            writeln!(out, "      {}", entry.description)?;
        }
    }
    for entry in report.locked() {
        writeln!(out, "  [ ] {} (+{} exp)", entry.name, entry.bonus)?;
        writeln!(out, "      {}", entry.description)?;
    }
    Ok(())
}

/// One option and its value.
pub fn config_value(out: &mut impl Write, key: &str, value: bool) -> io::Result<()> {
    writeln!(out, "{key} = {value}")
}

/// Result of `config set`.
pub fn config_set(out: &mut impl Write, key: &str, value: bool, saved: bool) -> io::Result<()> {
    writeln!(out, "{key} set to {value}")?;
    unsaved(out, saved)
}

/// Every option.
pub fn config_list(out: &mut impl Write, listing: &ConfigListing) -> io::Result<()> {
    for (key, value) in listing {
        writeln!(out, "{key} = {value}")?;
    }
    Ok(())
}

/// What a hook event earned. Silent when it earned nothing so hooks stay
/// quiet.
pub fn event(out: &mut impl Write, report: &EventReport) -> io::Result<()> {
    if !report.rewarded {
        return Ok(());
    }
    writeln!(out, "git-pet: +{} exp", report.experience_gained)?;
    if report.levels_gained > 0 {
        writeln!(out, "Level up! +{} level(s)", report.levels_gained)?;
    }
    for achievement in &report.unlocked {
        writeln!(out, "Achievement unlocked: {}", achievement.name())?;
    }
    Ok(())
}

fn stats(out: &mut impl Write, pet: &PetRecord) -> io::Result<()> {
    writeln!(out, "  Hunger:    {}/{MAX_STAT}", pet.hunger)?;
    writeln!(out, "  Happiness: {}/{MAX_STAT}", pet.happiness)
}

fn unsaved(out: &mut impl Write, saved: bool) -> io::Result<()> {
    if saved {
        Ok(())
    } else {
        writeln!(out, "(changes could not be saved; run with --verbose for details)")
    }
}

const fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}

/// Coarse "how long ago" text.
fn ago(then: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    let Some(then) = then else {
        return String::from("never");
    };
    let elapsed = now.signed_duration_since(then);
    if elapsed.num_minutes() < 1 {
        String::from("just now")
    } else if elapsed.num_hours() < 1 {
        format!("{}m ago", elapsed.num_minutes())
    } else if elapsed.num_days() < 1 {
        format!("{}h ago", elapsed.num_hours())
    } else {
        format!("{}d ago", elapsed.num_days())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::arithmetic_side_effects)]
mod tests {
    use chrono::{Duration, TimeZone};
    use gitpet_engine::{Achievement, MoodReason, MoodResolution};
    use gitpet_types::{Mood, RepositorySnapshot};
    use pretty_assertions::assert_eq;

    use super::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 9, 3, 14, 0, 0).unwrap()
    }

    fn text(render: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut buf = Vec::new();
        render(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    fn status_report(snapshot: RepositorySnapshot) -> StatusReport {
        StatusReport {
            pet: PetRecord::new(now()),
            resolution: MoodResolution {
                mood: Mood::Neutral,
                reason: MoodReason::Default,
                rule: None,
                commit_boost: false,
            },
            snapshot,
            check_remote: false,
            saved: true,
        }
    }

    #[test]
    fn ago_is_coarse() {
        assert_eq!(ago(None, now()), "never");
        assert_eq!(ago(Some(now()), now()), "just now");
        assert_eq!(ago(Some(now() - Duration::minutes(42)), now()), "42m ago");
        assert_eq!(ago(Some(now() - Duration::hours(5)), now()), "5h ago");
        assert_eq!(ago(Some(now() - Duration::days(3)), now()), "3d ago");
    }

    #[test]
    fn status_names_mood_and_reason() {
        let report = status_report(RepositorySnapshot::clean("/work/repo"));
        let out = text(|buf| status(buf, &report));
        assert!(out.starts_with("Git Pet is neutral (default)\n"));
        assert!(out.contains("Hunger:    50/100"));
        assert!(!out.contains("could not be saved"));
    }

    #[test]
    fn summary_truncates_old_branches() {
        let report = SummaryReport {
            status: status_report(RepositorySnapshot::clean("/work/repo")),
            exp_required: 100,
            old_branches: vec!["a".to_owned(), "b".to_owned()],
            old_branch_total: 4,
        };
        let out = text(|buf| summary(buf, &report, now()));
        assert!(out.contains("Level:     1 (0/100 exp)"));
        assert!(out.contains("Old branches: a, b\n    and 2 more"));
        assert!(out.contains("Remote:    not checked"));
    }

    #[test]
    fn summary_outside_a_repository() {
        let mut report = SummaryReport {
            status: status_report(RepositorySnapshot::not_a_repository(
                "not currently in a git repository",
            )),
            exp_required: 100,
            old_branches: Vec::new(),
            old_branch_total: 0,
        };
        report.status.saved = false;
        let out = text(|buf| summary(buf, &report, now()));
        assert!(out.contains("Repository\n  not currently in a git repository\n"));
        assert!(!out.contains("Branch:"));
        assert!(out.contains("could not be saved"));
    }

    #[test]
    fn quiet_for_unrewarded_events() {
        let out = text(|buf| event(buf, &EventReport::default()));
        assert_eq!(out, "");
    }

    #[test]
    fn rewarded_event_lists_unlocks() {
        let report = EventReport {
            rewarded: true,
            experience_gained: 30,
            levels_gained: 0,
            unlocked: vec![Achievement::FirstCommit],
        };
        let out = text(|buf| event(buf, &report));
        assert_eq!(
            out,
            format!(
                "git-pet: +30 exp\nAchievement unlocked: {}\n",
                Achievement::FirstCommit.name()
            )
        );
    }
}
