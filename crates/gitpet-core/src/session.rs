//! One invocation's worth of work: load, mutate, save.
//!
//! [`PetSession`] owns the state store, the repository inspector, and the
//! engine tunables. Each operation loads the state fresh, applies the
//! engine, and saves the whole state back. Failing to save is logged and
//! reported, never fatal; the next invocation recomputes decay from the
//! timestamps still on disk.

use chrono::{DateTime, Utc};
use gitpet_engine::progression::exp_required_for_next_level;
use gitpet_engine::{
    EventReport, GitEvent, PetTuning, apply_event, interactions, normalize_experience,
    old_branches, resolve_mood,
};
use gitpet_git::RepositoryInspector;
use gitpet_store::{LoadOrigin, StateStore};
use gitpet_types::PetState;
use tracing::{debug, info, warn};

use crate::error::CoreError;
use crate::report::{
    AchievementsReport, CareReport, ConfigListing, StatusReport, SummaryReport,
};

/// The only option `config get/set` understands.
pub const CHECK_REMOTE_STATUS: &str = "checkRemoteStatus";

/// Every recognized config key.
pub const CONFIG_KEYS: [&str; 1] = [CHECK_REMOTE_STATUS];

/// Load/mutate/save orchestration over a store and an inspector.
#[derive(Debug)]
pub struct PetSession<S, I> {
    store: S,
    inspector: I,
    tuning: PetTuning,
}

impl<S: StateStore, I: RepositoryInspector> PetSession<S, I> {
    /// Create a session.
    pub const fn new(store: S, inspector: I, tuning: PetTuning) -> Self {
        Self {
            store,
            inspector,
            tuning,
        }
    }

    /// The underlying store.
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// The engine tunables in use.
    pub const fn tuning(&self) -> &PetTuning {
        &self.tuning
    }

    fn load(&mut self, now: DateTime<Utc>) -> Result<PetState, CoreError> {
        let loaded = self.store.load(now);
        match &loaded.origin {
            LoadOrigin::Fresh => info!("a new pet has hatched"),
            LoadOrigin::Stored { repairs } if !repairs.is_empty() => {
                warn!(count = repairs.len(), "some stored fields were reset to defaults");
            }
            LoadOrigin::Stored { .. } => {}
            LoadOrigin::Recovered { reason } => {
                warn!(reason = %reason, "stored state unusable, starting from defaults");
            }
        }
        let mut state = loaded.state;
        normalize_experience(&mut state.global_pet, &self.tuning.leveling)?;
        Ok(state)
    }

    fn persist(&mut self, state: &PetState) -> bool {
        match self.store.save(state) {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "state not saved this run");
                false
            }
        }
    }

    /// Decay, inspect the repository, resolve the mood, and save.
    pub async fn status(&mut self, now: DateTime<Utc>) -> Result<StatusReport, CoreError> {
        let mut state = self.load(now)?;
        let check_remote = state.config.check_remote_status;
        let snapshot = self.inspector.snapshot(check_remote).await;
        let resolution = resolve_mood(&mut state.global_pet, &snapshot, now, &self.tuning);
        let saved = self.persist(&state);
        Ok(StatusReport {
            pet: state.global_pet,
            resolution,
            snapshot,
            check_remote,
            saved,
        })
    }

    /// A status plus level progress and repository detail.
    pub async fn summary(&mut self, now: DateTime<Utc>) -> Result<SummaryReport, CoreError> {
        let status = self.status(now).await?;
        let exp_required = exp_required_for_next_level(status.pet.level, &self.tuning.leveling)?;
        let stale = old_branches(&status.snapshot, now, &self.tuning.mood);
        let old_branch_total = stale.len();
        let old_branches = stale
            .iter()
            .take(SummaryReport::OLD_BRANCH_LIMIT)
            .map(|b| b.name.clone())
            .collect();
        Ok(SummaryReport {
            status,
            exp_required,
            old_branches,
            old_branch_total,
        })
    }

    /// Feed the pet and save.
    pub fn feed(&mut self, now: DateTime<Utc>) -> Result<CareReport, CoreError> {
        let mut state = self.load(now)?;
        interactions::feed(&mut state.global_pet, now, &self.tuning);
        let saved = self.persist(&state);
        Ok(CareReport {
            pet: state.global_pet,
            saved,
        })
    }

    /// Play with the pet and save.
    pub fn play(&mut self, now: DateTime<Utc>) -> Result<CareReport, CoreError> {
        let mut state = self.load(now)?;
        interactions::play(&mut state.global_pet, now, &self.tuning);
        let saved = self.persist(&state);
        Ok(CareReport {
            pet: state.global_pet,
            saved,
        })
    }

    /// Rename the pet. An invalid name is rejected and nothing is saved.
    pub fn rename(&mut self, name: &str, now: DateTime<Utc>) -> Result<CareReport, CoreError> {
        let mut state = self.load(now)?;
        interactions::rename(&mut state.global_pet, name)?;
        let saved = self.persist(&state);
        Ok(CareReport {
            pet: state.global_pet,
            saved,
        })
    }

    /// The achievement catalog with unlock times. Read-only.
    pub fn achievements(&mut self, now: DateTime<Utc>) -> Result<AchievementsReport, CoreError> {
        let state = self.load(now)?;
        let rewards = &self.tuning.rewards;
        Ok(AchievementsReport::build(&state.global_pet, |a| {
            rewards.bonus_for(a)
        }))
    }

    /// Read one option.
    pub fn config_get(&mut self, key: &str, now: DateTime<Utc>) -> Result<bool, CoreError> {
        check_config_key(key)?;
        Ok(self.load(now)?.config.check_remote_status)
    }

    /// Set one option from its textual value and save.
    ///
    /// Returns the stored value and whether it reached storage. Unknown
    /// keys and non-boolean values are rejected without saving.
    pub fn config_set(
        &mut self,
        key: &str,
        value: &str,
        now: DateTime<Utc>,
    ) -> Result<(bool, bool), CoreError> {
        check_config_key(key)?;
        let flag = parse_bool(value).ok_or_else(|| CoreError::InvalidConfigValue {
            key: key.to_owned(),
            value: value.to_owned(),
        })?;
        let mut state = self.load(now)?;
        state.config.check_remote_status = flag;
        info!(key, value = flag, "config updated");
        let saved = self.persist(&state);
        Ok((flag, saved))
    }

    /// Every option with its current value.
    pub fn config_list(&mut self, now: DateTime<Utc>) -> Result<ConfigListing, CoreError> {
        let config = self.load(now)?.config;
        let mut listing = ConfigListing::new();
        listing.insert(
            CHECK_REMOTE_STATUS.to_owned(),
            config.check_remote_status.to_string(),
        );
        for (key, value) in config.extra {
            listing.insert(key, value.to_string());
        }
        Ok(listing)
    }

    /// React to a hook event. Unknown or unrewarded events change nothing
    /// and are not saved.
    pub fn process_event<A: AsRef<str>>(
        &mut self,
        name: &str,
        args: &[A],
        now: DateTime<Utc>,
    ) -> Result<EventReport, CoreError> {
        let event = GitEvent::parse(name, args);
        let mut state = self.load(now)?;
        let report = apply_event(&mut state.global_pet, &event, now, &self.tuning)?;
        if report.rewarded {
            if !self.persist(&state) {
                warn!(event = name, "event reward lost, state not saved");
            }
        } else {
            debug!(event = name, "nothing to save");
        }
        Ok(report)
    }
}

fn check_config_key(key: &str) -> Result<(), CoreError> {
    if CONFIG_KEYS.contains(&key) {
        Ok(())
    } else {
        Err(CoreError::UnknownConfigKey {
            key: key.to_owned(),
            known: CONFIG_KEYS.join(", "),
        })
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    let value = value.trim();
    if value.eq_ignore_ascii_case("true") {
        Some(true)
    } else if value.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}
