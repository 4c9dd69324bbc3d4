//! Time-based decay of hunger and happiness.
//!
//! Decay is measured from the latest of the pet's interaction timestamps
//! (`lastFed`, `lastPlayed`, `createdAt`) and the last time decay was
//! charged (`lastStatusUpdate`). Charging decay advances
//! `lastStatusUpdate`, so the same interval is never charged twice:
//! calling [`apply_decay`] again with the same `now` is a no-op.
//!
//! # Order of operations
//!
//! 1. Pick the reference point; skip entirely if there is none
//! 2. Compute fractional elapsed hours
//! 3. Skip if below `min_elapsed_hours`
//! 4. Subtract `elapsed * rate` from hunger and happiness
//! 5. Round and clamp both to 0--100
//! 6. Advance `lastStatusUpdate` to `now`

use chrono::{DateTime, Utc};
use gitpet_types::PetRecord;
use tracing::debug;

use crate::clock::{hours_between, latest_timestamp};
use crate::config::DecayConfig;
use crate::stats::clamp_round;

/// What a call to [`apply_decay`] did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecayResult {
    /// Hours since the reference point, if one existed.
    pub elapsed_hours: Option<f64>,
    /// Whether the stats were charged.
    pub applied: bool,
}

impl DecayResult {
    const fn skipped(elapsed_hours: Option<f64>) -> Self {
        Self {
            elapsed_hours,
            applied: false,
        }
    }
}

/// The moment decay is measured from.
///
/// `lastStatusUpdate` joins the interaction timestamps so an interval
/// already charged is never charged again.
pub fn decay_reference(pet: &PetRecord) -> Option<DateTime<Utc>> {
    latest_timestamp([
        pet.last_fed,
        pet.last_played,
        pet.created_at,
        pet.last_status_update,
    ])
}

/// Charge hunger and happiness for the time elapsed up to `now`.
///
/// Never raises either stat. Missing reference timestamps are not an
/// error: the pet simply does not decay.
pub fn apply_decay(pet: &mut PetRecord, now: DateTime<Utc>, config: &DecayConfig) -> DecayResult {
    let Some(reference) = decay_reference(pet) else {
        debug!("no reference timestamp, skipping decay");
        return DecayResult::skipped(None);
    };

    let elapsed = hours_between(reference, now);
    if elapsed <= config.min_elapsed_hours {
        return DecayResult::skipped(Some(elapsed));
    }

    let hunger = f64::from(pet.hunger) - elapsed * config.hunger_per_hour.max(0.0);
    let happiness = f64::from(pet.happiness) - elapsed * config.boredom_per_hour.max(0.0);

    let before = (pet.hunger, pet.happiness);
    pet.hunger = clamp_round(hunger).min(pet.hunger);
    pet.happiness = clamp_round(happiness).min(pet.happiness);
    pet.last_status_update = Some(now);

    debug!(
        elapsed_hours = elapsed,
        hunger_before = before.0,
        hunger = pet.hunger,
        happiness_before = before.1,
        happiness = pet.happiness,
        "decay applied"
    );

    DecayResult {
        elapsed_hours: Some(elapsed),
        applied: true,
    }
}
