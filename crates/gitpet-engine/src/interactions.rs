//! Direct care: feeding, playing, and naming the pet.

use chrono::{DateTime, Utc};
use gitpet_types::{MAX_NAME_LEN, PetRecord};
use tracing::debug;

use crate::config::PetTuning;
use crate::decay::apply_decay;
use crate::error::EngineError;
use crate::stats;

/// Feed the pet. Outstanding decay is charged first.
pub fn feed(pet: &mut PetRecord, now: DateTime<Utc>, tuning: &PetTuning) {
    apply_decay(pet, now, &tuning.decay);
    let gains = &tuning.interactions;
    pet.hunger = stats::raise(pet.hunger, gains.feed_hunger_gain);
    pet.happiness = stats::raise(pet.happiness, gains.feed_happiness_gain);
    pet.last_fed = Some(now);
    debug!(hunger = pet.hunger, happiness = pet.happiness, "fed");
}

/// Play with the pet. Outstanding decay is charged first.
pub fn play(pet: &mut PetRecord, now: DateTime<Utc>, tuning: &PetTuning) {
    apply_decay(pet, now, &tuning.decay);
    let gains = &tuning.interactions;
    pet.happiness = stats::raise(pet.happiness, gains.play_happiness_gain);
    pet.hunger = stats::lower(pet.hunger, gains.play_hunger_cost);
    pet.last_played = Some(now);
    debug!(hunger = pet.hunger, happiness = pet.happiness, "played");
}

/// Rename the pet. Surrounding whitespace is trimmed.
///
/// On error the pet is left unchanged.
pub fn rename(pet: &mut PetRecord, name: &str) -> Result<(), EngineError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(EngineError::InvalidName {
            reason: String::from("name cannot be empty"),
        });
    }
    let len = trimmed.chars().count();
    if len > MAX_NAME_LEN {
        return Err(EngineError::InvalidName {
            reason: format!("{len} characters, at most {MAX_NAME_LEN} allowed"),
        });
    }
    debug!(from = %pet.name, to = trimmed, "renamed");
    trimmed.clone_into(&mut pet.name);
    Ok(())
}
