//! Experience, levels, and one-time achievements.
//!
//! Experience carries over on level-up: the requirement for the level just
//! left is subtracted, and the loop repeats while the remainder still
//! covers the next requirement. Achievements are permanent; an unlocked
//! key is never removed or re-timed.

use chrono::{DateTime, Utc};
use gitpet_types::PetRecord;
use tracing::{debug, info};

use crate::achievements::Achievement;
use crate::config::{LevelingConfig, PetTuning};
use crate::error::EngineError;
use crate::stats;

/// Experience needed to advance from `level` to `level + 1`.
///
/// `base + increment * (level - 1)`. Level 0 is treated as level 1.
/// A zero result means the curve is misconfigured; callers never level
/// on it.
pub fn exp_required_for_next_level(
    level: u32,
    config: &LevelingConfig,
) -> Result<u32, EngineError> {
    let steps = level.saturating_sub(1);
    config
        .exp_increment
        .checked_mul(steps)
        .and_then(|extra| extra.checked_add(config.base_exp))
        .ok_or_else(|| EngineError::ArithmeticOverflow {
            context: format!("experience requirement for level {level}"),
        })
}

/// Award experience, rolling over into as many levels as it covers.
///
/// Returns `true` if at least one level was gained. Each level gained
/// raises happiness and hunger. Reaching a level milestone unlocks the
/// matching achievement, whose bonus goes through this same function.
pub fn award_experience(
    pet: &mut PetRecord,
    amount: u32,
    reason: &str,
    now: DateTime<Utc>,
    tuning: &PetTuning,
) -> Result<bool, EngineError> {
    if amount == 0 {
        return Ok(false);
    }

    pet.experience = pet
        .experience
        .checked_add(amount)
        .ok_or_else(|| EngineError::ArithmeticOverflow {
            context: format!("experience overflow awarding {amount} for {reason}"),
        })?;
    debug!(amount, reason, experience = pet.experience, "experience awarded");

    let leveling = &tuning.leveling;
    let original_level = pet.level;
    loop {
        let required = exp_required_for_next_level(pet.level, leveling)?;
        // A zero requirement would level forever.
        if required == 0 || pet.experience < required {
            break;
        }
        // required <= experience, checked above
        pet.experience = pet.experience.saturating_sub(required);
        pet.level = pet
            .level
            .checked_add(1)
            .ok_or_else(|| EngineError::ArithmeticOverflow {
                context: String::from("level overflow"),
            })?;
        pet.happiness = stats::raise(pet.happiness, leveling.level_up_happiness_bonus);
        pet.hunger = stats::raise(pet.hunger, leveling.level_up_hunger_bonus);
        info!(level = pet.level, reason, "level up");
    }

    let leveled_up = pet.level > original_level;
    if leveled_up {
        for achievement in Achievement::ALL {
            if achievement
                .level_threshold()
                .is_some_and(|threshold| pet.level >= threshold)
            {
                unlock_achievement(pet, achievement, now, tuning)?;
            }
        }
    }
    Ok(leveled_up)
}

/// Unlock an achievement once, awarding its configured bonus.
///
/// Returns `false` without touching the pet if it is already unlocked.
pub fn unlock_achievement(
    pet: &mut PetRecord,
    achievement: Achievement,
    now: DateTime<Utc>,
    tuning: &PetTuning,
) -> Result<bool, EngineError> {
    let key = achievement.key();
    if pet.has_achievement(key) {
        return Ok(false);
    }
    pet.achievements.insert(key.to_owned(), now);
    info!(
        achievement = key,
        description = achievement.description(),
        "achievement unlocked"
    );

    let bonus = tuning.rewards.bonus_for(achievement);
    award_experience(pet, bonus, key, now, tuning)?;
    Ok(true)
}

/// Restore `experience < exp_required_for_next_level(level)` on a record
/// read from disk.
///
/// Surplus experience is rolled into levels without the level-up stat
/// bonuses or milestone achievements; those belong to live awards only.
/// Returns the number of levels applied.
pub fn normalize_experience(
    pet: &mut PetRecord,
    config: &LevelingConfig,
) -> Result<u32, EngineError> {
    if pet.level == 0 {
        pet.level = 1;
    }
    let mut gained = 0_u32;
    loop {
        let required = exp_required_for_next_level(pet.level, config)?;
        if required == 0 || pet.experience < required {
            break;
        }
        pet.experience = pet.experience.saturating_sub(required);
        pet.level = pet.level.saturating_add(1);
        gained = gained.saturating_add(1);
    }
    if gained > 0 {
        debug!(levels = gained, level = pet.level, "normalized stored experience");
    }
    Ok(gained)
}

/// Total experience earned to reach the pet's current state.
pub fn lifetime_experience(pet: &PetRecord, config: &LevelingConfig) -> Result<u64, EngineError> {
    let mut total = u64::from(pet.experience);
    for level in 1..pet.level {
        let required = exp_required_for_next_level(level, config)?;
        total = total.saturating_add(u64::from(required));
    }
    Ok(total)
}
