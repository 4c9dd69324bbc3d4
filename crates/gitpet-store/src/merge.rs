//! Overlay a stored JSON document onto a fresh default state.
//!
//! Stored fields win field by field; anything missing keeps its default,
//! so records written by older versions load cleanly. A field that is
//! present but unusable falls back to its default on its own and is
//! reported as a repair. Unknown fields are preserved.

use chrono::{DateTime, Utc};
use gitpet_types::{MAX_NAME_LEN, MAX_STAT, Mood, PetConfig, PetRecord, PetState};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::error::StoreError;

/// A state rebuilt from a stored document.
#[derive(Debug, Clone, PartialEq)]
pub struct MergedState {
    /// The merged state.
    pub state: PetState,
    /// One entry per field that fell back to its default.
    pub repairs: Vec<String>,
}

/// Rebuild a [`PetState`] from a parsed state document.
///
/// Fails only if the document is not a JSON object at all.
pub fn merge_state(raw: Value, now: DateTime<Utc>) -> Result<MergedState, StoreError> {
    let mut root = match raw {
        Value::Object(map) => map,
        other => {
            return Err(StoreError::Malformed(format!(
                "expected an object, found {}",
                describe(&other)
            )));
        }
    };

    let mut state = PetState::new(now);
    let mut repairs = Vec::new();

    let mut pet_fields = match root.remove("globalPet") {
        Some(Value::Object(map)) => {
            // A stored pet without this field has never had decay charged
            // by a version that tracks it; measure from its interactions.
            state.global_pet.last_status_update = None;
            map
        }
        Some(other) => {
            repairs.push(format!("globalPet: expected object, found {}", describe(&other)));
            Map::new()
        }
        None => Map::new(),
    };

    // Older files kept the options inside the pet.
    if let Some(legacy) = pet_fields.remove("config") {
        if root.contains_key("config") {
            debug!("dropping legacy globalPet.config shadowed by top-level config");
        } else {
            debug!("migrating legacy globalPet.config to top-level config");
            root.insert(String::from("config"), legacy);
        }
    }

    for (key, value) in pet_fields {
        overlay_pet_field(&mut state.global_pet, key, value, &mut repairs);
    }

    match root.remove("config") {
        Some(Value::Object(map)) => overlay_config(&mut state.config, map, &mut repairs),
        Some(other) => repairs.push(format!("config: expected object, found {}", describe(&other))),
        None => {}
    }

    state.extra.extend(root);

    for repair in &repairs {
        warn!(repair = %repair, "state field reset to default");
    }
    Ok(MergedState { state, repairs })
}

fn overlay_pet_field(pet: &mut PetRecord, key: String, value: Value, repairs: &mut Vec<String>) {
    match key.as_str() {
        "name" => match value.as_str().map(str::trim) {
            Some(name) if !name.is_empty() && name.chars().count() <= MAX_NAME_LEN => {
                name.clone_into(&mut pet.name);
            }
            _ => reject(repairs, &key, "not a usable name"),
        },
        "mood" => {
            let found = describe(&value);
            match serde_json::from_value::<Mood>(value) {
                Ok(mood) => pet.mood = mood,
                Err(_) => reject(repairs, &key, &format!("unknown mood ({found})")),
            }
        }
        "hunger" | "happiness" => {
            match coerce_integer(&value, 0, u32::from(MAX_STAT)).and_then(|n| u8::try_from(n).ok()) {
                Some(stat) if key == "hunger" => pet.hunger = stat,
                Some(stat) => pet.happiness = stat,
                None => reject(repairs, &key, "not a number"),
            }
        }
        "level" => match coerce_integer(&value, 1, u32::MAX) {
            Some(level) => pet.level = level,
            None => reject(repairs, &key, "not a number"),
        },
        "experience" => match coerce_integer(&value, 0, u32::MAX) {
            Some(exp) => pet.experience = exp,
            None => reject(repairs, &key, "not a number"),
        },
        "animationFrame" => match coerce_integer(&value, 0, u32::MAX) {
            Some(frame) => pet.animation_frame = frame,
            None => reject(repairs, &key, "not a number"),
        },
        "repoRootDir" => match value {
            Value::Null => pet.repo_root_dir = None,
            Value::String(dir) => pet.repo_root_dir = Some(dir),
            other => reject(repairs, &key, &format!("expected string, found {}", describe(&other))),
        },
        "achievements" => pet.achievements = sanitize_achievements(value, repairs),
        _ => {
            if let Some(slot) = timestamp_slot(pet, &key) {
                match parse_timestamp(&value) {
                    Some(ts) => *slot = ts,
                    None => reject(repairs, &key, "not a timestamp"),
                }
            } else {
                pet.extra.insert(key, value);
            }
        }
    }
}

fn reject(repairs: &mut Vec<String>, key: &str, what: &str) {
    repairs.push(format!("globalPet.{key}: {what}"));
}

fn timestamp_slot<'p>(pet: &'p mut PetRecord, key: &str) -> Option<&'p mut Option<DateTime<Utc>>> {
    match key {
        "lastFed" => Some(&mut pet.last_fed),
        "lastPlayed" => Some(&mut pet.last_played),
        "lastCommitTimestamp" => Some(&mut pet.last_commit_timestamp),
        "createdAt" => Some(&mut pet.created_at),
        "lastStatusUpdate" => Some(&mut pet.last_status_update),
        _ => None,
    }
}

fn overlay_config(config: &mut PetConfig, fields: Map<String, Value>, repairs: &mut Vec<String>) {
    for (key, value) in fields {
        if key == "checkRemoteStatus" {
            match coerce_bool(&value) {
                Some(flag) => config.check_remote_status = flag,
                None => repairs.push(format!("config.{key}: not a boolean")),
            }
        } else {
            config.extra.insert(key, value);
        }
    }
}

/// Keep the achievement entries that carry a valid unlock time.
fn sanitize_achievements(
    value: Value,
    repairs: &mut Vec<String>,
) -> std::collections::BTreeMap<String, DateTime<Utc>> {
    let Value::Object(entries) = value else {
        repairs.push(String::from("globalPet.achievements: not a mapping"));
        return std::collections::BTreeMap::new();
    };
    entries
        .into_iter()
        .filter_map(|(key, unlocked)| match parse_timestamp(&unlocked) {
            Some(Some(ts)) => Some((key, ts)),
            _ => {
                repairs.push(format!("globalPet.achievements.{key}: dropped, bad unlock time"));
                None
            }
        })
        .collect()
}

/// `Some(None)` for JSON null, `Some(Some(ts))` for an RFC 3339 string,
/// `None` for anything else.
#[allow(clippy::option_option)]
fn parse_timestamp(value: &Value) -> Option<Option<DateTime<Utc>>> {
    match value {
        Value::Null => Some(None),
        Value::String(text) => DateTime::parse_from_rfc3339(text.trim())
            .ok()
            .map(|ts| Some(ts.with_timezone(&Utc))),
        _ => None,
    }
}

/// Accept JSON integers, floats, and numeric strings; round and clamp into
/// `min..=max`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn coerce_integer(value: &Value, min: u32, max: u32) -> Option<u32> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    if !number.is_finite() {
        return None;
    }
    let clamped = number.round().clamp(f64::from(min), f64::from(max));
    // Within u32 range after the clamp.
    Some(clamped as u32)
}

fn coerce_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(flag) => Some(*flag),
        Value::String(s) if s.eq_ignore_ascii_case("true") => Some(true),
        Value::String(s) if s.eq_ignore_ascii_case("false") => Some(false),
        _ => None,
    }
}

const fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
#[allow(clippy::indexing_slicing)]
mod tests {
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 7, 4, 9, 30, 0).single().unwrap_or_default()
    }

    fn merge(raw: Value) -> MergedState {
        merge_state(raw, now()).unwrap_or_else(|_| MergedState {
            state: PetState::new(now()),
            repairs: vec![String::from("merge failed")],
        })
    }

    #[test]
    fn empty_object_yields_defaults() {
        let merged = merge(json!({}));
        assert_eq!(merged.state, PetState::new(now()));
        assert!(merged.repairs.is_empty());
    }

    #[test]
    fn non_object_is_malformed() {
        assert!(merge_state(json!([1, 2, 3]), now()).is_err());
        assert!(merge_state(json!("state"), now()).is_err());
    }

    #[test]
    fn stored_fields_win_over_defaults() {
        let merged = merge(json!({
            "globalPet": {
                "name": "Bit",
                "mood": "happy",
                "hunger": 80,
                "happiness": 12,
                "lastFed": "2026-07-01T10:00:00.000Z",
                "repoRootDir": "/src/project",
                "level": 4,
                "experience": 20
            },
            "config": { "checkRemoteStatus": true }
        }));
        let pet = &merged.state.global_pet;
        assert_eq!(pet.name, "Bit");
        assert_eq!(pet.mood, Mood::Happy);
        assert_eq!(pet.hunger, 80);
        assert_eq!(pet.happiness, 12);
        assert_eq!(
            pet.last_fed,
            Utc.with_ymd_and_hms(2026, 7, 1, 10, 0, 0).single()
        );
        assert_eq!(pet.repo_root_dir.as_deref(), Some("/src/project"));
        assert_eq!(pet.level, 4);
        assert_eq!(pet.experience, 20);
        // Missing fields keep their defaults.
        assert_eq!(pet.created_at, Some(now()));
        assert_eq!(pet.last_status_update, None);
        assert!(merged.state.config.check_remote_status);
        assert!(merged.repairs.is_empty());
    }

    #[test]
    fn numeric_fields_are_coerced() {
        let merged = merge(json!({
            "globalPet": {
                "hunger": 47.6,
                "happiness": "33",
                "level": 2.2,
                "experience": -15,
                "animationFrame": "3.5"
            }
        }));
        let pet = &merged.state.global_pet;
        assert_eq!(pet.hunger, 48);
        assert_eq!(pet.happiness, 33);
        assert_eq!(pet.level, 2);
        assert_eq!(pet.experience, 0);
        assert_eq!(pet.animation_frame, 4);
    }

    #[test]
    fn out_of_range_stats_are_clamped() {
        let merged = merge(json!({ "globalPet": { "hunger": 250, "happiness": -40, "level": 0 } }));
        let pet = &merged.state.global_pet;
        assert_eq!(pet.hunger, 100);
        assert_eq!(pet.happiness, 0);
        assert_eq!(pet.level, 1);
    }

    #[test]
    fn bad_fields_fall_back_individually() {
        let merged = merge(json!({
            "globalPet": {
                "name": "",
                "mood": "ecstatic",
                "hunger": "lots",
                "happiness": 70,
                "lastPlayed": "yesterday",
                "level": true
            }
        }));
        let pet = &merged.state.global_pet;
        assert_eq!(pet.name, "Git Pet");
        assert_eq!(pet.mood, Mood::Neutral);
        assert_eq!(pet.hunger, 50);
        assert_eq!(pet.happiness, 70);
        assert_eq!(pet.last_played, Some(now()));
        assert_eq!(pet.level, 1);
        assert_eq!(merged.repairs.len(), 5);
    }

    #[test]
    fn null_timestamps_are_respected() {
        let merged = merge(json!({ "globalPet": { "lastCommitTimestamp": null, "lastFed": null } }));
        assert_eq!(merged.state.global_pet.last_fed, None);
        assert_eq!(merged.state.global_pet.last_commit_timestamp, None);
    }

    #[test]
    fn bad_achievements_are_dropped_one_by_one() {
        let merged = merge(json!({
            "globalPet": {
                "achievements": {
                    "FIRST_COMMIT": "2026-06-30T08:00:00Z",
                    "FIRST_MERGE": 42,
                    "CUSTOM_THING": "2026-06-29T08:00:00+02:00"
                }
            }
        }));
        let achievements = &merged.state.global_pet.achievements;
        assert_eq!(achievements.len(), 2);
        assert!(achievements.contains_key("FIRST_COMMIT"));
        assert!(achievements.contains_key("CUSTOM_THING"));
        assert_eq!(merged.repairs.len(), 1);
    }

    #[test]
    fn achievements_that_are_not_a_mapping_become_empty() {
        let merged = merge(json!({ "globalPet": { "achievements": ["FIRST_COMMIT"] } }));
        assert!(merged.state.global_pet.achievements.is_empty());
    }

    #[test]
    fn legacy_nested_config_is_migrated() {
        let merged = merge(json!({
            "pets": {},
            "globalPet": {
                "lastMood": "sad",
                "config": { "checkRemoteStatus": true }
            }
        }));
        assert!(merged.state.config.check_remote_status);
        assert!(!merged.state.global_pet.extra.contains_key("config"));
        assert_eq!(merged.state.global_pet.extra["lastMood"], json!("sad"));
        assert_eq!(merged.state.extra["pets"], json!({}));
    }

    #[test]
    fn top_level_config_beats_legacy_copy() {
        let merged = merge(json!({
            "globalPet": { "config": { "checkRemoteStatus": true } },
            "config": { "checkRemoteStatus": false }
        }));
        assert!(!merged.state.config.check_remote_status);
    }

    #[test]
    fn config_booleans_accept_strings() {
        let merged = merge(json!({ "config": { "checkRemoteStatus": "TRUE", "theme": "dark" } }));
        assert!(merged.state.config.check_remote_status);
        assert_eq!(merged.state.config.extra["theme"], json!("dark"));
    }
}
