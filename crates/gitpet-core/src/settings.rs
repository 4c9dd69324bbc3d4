//! Settings loaded from `git-pet.yaml`.
//!
//! The file lives next to the state file and is optional. Every section
//! and every value has a default, so the file only needs to name what it
//! changes:
//!
//! ```yaml
//! decay:
//!   hunger_per_hour: 3.0
//! mood:
//!   boredom_threshold_hours: 8.0
//! git:
//!   fetch_timeout_ms: 30000
//! logging:
//!   level: info
//! ```

use std::path::Path;

use gitpet_engine::PetTuning;
use gitpet_git::GitConfig;
use serde::Deserialize;
use tracing::debug;
use validator::Validate;

/// File name of the settings file inside the state directory.
pub const SETTINGS_FILE_NAME: &str = "git-pet.yaml";

/// Errors that can occur when loading settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// Failed to read the settings file from disk.
    #[error("failed to read settings file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse settings YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// The settings parsed but hold values the engine cannot run with.
    #[error("invalid settings: {0}")]
    Invalid(#[from] validator::ValidationErrors),
}

impl From<serde_yml::Error> for SettingsError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Everything configurable from `git-pet.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Validate)]
pub struct PetSettings {
    /// Engine tunables (`decay`, `mood`, `leveling`, `rewards`,
    /// `interactions` sections).
    #[serde(flatten)]
    #[validate(nested)]
    pub tuning: PetTuning,

    /// How git is invoked.
    #[serde(default)]
    pub git: GitConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl PetSettings {
    /// Load settings from a YAML file at the given path.
    pub fn from_file(path: &Path) -> Result<Self, SettingsError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse and validate settings from a YAML string. An empty document
    /// yields the defaults.
    pub fn parse(yaml: &str) -> Result<Self, SettingsError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let settings: Self = serde_yml::from_str(yaml)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load `git-pet.yaml` from `dir`, or the defaults if there is none.
    pub fn load_from_dir(dir: &Path) -> Result<Self, SettingsError> {
        let path = dir.join(SETTINGS_FILE_NAME);
        if path.is_file() {
            debug!(path = %path.display(), "loading settings");
            Self::from_file(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Like [`load_from_dir`](Self::load_from_dir), but an unreadable or
    /// invalid file yields the defaults together with the error, so the
    /// caller can report it once logging is up.
    pub fn load_or_default(dir: &Path) -> (Self, Option<SettingsError>) {
        match Self::load_from_dir(dir) {
            Ok(settings) => (settings, None),
            Err(e) => (Self::default(), Some(e)),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive when `GIT_PET_LOG` is unset
    /// (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable text.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_log_level() -> String {
    String::from("warn")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn empty_document_is_default() {
        assert_eq!(PetSettings::parse("").ok(), Some(PetSettings::default()));
        assert_eq!(PetSettings::parse("  \n").ok(), Some(PetSettings::default()));
    }

    #[test]
    fn sections_override_independently() {
        let yaml = "\
decay:
  hunger_per_hour: 3.0
mood:
  boredom_threshold_hours: 8.0
git:
  fetch_timeout_ms: 30000
logging:
  level: info
";
        let settings = PetSettings::parse(yaml).unwrap();
        assert!((settings.tuning.decay.hunger_per_hour - 3.0).abs() < f64::EPSILON);
        assert!((settings.tuning.decay.boredom_per_hour - 4.0).abs() < f64::EPSILON);
        assert!((settings.tuning.mood.boredom_threshold_hours - 8.0).abs() < f64::EPSILON);
        assert_eq!(settings.tuning.leveling.base_exp, 100);
        assert_eq!(settings.git.fetch_timeout_ms, 30_000);
        assert_eq!(settings.git.command_timeout_ms, 5_000);
        assert_eq!(settings.logging.level, "info");
        assert!(!settings.logging.json);
    }

    #[test]
    fn malformed_yaml_is_an_error() {
        assert!(matches!(
            PetSettings::parse("decay: [unclosed"),
            Err(SettingsError::Yaml { .. })
        ));
    }

    #[test]
    fn zero_level_curve_is_rejected() {
        let yaml = "leveling:\n  base_exp: 0\n  exp_increment: 0\n";
        assert!(matches!(
            PetSettings::parse(yaml),
            Err(SettingsError::Invalid(_))
        ));
    }

    #[test]
    fn invalid_file_is_an_error_not_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(SETTINGS_FILE_NAME), "leveling:\n  base_exp: 0\n").unwrap();
        assert!(matches!(
            PetSettings::load_from_dir(dir.path()),
            Err(SettingsError::Invalid(_))
        ));
    }

    #[test]
    fn invalid_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(SETTINGS_FILE_NAME), "leveling:\n  base_exp: 0\n").unwrap();
        let (settings, error) = PetSettings::load_or_default(dir.path());
        assert_eq!(settings, PetSettings::default());
        assert!(matches!(error, Some(SettingsError::Invalid(_))));
    }

    #[test]
    fn missing_file_means_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = PetSettings::load_from_dir(dir.path()).ok();
        assert_eq!(settings, Some(PetSettings::default()));
    }
}
