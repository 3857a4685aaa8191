//! Configuration file support for Calm.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/calm/config.toml`.

use crate::{BreathingExercise, Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Longest accepted tick interval (one hour)
pub const MAX_TICK_INTERVAL_MS: u64 = 60 * 60 * 1000;

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub timer: TimerConfig,

    #[serde(default)]
    pub companion: CompanionConfig,

    #[serde(default)]
    pub exercises: ExercisesConfig,
}

/// Tick source configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TimerConfig {
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_tick_interval_ms(),
        }
    }
}

impl TimerConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

/// Chat companion configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CompanionConfig {
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,

    #[serde(default = "default_response_timeout_secs")]
    pub response_timeout_secs: u64,

    /// Pins fallback reply selection when set
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for CompanionConfig {
    fn default() -> Self {
        Self {
            system_prompt: default_system_prompt(),
            response_timeout_secs: default_response_timeout_secs(),
            seed: None,
        }
    }
}

/// User-defined exercises
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct ExercisesConfig {
    #[serde(default)]
    pub custom: Vec<BreathingExercise>,
}

// Default value functions
fn default_tick_interval_ms() -> u64 {
    1000
}

fn default_system_prompt() -> String {
    "You are a compassionate companion trained in cognitive behavioral therapy (CBT) and \
     mindfulness techniques. Respond with empathy, ask thoughtful questions, and provide \
     gentle guidance. Keep responses supportive, non-judgmental, and focused on helping the \
     user process their emotions and thoughts. Be concise but warm."
        .into()
}

fn default_response_timeout_secs() -> u64 {
    10
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!(
                "No config file found at {:?}, using defaults",
                config_path
            );
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir()
            .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
            .unwrap_or_else(|| PathBuf::from(".config"));
        base.join("calm").join("config.toml")
    }

    /// Reject settings the timer cannot run with
    ///
    /// Custom exercises are checked later, when the catalog is assembled.
    pub fn validate(&self) -> Result<()> {
        if self.timer.tick_interval_ms == 0 {
            return Err(Error::Config(
                "timer.tick_interval_ms must be greater than zero".into(),
            ));
        }
        if self.timer.tick_interval_ms > MAX_TICK_INTERVAL_MS {
            return Err(Error::Config(format!(
                "timer.tick_interval_ms must be at most {} (got {})",
                MAX_TICK_INTERVAL_MS, self.timer.tick_interval_ms
            )));
        }
        if self.companion.response_timeout_secs == 0 {
            return Err(Error::Config(
                "companion.response_timeout_secs must be greater than zero".into(),
            ));
        }
        Ok(())
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.timer.tick_interval(), Duration::from_secs(1));
        assert_eq!(config.companion.response_timeout_secs, 10);
        assert!(config.companion.seed.is_none());
        assert!(config.exercises.custom.is_empty());
    }

    #[test]
    fn test_partial_config() {
        let toml_str = r#"
[companion]
seed = 42
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.companion.seed, Some(42));
        assert_eq!(config.timer.tick_interval_ms, 1000); // default
        assert!(config.companion.system_prompt.contains("compassionate"));
    }

    #[test]
    fn test_custom_exercises() {
        let toml_str = r#"
[[exercises.custom]]
id = "coherent"
name = "Coherent Breathing"
pattern = [5, 0, 5, 0]
total_cycles = 6
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.exercises.custom.len(), 1);
        assert_eq!(config.exercises.custom[0].cycle_length(), 10);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.timer.tick_interval_ms = 250;
        config.companion.seed = Some(3);
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.timer.tick_interval_ms, 250);
        assert_eq!(loaded.companion.seed, Some(3));
    }

    #[test]
    fn test_zero_tick_interval_rejected() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[timer]\ntick_interval_ms = 0\n").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_huge_tick_interval_rejected() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[timer]\ntick_interval_ms = 9223372036854775807\n").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, Error::Config(ref msg) if msg.contains("at most")));

        let mut config = Config::default();
        config.timer.tick_interval_ms = MAX_TICK_INTERVAL_MS;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_toml_rejected() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[timer\n").unwrap();

        assert!(matches!(Config::load_from(&path), Err(Error::Toml(_))));
    }
}
