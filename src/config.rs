//! Runtime configuration loaded from the environment.
use std::env;
use std::path::PathBuf;

use crate::game::ROUND_SECONDS;

/// Settings for a play session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameConfig {
    pub category: String,
    pub start_level: u32,
    pub round_seconds: u32,
    /// Fixed seed for reproducible dealing
    pub seed: Option<u64>,
    pub sound_enabled: bool,
    pub log_dir: Option<PathBuf>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            category: "animals".to_string(),
            start_level: 1,
            round_seconds: ROUND_SECONDS,
            seed: None,
            sound_enabled: true,
            log_dir: None,
        }
    }
}

impl GameConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `BLOCKWORDS_CATEGORY` - Category preselected in the menu (default: animals)
    /// - `BLOCKWORDS_START_LEVEL` - First level to deal (default: 1)
    /// - `BLOCKWORDS_ROUND_SECONDS` - Time budget per level (default: 180)
    /// - `BLOCKWORDS_SEED` - RNG seed for dealing (default: random)
    /// - `BLOCKWORDS_SOUND` - Ring the terminal bell (default: true)
    /// - `BLOCKWORDS_LOG_DIR` - Log directory (default: platform-specific)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(category) = lookup("BLOCKWORDS_CATEGORY").filter(|c| !c.trim().is_empty()) {
            config.category = category.trim().to_lowercase();
        }

        if let Some(level) = parse::<u32>(lookup("BLOCKWORDS_START_LEVEL")) {
            config.start_level = level.max(1);
        }

        if let Some(seconds) = parse::<u32>(lookup("BLOCKWORDS_ROUND_SECONDS")) {
            config.round_seconds = seconds.max(1);
        }

        config.seed = parse::<u64>(lookup("BLOCKWORDS_SEED"));

        if let Some(enabled) = parse::<bool>(lookup("BLOCKWORDS_SOUND")) {
            config.sound_enabled = enabled;
        }

        config.log_dir = lookup("BLOCKWORDS_LOG_DIR").map(PathBuf::from);

        config
    }
}

fn parse<T>(value: Option<String>) -> Option<T>
where
    T: std::str::FromStr,
{
    value?.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> GameConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        GameConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]);
        assert_eq!(config, GameConfig::default());
        assert_eq!(config.round_seconds, 180);
        assert_eq!(config.start_level, 1);
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("BLOCKWORDS_CATEGORY", " Fruits "),
            ("BLOCKWORDS_START_LEVEL", "4"),
            ("BLOCKWORDS_ROUND_SECONDS", "90"),
            ("BLOCKWORDS_SEED", "1234"),
            ("BLOCKWORDS_SOUND", "false"),
            ("BLOCKWORDS_LOG_DIR", "/tmp/bw"),
        ]);
        assert_eq!(config.category, "fruits");
        assert_eq!(config.start_level, 4);
        assert_eq!(config.round_seconds, 90);
        assert_eq!(config.seed, Some(1234));
        assert!(!config.sound_enabled);
        assert_eq!(config.log_dir, Some(PathBuf::from("/tmp/bw")));
    }

    #[test]
    fn test_bad_values_fall_back() {
        let config = config_from(&[
            ("BLOCKWORDS_START_LEVEL", "zero"),
            ("BLOCKWORDS_ROUND_SECONDS", "-5"),
            ("BLOCKWORDS_SEED", "abc"),
            ("BLOCKWORDS_SOUND", "loud"),
        ]);
        assert_eq!(config.start_level, 1);
        assert_eq!(config.round_seconds, 180);
        assert_eq!(config.seed, None);
        assert!(config.sound_enabled);
    }

    #[test]
    fn test_values_are_clamped() {
        let config = config_from(&[
            ("BLOCKWORDS_START_LEVEL", "0"),
            ("BLOCKWORDS_ROUND_SECONDS", "0"),
        ]);
        assert_eq!(config.start_level, 1);
        assert_eq!(config.round_seconds, 1);
    }
}
