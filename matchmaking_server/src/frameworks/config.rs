// Runtime configuration: defaults, optional TOML file, then environment overrides.

use crate::domain::MatchRules;
use crate::use_cases::MatchmakerSettings;
use serde::Deserialize;
use std::{env, path::Path, time::Duration};
use thiserror::Error;

pub const CONFIG_PATH_VAR: &str = "MATCHMAKING_CONFIG";

pub const COMMAND_CHANNEL_CAPACITY: usize = 1024;
pub const MATCH_BROADCAST_CAPACITY: usize = 128;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid value {value:?} for {key}")]
    InvalidValue { key: &'static str, value: String },
}

/// Service settings.
///
/// Every field has a default, so a config file only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub port: u16,
    pub skill_tolerance: u32,
    pub long_wait_secs: u64,
    pub both_must_wait_long: bool,
    pub retry_interval_ms: u64,
    pub recent_matches: usize,
}

impl Default for Settings {
    fn default() -> Self {
        let rules = MatchRules::default();
        Self {
            port: 3003,
            skill_tolerance: rules.skill_tolerance,
            long_wait_secs: rules.long_wait_threshold.as_secs(),
            both_must_wait_long: rules.both_must_wait_long,
            retry_interval_ms: 1000,
            recent_matches: 1024,
        }
    }
}

impl Settings {
    // Load settings from `MATCHMAKING_CONFIG` (if set) and the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        let settings = match env::var(CONFIG_PATH_VAR) {
            Ok(path) => Self::from_file(Path::new(&path))?,
            Err(_) => Self::default(),
        };
        settings.with_overrides(|key| env::var(key).ok())
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let settings: Settings = toml::from_str(contents)?;
        settings.validate()
    }

    /// Apply `MATCHMAKING_*` overrides read through `lookup`.
    pub fn with_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        override_with(&lookup, "MATCHMAKING_PORT", &mut self.port)?;
        override_with(
            &lookup,
            "MATCHMAKING_SKILL_TOLERANCE",
            &mut self.skill_tolerance,
        )?;
        override_with(&lookup, "MATCHMAKING_LONG_WAIT_SECS", &mut self.long_wait_secs)?;
        override_with(
            &lookup,
            "MATCHMAKING_BOTH_MUST_WAIT_LONG",
            &mut self.both_must_wait_long,
        )?;
        override_with(
            &lookup,
            "MATCHMAKING_RETRY_INTERVAL_MS",
            &mut self.retry_interval_ms,
        )?;
        override_with(&lookup, "MATCHMAKING_RECENT_MATCHES", &mut self.recent_matches)?;
        self.validate()
    }

    pub fn rules(&self) -> MatchRules {
        MatchRules {
            skill_tolerance: self.skill_tolerance,
            long_wait_threshold: Duration::from_secs(self.long_wait_secs),
            both_must_wait_long: self.both_must_wait_long,
        }
    }

    pub fn matchmaker_settings(&self) -> MatchmakerSettings {
        MatchmakerSettings {
            rules: self.rules(),
            retry_interval: Duration::from_millis(self.retry_interval_ms),
            command_channel_capacity: COMMAND_CHANNEL_CAPACITY,
            match_broadcast_capacity: MATCH_BROADCAST_CAPACITY,
            recent_match_capacity: self.recent_matches,
        }
    }

    fn validate(self) -> Result<Self, ConfigError> {
        // tokio::time::interval panics on a zero period.
        if self.retry_interval_ms == 0 {
            return Err(ConfigError::InvalidValue {
                key: "retry_interval_ms",
                value: "0".to_string(),
            });
        }
        Ok(self)
    }
}

fn override_with<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    target: &mut T,
) -> Result<(), ConfigError> {
    let Some(value) = lookup(key) else {
        return Ok(());
    };
    *target = value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue { key, value })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn defaults_match_documented_rules() {
        let rules = Settings::default().rules();

        assert_eq!(rules.skill_tolerance, 10);
        assert_eq!(rules.long_wait_threshold, Duration::from_secs(30));
        assert!(rules.both_must_wait_long);
    }

    #[test]
    fn when_toml_sets_some_keys_then_others_keep_defaults() {
        let settings = Settings::from_toml_str(
            r#"
            skill_tolerance = 25
            both_must_wait_long = false
            "#,
        )
        .expect("expected config to parse");

        assert_eq!(settings.skill_tolerance, 25);
        assert!(!settings.both_must_wait_long);
        assert_eq!(settings.port, 3003);
        assert_eq!(settings.long_wait_secs, 30);
    }

    #[test]
    fn when_toml_has_unknown_key_then_parse_fails() {
        let result = Settings::from_toml_str("skill_tolerence = 5");

        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn when_env_overrides_are_present_then_they_win() {
        let settings = Settings::default()
            .with_overrides(lookup(&[
                ("MATCHMAKING_PORT", "4100"),
                ("MATCHMAKING_LONG_WAIT_SECS", " 45 "),
                ("MATCHMAKING_BOTH_MUST_WAIT_LONG", "false"),
            ]))
            .expect("expected overrides to apply");

        assert_eq!(settings.port, 4100);
        assert_eq!(settings.long_wait_secs, 45);
        assert!(!settings.both_must_wait_long);
        assert_eq!(
            settings.matchmaker_settings().rules.long_wait_threshold,
            Duration::from_secs(45)
        );
    }

    #[test]
    fn when_env_value_does_not_parse_then_key_is_reported() {
        let result =
            Settings::default().with_overrides(lookup(&[("MATCHMAKING_SKILL_TOLERANCE", "ten")]));

        match result {
            Err(ConfigError::InvalidValue { key, value }) => {
                assert_eq!(key, "MATCHMAKING_SKILL_TOLERANCE");
                assert_eq!(value, "ten");
            }
            other => panic!("expected invalid value error, got {other:?}"),
        }
    }

    #[test]
    fn when_retry_interval_is_zero_then_settings_are_rejected() {
        let result =
            Settings::default().with_overrides(lookup(&[("MATCHMAKING_RETRY_INTERVAL_MS", "0")]));

        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue {
                key: "retry_interval_ms",
                ..
            })
        ));
    }
}
