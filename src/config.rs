use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};

use crate::{
    alarm::{is_valid_snooze, MAX_SNOOZE_MINUTES},
    error::ConfigError,
};

/// the loop has to look at the alarm at least once per minute or it can miss the ringing minute
const MAX_TICK_MILLIS: u64 = 60_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_time_format")]
    pub time_format: String,
    #[serde(default = "default_snooze_minutes")]
    pub snooze_minutes: i64,
    #[serde(default = "default_tick_millis")]
    pub tick_millis: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            time_format: default_time_format(),
            snooze_minutes: default_snooze_minutes(),
            tick_millis: default_tick_millis(),
        }
    }
}

impl Config {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// # Errors
    /// if the file can't be read, isn't valid toml or has out of range values
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let config = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&config)?;
        config.validate()?;
        Ok(config)
    }

    /// like [`Config::load`] but a missing file just means defaults
    ///
    /// # Errors
    /// see [`Config::load`]
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            log::info!("no config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// # Errors
    /// if the config dir can't be created or the file can't be written
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let config = toml::to_string(self)?;
        let io_err = |source: std::io::Error| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        fs::write(path, config).map_err(io_err)
    }

    /// # Errors
    /// if a value would make the alarm misbehave
    pub fn validate(&self) -> Result<(), ConfigError> {
        if StrftimeItems::new(&self.time_format).any(|item| item == Item::Error) {
            return Err(ConfigError::Invalid {
                key: "time_format",
                reason: format!("`{}` is not a strftime format", self.time_format),
            });
        }
        if !is_valid_snooze(self.snooze_minutes) {
            return Err(ConfigError::Invalid {
                key: "snooze_minutes",
                reason: format!(
                    "{} is not within 1..={MAX_SNOOZE_MINUTES} minutes",
                    self.snooze_minutes
                ),
            });
        }
        if !(1..=MAX_TICK_MILLIS).contains(&self.tick_millis) {
            return Err(ConfigError::Invalid {
                key: "tick_millis",
                reason: format!("{} is not within 1..={MAX_TICK_MILLIS}", self.tick_millis),
            });
        }
        Ok(())
    }

    #[must_use]
    pub const fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_millis)
    }

    /// # Errors
    /// if there is no home directory
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let mut path = directories::ProjectDirs::from("", "", "rooster_alarm")
            .ok_or(ConfigError::NoProjectDirs)?
            .config_dir()
            .to_path_buf();
        path.push("config.toml");
        Ok(path)
    }

    #[must_use]
    pub fn is_config_present() -> bool {
        Self::config_path().is_ok_and(|path| path.exists())
    }
}

fn default_time_format() -> String {
    "%H:%M".to_string()
}

const fn default_snooze_minutes() -> i64 {
    5
}

const fn default_tick_millis() -> u64 {
    1000
}
