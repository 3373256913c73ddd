use std::{io, path::PathBuf};

use thiserror::Error;

/// errors from arming or snoozing the alarm
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AlarmError {
    #[error("invalid alarm time `{0}`, expected HH:MM with hour 0-23 and minute 0-59")]
    InvalidTime(String),
    #[error("invalid snooze of {0} minutes, snooze must be at least one minute and less than a day")]
    InvalidSnooze(i64),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("couldn't find a home directory to put the config in")]
    NoProjectDirs,
    #[error("couldn't read or write config file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("couldn't parse config file")]
    Parse(#[from] toml::de::Error),
    #[error("couldn't serialize config")]
    Serialize(#[from] toml::ser::Error),
    #[error("invalid config value for `{key}`: {reason}")]
    Invalid { key: &'static str, reason: String },
}
