#![warn(clippy::pedantic, clippy::nursery, clippy::cargo)]
#![deny(clippy::use_self, rust_2018_idioms, missing_debug_implementations)]
#![allow(clippy::multiple_crate_versions, clippy::module_name_repetitions)]

//! a single alarm: set it for a time of day, see how long is left,
//! and snooze or stop it once it rings.
//! nothing in here reads the real time, a [`clock::Clock`] is always passed in

/// the alarm state machine and its time arithmetic
pub mod alarm;
pub mod clock;
pub mod communication;
pub mod config;
pub mod error;
/// drives one alarm from a clock and user commands
pub mod session;

pub use alarm::{AlarmState, AlarmStatus, Countdown, Evaluation};
pub use error::{AlarmError, ConfigError};
