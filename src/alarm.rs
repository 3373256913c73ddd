use std::fmt;

use chrono::{Duration, NaiveDateTime, NaiveTime, Timelike};

use crate::error::AlarmError;

const SECONDS_PER_MINUTE: i64 = 60;
const SECONDS_PER_HOUR: i64 = 60 * SECONDS_PER_MINUTE;
const MINUTES_PER_DAY: i64 = 24 * 60;

/// a snooze of a whole day or more would land back on the ringing minute
pub const MAX_SNOOZE_MINUTES: i64 = MINUTES_PER_DAY - 1;

#[must_use]
pub const fn is_valid_snooze(minutes: i64) -> bool {
    minutes > 0 && minutes <= MAX_SNOOZE_MINUTES
}

/// represents the one alarm.
/// the target is a time of day, it has no date so it rings on the next occurrence
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlarmState {
    target: Option<NaiveTime>,
    armed: bool,
    triggered: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlarmStatus {
    Idle,
    Armed,
    Fired,
}

impl fmt::Display for AlarmStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::Idle => "idle",
                Self::Armed => "armed",
                Self::Fired => "ringing",
            }
        )
    }
}

/// what happened when the alarm was checked against the clock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Evaluation {
    /// the alarm went off just now
    Fired,
    /// already ringing, nothing changed
    AlreadyTriggered,
    /// armed but not due yet
    Pending,
    /// not armed
    Idle,
}

/// time left until the alarm, always less than a day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
}

impl Countdown {
    fn from_seconds(total: i64) -> Self {
        let total = total.rem_euclid(24 * SECONDS_PER_HOUR);
        let part = |value: i64| u32::try_from(value).unwrap_or_default();
        Self {
            hours: part(total / SECONDS_PER_HOUR),
            minutes: part((total % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE),
            seconds: part(total % SECONDS_PER_MINUTE),
        }
    }

    #[must_use]
    pub fn as_duration(&self) -> Duration {
        Duration::seconds(
            i64::from(self.hours) * SECONDS_PER_HOUR
                + i64::from(self.minutes) * SECONDS_PER_MINUTE
                + i64::from(self.seconds),
        )
    }
}

impl fmt::Display for Countdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} hours, {} minutes, and {} seconds",
            self.hours, self.minutes, self.seconds
        )
    }
}

impl AlarmState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// arms the alarm for `hour:minute`, the state is left alone if the time is out of range
    ///
    /// # Errors
    /// [`AlarmError::InvalidTime`] if hour is not in 0..=23 or minute not in 0..=59
    pub fn arm(&mut self, hour: u32, minute: u32) -> Result<NaiveTime, AlarmError> {
        let time = NaiveTime::from_hms_opt(hour, minute, 0)
            .ok_or_else(|| AlarmError::InvalidTime(format!("{hour:02}:{minute:02}")))?;
        Ok(self.arm_at(time))
    }

    /// arms the alarm for the minute `time` falls in
    pub fn arm_at(&mut self, time: NaiveTime) -> NaiveTime {
        let target = truncate_to_minute(time);
        self.target = Some(target);
        self.armed = true;
        self.triggered = false;
        target
    }

    /// checks the alarm against `now`.
    /// only fires once per occurrence, later calls report [`Evaluation::AlreadyTriggered`]
    /// until the alarm is snoozed, re-armed or disarmed
    pub fn evaluate(&mut self, now: NaiveDateTime) -> Evaluation {
        if !self.armed {
            return Evaluation::Idle;
        }
        if self.triggered {
            return Evaluation::AlreadyTriggered;
        }
        match self.target {
            Some(target) if same_minute(target, now.time()) => {
                self.triggered = true;
                Evaluation::Fired
            }
            _ => Evaluation::Pending,
        }
    }

    /// time until the next occurrence of the target.
    /// if the target is earlier in the day than `now` it is tomorrow's occurrence.
    /// `None` if no alarm was ever set
    #[must_use]
    pub fn time_until(&self, now: NaiveDateTime) -> Option<Countdown> {
        let target = self.target?;
        let now = now.with_nanosecond(0).unwrap_or(now);
        let mut next = now.date().and_time(target);
        if next < now {
            next = next + Duration::days(1);
        }
        Some(Countdown::from_seconds((next - now).num_seconds()))
    }

    /// pushes a ringing alarm `minutes` past `now` and stops it ringing.
    /// returns the new target, or `None` when the alarm wasn't ringing
    ///
    /// # Errors
    /// [`AlarmError::InvalidSnooze`] if `minutes` is not within `1..=MAX_SNOOZE_MINUTES`
    pub fn snooze(
        &mut self,
        now: NaiveDateTime,
        minutes: i64,
    ) -> Result<Option<NaiveTime>, AlarmError> {
        if !is_valid_snooze(minutes) {
            return Err(AlarmError::InvalidSnooze(minutes));
        }
        if self.status() != AlarmStatus::Fired {
            return Ok(None);
        }
        let until = now.time() + Duration::minutes(minutes);
        let until = truncate_to_minute(until);
        self.target = Some(until);
        self.triggered = false;
        Ok(Some(until))
    }

    /// turns the alarm off, the target is kept so it can still be shown
    pub fn disarm(&mut self) {
        self.armed = false;
        self.triggered = false;
    }

    #[must_use]
    pub const fn status(&self) -> AlarmStatus {
        match (self.armed, self.triggered) {
            (false, _) => AlarmStatus::Idle,
            (true, false) => AlarmStatus::Armed,
            (true, true) => AlarmStatus::Fired,
        }
    }

    #[must_use]
    pub const fn target(&self) -> Option<NaiveTime> {
        self.target
    }

    #[must_use]
    pub const fn is_armed(&self) -> bool {
        self.armed
    }

    #[must_use]
    pub const fn is_triggered(&self) -> bool {
        self.triggered
    }
}

/// parses `HH:MM` (24 hour clock) as typed by the user
///
/// # Errors
/// [`AlarmError::InvalidTime`] if the text isn't a valid time of day
pub fn parse_time(input: &str) -> Result<NaiveTime, AlarmError> {
    NaiveTime::parse_from_str(input.trim(), "%H:%M")
        .map_err(|_| AlarmError::InvalidTime(input.trim().to_string()))
}

fn same_minute(a: NaiveTime, b: NaiveTime) -> bool {
    a.hour() == b.hour() && a.minute() == b.minute()
}

fn truncate_to_minute(time: NaiveTime) -> NaiveTime {
    NaiveTime::from_hms_opt(time.hour(), time.minute(), 0).unwrap_or(time)
}
