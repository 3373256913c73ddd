use chrono::NaiveTime;
use log::{debug, info, warn};

use crate::{
    alarm::{is_valid_snooze, AlarmState, AlarmStatus, Countdown, Evaluation},
    clock::Clock,
    communication::Command,
    error::AlarmError,
};

/// something the front end should tell the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Set {
        target: NaiveTime,
    },
    Countdown {
        left: Countdown,
    },
    Ringing {
        target: NaiveTime,
    },
    Snoozed {
        until: NaiveTime,
    },
    NothingToSnooze,
    Stopped,
    Status {
        status: AlarmStatus,
        target: Option<NaiveTime>,
        left: Option<Countdown>,
    },
}

impl Notice {
    #[must_use]
    pub fn render(&self, time_format: &str) -> String {
        match self {
            Self::Set { target } => format!("Alarm set for {}", target.format(time_format)),
            Self::Countdown { left } => format!("Alarm will go off in {left}"),
            Self::Ringing { target } => {
                format!("ALARM! It's {}! Time to wake up!", target.format(time_format))
            }
            Self::Snoozed { until } => format!("Alarm snoozed until {}", until.format(time_format)),
            Self::NothingToSnooze => "The alarm isn't ringing, nothing to snooze".to_string(),
            Self::Stopped => "Alarm stopped".to_string(),
            Self::Status {
                status,
                target,
                left,
            } => match (target, left) {
                (Some(target), Some(left)) if *status != AlarmStatus::Idle => format!(
                    "Alarm is {status} for {}, {left} left",
                    target.format(time_format)
                ),
                (Some(target), _) => {
                    format!("Alarm is {status}, last set for {}", target.format(time_format))
                }
                (None, _) => format!("Alarm is {status}, no alarm set"),
            },
        }
    }
}

/// the one alarm plus the clock it is checked against.
/// the caller decides how often to [`Session::tick`]
#[derive(Debug)]
pub struct Session<C> {
    alarm: AlarmState,
    clock: C,
    snooze_minutes: i64,
}

impl<C: Clock> Session<C> {
    /// # Errors
    /// [`AlarmError::InvalidSnooze`] if `snooze_minutes` isn't between one minute and a day
    pub fn new(clock: C, snooze_minutes: i64) -> Result<Self, AlarmError> {
        if !is_valid_snooze(snooze_minutes) {
            return Err(AlarmError::InvalidSnooze(snooze_minutes));
        }
        Ok(Self {
            alarm: AlarmState::new(),
            clock,
            snooze_minutes,
        })
    }

    /// arms the alarm. if it is already that minute it rings right away
    ///
    /// # Errors
    /// [`AlarmError::InvalidTime`] if the time is out of range
    pub fn set_alarm(&mut self, hour: u32, minute: u32) -> Result<Vec<Notice>, AlarmError> {
        let target = self.alarm.arm(hour, minute)?;
        info!("alarm set for {target}");
        let mut notices = vec![Notice::Set { target }];
        if let Some(ringing) = self.tick() {
            notices.push(ringing);
        } else if let Some(left) = self.alarm.time_until(self.clock.now()) {
            notices.push(Notice::Countdown { left });
        }
        Ok(notices)
    }

    pub fn tick(&mut self) -> Option<Notice> {
        let now = self.clock.now();
        match self.alarm.evaluate(now) {
            Evaluation::Fired => {
                let target = self.alarm.target()?;
                info!("alarm for {target} went off at {now}");
                Some(Notice::Ringing { target })
            }
            evaluation => {
                debug!("tick at {now}: {evaluation:?}");
                None
            }
        }
    }

    /// `None` means there is nothing to show, for [`Command::Quit`] the caller should stop ticking
    ///
    /// # Errors
    /// [`AlarmError::InvalidSnooze`] if snoozing with a bad length
    pub fn handle(&mut self, command: Command) -> Result<Option<Notice>, AlarmError> {
        let now = self.clock.now();
        let notice = match command {
            Command::Snooze => match self.alarm.snooze(now, self.snooze_minutes)? {
                Some(until) => {
                    info!("alarm snoozed until {until}");
                    Notice::Snoozed { until }
                }
                None => {
                    warn!("snooze requested while the alarm is {}", self.alarm.status());
                    Notice::NothingToSnooze
                }
            },
            Command::Stop => {
                self.alarm.disarm();
                info!("alarm stopped");
                Notice::Stopped
            }
            Command::Status => Notice::Status {
                status: self.alarm.status(),
                target: self.alarm.target(),
                left: self.alarm.time_until(now),
            },
            Command::Quit => return Ok(None),
        };
        Ok(Some(notice))
    }

    #[must_use]
    pub const fn alarm(&self) -> &AlarmState {
        &self.alarm
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime};

    use super::*;
    use crate::clock::ManualClock;

    fn at(hour: u32, minute: u32, second: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 14)
            .unwrap()
            .and_hms_opt(hour, minute, second)
            .unwrap()
    }

    fn hm(hour: u32, minute: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
    }

    #[test]
    fn rejects_snooze_lengths_outside_a_day() {
        let clock = ManualClock::new(at(7, 0, 0));
        assert_eq!(
            Session::new(&clock, 0).unwrap_err(),
            AlarmError::InvalidSnooze(0)
        );
        assert_eq!(
            Session::new(&clock, 1440).unwrap_err(),
            AlarmError::InvalidSnooze(1440)
        );
    }

    #[test]
    fn setting_reports_countdown() {
        let clock = ManualClock::new(at(7, 59, 59));
        let mut session = Session::new(&clock, 5).unwrap();
        let notices = session.set_alarm(8, 0).unwrap();
        assert_eq!(
            notices,
            vec![
                Notice::Set { target: hm(8, 0) },
                Notice::Countdown {
                    left: Countdown {
                        hours: 0,
                        minutes: 0,
                        seconds: 1
                    }
                }
            ]
        );
    }

    #[test]
    fn setting_current_minute_rings_at_once() {
        let clock = ManualClock::new(at(6, 30, 12));
        let mut session = Session::new(&clock, 5).unwrap();
        let notices = session.set_alarm(6, 30).unwrap();
        assert_eq!(notices[1], Notice::Ringing { target: hm(6, 30) });
        assert_eq!(session.alarm().status(), AlarmStatus::Fired);
    }

    #[test]
    fn invalid_time_is_an_error() {
        let clock = ManualClock::new(at(6, 30, 12));
        let mut session = Session::new(&clock, 5).unwrap();
        assert!(matches!(
            session.set_alarm(25, 0),
            Err(AlarmError::InvalidTime(_))
        ));
        assert_eq!(session.alarm().status(), AlarmStatus::Idle);
    }

    #[test]
    fn snooze_outside_ringing_is_reported() {
        let clock = ManualClock::new(at(6, 0, 0));
        let mut session = Session::new(&clock, 5).unwrap();
        session.set_alarm(7, 0).unwrap();
        assert_eq!(
            session.handle(Command::Snooze),
            Ok(Some(Notice::NothingToSnooze))
        );
        assert_eq!(session.alarm().target(), Some(hm(7, 0)));
    }

    #[test]
    fn quit_has_nothing_to_show() {
        let clock = ManualClock::new(at(6, 0, 0));
        let mut session = Session::new(&clock, 5).unwrap();
        assert_eq!(session.handle(Command::Quit), Ok(None));
    }

    #[test]
    fn renders_messages() {
        let left = Countdown {
            hours: 1,
            minutes: 2,
            seconds: 3,
        };
        assert_eq!(
            Notice::Set { target: hm(7, 5) }.render("%H:%M"),
            "Alarm set for 07:05"
        );
        assert_eq!(
            Notice::Countdown { left }.render("%H:%M"),
            "Alarm will go off in 1 hours, 2 minutes, and 3 seconds"
        );
        assert_eq!(
            Notice::Snoozed { until: hm(19, 5) }.render("%l:%M %p"),
            "Alarm snoozed until  7:05 PM"
        );
        assert_eq!(
            Notice::Status {
                status: AlarmStatus::Armed,
                target: Some(hm(7, 5)),
                left: Some(left)
            }
            .render("%H:%M"),
            "Alarm is armed for 07:05, 1 hours, 2 minutes, and 3 seconds left"
        );
        assert_eq!(
            Notice::Status {
                status: AlarmStatus::Idle,
                target: Some(hm(7, 5)),
                left: Some(left)
            }
            .render("%H:%M"),
            "Alarm is idle, last set for 07:05"
        );
        assert_eq!(
            Notice::Status {
                status: AlarmStatus::Idle,
                target: None,
                left: None
            }
            .render("%H:%M"),
            "Alarm is idle, no alarm set"
        );
    }
}
