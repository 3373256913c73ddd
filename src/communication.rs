use std::str::FromStr;

use thiserror::Error;

/// messages from the input thread to the loop that owns the alarm
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Snooze,
    // turn the alarm off entirely
    Stop,
    Status,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown command `{0}` (try s/snooze, x/stop, ?/status, q/quit)")]
pub struct UnknownCommand(pub String);

impl FromStr for Command {
    type Err = UnknownCommand;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let typed = s.trim();
        match typed.to_lowercase().as_str() {
            "s" | "snooze" => Ok(Self::Snooze),
            "x" | "stop" => Ok(Self::Stop),
            "?" | "status" => Ok(Self::Status),
            "q" | "quit" | "exit" => Ok(Self::Quit),
            _ => Err(UnknownCommand(typed.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_short_and_long_forms() {
        assert_eq!("s".parse(), Ok(Command::Snooze));
        assert_eq!("Snooze\n".parse(), Ok(Command::Snooze));
        assert_eq!(" x ".parse(), Ok(Command::Stop));
        assert_eq!("stop".parse(), Ok(Command::Stop));
        assert_eq!("?".parse(), Ok(Command::Status));
        assert_eq!("q".parse(), Ok(Command::Quit));
        assert_eq!("exit".parse(), Ok(Command::Quit));
    }

    #[test]
    fn rejects_unknown_input() {
        assert_eq!(
            "wake".parse::<Command>(),
            Err(UnknownCommand("wake".to_string()))
        );
        assert_eq!(
            "  Wake Up\n".parse::<Command>(),
            Err(UnknownCommand("Wake Up".to_string()))
        );
    }
}
