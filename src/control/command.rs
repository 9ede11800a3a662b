//! Operator commands accepted by the interactive console.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `s`
    Start,
    /// `q`
    Stop,
    /// `x`
    Exit,
    /// Anything else, kept verbatim for the log line.
    Unknown(String),
}

impl Command {
    /// Parse one input line. Blank lines yield `None`.
    ///
    /// Only the first whitespace-delimited token counts, so `s q` starts the
    /// service. Matching is case-sensitive: `S` is an unknown command.
    pub fn parse(line: &str) -> Option<Self> {
        let token = line.split_whitespace().next()?;

        Some(match token {
            "s" => Command::Start,
            "q" => Command::Stop,
            "x" => Command::Exit,
            other => Command::Unknown(other.to_string()),
        })
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Start => write!(f, "start"),
            Command::Stop => write!(f, "stop"),
            Command::Exit => write!(f, "exit"),
            Command::Unknown(raw) => write!(f, "unknown({})", raw),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_commands() {
        assert_eq!(Command::parse("s"), Some(Command::Start));
        assert_eq!(Command::parse("q\n"), Some(Command::Stop));
        assert_eq!(Command::parse("  x  "), Some(Command::Exit));
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        assert_eq!(Command::parse("S"), Some(Command::Unknown("S".into())));
        assert_eq!(Command::parse("start"), Some(Command::Unknown("start".into())));
    }

    #[test]
    fn test_parse_takes_first_token() {
        assert_eq!(Command::parse("s q"), Some(Command::Start));
        assert_eq!(Command::parse("  q\tx\n"), Some(Command::Stop));
        assert_eq!(Command::parse("stop now"), Some(Command::Unknown("stop".into())));
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        assert_eq!(Command::parse(""), None);
        assert_eq!(Command::parse("   \r\n"), None);
    }
}
