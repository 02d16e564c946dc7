//! Command parsing — leading-slash tokens with optional inline arguments.

/// A recognized command. Logging commands keep their inline argument raw
/// so validation messages are identical whether the value arrived inline
/// or as a flow reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start,
    Help,
    SetProfile,
    LogWater(Option<String>),
    LogFood(Option<String>),
    LogWorkout(Option<String>),
    CheckProgress,
    Unknown(String),
}

impl Command {
    /// Parse a message as a command. `None` means free text (a flow reply).
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        if !text.starts_with('/') {
            return None;
        }

        let mut parts = text.splitn(2, char::is_whitespace);
        let token = parts.next().unwrap_or("");
        // Telegram group syntax: /command@botname
        let token = token.split('@').next().unwrap_or(token);
        let args = parts
            .next()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from);

        Some(match token {
            "/start" => Self::Start,
            "/help" => Self::Help,
            "/set_profile" => Self::SetProfile,
            "/log_water" => Self::LogWater(args),
            "/log_food" => Self::LogFood(args),
            "/log_workout" => Self::LogWorkout(args),
            "/check_progress" => Self::CheckProgress,
            other => Self::Unknown(other.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn free_text_is_not_a_command() {
        assert_eq!(Command::parse("500"), None);
        assert_eq!(Command::parse("hello there"), None);
        assert_eq!(Command::parse(""), None);
    }

    #[test]
    fn bare_commands() {
        assert_eq!(Command::parse("/start"), Some(Command::Start));
        assert_eq!(Command::parse("/help"), Some(Command::Help));
        assert_eq!(Command::parse("/set_profile"), Some(Command::SetProfile));
        assert_eq!(Command::parse("/log_water"), Some(Command::LogWater(None)));
        assert_eq!(Command::parse("/log_food"), Some(Command::LogFood(None)));
        assert_eq!(
            Command::parse("/log_workout"),
            Some(Command::LogWorkout(None))
        );
        assert_eq!(
            Command::parse("/check_progress"),
            Some(Command::CheckProgress)
        );
    }

    #[test]
    fn inline_arguments_are_kept_raw() {
        assert_eq!(
            Command::parse("/log_water 500"),
            Some(Command::LogWater(Some("500".into())))
        );
        assert_eq!(
            Command::parse("/log_water abc"),
            Some(Command::LogWater(Some("abc".into())))
        );
        assert_eq!(
            Command::parse("/log_food green apple"),
            Some(Command::LogFood(Some("green apple".into())))
        );
        assert_eq!(
            Command::parse("/log_workout run"),
            Some(Command::LogWorkout(Some("run".into())))
        );
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        assert_eq!(
            Command::parse("  /log_water   500  "),
            Some(Command::LogWater(Some("500".into())))
        );
        assert_eq!(Command::parse("/log_water   "), Some(Command::LogWater(None)));
    }

    #[test]
    fn bot_mention_suffix_is_stripped() {
        assert_eq!(Command::parse("/start@fit_assist_bot"), Some(Command::Start));
        assert_eq!(
            Command::parse("/log_water@fit_assist_bot 500"),
            Some(Command::LogWater(Some("500".into())))
        );
    }

    #[test]
    fn unknown_commands_are_reported() {
        assert_eq!(
            Command::parse("/frobnicate"),
            Some(Command::Unknown("/frobnicate".into()))
        );
    }
}
