//! Access guard — everything except onboarding requires a profile.

use super::commands::Command;
use super::state::ConversationState;

/// Fixed reply for gated messages.
pub const SETUP_REQUIRED: &str = "Set up a profile first: send /set_profile";

/// Whether a command may proceed for this sender.
///
/// With a profile, everything passes. Without one, only `/start`, `/help`
/// and `/set_profile` are allowed — plus anything while a profile-setup
/// flow is already in progress.
pub fn command_allowed(cmd: &Command, has_profile: bool, state: &ConversationState) -> bool {
    if has_profile || state.in_profile_setup() {
        return true;
    }
    matches!(cmd, Command::Start | Command::Help | Command::SetProfile)
}

/// Whether a free-text reply may proceed for this sender.
pub fn reply_allowed(has_profile: bool, state: &ConversationState) -> bool {
    has_profile || state.in_profile_setup()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profileless_user_can_only_onboard() {
        let idle = ConversationState::Idle;
        assert!(command_allowed(&Command::Start, false, &idle));
        assert!(command_allowed(&Command::Help, false, &idle));
        assert!(command_allowed(&Command::SetProfile, false, &idle));

        assert!(!command_allowed(&Command::LogWater(None), false, &idle));
        assert!(!command_allowed(
            &Command::LogWater(Some("500".into())),
            false,
            &idle
        ));
        assert!(!command_allowed(&Command::LogFood(None), false, &idle));
        assert!(!command_allowed(&Command::LogWorkout(None), false, &idle));
        assert!(!command_allowed(&Command::CheckProgress, false, &idle));
        assert!(!command_allowed(
            &Command::Unknown("/x".into()),
            false,
            &idle
        ));
    }

    #[test]
    fn profile_unlocks_everything() {
        let idle = ConversationState::Idle;
        assert!(command_allowed(&Command::LogWater(None), true, &idle));
        assert!(command_allowed(&Command::CheckProgress, true, &idle));
        assert!(command_allowed(&Command::Unknown("/x".into()), true, &idle));
    }

    #[test]
    fn setup_in_progress_lets_replies_through() {
        let setup = ConversationState::AwaitingHeight { weight_kg: 70.0 };
        assert!(reply_allowed(false, &setup));
        assert!(command_allowed(&Command::CheckProgress, false, &setup));
    }

    #[test]
    fn idle_profileless_replies_are_gated() {
        assert!(!reply_allowed(false, &ConversationState::Idle));
        assert!(reply_allowed(true, &ConversationState::Idle));
    }
}
