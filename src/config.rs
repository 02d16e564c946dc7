//! Environment-driven configuration.

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;

use crate::error::ConfigError;

/// Default per-request gateway timeout in seconds.
pub const DEFAULT_GATEWAY_TIMEOUT_SECS: u64 = 8;

/// Telegram transport settings. Present only when a bot token is set.
#[derive(Debug, Clone)]
pub struct TelegramConfig {
    pub bot_token: String,
    /// Usernames and/or numeric ids; `*` allows everyone.
    pub allowed_users: Vec<String>,
}

/// Application configuration.
#[derive(Debug)]
pub struct AppConfig {
    /// OpenWeatherMap API key.
    pub weather_api_key: SecretString,
    /// Enables the Telegram channel when set; CLI otherwise.
    pub telegram: Option<TelegramConfig>,
    /// Per-request timeout for weather/food gateway calls.
    pub gateway_timeout: Duration,
    /// Directory for daily-rotated log files; console-only when unset.
    pub log_dir: Option<PathBuf>,
}

impl AppConfig {
    /// Read configuration from the environment.
    ///
    /// `WEATHER_API_KEY` is required. `TELEGRAM_BOT_TOKEN` switches the
    /// transport, `TELEGRAM_ALLOWED_USERS` defaults to `*`,
    /// `GATEWAY_TIMEOUT_SECS` defaults to 8, `LOG_DIR` is optional.
    pub fn from_env() -> Result<Self, ConfigError> {
        let weather_api_key = std::env::var("WEATHER_API_KEY")
            .map(SecretString::from)
            .map_err(|_| ConfigError::MissingEnvVar("WEATHER_API_KEY".into()))?;

        let telegram = std::env::var("TELEGRAM_BOT_TOKEN")
            .ok()
            .filter(|t| !t.is_empty())
            .map(|bot_token| TelegramConfig {
                bot_token,
                allowed_users: parse_allowed_users(
                    &std::env::var("TELEGRAM_ALLOWED_USERS").unwrap_or_else(|_| "*".to_string()),
                ),
            });

        let gateway_timeout = match std::env::var("GATEWAY_TIMEOUT_SECS") {
            Ok(raw) => {
                let secs: u64 = raw.parse().map_err(|_| ConfigError::InvalidValue {
                    key: "GATEWAY_TIMEOUT_SECS".into(),
                    message: format!("expected a number of seconds, got {raw:?}"),
                })?;
                Duration::from_secs(secs)
            }
            Err(_) => Duration::from_secs(DEFAULT_GATEWAY_TIMEOUT_SECS),
        };

        let log_dir = std::env::var("LOG_DIR").ok().map(PathBuf::from);

        Ok(Self {
            weather_api_key,
            telegram,
            gateway_timeout,
            log_dir,
        })
    }
}

/// Split a comma-separated allowlist, dropping empty entries.
fn parse_allowed_users(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allowlist_splits_and_trims() {
        assert_eq!(
            parse_allowed_users("alice, bob ,123456789"),
            vec!["alice", "bob", "123456789"]
        );
    }

    #[test]
    fn allowlist_drops_empty_entries() {
        assert_eq!(parse_allowed_users("alice,,  ,bob"), vec!["alice", "bob"]);
        assert!(parse_allowed_users("").is_empty());
    }

    #[test]
    fn allowlist_wildcard_passes_through() {
        assert_eq!(parse_allowed_users("*"), vec!["*"]);
    }
}
