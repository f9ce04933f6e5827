use crate::error::AppError;
use crate::api::endpoints::DEFAULT_BASE_URL;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: String,
    pub game_poll_interval: Duration,
    pub event_poll_interval: Duration,
    pub request_timeout: Duration,
    pub settings_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            base_url: DEFAULT_BASE_URL.to_string(),
            game_poll_interval: Duration::from_millis(5000),
            event_poll_interval: Duration::from_millis(3000),
            request_timeout: Duration::from_millis(2000),
            settings_path: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let defaults = Config::default();

        let base_url = env::var("LIVE_CLIENT_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or(defaults.base_url);

        let game_poll_interval = millis_var("GAME_POLL_MS")?.unwrap_or(defaults.game_poll_interval);
        let event_poll_interval =
            millis_var("EVENT_POLL_MS")?.unwrap_or(defaults.event_poll_interval);
        let request_timeout = millis_var("REQUEST_TIMEOUT_MS")?.unwrap_or(defaults.request_timeout);

        let settings_path = env::var("LEAGUE_LIVE_SETTINGS").ok().map(PathBuf::from);

        Ok(Config {
            base_url,
            game_poll_interval,
            event_poll_interval,
            request_timeout,
            settings_path,
        })
    }
}

fn millis_var(key: &str) -> Result<Option<Duration>, AppError> {
    match env::var(key) {
        Ok(raw) => parse_millis(key, &raw).map(Some),
        Err(_) => Ok(None),
    }
}

fn parse_millis(key: &str, raw: &str) -> Result<Duration, AppError> {
    raw.trim()
        .parse::<u64>()
        .map(Duration::from_millis)
        .map_err(|_| AppError::ConfigError(format!("{} must be a number of milliseconds, got '{}'", key, raw)))
}
