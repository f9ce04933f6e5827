use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Game has not started yet")]
    GameNotStarted,

    #[error("Live client refused the connection (game finished)")]
    Disconnected,

    #[error("Network error: {0}")]
    Network(String),

    #[error("Live client answered with HTTP status {0}")]
    HttpStatus(u16),

    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    #[error("Player not found: {0}")]
    PlayerNotFound(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Settings error: {0}")]
    SettingsError(String),
}

impl AppError {
    /// The live client stopped listening; the match is over.
    pub fn is_terminal(&self) -> bool {
        matches!(self, AppError::Disconnected)
    }

    /// Failures worth retrying quietly on the next tick.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            AppError::GameNotStarted | AppError::Network(_) | AppError::HttpStatus(_)
        )
    }
}
