use std::cell::Cell;
use std::fs;
use std::path::Path;

use crate::error::AppError;

use super::models::*;
use super::LiveDataSource;

/// Replays `allgamedata` and `eventdata` bodies saved from a live game.
/// The event snapshot is served once, after which the source reports the
/// client as gone so the match finishes.
pub struct RecordedSource {
    game_data: String,
    event_data: String,
    served_events: Cell<bool>,
}

impl RecordedSource {
    pub fn new(game_data: String, event_data: String) -> Self {
        RecordedSource {
            game_data,
            event_data,
            served_events: Cell::new(false),
        }
    }

    pub fn from_files(game_data: &Path, event_data: &Path) -> Result<Self, AppError> {
        let read = |path: &Path| {
            fs::read_to_string(path).map_err(|e| {
                AppError::ConfigError(format!("Failed to read {}: {}", path.display(), e))
            })
        };

        Ok(RecordedSource::new(read(game_data)?, read(event_data)?))
    }
}

impl LiveDataSource for RecordedSource {
    fn all_game_data(&self) -> Result<AllGameData, AppError> {
        parse_all_game_data(&self.game_data)
    }

    fn event_data(&self) -> Result<EventData, AppError> {
        if self.served_events.replace(true) {
            return Err(AppError::Disconnected);
        }
        parse_event_data(&self.event_data)
    }
}
