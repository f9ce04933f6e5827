pub mod client;
pub mod endpoints;
pub mod models;
pub mod recorded;

use crate::error::AppError;
use models::{AllGameData, EventData};

/// Where match snapshots come from: the running game, or files recorded from it.
pub trait LiveDataSource {
    fn all_game_data(&self) -> Result<AllGameData, AppError>;
    fn event_data(&self) -> Result<EventData, AppError>;
}
