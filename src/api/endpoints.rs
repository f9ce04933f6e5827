// Live Client Data API endpoints, served by the game process on loopback only.

pub const DEFAULT_BASE_URL: &str = "https://127.0.0.1:2999";

pub const ALL_GAME_DATA_PATH: &str = "/liveclientdata/allgamedata";
pub const EVENT_DATA_PATH: &str = "/liveclientdata/eventdata";

pub fn url(base: &str, path: &str) -> String {
    format!("{}{}", base.trim_end_matches('/'), path)
}
