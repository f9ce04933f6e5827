use serde::Deserialize;
use serde_json::Value;

use crate::error::AppError;

// allgamedata response
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllGameData {
    #[serde(default)]
    pub events: Option<EventData>,
    #[serde(default)]
    pub active_player: ActivePlayerDto,
    pub all_players: Vec<PlayerDto>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivePlayerDto {
    #[serde(default)]
    pub summoner_name: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PlayerDto {
    pub summoner_name: String,
    pub champion_name: String,
    #[serde(default)]
    pub raw_champion_name: String,
    pub team: String, // ORDER or CHAOS
}

// eventdata response
#[derive(Debug, Default, Deserialize)]
pub struct EventData {
    #[serde(rename = "Events", default)]
    pub events: Vec<RawEvent>,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(rename_all = "PascalCase")]
pub struct RawEvent {
    pub event_name: String,
    #[serde(rename = "EventID")]
    pub event_id: u64,
    #[serde(default)]
    pub event_time: f64,
    #[serde(default)]
    pub killer_name: Option<String>,
    #[serde(default)]
    pub victim_name: Option<String>,
    #[serde(default)]
    pub turret_killed: Option<String>,
    #[serde(default)]
    pub inhib_killed: Option<String>,
    #[serde(default)]
    pub dragon_type: Option<String>,
    #[serde(default)]
    pub assisters: Vec<String>,
}

/// Parses an `allgamedata` body. A body without a non-null `events` field
/// means the loading screen is still up.
pub fn parse_all_game_data(body: &str) -> Result<AllGameData, AppError> {
    let value: Value =
        serde_json::from_str(body).map_err(|e| AppError::MalformedPayload(e.to_string()))?;

    match value.get("events") {
        None | Some(Value::Null) => return Err(AppError::GameNotStarted),
        Some(_) => {}
    }

    serde_json::from_value(value).map_err(|e| AppError::MalformedPayload(e.to_string()))
}

pub fn parse_event_data(body: &str) -> Result<EventData, AppError> {
    serde_json::from_str(body).map_err(|e| AppError::MalformedPayload(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_events_means_not_started() {
        let body = json!({ "errorCode": "RESOURCE_NOT_FOUND", "httpStatus": 404 }).to_string();
        assert!(matches!(parse_all_game_data(&body), Err(AppError::GameNotStarted)));

        let body = json!({ "events": null, "allPlayers": [] }).to_string();
        assert!(matches!(parse_all_game_data(&body), Err(AppError::GameNotStarted)));
    }

    #[test]
    fn parses_players_and_active_player() {
        let body = json!({
            "activePlayer": { "summonerName": "Mr. Pine" },
            "allPlayers": [{
                "summonerName": "Mr. Pine",
                "championName": "Sivir",
                "rawChampionName": "game_character_displayname_Sivir",
                "team": "ORDER"
            }],
            "events": { "Events": [] }
        })
        .to_string();

        let data = parse_all_game_data(&body).unwrap();
        assert_eq!(data.active_player.summoner_name.as_deref(), Some("Mr. Pine"));
        assert_eq!(data.all_players.len(), 1);
        assert_eq!(data.all_players[0].team, "ORDER");
    }

    #[test]
    fn started_game_with_bad_shape_is_malformed() {
        let body = json!({ "events": { "Events": [] }, "allPlayers": "nope" }).to_string();
        assert!(matches!(parse_all_game_data(&body), Err(AppError::MalformedPayload(_))));
    }

    #[test]
    fn parses_event_fields_by_kind() {
        let body = json!({
            "Events": [
                { "EventID": 0, "EventName": "GameStart", "EventTime": 0.02 },
                {
                    "EventID": 3, "EventName": "ChampionKill", "EventTime": 301.5,
                    "KillerName": "A", "VictimName": "B", "Assisters": ["C"]
                },
                { "EventID": 4, "EventName": "DragonKill", "KillerName": "A", "DragonType": "Air", "Assisters": [] }
            ]
        })
        .to_string();

        let data = parse_event_data(&body).unwrap();
        assert_eq!(data.events.len(), 3);
        assert!(data.events[0].killer_name.is_none());
        assert_eq!(data.events[1].event_id, 3);
        assert_eq!(data.events[1].assisters, vec!["C".to_string()]);
        assert_eq!(data.events[2].dragon_type.as_deref(), Some("Air"));
    }
}
