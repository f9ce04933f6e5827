//! Shared fixtures for the match engine tests.

use serde_json::json;

use crate::api::models::{AllGameData, RawEvent};

use super::roster::Roster;

/// Two Order players (the active one first) and two Chaos players.
pub fn sample_game_data() -> AllGameData {
    serde_json::from_value(json!({
        "activePlayer": { "summonerName": "Mr. Pine" },
        "allPlayers": [
            { "summonerName": "Mr. Pine", "championName": "Sivir",
              "rawChampionName": "game_character_displayname_Sivir", "team": "ORDER" },
            { "summonerName": "Blue Two", "championName": "Lee Sin",
              "rawChampionName": "game_character_displayname_LeeSin", "team": "ORDER" },
            { "summonerName": "Red One", "championName": "Ahri",
              "rawChampionName": "game_character_displayname_Ahri", "team": "CHAOS" },
            { "summonerName": "Red Two", "championName": "Thresh",
              "rawChampionName": "Thresh", "team": "NEUTRAL" }
        ],
        "events": { "Events": [] }
    }))
    .expect("fixture should deserialize")
}

pub fn sample_roster() -> Roster {
    Roster::from_game_data(&sample_game_data())
}

pub fn raw_event(index: u64, name: &str, killer: &str) -> RawEvent {
    RawEvent {
        event_name: name.to_string(),
        event_id: index,
        event_time: index as f64 * 30.0,
        killer_name: Some(killer.to_string()),
        ..RawEvent::default()
    }
}

pub fn raw_kill(index: u64, killer: &str, victim: &str, assisters: &[&str]) -> RawEvent {
    RawEvent {
        victim_name: Some(victim.to_string()),
        assisters: assisters.iter().map(|a| a.to_string()).collect(),
        ..raw_event(index, "ChampionKill", killer)
    }
}
