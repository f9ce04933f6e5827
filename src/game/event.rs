use std::fmt;

use chrono::{DateTime, Local, Utc};

use crate::api::models::RawEvent;

use super::entity::Entity;
use super::roster::Team;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    ChampionKill,
    TurretKilled,
    InhibKilled,
    DragonKill,
    Unknown,
}

impl EventKind {
    pub fn from_event_name(name: &str) -> Self {
        match name {
            "ChampionKill" => EventKind::ChampionKill,
            "TurretKilled" => EventKind::TurretKilled,
            "InhibKilled" => EventKind::InhibKilled,
            "DragonKill" => EventKind::DragonKill,
            _ => EventKind::Unknown,
        }
    }

    /// The raw field that names the victim for this kind of event.
    pub fn victim_field<'a>(&self, raw: &'a RawEvent) -> Option<&'a str> {
        let field = match self {
            EventKind::ChampionKill => &raw.victim_name,
            EventKind::TurretKilled => &raw.turret_killed,
            EventKind::InhibKilled => &raw.inhib_killed,
            EventKind::DragonKill => &raw.dragon_type,
            EventKind::Unknown => return None,
        };
        field.as_deref()
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EventKind::ChampionKill => "Kill",
            EventKind::TurretKilled => "Turret",
            EventKind::InhibKilled => "Inhibitor",
            EventKind::DragonKill => "Dragon",
            EventKind::Unknown => "?",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone)]
pub struct MatchEvent {
    pub index: u64,
    pub kind: EventKind,
    pub team: Team,
    pub killer: Entity,
    pub assisters: Vec<String>,
    pub victim: Entity,
    /// Seconds since the game started.
    pub game_time: f64,
    /// Wall-clock time the poller first saw the event.
    pub received_at: DateTime<Utc>,
}

impl MatchEvent {
    pub fn game_clock(&self) -> String {
        let seconds = self.game_time.max(0.0) as u64;
        format!("{:02}:{:02}", seconds / 60, seconds % 60)
    }

    pub fn received_clock(&self) -> String {
        self.received_at.with_timezone(&Local).format("%H:%M:%S").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_known_event_names_exactly() {
        assert_eq!(EventKind::from_event_name("ChampionKill"), EventKind::ChampionKill);
        assert_eq!(EventKind::from_event_name("TurretKilled"), EventKind::TurretKilled);
        assert_eq!(EventKind::from_event_name("InhibKilled"), EventKind::InhibKilled);
        assert_eq!(EventKind::from_event_name("DragonKill"), EventKind::DragonKill);
        assert_eq!(EventKind::from_event_name("championkill"), EventKind::Unknown);
        assert_eq!(EventKind::from_event_name("BaronKill"), EventKind::Unknown);
    }

    #[test]
    fn victim_field_depends_on_kind() {
        let raw = RawEvent {
            victim_name: Some("victim".into()),
            turret_killed: Some("turret".into()),
            inhib_killed: Some("inhib".into()),
            dragon_type: Some("Fire".into()),
            ..RawEvent::default()
        };

        assert_eq!(EventKind::ChampionKill.victim_field(&raw), Some("victim"));
        assert_eq!(EventKind::TurretKilled.victim_field(&raw), Some("turret"));
        assert_eq!(EventKind::InhibKilled.victim_field(&raw), Some("inhib"));
        assert_eq!(EventKind::DragonKill.victim_field(&raw), Some("Fire"));
        assert_eq!(EventKind::Unknown.victim_field(&raw), None);
    }

    #[test]
    fn clocks_show_game_time_and_local_receive_time() {
        let received_at = DateTime::parse_from_rfc3339("2024-05-01T18:04:09Z")
            .unwrap()
            .with_timezone(&Utc);
        let event = MatchEvent {
            index: 3,
            kind: EventKind::ChampionKill,
            team: Team::Order,
            killer: Entity::unknown("Unknown"),
            assisters: Vec::new(),
            victim: Entity::unknown(""),
            game_time: 212.4,
            received_at,
        };

        assert_eq!(event.game_clock(), "03:32");
        let local = received_at.with_timezone(&Local);
        assert_eq!(event.received_clock(), local.format("%H:%M:%S").to_string());
        assert_eq!(event.received_clock().len(), 8);
    }
}
