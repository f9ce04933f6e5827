use chrono::Utc;
use tracing::{debug, warn};

use crate::api::models::RawEvent;

use super::entity::{resolve_killer, resolve_victim, Entity};
use super::event::{EventKind, MatchEvent};
use super::roster::{Roster, Team};

/// Turns raw event records into `MatchEvent`s, rejecting anything at or
/// below the highest index accepted so far.
#[derive(Debug, Default)]
pub struct EventClassifier {
    last_index: u64,
}

impl EventClassifier {
    pub fn new() -> Self {
        EventClassifier::default()
    }

    pub fn last_index(&self) -> u64 {
        self.last_index
    }

    pub fn classify(&mut self, raw: &RawEvent, roster: &Roster) -> Option<MatchEvent> {
        let kind = EventKind::from_event_name(&raw.event_name);
        if raw.event_id <= self.last_index || kind == EventKind::Unknown {
            return None;
        }

        let killer_name = raw.killer_name.as_deref().unwrap_or("Unknown");
        let killer = resolve_killer(killer_name, kind, roster);

        let victim = match kind.victim_field(raw) {
            Some(name) => resolve_victim(name, kind, roster),
            None => {
                warn!(index = raw.event_id, event = %raw.event_name, "Event has no victim field");
                Entity::unknown("")
            }
        };

        let assisters = raw
            .assisters
            .iter()
            .filter_map(|name| match roster.find(name) {
                Ok(player) => Some(player.name.clone()),
                Err(e) => {
                    warn!(index = raw.event_id, error = %e, "Dropping unresolved assister");
                    None
                }
            })
            .collect();

        let team = acting_team(&killer, &victim);

        self.last_index = raw.event_id;
        debug!(index = raw.event_id, %kind, killer = killer.name(), victim = victim.name(), "Event accepted");

        Some(MatchEvent {
            index: raw.event_id,
            kind,
            team,
            killer,
            assisters,
            victim,
            game_time: raw.event_time,
            received_at: Utc::now(),
        })
    }
}

fn acting_team(killer: &Entity, victim: &Entity) -> Team {
    match (killer, victim) {
        (Entity::Player { team, .. } | Entity::Minion { team, .. } | Entity::Turret { team, .. }, _) => *team,
        (_, Entity::Player { team, .. }) => team.opposite(),
        _ => Team::Unknown,
    }
}
