use std::fmt;

use tracing::warn;

use super::event::EventKind;
use super::roster::{Roster, Team};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MinionKind {
    Normal,
    Super,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonsterKind {
    DragonAir,
    DragonEarth,
    DragonFire,
    DragonWater,
    DragonHextech,
    DragonChemtech,
    DragonElder,
    Baron,
    Unknown,
}

impl MonsterKind {
    pub fn from_name(name: &str) -> Self {
        let lower = name.to_ascii_lowercase();
        if lower.contains("air") {
            MonsterKind::DragonAir
        } else if lower.contains("earth") {
            MonsterKind::DragonEarth
        } else if lower.contains("fire") {
            MonsterKind::DragonFire
        } else if lower.contains("water") {
            MonsterKind::DragonWater
        } else if lower.contains("hextech") {
            MonsterKind::DragonHextech
        } else if lower.contains("chemtech") {
            MonsterKind::DragonChemtech
        } else if lower.contains("elder") {
            MonsterKind::DragonElder
        } else if lower.contains("baron") {
            MonsterKind::Baron
        } else {
            MonsterKind::Unknown
        }
    }
}

impl fmt::Display for MonsterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MonsterKind::DragonAir => "dragon_air",
            MonsterKind::DragonEarth => "dragon_earth",
            MonsterKind::DragonFire => "dragon_fire",
            MonsterKind::DragonWater => "dragon_water",
            MonsterKind::DragonHextech => "dragon_hextech",
            MonsterKind::DragonChemtech => "dragon_chemtech",
            MonsterKind::DragonElder => "dragon_elder",
            MonsterKind::Baron => "baron",
            MonsterKind::Unknown => "monster",
        };
        f.write_str(label)
    }
}

/// A participant in one event, built fresh from the raw name the game reported.
#[derive(Debug, Clone, PartialEq)]
pub enum Entity {
    Player { name: String, team: Team },
    Turret { name: String, team: Team },
    Minion { name: String, team: Team, kind: MinionKind },
    Inhibitor { name: String, team: Team },
    Monster { name: String, kind: MonsterKind },
    Unknown { name: String },
}

impl Entity {
    // Structure names encode the side: T1 is Order, T2 is Chaos.
    pub fn turret(name: &str) -> Self {
        Entity::Turret {
            name: name.to_string(),
            team: structure_team(name),
        }
    }

    pub fn inhibitor(name: &str) -> Self {
        Entity::Inhibitor {
            name: name.to_string(),
            team: structure_team(name),
        }
    }

    pub fn minion(name: &str) -> Self {
        let team = if name.starts_with("Minion_T2") {
            Team::Chaos
        } else {
            Team::Order
        };
        let kind = if name.contains("L0") {
            MinionKind::Super
        } else {
            MinionKind::Normal
        };

        Entity::Minion {
            name: name.to_string(),
            team,
            kind,
        }
    }

    pub fn monster(name: &str) -> Self {
        Entity::Monster {
            name: name.to_string(),
            kind: MonsterKind::from_name(name),
        }
    }

    pub fn unknown(name: &str) -> Self {
        Entity::Unknown {
            name: name.to_string(),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Entity::Player { name, .. }
            | Entity::Turret { name, .. }
            | Entity::Minion { name, .. }
            | Entity::Inhibitor { name, .. }
            | Entity::Monster { name, .. }
            | Entity::Unknown { name } => name,
        }
    }

    pub fn team(&self) -> Team {
        match self {
            Entity::Player { team, .. }
            | Entity::Turret { team, .. }
            | Entity::Minion { team, .. }
            | Entity::Inhibitor { team, .. } => *team,
            Entity::Monster { .. } | Entity::Unknown { .. } => Team::Unknown,
        }
    }

    pub fn player_name(&self) -> Option<&str> {
        match self {
            Entity::Player { name, .. } => Some(name),
            _ => None,
        }
    }
}

fn structure_team(name: &str) -> Team {
    if name.contains("T1") {
        Team::Order
    } else {
        Team::Chaos
    }
}

/// One step of name classification. Rules are tried in order; the first
/// match wins and the player lookup runs only when none match.
struct Rule {
    matches: fn(&str, EventKind) -> bool,
    build: fn(&str) -> Entity,
}

fn is_turret(name: &str, _: EventKind) -> bool {
    name.starts_with("Turret")
}

fn is_minion(name: &str, _: EventKind) -> bool {
    name.starts_with("Minion")
}

fn is_jungle_camp(name: &str, _: EventKind) -> bool {
    name.starts_with("SRU")
}

fn is_unknown_literal(name: &str, _: EventKind) -> bool {
    name == "Unknown"
}

fn is_inhibitor(name: &str, _: EventKind) -> bool {
    name.starts_with("Barracks")
}

fn is_epic_monster(name: &str, kind: EventKind) -> bool {
    kind == EventKind::DragonKill || name.to_ascii_lowercase().contains("baron")
}

const KILLER_RULES: &[Rule] = &[
    Rule { matches: is_turret, build: Entity::turret },
    Rule { matches: is_minion, build: Entity::minion },
    Rule { matches: is_jungle_camp, build: Entity::monster },
    Rule { matches: is_unknown_literal, build: Entity::unknown },
];

const VICTIM_RULES: &[Rule] = &[
    Rule { matches: is_turret, build: Entity::turret },
    Rule { matches: is_minion, build: Entity::minion },
    Rule { matches: is_inhibitor, build: Entity::inhibitor },
    Rule { matches: is_epic_monster, build: Entity::monster },
    Rule { matches: is_jungle_camp, build: Entity::monster },
    Rule { matches: is_unknown_literal, build: Entity::unknown },
];

pub fn resolve_killer(name: &str, kind: EventKind, roster: &Roster) -> Entity {
    resolve(name, kind, KILLER_RULES, roster)
}

pub fn resolve_victim(name: &str, kind: EventKind, roster: &Roster) -> Entity {
    resolve(name, kind, VICTIM_RULES, roster)
}

fn resolve(name: &str, kind: EventKind, rules: &[Rule], roster: &Roster) -> Entity {
    if let Some(rule) = rules.iter().find(|rule| (rule.matches)(name, kind)) {
        return (rule.build)(name);
    }

    match roster.find(name) {
        Ok(player) => Entity::Player {
            name: player.name.clone(),
            team: player.team,
        },
        Err(e) => {
            warn!(participant = name, error = %e, "Unresolved event participant");
            Entity::unknown(name)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::test_support::sample_roster;

    #[test]
    fn killer_rules_follow_precedence() {
        let roster = sample_roster();
        let kind = EventKind::ChampionKill;

        assert_eq!(
            resolve_killer("Turret_T1_C_01", kind, &roster),
            Entity::Turret { name: "Turret_T1_C_01".into(), team: Team::Order }
        );
        assert!(matches!(
            resolve_killer("Minion_T2L1S02N0003", kind, &roster),
            Entity::Minion { team: Team::Chaos, kind: MinionKind::Normal, .. }
        ));
        assert!(matches!(
            resolve_killer("SRU_Baron17.1.1", kind, &roster),
            Entity::Monster { kind: MonsterKind::Baron, .. }
        ));
        assert_eq!(resolve_killer("Unknown", kind, &roster), Entity::unknown("Unknown"));
        assert_eq!(
            resolve_killer("Red One", kind, &roster),
            Entity::Player { name: "Red One".into(), team: Team::Chaos }
        );
    }

    #[test]
    fn victim_rules_cover_structures_and_epic_monsters() {
        let roster = sample_roster();

        assert!(matches!(
            resolve_victim("Barracks_T2_R1", EventKind::InhibKilled, &roster),
            Entity::Inhibitor { team: Team::Chaos, .. }
        ));
        assert_eq!(
            resolve_victim("Turret_T2_L_03_A", EventKind::TurretKilled, &roster).team(),
            Team::Chaos
        );
        assert!(matches!(
            resolve_victim("Dragon_Air", EventKind::DragonKill, &roster),
            Entity::Monster { kind: MonsterKind::DragonAir, .. }
        ));
        assert!(matches!(
            resolve_victim("baron", EventKind::ChampionKill, &roster),
            Entity::Monster { kind: MonsterKind::Baron, .. }
        ));
    }

    #[test]
    fn dragon_events_never_resolve_to_players() {
        let roster = sample_roster();
        // A dragon type that happens to collide with a summoner name
        let victim = resolve_victim("Mr. Pine", EventKind::DragonKill, &roster);
        assert!(matches!(victim, Entity::Monster { kind: MonsterKind::Unknown, .. }));
    }

    #[test]
    fn unmatched_names_become_unknown_entities() {
        let roster = sample_roster();
        let entity = resolve_killer("Somebody Else", EventKind::ChampionKill, &roster);
        assert_eq!(entity, Entity::unknown("Somebody Else"));
        assert_eq!(entity.team(), Team::Unknown);
    }

    #[test]
    fn super_minions_and_order_minions() {
        assert!(matches!(
            Entity::minion("Minion_T1L0S11N0100"),
            Entity::Minion { team: Team::Order, kind: MinionKind::Super, .. }
        ));
    }

    #[test]
    fn monster_kinds_from_dragon_type() {
        assert_eq!(MonsterKind::from_name("Earth"), MonsterKind::DragonEarth);
        assert_eq!(MonsterKind::from_name("Chemtech"), MonsterKind::DragonChemtech);
        assert_eq!(MonsterKind::from_name("Elder"), MonsterKind::DragonElder);
        assert_eq!(MonsterKind::from_name("SRU_RiftHerald"), MonsterKind::Unknown);
        assert_eq!(MonsterKind::DragonFire.to_string(), "dragon_fire");
    }
}
