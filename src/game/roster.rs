use std::collections::HashMap;
use std::fmt;

use tracing::{info, warn};

use crate::api::models::{AllGameData, PlayerDto};
use crate::error::AppError;

use super::tally::Tally;

const RAW_CHAMPION_PREFIX: &str = "game_character_displayname_";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Team {
    Order,
    Chaos,
    Unknown,
}

impl Team {
    /// Anything other than "ORDER" is Chaos.
    pub fn from_label(label: &str) -> Self {
        if label == "ORDER" {
            Team::Order
        } else {
            Team::Chaos
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Team::Order => Team::Chaos,
            Team::Chaos => Team::Order,
            Team::Unknown => Team::Unknown,
        }
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Team::Order => "ORDER",
            Team::Chaos => "CHAOS",
            Team::Unknown => "-",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone)]
pub struct Player {
    pub name: String,
    pub champion_name: String,
    pub champion_display_name: String,
    pub team: Team,
    pub tally: Tally,
}

impl Player {
    pub fn from_dto(dto: &PlayerDto) -> Self {
        let champion_name = dto
            .raw_champion_name
            .strip_prefix(RAW_CHAMPION_PREFIX)
            .unwrap_or(&dto.raw_champion_name)
            .to_string();

        Player {
            name: dto.summoner_name.clone(),
            champion_name,
            champion_display_name: dto.champion_name.clone(),
            team: Team::from_label(&dto.team),
            tally: Tally::new(),
        }
    }
}

/// Both teams in join order, plus a name index for event resolution.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    players: Vec<Player>,
    by_name: HashMap<String, usize>,
    active_player: Option<String>,
    active_team: Option<Team>,
}

impl Roster {
    pub fn new() -> Self {
        Roster::default()
    }

    pub fn from_game_data(data: &AllGameData) -> Self {
        let mut roster = Roster::new();
        for dto in &data.all_players {
            roster.add(Player::from_dto(dto));
        }

        if let Some(active) = &data.active_player.summoner_name {
            roster.active_team = roster.find(active).ok().map(|p| p.team);
            roster.active_player = Some(active.clone());
        }

        if roster.is_empty() {
            warn!("Game data listed no players, every event participant will be unknown");
        }

        info!(
            players = roster.len(),
            active_player = roster.active_player.as_deref().unwrap_or("-"),
            active_team = %roster.active_team(),
            "Roster built"
        );

        roster
    }

    /// Adds a player; a repeated name shadows the earlier entry for lookups.
    pub fn add(&mut self, player: Player) {
        let index = self.players.len();
        if self.by_name.insert(player.name.clone(), index).is_some() {
            warn!(name = %player.name, "Duplicate player name in roster, latest entry wins");
        }
        self.players.push(player);
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.players.iter()
    }

    /// Members of `team` in join order; `Team::Unknown` yields everyone.
    pub fn team(&self, team: Team) -> impl Iterator<Item = &Player> {
        self.players
            .iter()
            .filter(move |p| team == Team::Unknown || p.team == team)
    }

    pub fn find(&self, name: &str) -> Result<&Player, AppError> {
        self.by_name
            .get(name)
            .map(|&index| &self.players[index])
            .ok_or_else(|| AppError::PlayerNotFound(name.to_string()))
    }

    pub fn find_mut(&mut self, name: &str) -> Result<&mut Player, AppError> {
        match self.by_name.get(name) {
            Some(&index) => Ok(&mut self.players[index]),
            None => Err(AppError::PlayerNotFound(name.to_string())),
        }
    }

    pub fn active_player(&self) -> Option<&str> {
        self.active_player.as_deref()
    }

    pub fn active_team(&self) -> Team {
        self.active_team.unwrap_or(Team::Unknown)
    }
}
