use std::collections::HashMap;

use super::entity::Entity;
use super::event::{EventKind, MatchEvent};
use super::roster::{Roster, Team};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KdaLine {
    pub kills: u32,
    pub deaths: u32,
    pub assists: u32,
}

impl KdaLine {
    pub fn ratio(&self) -> f64 {
        let takedowns = (self.kills + self.assists) as f64;
        if self.deaths == 0 {
            takedowns
        } else {
            takedowns / self.deaths as f64
        }
    }
}

/// Aggregate KDA plus a per-opponent breakdown (lane KDA).
#[derive(Debug, Clone, Default)]
pub struct Tally {
    total: KdaLine,
    against: HashMap<String, KdaLine>,
}

impl Tally {
    pub fn new() -> Self {
        Tally::default()
    }

    pub fn total(&self) -> KdaLine {
        self.total
    }

    /// Absent opponents read as an all-zero line.
    pub fn against(&self, opponent: &str) -> KdaLine {
        self.against.get(opponent).copied().unwrap_or_default()
    }

    pub fn opponents(&self) -> impl Iterator<Item = (&str, &KdaLine)> {
        self.against.iter().map(|(name, line)| (name.as_str(), line))
    }

    pub fn add_kill(&mut self, victim: &str) {
        self.total.kills += 1;
        self.entry(victim).kills += 1;
    }

    pub fn add_death(&mut self, killer: Option<&str>) {
        self.total.deaths += 1;
        if let Some(killer) = killer {
            self.entry(killer).deaths += 1;
        }
    }

    pub fn add_assist(&mut self, victim: &str) {
        self.total.assists += 1;
        self.entry(victim).assists += 1;
    }

    fn entry(&mut self, opponent: &str) -> &mut KdaLine {
        self.against.entry(opponent.to_string()).or_default()
    }
}

/// Running Order-minus-Chaos kill count, one entry per player kill.
#[derive(Debug, Clone)]
pub struct KillDifference {
    series: Vec<i32>,
    max_abs: i32,
}

impl Default for KillDifference {
    fn default() -> Self {
        KillDifference {
            series: vec![0],
            max_abs: 1,
        }
    }
}

impl KillDifference {
    pub fn new() -> Self {
        KillDifference::default()
    }

    pub fn series(&self) -> &[i32] {
        &self.series
    }

    pub fn current(&self) -> i32 {
        self.series.last().copied().unwrap_or(0)
    }

    pub fn max_abs(&self) -> i32 {
        self.max_abs
    }

    pub fn record(&mut self, scoring_team: Team) {
        let step = if scoring_team == Team::Order { 1 } else { -1 };
        let next = self.current() + step;
        self.series.push(next);
        self.max_abs = self.max_abs.max(next.abs());
    }
}

/// Applies an accepted champion kill to the players' tallies and the
/// kill-difference series. Other event kinds are ignored.
pub fn apply_kill(roster: &mut Roster, kill_difference: &mut KillDifference, event: &MatchEvent) {
    if event.kind != EventKind::ChampionKill {
        return;
    }

    let Entity::Player { name: victim, .. } = &event.victim else {
        return;
    };

    match &event.killer {
        Entity::Player { name: killer, team } => {
            if let Ok(player) = roster.find_mut(killer) {
                player.tally.add_kill(victim);
            }
            if let Ok(player) = roster.find_mut(victim) {
                player.tally.add_death(Some(killer));
            }
            for assister in &event.assisters {
                if let Ok(player) = roster.find_mut(assister) {
                    player.tally.add_assist(victim);
                }
            }
            kill_difference.record(*team);
        }
        _ => {
            if let Ok(player) = roster.find_mut(victim) {
                player.tally.add_death(None);
            }
        }
    }
}
