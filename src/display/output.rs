use crate::game::entity::Entity;
use crate::game::event::MatchEvent;
use crate::game::roster::{Roster, Team};
use crate::game::tally::{KdaLine, KillDifference};
use crate::game::MatchState;
use crate::settings::Settings;
use super::theme::Theme;
use colored::*;
use tabled::{settings::Style, Table, Tabled};

const GRAPH_WIDTH: usize = 60;
const BLOCKS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

#[derive(Tabled)]
struct PlayerRow {
    summoner: String,
    champion: String,
    #[tabled(rename = "K / D / A")]
    kda: String,
    ratio: String,
}

#[derive(Tabled)]
struct LaneRow {
    opponent: String,
    champion: String,
    kills: u32,
    deaths: u32,
    assists: u32,
}

#[derive(Tabled)]
struct EventRow {
    time: String,
    received: String,
    event: String,
    team: String,
    killer: String,
    victim: String,
    assists: String,
}

pub fn display_error(error: &str) {
    eprintln!("{} {}", "❌ Error:".red().bold(), error);
}

pub fn display_warning(message: &str) {
    eprintln!("{} {}", "⚠️".yellow(), message);
}

pub fn display_info(message: &str) {
    println!("{} {}", "ℹ️".cyan(), message);
}

pub fn display_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

pub fn display_game_finished(rematch: bool) {
    println!("\n{}", "🏁 Game finished".bold().yellow());
    if rematch {
        println!("   Waiting for a new game...\n");
    } else {
        println!("   Run again (or pass --rematch) to detect a new game.\n");
    }
}

/// Full board: both teams, lane KDA for the focus player, the recent event
/// feed and the kill-difference graph.
pub fn display_match(game: &MatchState, focus: Option<&str>, feed: usize, theme: &Theme) {
    display_team(&game.roster, Team::Order, theme);
    display_team(&game.roster, Team::Chaos, theme);

    if let Some(focus) = focus.or(game.roster.active_player()) {
        display_lane_kda(&game.roster, focus, theme);
    }

    display_event_feed(&game.roster, game.events.recent(feed), theme);
    display_kill_difference(&game.kill_difference, theme);
}

pub fn display_team(roster: &Roster, team: Team, theme: &Theme) {
    println!("\n{}", theme.team(&format!("Team {}", team), team).bold());

    let active = roster.active_player();
    let rows: Vec<PlayerRow> = roster
        .team(team)
        .map(|player| {
            let total = player.tally.total();
            let summoner = if Some(player.name.as_str()) == active {
                format!("★ {}", player.name)
            } else {
                player.name.clone()
            };
            PlayerRow {
                summoner,
                champion: player.champion_display_name.clone(),
                kda: kda_string(&total),
                ratio: format!("{:.2}", total.ratio()),
            }
        })
        .collect();

    if rows.is_empty() {
        println!("{}", "  (no players)".dimmed());
        return;
    }

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}", table);
}

pub fn display_lane_kda(roster: &Roster, focus: &str, theme: &Theme) {
    let Ok(player) = roster.find(focus) else {
        display_warning(&format!("Focus player '{}' is not in this game", focus));
        return;
    };

    println!(
        "\n{}",
        theme.title(&format!("⚔️  Lane KDA for {} ({})", player.name, player.champion_display_name))
    );
    println!("{}", theme.rule(60));

    let rows: Vec<LaneRow> = roster
        .team(player.team.opposite())
        .map(|opponent| {
            let line = player.tally.against(&opponent.name);
            LaneRow {
                opponent: opponent.name.clone(),
                champion: opponent.champion_display_name.clone(),
                kills: line.kills,
                deaths: line.deaths,
                assists: line.assists,
            }
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}", table);
}

pub fn display_event_feed<'a>(
    roster: &Roster,
    events: impl Iterator<Item = &'a MatchEvent>,
    theme: &Theme,
) {
    println!("\n{}", theme.title("📜 Events"));
    println!("{}", theme.rule(60));

    let rows: Vec<EventRow> = events
        .map(|event| EventRow {
            time: event.game_clock(),
            received: event.received_clock(),
            event: event.kind.to_string(),
            team: theme.team(&event.team.to_string(), event.team).to_string(),
            killer: entity_label(&event.killer, roster),
            victim: entity_label(&event.victim, roster),
            assists: event
                .assisters
                .iter()
                .map(|name| champion_of(name, roster))
                .collect::<Vec<_>>()
                .join(", "),
        })
        .collect();

    if rows.is_empty() {
        println!("{}", "No events yet".dimmed());
        return;
    }

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}", table);
}

pub fn display_kill_difference(kill_difference: &KillDifference, theme: &Theme) {
    let current = kill_difference.current();
    let leader = match current.signum() {
        1 => Team::Order,
        -1 => Team::Chaos,
        _ => Team::Unknown,
    };

    println!("\n{}", theme.title("📈 Kill difference"));
    println!("{}", theme.rule(60));

    let series = kill_difference.series();
    let start = series.len().saturating_sub(GRAPH_WIDTH);
    let bars = kill_difference_bars(&series[start..], kill_difference.max_abs());

    let graph: String = series[start..]
        .iter()
        .zip(bars.chars())
        .map(|(value, bar)| {
            let team = match value.signum() {
                1 => Team::Order,
                -1 => Team::Chaos,
                _ => Team::Unknown,
            };
            theme.team(&bar.to_string(), team).to_string()
        })
        .collect();

    println!("{}", graph);
    println!(
        "{} {}   (peak ±{})\n",
        "Current:".bold(),
        theme.team(&format!("{:+}", current), leader),
        kill_difference.max_abs()
    );
}

/// One glyph per entry, bar height proportional to |value| / max_abs.
pub fn kill_difference_bars(series: &[i32], max_abs: i32) -> String {
    let max_abs = max_abs.max(1);
    series
        .iter()
        .map(|value| {
            if *value == 0 {
                return '·';
            }
            let level = (value.abs() * BLOCKS.len() as i32 + max_abs - 1) / max_abs;
            BLOCKS[(level.clamp(1, BLOCKS.len() as i32) - 1) as usize]
        })
        .collect()
}

pub fn display_settings(settings: &Settings, path: &std::path::Path) {
    let (r, g, b) = settings.main_rgb();

    println!("\n{}", "🎨 Settings".bold().cyan());
    println!("{}", "=".repeat(60).cyan());
    println!(
        "  Main color:     {} #{:02X}{:02X}{:02X}",
        "■■■".truecolor(r, g, b),
        r,
        g,
        b
    );
    println!("  Contrast:       {:.2}", settings.colors.contrast);
    println!("  Switch colors:  {}", settings.switch_team_colors);
    println!("  File:           {}\n", path.display());
}

fn kda_string(line: &KdaLine) -> String {
    format!("{} / {} / {}", line.kills, line.deaths, line.assists)
}

fn champion_of(name: &str, roster: &Roster) -> String {
    roster
        .find(name)
        .map(|p| p.champion_display_name.clone())
        .unwrap_or_else(|_| name.to_string())
}

fn entity_label(entity: &Entity, roster: &Roster) -> String {
    match entity {
        Entity::Player { name, .. } => format!("{} ({})", name, champion_of(name, roster)),
        Entity::Turret { team, .. } => format!("Turret ({})", team),
        Entity::Minion { team, .. } => format!("Minions ({})", team),
        Entity::Inhibitor { team, .. } => format!("Inhibitor ({})", team),
        Entity::Monster { kind, .. } => kind.to_string(),
        Entity::Unknown { name } if name.is_empty() => "?".to_string(),
        Entity::Unknown { name } => name.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::entity::MonsterKind;
    use crate::game::test_support::sample_roster;

    #[test]
    fn bars_scale_to_peak() {
        assert_eq!(kill_difference_bars(&[0, 1, 2, -4, -2], 4), "·▂▄█▄");
        assert_eq!(kill_difference_bars(&[0, 1], 1), "·█");
    }

    #[test]
    fn labels_entities_for_the_feed() {
        let roster = sample_roster();

        let player = Entity::Player { name: "Red One".into(), team: Team::Chaos };
        assert_eq!(entity_label(&player, &roster), "Red One (Ahri)");
        assert_eq!(entity_label(&Entity::turret("Turret_T1_L_02_A"), &roster), "Turret (ORDER)");
        let dragon = Entity::Monster { name: "Water".into(), kind: MonsterKind::DragonWater };
        assert_eq!(entity_label(&dragon, &roster), "dragon_water");
        assert_eq!(entity_label(&Entity::unknown(""), &roster), "?");
    }

    #[test]
    fn formats_kda_line() {
        let line = KdaLine { kills: 4, deaths: 1, assists: 7 };
        assert_eq!(kda_string(&line), "4 / 1 / 7");
    }
}
