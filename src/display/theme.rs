use colored::{ColoredString, Colorize};

use crate::game::roster::Team;
use crate::settings::Settings;

type Rgb = (u8, u8, u8);

const ORDER_COLOR: Rgb = (0x0A, 0x96, 0xAA);
const CHAOS_COLOR: Rgb = (0xBE, 0x1E, 0x37);

/// Terminal colors derived from the persisted settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub accent: Rgb,
    pub header: Rgb,
    order: Rgb,
    chaos: Rgb,
}

impl Theme {
    /// With `switchColors` set, the local player's team is always drawn in
    /// the Order blue.
    pub fn from_settings(settings: &Settings, active_team: Team) -> Self {
        let accent = settings.main_rgb();
        let header = darken(accent, settings.colors.contrast / 2.0);

        let (order, chaos) = if settings.switch_team_colors && active_team == Team::Chaos {
            (CHAOS_COLOR, ORDER_COLOR)
        } else {
            (ORDER_COLOR, CHAOS_COLOR)
        };

        Theme {
            accent,
            header,
            order,
            chaos,
        }
    }

    pub fn team_color(&self, team: Team) -> Rgb {
        match team {
            Team::Order => self.order,
            Team::Chaos => self.chaos,
            Team::Unknown => (0x90, 0x90, 0x90),
        }
    }

    pub fn team(&self, text: &str, team: Team) -> ColoredString {
        let (r, g, b) = self.team_color(team);
        text.truecolor(r, g, b)
    }

    pub fn title(&self, text: &str) -> ColoredString {
        let (r, g, b) = self.header;
        text.truecolor(r, g, b).bold()
    }

    pub fn rule(&self, width: usize) -> ColoredString {
        let (r, g, b) = self.accent;
        "=".repeat(width).truecolor(r, g, b)
    }
}

fn darken((r, g, b): Rgb, amount: f32) -> Rgb {
    let keep = 1.0 - amount.clamp(0.0, 1.0);
    let scale = |c: u8| (c as f32 * keep).round() as u8;
    (scale(r), scale(g), scale(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn switch_swaps_colors_only_for_chaos_players() {
        let mut settings = Settings::default();
        settings.switch_team_colors = true;

        let chaos_view = Theme::from_settings(&settings, Team::Chaos);
        assert_eq!(chaos_view.team_color(Team::Chaos), ORDER_COLOR);

        let order_view = Theme::from_settings(&settings, Team::Order);
        assert_eq!(order_view.team_color(Team::Order), ORDER_COLOR);

        settings.switch_team_colors = false;
        let plain = Theme::from_settings(&settings, Team::Chaos);
        assert_eq!(plain.team_color(Team::Chaos), CHAOS_COLOR);
    }

    #[test]
    fn contrast_darkens_header() {
        let mut settings = Settings::default();
        settings.set_main_rgb(0xC8C8C8);
        settings.colors.contrast = 1.0;

        let theme = Theme::from_settings(&settings, Team::Order);
        assert_eq!(theme.accent, (200, 200, 200));
        assert_eq!(theme.header, (100, 100, 100));
    }
}
