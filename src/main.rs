mod api;
mod config;
mod display;
mod error;
mod game;
mod logging;
mod poller;
mod settings;
mod state;

use anyhow::{anyhow, bail, Context};
use api::client::LiveClientApi;
use api::recorded::RecordedSource;
use api::LiveDataSource;
use clap::{Parser, Subcommand};
use config::Config;
use display::output::{
    display_error, display_game_finished, display_info, display_match, display_settings,
    display_success, display_warning,
};
use display::theme::Theme;
use game::roster::Team;
use indicatif::ProgressBar;
use poller::Poller;
use settings::{Settings, SettingsSaver, SAVE_DEBOUNCE};
use state::{GamePhase, StateChange, StateStore};
use std::path::PathBuf;
use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "League Live")]
#[command(about = "Live KDA, lane matchups and kill feed for the game running on this machine", long_about = None)]
struct Args {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Wait for a game to start and track it live
    Watch {
        /// Summoner whose lane KDA is shown (default: you)
        #[arg(short, long)]
        focus: Option<String>,

        /// Number of events shown in the feed
        #[arg(long, default_value = "10")]
        feed: usize,

        /// Keep running after the game ends and pick up the next one
        #[arg(long)]
        rematch: bool,
    },

    /// Run saved allgamedata/eventdata responses through the tracker
    Replay {
        /// Saved /liveclientdata/allgamedata body
        game_data: PathBuf,

        /// Saved /liveclientdata/eventdata body
        event_data: PathBuf,

        #[arg(short, long)]
        focus: Option<String>,

        #[arg(long, default_value = "10")]
        feed: usize,
    },

    /// Show or change display settings
    Settings {
        /// Main color as RRGGBB
        #[arg(long)]
        color: Option<String>,

        /// Header contrast, 0.0 - 1.0
        #[arg(long)]
        contrast: Option<f32>,

        /// Always draw your own team in blue
        #[arg(long)]
        switch_colors: Option<bool>,
    },
}

const WORKER_CHECK_INTERVAL: Duration = Duration::from_millis(250);

struct View {
    focus: Option<String>,
    feed: usize,
}

fn main() {
    let args = Args::parse();
    logging::init(args.verbose);

    if let Err(e) = run(args) {
        display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    let config = Config::from_env()?;
    let settings_path = config
        .settings_path
        .clone()
        .unwrap_or_else(Settings::default_path);
    let settings = Settings::load_or_create(&settings_path).context("Loading settings")?;

    match args.command {
        Command::Watch { focus, feed, rematch } => {
            display_info(&format!("Polling live client at {}", config.base_url));
            let client = LiveClientApi::new(config.clone())?;
            track(client, &config, &settings, View { focus, feed }, rematch)
        }
        Command::Replay {
            game_data,
            event_data,
            focus,
            feed,
        } => {
            let source = RecordedSource::from_files(&game_data, &event_data)
                .context("Loading recorded snapshots")?;
            let config = Config {
                game_poll_interval: Duration::ZERO,
                event_poll_interval: Duration::ZERO,
                ..config
            };
            track(source, &config, &settings, View { focus, feed }, false)
        }
        Command::Settings {
            color,
            contrast,
            switch_colors,
        } => update_settings(settings_path, settings, color, contrast, switch_colors),
    }
}

fn track<S>(source: S, config: &Config, settings: &Settings, view: View, rematch: bool) -> anyhow::Result<()>
where
    S: LiveDataSource + Send + 'static,
{
    let store = Arc::new(StateStore::new());
    let changes = store.subscribe();

    let poller = Poller::new(
        source,
        Arc::clone(&store),
        config.game_poll_interval,
        config.event_poll_interval,
    );
    let worker = thread::Builder::new()
        .name("poller".to_string())
        .spawn(move || {
            if rematch {
                poller.run_forever()
            } else {
                poller.run_match()
            }
        })
        .context("Starting poller thread")?;

    let mut spinner = Some(waiting_spinner());
    let mut theme = Theme::from_settings(settings, Team::Unknown);

    while let Some(change) = next_change(&changes, &worker) {
        match change {
            StateChange::Phase(GamePhase::WaitingForGame) => {
                spinner = Some(waiting_spinner());
            }
            StateChange::Phase(GamePhase::InProgress) => {
                if let Some(spinner) = spinner.take() {
                    spinner.finish_and_clear();
                }
                store.read(|_, game| {
                    if let Some(game) = game {
                        theme = Theme::from_settings(settings, game.roster.active_team());
                        display_success(&format!("Game found with {} players", game.roster.len()));
                        display_match(game, view.focus.as_deref(), view.feed, &theme);
                    }
                });
            }
            StateChange::EventsAdded(count) => {
                store.read(|_, game| {
                    if let Some(game) = game {
                        display_info(&format!("{} new event(s), {} total", count, game.events.len()));
                        display_match(game, view.focus.as_deref(), view.feed, &theme);
                    }
                });
            }
            StateChange::PollFailed(message) => display_warning(&message),
            StateChange::Phase(GamePhase::Finished) => {
                display_game_finished(rematch);
                if !rematch {
                    break;
                }
            }
        }
    }

    worker.join().map_err(|_| anyhow!("Poller thread panicked"))?;
    Ok(())
}

/// Waits for the next change. Returns `None` once the poller thread has
/// exited and nothing is left to drain, even though the store still holds
/// its sender.
fn next_change<T>(changes: &Receiver<StateChange>, worker: &JoinHandle<T>) -> Option<StateChange> {
    loop {
        match changes.recv_timeout(WORKER_CHECK_INTERVAL) {
            Ok(change) => return Some(change),
            Err(RecvTimeoutError::Timeout) if !worker.is_finished() => continue,
            Err(RecvTimeoutError::Timeout) => return changes.try_recv().ok(),
            Err(RecvTimeoutError::Disconnected) => return None,
        }
    }
}

fn waiting_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_message("Waiting for a game to start...");
    spinner.enable_steady_tick(Duration::from_millis(120));
    spinner
}

fn update_settings(
    path: PathBuf,
    settings: Settings,
    color: Option<String>,
    contrast: Option<f32>,
    switch_colors: Option<bool>,
) -> anyhow::Result<()> {
    if color.is_none() && contrast.is_none() && switch_colors.is_none() {
        display_settings(&settings, &path);
        return Ok(());
    }

    let color = color.as_deref().map(settings::parse_rgb).transpose()?;
    if let Some(contrast) = contrast {
        if !(0.0..=1.0).contains(&contrast) {
            bail!("Contrast must be between 0.0 and 1.0, got {}", contrast);
        }
    }

    let mut saver = SettingsSaver::new(path.clone(), settings, SAVE_DEBOUNCE);
    saver.update(|s| {
        if let Some(rgb) = color {
            s.set_main_rgb(rgb);
        }
        if let Some(contrast) = contrast {
            s.colors.contrast = contrast;
        }
        if let Some(switch) = switch_colors {
            s.switch_team_colors = switch;
        }
    });

    display_settings(saver.settings(), &path);
    saver.finish();
    display_success("Settings saved");
    Ok(())
}
