use std::sync::Arc;
use std::thread;
use std::time::Duration;

use tracing::{debug, error, info, warn};

use crate::api::models::AllGameData;
use crate::api::LiveDataSource;
use crate::game::roster::Roster;
use crate::state::StateStore;

/// Drives one source through the match lifecycle: wait for the game, build
/// the roster once, then poll events until the client goes away.
pub struct Poller<S> {
    source: S,
    store: Arc<StateStore>,
    game_interval: Duration,
    event_interval: Duration,
}

impl<S: LiveDataSource> Poller<S> {
    pub fn new(source: S, store: Arc<StateStore>, game_interval: Duration, event_interval: Duration) -> Self {
        Poller {
            source,
            store,
            game_interval,
            event_interval,
        }
    }

    pub fn run_match(&self) {
        let data = self.wait_for_game();
        self.store.begin_match(Roster::from_game_data(&data));
        self.watch_events();
    }

    /// Plays matches back to back, resetting state after each one.
    pub fn run_forever(&self) {
        loop {
            self.run_match();
            info!("Match finished, waiting for the next one");
            self.store.reset();
        }
    }

    fn wait_for_game(&self) -> AllGameData {
        loop {
            thread::sleep(self.game_interval);
            match self.source.all_game_data() {
                Ok(data) => {
                    info!("Game detected");
                    return data;
                }
                // Anything before the match starts just means "not yet".
                Err(e) => debug!(error = %e, "Game not ready"),
            }
        }
    }

    fn watch_events(&self) {
        loop {
            thread::sleep(self.event_interval);
            match self.source.event_data() {
                Ok(data) => {
                    let added = self.store.ingest(&data.events);
                    if added > 0 {
                        debug!(added, "Events ingested");
                    }
                }
                Err(e) if e.is_terminal() => {
                    info!("Live client closed, game finished");
                    self.store.finish();
                    return;
                }
                Err(e) if e.is_transient() => {
                    warn!(error = %e, "Event poll failed, retrying");
                    self.store.report_failure(e.to_string());
                }
                Err(e) => {
                    error!(error = %e, "Unexpected event payload, retrying");
                    self.store.report_failure(e.to_string());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::{AllGameData, EventData, RawEvent};
    use crate::error::AppError;
    use crate::game::test_support::{raw_kill, sample_game_data};
    use crate::state::{GamePhase, StateChange};
    use std::cell::RefCell;
    use std::collections::VecDeque;

    /// Hands out scripted responses in order.
    struct ScriptedSource {
        game: RefCell<VecDeque<Result<AllGameData, AppError>>>,
        events: RefCell<VecDeque<Result<EventData, AppError>>>,
    }

    impl ScriptedSource {
        fn new(
            game: Vec<Result<AllGameData, AppError>>,
            events: Vec<Result<EventData, AppError>>,
        ) -> Self {
            ScriptedSource {
                game: RefCell::new(game.into()),
                events: RefCell::new(events.into()),
            }
        }
    }

    impl LiveDataSource for ScriptedSource {
        fn all_game_data(&self) -> Result<AllGameData, AppError> {
            self.game.borrow_mut().pop_front().unwrap_or(Err(AppError::GameNotStarted))
        }

        fn event_data(&self) -> Result<EventData, AppError> {
            self.events.borrow_mut().pop_front().unwrap_or(Err(AppError::Disconnected))
        }
    }

    fn snapshot(events: Vec<RawEvent>) -> Result<EventData, AppError> {
        Ok(EventData { events })
    }

    fn poller(source: ScriptedSource) -> (Poller<ScriptedSource>, Arc<StateStore>) {
        let store = Arc::new(StateStore::new());
        let poller = Poller::new(source, Arc::clone(&store), Duration::ZERO, Duration::ZERO);
        (poller, store)
    }

    #[test]
    fn retries_until_game_starts_then_runs_to_disconnect() {
        let source = ScriptedSource::new(
            vec![
                Err(AppError::Disconnected),
                Err(AppError::GameNotStarted),
                Err(AppError::MalformedPayload("loading".into())),
                Ok(sample_game_data()),
            ],
            vec![
                snapshot(vec![raw_kill(1, "Mr. Pine", "Red One", &[])]),
                Err(AppError::Network("timed out".into())),
                snapshot(vec![
                    raw_kill(1, "Mr. Pine", "Red One", &[]),
                    raw_kill(2, "Red One", "Mr. Pine", &[]),
                ]),
            ],
        );
        let (poller, store) = poller(source);
        let rx = store.subscribe();

        poller.run_match();

        assert_eq!(store.phase(), GamePhase::Finished);
        store.read(|_, game| {
            let game = game.unwrap();
            assert_eq!(game.events.len(), 2);
            assert_eq!(game.kill_difference.series(), &[0, 1, 0]);
        });

        let changes: Vec<_> = rx.try_iter().collect();
        assert_eq!(
            changes,
            vec![
                StateChange::Phase(GamePhase::InProgress),
                StateChange::EventsAdded(1),
                StateChange::PollFailed("Network error: timed out".into()),
                StateChange::EventsAdded(1),
                StateChange::Phase(GamePhase::Finished),
            ]
        );
    }

    #[test]
    fn malformed_event_payload_is_surfaced_not_fatal() {
        let source = ScriptedSource::new(
            vec![Ok(sample_game_data())],
            vec![
                Err(AppError::MalformedPayload("expected value".into())),
                snapshot(vec![raw_kill(3, "Red Two", "Blue Two", &[])]),
            ],
        );
        let (poller, store) = poller(source);
        let rx = store.subscribe();

        poller.run_match();

        let failures = rx
            .try_iter()
            .filter(|change| matches!(change, StateChange::PollFailed(_)))
            .count();
        assert_eq!(failures, 1);
        assert!(store.read(|_, game| game.map(|g| g.last_index()) == Some(3)));
    }
}
