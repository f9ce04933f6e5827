//! Application state shared between the poller (the only writer) and the
//! terminal view. Every mutation is followed by a [`StateChange`] sent to all
//! subscribers; readers then take a short read lock to render.

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Mutex, RwLock};

use crate::api::models::RawEvent;
use crate::game::roster::Roster;
use crate::game::MatchState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    WaitingForGame,
    InProgress,
    Finished,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StateChange {
    Phase(GamePhase),
    EventsAdded(usize),
    PollFailed(String),
}

struct Inner {
    phase: GamePhase,
    game: Option<MatchState>,
}

pub struct StateStore {
    inner: RwLock<Inner>,
    subscribers: Mutex<Vec<Sender<StateChange>>>,
}

impl Default for StateStore {
    fn default() -> Self {
        StateStore::new()
    }
}

impl StateStore {
    pub fn new() -> Self {
        StateStore {
            inner: RwLock::new(Inner {
                phase: GamePhase::WaitingForGame,
                game: None,
            }),
            subscribers: Mutex::new(Vec::new()),
        }
    }

    pub fn subscribe(&self) -> Receiver<StateChange> {
        let (tx, rx) = mpsc::channel();
        if let Ok(mut subscribers) = self.subscribers.lock() {
            subscribers.push(tx);
        }
        rx
    }

    pub fn phase(&self) -> GamePhase {
        self.read(|phase, _| phase)
    }

    /// Runs `f` against the current phase and match under a read lock.
    pub fn read<R>(&self, f: impl FnOnce(GamePhase, Option<&MatchState>) -> R) -> R {
        let inner = self.inner.read().unwrap_or_else(|poisoned| poisoned.into_inner());
        f(inner.phase, inner.game.as_ref())
    }

    /// Discards any previous match and waits for the next one.
    pub fn reset(&self) {
        self.write(|inner| {
            inner.phase = GamePhase::WaitingForGame;
            inner.game = None;
        });
        self.notify(StateChange::Phase(GamePhase::WaitingForGame));
    }

    pub fn begin_match(&self, roster: Roster) {
        self.write(|inner| {
            inner.phase = GamePhase::InProgress;
            inner.game = Some(MatchState::new(roster));
        });
        self.notify(StateChange::Phase(GamePhase::InProgress));
    }

    /// Feeds an event snapshot into the running match. Silent when nothing was new.
    pub fn ingest(&self, raw_events: &[RawEvent]) -> usize {
        let added = self.write(|inner| match inner.game.as_mut() {
            Some(game) => game.ingest(raw_events),
            None => 0,
        });
        if added > 0 {
            self.notify(StateChange::EventsAdded(added));
        }
        added
    }

    pub fn finish(&self) {
        self.write(|inner| inner.phase = GamePhase::Finished);
        self.notify(StateChange::Phase(GamePhase::Finished));
    }

    pub fn report_failure(&self, message: String) {
        self.notify(StateChange::PollFailed(message));
    }

    fn write<R>(&self, f: impl FnOnce(&mut Inner) -> R) -> R {
        let mut inner = self.inner.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&mut inner)
    }

    fn notify(&self, change: StateChange) {
        if let Ok(mut subscribers) = self.subscribers.lock() {
            subscribers.retain(|tx| tx.send(change.clone()).is_ok());
        }
    }
}
