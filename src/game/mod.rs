pub mod classifier;
pub mod entity;
pub mod event;
pub mod event_log;
pub mod roster;
pub mod tally;

#[cfg(test)]
pub(crate) mod test_support;

use crate::api::models::RawEvent;

use classifier::EventClassifier;
use event_log::EventLog;
use roster::Roster;
use tally::KillDifference;

/// Everything tracked for one match, from roster build until the client goes away.
#[derive(Debug)]
pub struct MatchState {
    pub roster: Roster,
    pub events: EventLog,
    pub kill_difference: KillDifference,
    classifier: EventClassifier,
}

impl MatchState {
    pub fn new(roster: Roster) -> Self {
        MatchState {
            roster,
            events: EventLog::new(),
            kill_difference: KillDifference::new(),
            classifier: EventClassifier::new(),
        }
    }

    pub fn last_index(&self) -> u64 {
        self.classifier.last_index()
    }

    /// Runs a snapshot of raw events through classification, tallies and the
    /// log. Returns how many events were new.
    pub fn ingest(&mut self, raw_events: &[RawEvent]) -> usize {
        let mut accepted = 0;
        for raw in raw_events {
            let Some(event) = self.classifier.classify(raw, &self.roster) else {
                continue;
            };
            tally::apply_kill(&mut self.roster, &mut self.kill_difference, &event);
            self.events.push(event);
            accepted += 1;
        }
        accepted
    }
}
