use std::collections::VecDeque;

use super::event::MatchEvent;

/// Accepted events, most recent first. Unbounded for the life of a match.
#[derive(Debug, Default)]
pub struct EventLog {
    events: VecDeque<MatchEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        EventLog::default()
    }

    pub fn push(&mut self, event: MatchEvent) {
        self.events.push_front(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn latest(&self) -> Option<&MatchEvent> {
        self.events.front()
    }

    pub fn recent(&self, count: usize) -> impl Iterator<Item = &MatchEvent> {
        self.events.iter().take(count)
    }

    pub fn iter(&self) -> impl Iterator<Item = &MatchEvent> {
        self.events.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::classifier::EventClassifier;
    use crate::game::test_support::{raw_kill, sample_roster};

    #[test]
    fn newest_event_comes_first() {
        let roster = sample_roster();
        let mut classifier = EventClassifier::new();
        let mut log = EventLog::new();

        for index in 1..=3 {
            let raw = raw_kill(index, "Mr. Pine", "Red One", &[]);
            log.push(classifier.classify(&raw, &roster).unwrap());
        }

        let order: Vec<u64> = log.iter().map(|e| e.index).collect();
        assert_eq!(order, vec![3, 2, 1]);
        assert_eq!(log.latest().map(|e| e.index), Some(3));
        assert_eq!(log.recent(2).count(), 2);
        assert_eq!(log.len(), 3);
    }
}
