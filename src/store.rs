//! Event store
//!
//! An append-only, insertion-ordered collection of attention events. The
//! aggregations never touch it directly; they receive snapshots, which keeps
//! them pure and unit-testable against literal event vectors. No dedup, no
//! indexing, no eviction: every read is a full scan by design at this scale.

use serde::{Deserialize, Serialize};

use crate::types::AttentionEvent;

/// Append-only store handing out snapshots of "events appended so far".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventStore {
    events: Vec<AttentionEvent>,
}

impl EventStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one event, preserving arrival order.
    pub fn append(&mut self, event: AttentionEvent) {
        self.events.push(event);
    }

    /// Append a batch in order.
    pub fn extend(&mut self, events: impl IntoIterator<Item = AttentionEvent>) {
        self.events.extend(events);
    }

    /// Consistent view of everything appended so far. Callers must not
    /// assume any ordering beyond insertion order.
    pub fn snapshot(&self) -> &[AttentionEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Serialize the store for handoff between processes.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Restore a store serialized with [`EventStore::to_json`].
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EventKind;

    #[test]
    fn preserves_insertion_order() {
        let mut store = EventStore::new();
        store.append(AttentionEvent::new(3, "c.com", EventKind::Active));
        store.extend(vec![
            AttentionEvent::new(1, "a.com", EventKind::Idle),
            AttentionEvent::new(2, "b.com", EventKind::Distraction),
        ]);

        let domains: Vec<&str> = store.snapshot().iter().map(|e| e.domain.as_str()).collect();
        assert_eq!(domains, vec!["c.com", "a.com", "b.com"]);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn json_round_trip_keeps_events() {
        let mut store = EventStore::new();
        store.append(AttentionEvent::new(1_700_000_000_000, "a.com", EventKind::Active));

        let restored = EventStore::from_json(&store.to_json().unwrap()).unwrap();
        assert_eq!(restored.snapshot(), store.snapshot());
    }

    #[test]
    fn empty_store_snapshot() {
        let store = EventStore::new();
        assert!(store.is_empty());
        assert!(store.snapshot().is_empty());
    }
}
