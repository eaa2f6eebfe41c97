//! In-memory event store.
//!
//! Reference [`EventStore`] used by tests, benchmarks and embedders that do
//! not need durability. The fingerprint check and the insert happen under one
//! write lock, which gives the same guarantee as a unique index.

use std::collections::{HashMap, HashSet};

use chrono::Utc;
use parking_lot::RwLock;

use crate::aggregation::filter::StatsFilter;
use crate::error::{StoreError, StoreResult};
use crate::storage::models::{event_date, new_event_id, EmailEvent, EventSummary, StoredEvent};
use crate::storage::store::EventStore;
use crate::validation::fingerprint::Fingerprint;

#[derive(Debug, Default)]
struct Inner {
    events: Vec<StoredEvent>,
    fingerprints: HashSet<Fingerprint>,
    /// Position in `events` by generated id.
    by_id: HashMap<String, usize>,
}

/// Thread-safe in-memory store.
#[derive(Debug, Default)]
pub struct MemoryEventStore {
    inner: RwLock<Inner>,
}

impl MemoryEventStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.inner.read().events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().events.is_empty()
    }

    /// Look up a stored event by its generated identifier.
    pub fn get(&self, id: &str) -> Option<StoredEvent> {
        let inner = self.inner.read();
        inner
            .by_id
            .get(id)
            .and_then(|&position| inner.events.get(position))
            .cloned()
    }

    /// Copy of every stored event, in insertion order.
    pub fn snapshot(&self) -> Vec<StoredEvent> {
        self.inner.read().events.clone()
    }
}

impl EventStore for MemoryEventStore {
    fn fingerprint_exists(&self, fingerprint: &Fingerprint) -> StoreResult<bool> {
        Ok(self.inner.read().fingerprints.contains(fingerprint))
    }

    fn insert_event(&self, event: &EmailEvent, fingerprint: &Fingerprint) -> StoreResult<String> {
        // A typed timestamp column would refuse the row as well.
        let date = event_date(&event.timestamp).ok_or_else(|| {
            StoreError::backend(format!("invalid timestamp {:?}", event.timestamp))
        })?;

        let mut inner = self.inner.write();
        if inner.fingerprints.contains(fingerprint) {
            return Err(StoreError::Duplicate(fingerprint.to_string()));
        }

        let id = new_event_id();
        let position = inner.events.len();
        inner.events.push(StoredEvent {
            id: id.clone(),
            fingerprint: fingerprint.clone(),
            date,
            stored_at: Utc::now(),
            event: event.clone(),
        });
        inner.fingerprints.insert(fingerprint.clone());
        inner.by_id.insert(id.clone(), position);

        Ok(id)
    }

    fn query_events(&self, filter: &StatsFilter) -> StoreResult<Vec<EventSummary>> {
        let inner = self.inner.read();
        let mut rows: Vec<EventSummary> = inner
            .events
            .iter()
            .filter(|e| filter.matches(e.date, &e.event.site))
            .map(EventSummary::from)
            .collect();

        rows.sort_by(|a, b| {
            b.date
                .cmp(&a.date)
                .then_with(|| a.site.cmp(&b.site))
                .then_with(|| a.event_type.cmp(&b.event_type))
        });

        Ok(rows)
    }

    fn count_events(&self) -> StoreResult<u64> {
        Ok(self.inner.read().events.len() as u64)
    }
}
