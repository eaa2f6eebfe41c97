//! Reference seed data.
//!
//! Ten events across 2025-08-20 and 2025-08-21 on three sites, used to
//! populate empty stores for demos and as a known fixture for statistics.

use crate::error::{Error, Result};
use crate::pipeline::ingestion::{BatchResult, IngestionEngine};
use crate::storage::models::EmailEvent;

const WINDOWS_UA: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";
const MAC_UA: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7)";
const IPHONE_UA: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 14_7_1)";

/// The reference events, in a fixed order.
pub fn reference_events() -> Vec<EmailEvent> {
    vec![
        EmailEvent::new("sent", "user@example.com", "site-a.com", "2025-08-21T10:30:00Z")
            .with_campaign("camp_123")
            .with_subject("Welcome Email"),
        EmailEvent::new("open", "user@example.com", "site-a.com", "2025-08-21T10:35:00Z")
            .with_campaign("camp_123")
            .with_client("192.168.1.1", WINDOWS_UA),
        EmailEvent::new("click", "user@example.com", "site-a.com", "2025-08-21T10:40:00Z")
            .with_campaign("camp_123")
            .with_client("192.168.1.1", WINDOWS_UA),
        EmailEvent::new("bounce", "invalid@example.com", "site-a.com", "2025-08-21T11:00:00Z")
            .with_campaign("camp_123")
            .with_subject("Welcome Email"),
        EmailEvent::new("sent", "user2@example.com", "site-b.com", "2025-08-21T12:00:00Z")
            .with_campaign("camp_456")
            .with_subject("Newsletter Weekly"),
        EmailEvent::new("open", "user2@example.com", "site-b.com", "2025-08-21T12:15:00Z")
            .with_campaign("camp_456")
            .with_client("192.168.1.2", MAC_UA),
        EmailEvent::new("sent", "user3@example.com", "site-c.com", "2025-08-20T09:00:00Z")
            .with_campaign("camp_789")
            .with_subject("Promoção Especial"),
        EmailEvent::new("open", "user3@example.com", "site-c.com", "2025-08-20T09:30:00Z")
            .with_campaign("camp_789")
            .with_client("192.168.1.3", IPHONE_UA),
        EmailEvent::new("click", "user3@example.com", "site-c.com", "2025-08-20T09:35:00Z")
            .with_campaign("camp_789")
            .with_client("192.168.1.3", IPHONE_UA),
        EmailEvent::new("sent", "user4@example.com", "site-a.com", "2025-08-20T14:00:00Z")
            .with_campaign("camp_123")
            .with_subject("Welcome Email"),
    ]
}

/// Ingest the reference events if the store holds no events yet.
///
/// Returns `None` when the store was already populated.
pub fn seed_if_empty(engine: &IngestionEngine) -> Result<Option<BatchResult>> {
    let existing = engine.store().count_events().map_err(Error::Query)?;
    if existing > 0 {
        log::info!("SEED_SKIPPED existing_events={}", existing);
        return Ok(None);
    }

    let result = engine.process_batch(&reference_events())?;
    log::info!(
        "SEED_COMPLETE processed={} duplicates={} errors={}",
        result.processed,
        result.duplicates,
        result.errors
    );
    Ok(Some(result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::memory::MemoryEventStore;
    use crate::validation::event::validate_event;
    use crate::validation::fingerprint::Fingerprint;
    use std::collections::HashSet;
    use std::sync::Arc;

    #[test]
    fn test_reference_events_are_valid_and_distinct() {
        let events = reference_events();
        assert_eq!(events.len(), 10);
        assert!(events.iter().all(|e| validate_event(e).valid));

        let fingerprints: HashSet<_> = events.iter().map(Fingerprint::of).collect();
        assert_eq!(fingerprints.len(), 10);
    }

    #[test]
    fn test_seed_only_into_empty_store() {
        let store = Arc::new(MemoryEventStore::new());
        let engine = IngestionEngine::new(store.clone());

        let first = seed_if_empty(&engine).unwrap().unwrap();
        assert_eq!(first.processed, 10);
        assert_eq!(store.len(), 10);

        assert!(seed_if_empty(&engine).unwrap().is_none());
        assert_eq!(store.len(), 10);
    }
}
