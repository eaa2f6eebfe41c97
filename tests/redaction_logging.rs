//! Participant masking in ingestion log lines.

use std::sync::{Arc, Once};

use log::{Level, LevelFilter, Log, Metadata, Record};
use parking_lot::{const_mutex, Mutex};

use campaign_stats_core::{EmailEvent, IngestConfig, IngestionEngine, MemoryEventStore};

struct CaptureLogger {
    lines: Mutex<Vec<String>>,
}

impl Log for CaptureLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= Level::Debug
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            self.lines.lock().push(record.args().to_string());
        }
    }

    fn flush(&self) {}
}

static LOGGER: CaptureLogger = CaptureLogger {
    lines: const_mutex(Vec::new()),
};
static INIT: Once = Once::new();

fn install_logger() {
    INIT.call_once(|| {
        log::set_logger(&LOGGER).unwrap();
        log::set_max_level(LevelFilter::Debug);
    });
}

/// Captured lines belonging to one batch.
fn lines_for(batch_id: &str) -> Vec<String> {
    let marker = format!("[batch={}]", batch_id);
    LOGGER
        .lines
        .lock()
        .iter()
        .filter(|line| line.contains(&marker))
        .cloned()
        .collect()
}

/// Submit the same event twice so both the stored and duplicate lines appear.
fn ingest_twice(config: IngestConfig) -> Vec<String> {
    let engine = IngestionEngine::with_config(Arc::new(MemoryEventStore::new()), config);
    let event = EmailEvent::new("open", "user@example.com", "site-a.com", "2025-08-21T10:35:00Z");

    let first = engine.process_batch(&[event.clone()]).unwrap();
    let second = engine.process_batch(&[event]).unwrap();
    assert_eq!(first.processed, 1);
    assert_eq!(second.duplicates, 1);

    let mut lines = lines_for(&first.batch_id);
    lines.extend(lines_for(&second.batch_id));
    lines
}

#[test]
fn test_participants_masked_by_default() {
    install_logger();
    let lines = ingest_twice(IngestConfig::default());

    let stored: Vec<&String> = lines.iter().filter(|l| l.contains("EVENT_STORED")).collect();
    let duplicate: Vec<&String> = lines.iter().filter(|l| l.contains("EVENT_DUPLICATE")).collect();
    assert_eq!(stored.len(), 1);
    assert_eq!(duplicate.len(), 1);
    assert!(stored[0].contains("participant=u***@example.com"));
    assert!(duplicate[0].contains("participant=u***@example.com"));
    assert!(lines.iter().all(|l| !l.contains("user@example.com")), "{:?}", lines);
}

#[test]
fn test_participants_logged_verbatim_without_redaction() {
    install_logger();
    let lines = ingest_twice(IngestConfig::default().with_redaction(false));

    let participant_lines: Vec<&String> = lines
        .iter()
        .filter(|l| l.contains("EVENT_STORED") || l.contains("EVENT_DUPLICATE"))
        .collect();
    assert_eq!(participant_lines.len(), 2);
    assert!(participant_lines
        .iter()
        .all(|l| l.contains("participant=user@example.com")));
    assert!(lines.iter().all(|l| !l.contains("u***@")), "{:?}", lines);
}
