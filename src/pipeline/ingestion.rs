//! Event ingestion pipeline.
//!
//! Coordinates per-event processing for a submitted batch:
//! 1. Required-field validation
//! 2. Content fingerprinting
//! 3. Existence pre-check against the store
//! 4. Insert, with uniqueness conflicts classified as duplicates
//!
//! Failures are recorded per event; only an empty (or oversized) batch
//! rejects the whole request.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::config::IngestConfig;
use crate::error::{Error, Result, StoreError};
use crate::logging::structured::LogContext;
use crate::security::pii::{participant_for_log, scrub_text};
use crate::storage::models::EmailEvent;
use crate::storage::store::EventStore;
use crate::validation::event::validate_event;
use crate::validation::fingerprint::Fingerprint;

use super::context::BatchContext;

/// Outcome tag for one submitted event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventStatus {
    Processed,
    Duplicate,
    Error,
}

impl EventStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventStatus::Processed => "processed",
            EventStatus::Duplicate => "duplicate",
            EventStatus::Error => "error",
        }
    }
}

/// Result of processing a single event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventOutcome {
    /// Generated identifier, set only for `processed`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub event_type: String,
    pub email: String,
    pub site: String,
    pub status: EventStatus,
    /// Why the event ended as `error`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl EventOutcome {
    fn new(event: &EmailEvent, status: EventStatus) -> Self {
        Self {
            id: None,
            event_type: event.event_type.clone(),
            email: event.email.clone(),
            site: event.site.clone(),
            status,
            reason: None,
        }
    }

    fn processed(event: &EmailEvent, id: String) -> Self {
        Self {
            id: Some(id),
            ..Self::new(event, EventStatus::Processed)
        }
    }

    fn duplicate(event: &EmailEvent) -> Self {
        Self::new(event, EventStatus::Duplicate)
    }

    fn error(event: &EmailEvent, reason: String) -> Self {
        Self {
            reason: Some(reason),
            ..Self::new(event, EventStatus::Error)
        }
    }
}

/// Result of processing a batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchResult {
    pub batch_id: String,
    pub processed: usize,
    pub duplicates: usize,
    pub errors: usize,
    /// One outcome per submitted event, in submission order.
    pub events: Vec<EventOutcome>,
}

impl BatchResult {
    fn new(batch_id: &str, capacity: usize) -> Self {
        Self {
            batch_id: batch_id.to_string(),
            processed: 0,
            duplicates: 0,
            errors: 0,
            events: Vec::with_capacity(capacity),
        }
    }

    fn record(&mut self, outcome: EventOutcome) {
        match outcome.status {
            EventStatus::Processed => self.processed += 1,
            EventStatus::Duplicate => self.duplicates += 1,
            EventStatus::Error => self.errors += 1,
        }
        self.events.push(outcome);
    }

    pub fn total(&self) -> usize {
        self.processed + self.duplicates + self.errors
    }
}

/// Request body accepted by [`parse_events_json`].
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum EventsPayload {
    Wrapped { events: Vec<EmailEvent> },
    Bare(Vec<EmailEvent>),
}

/// Parse a JSON batch, either `{"events": [...]}` or a bare array.
pub fn parse_events_json(json: &str) -> Result<Vec<EmailEvent>> {
    let payload: EventsPayload = serde_json::from_str(json)
        .map_err(|e| Error::validation(format!("malformed event batch: {}", e)))?;

    Ok(match payload {
        EventsPayload::Wrapped { events } => events,
        EventsPayload::Bare(events) => events,
    })
}

/// Validates, deduplicates and stores batches of campaign events.
pub struct IngestionEngine {
    store: Arc<dyn EventStore>,
    config: IngestConfig,
}

impl IngestionEngine {
    pub fn new(store: Arc<dyn EventStore>) -> Self {
        Self::with_config(store, IngestConfig::default())
    }

    pub fn with_config(store: Arc<dyn EventStore>, config: IngestConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &IngestConfig {
        &self.config
    }

    pub fn store(&self) -> &dyn EventStore {
        self.store.as_ref()
    }

    /// Process a batch of events.
    ///
    /// Fails only when the batch is empty or exceeds the configured maximum;
    /// every other problem is reported in that event's outcome.
    pub fn process_batch(&self, events: &[EmailEvent]) -> Result<BatchResult> {
        if events.is_empty() {
            return Err(Error::validation("event batch must not be empty"));
        }

        if let Some(max) = self.config.max_batch_size {
            if events.len() > max {
                return Err(Error::validation(format!(
                    "event batch of {} exceeds maximum size of {}",
                    events.len(),
                    max
                )));
            }
        }

        let ctx = BatchContext::new(events.len());
        log::info!(
            "{} BATCH_RECEIVED events={}",
            ctx.log_context(),
            ctx.event_count
        );

        let mut result = BatchResult::new(&ctx.batch_id, events.len());
        for (index, event) in events.iter().enumerate() {
            let outcome = self.process_single_event(&ctx.event_context(index), event);
            result.record(outcome);
        }

        log::info!(
            "{} BATCH_COMPLETE received={} processed={} duplicates={} errors={}",
            ctx.log_context(),
            events.len(),
            result.processed,
            result.duplicates,
            result.errors
        );

        Ok(result)
    }

    /// Process a single event.
    fn process_single_event(&self, ctx: &LogContext, event: &EmailEvent) -> EventOutcome {
        // [1] VALIDATION
        let validation = validate_event(event);
        if let Some(reason) = validation.reason() {
            log::warn!(
                "{} EVENT_INVALID missing={:?}",
                ctx,
                validation.missing_fields
            );
            return EventOutcome::error(event, reason);
        }

        // [2] FINGERPRINT
        let fingerprint = Fingerprint::of(event);
        let participant = participant_for_log(&event.email, self.config.redact_participants);

        // [3] EXISTENCE PRE-CHECK
        match self.store.fingerprint_exists(&fingerprint) {
            Ok(true) => {
                log::info!(
                    "{} EVENT_DUPLICATE type={} site={} participant={} fingerprint={}",
                    ctx,
                    event.event_type,
                    event.site,
                    participant,
                    fingerprint
                );
                return EventOutcome::duplicate(event);
            }
            Ok(false) => {}
            Err(e) => return self.store_failure(ctx, event, "exists", e),
        }

        // [4] INSERT
        match self.store.insert_event(event, &fingerprint) {
            Ok(id) => {
                log::debug!(
                    "{} EVENT_STORED id={} type={} site={} participant={}",
                    ctx,
                    id,
                    event.event_type,
                    event.site,
                    participant
                );
                EventOutcome::processed(event, id)
            }
            Err(StoreError::Duplicate(_)) => {
                log::info!(
                    "{} EVENT_DUPLICATE type={} site={} participant={} fingerprint={} stage=insert",
                    ctx,
                    event.event_type,
                    event.site,
                    participant,
                    fingerprint
                );
                EventOutcome::duplicate(event)
            }
            Err(e) => self.store_failure(ctx, event, "insert", e),
        }
    }

    fn store_failure(
        &self,
        ctx: &LogContext,
        event: &EmailEvent,
        stage: &str,
        error: StoreError,
    ) -> EventOutcome {
        let message = error.to_string();
        let (logged, _) = scrub_text(&message);
        log::error!(
            "{} EVENT_STORE_FAILED stage={} type={} site={} error={}",
            ctx,
            stage,
            event.event_type,
            event.site,
            logged
        );
        EventOutcome::error(event, message)
    }
}
