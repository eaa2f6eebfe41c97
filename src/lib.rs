//! Campaign Stats Core - email campaign event ingestion and daily statistics
//!
//! This crate ingests batches of campaign lifecycle events (sent, open,
//! click, bounce, ...), deduplicates them by content fingerprint, and
//! produces per-day, per-site statistics on demand. The implementation
//! prioritizes:
//!
//! 1. **Idempotency** - Resubmitted events are recognised as duplicates
//! 2. **Partial failure** - One bad event never fails its batch
//! 3. **Logging** - Every decision point logged with batch context
//!
//! ## Architecture
//!
//! The crate is organized into modules:
//! - `pipeline` - Ingestion engine and batch context
//! - `validation` - Required-field checks and content fingerprints
//! - `aggregation` - Filters, grouping, rollup and reports
//! - `storage` - Event models, the `EventStore` interface, in-memory store, SQL builders
//! - `security` - PII masking for log output
//! - `logging` - Structured logging with batch context
//! - `config` - Ingestion settings
//! - `error` - Error types with tagged kinds
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use campaign_stats_core::{
//!     AggregationEngine, EmailEvent, IngestionEngine, MemoryEventStore, StatsFilter,
//! };
//!
//! let store = Arc::new(MemoryEventStore::new());
//! let ingestion = IngestionEngine::new(store.clone());
//! let aggregation = AggregationEngine::new(store);
//!
//! let result = ingestion
//!     .process_batch(&[EmailEvent::new(
//!         "sent",
//!         "user@example.com",
//!         "site-a.com",
//!         "2025-08-21T10:30:00Z",
//!     )])
//!     .unwrap();
//! assert_eq!(result.processed, 1);
//!
//! let stats = aggregation.compute_daily_stats(&StatsFilter::all()).unwrap();
//! assert_eq!(stats[0].total_events, 1);
//! ```

pub mod aggregation;
pub mod config;
pub mod error;
pub mod logging;
pub mod pipeline;
pub mod security;
pub mod storage;
pub mod validation;

#[cfg(feature = "python")]
mod python;

pub use aggregation::{AggregationEngine, DailyStats, EventTypeStats, StatsFilter, StatsReport};
pub use config::IngestConfig;
pub use error::{Error, ErrorKind, Result, StoreError, StoreResult};
pub use logging::init_logger;
pub use pipeline::{BatchResult, EventOutcome, EventStatus, IngestionEngine};
pub use storage::{EmailEvent, EventStore, EventSummary, MemoryEventStore, StoredEvent};
pub use validation::Fingerprint;
