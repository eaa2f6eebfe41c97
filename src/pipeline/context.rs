//! Pipeline context management.
//!
//! Provides batch and per-event context for logging.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::logging::structured::LogContext;

/// Context for one submitted batch.
#[derive(Debug, Clone)]
pub struct BatchContext {
    pub batch_id: String,
    pub received_at: DateTime<Utc>,
    pub event_count: usize,
}

impl BatchContext {
    pub fn new(event_count: usize) -> Self {
        let batch_id = format!("batch-{}", &Uuid::new_v4().to_string()[..8]);

        Self {
            batch_id,
            received_at: Utc::now(),
            event_count,
        }
    }

    pub fn log_context(&self) -> LogContext {
        LogContext::new(&self.batch_id)
    }

    /// Log context for the event at `index` within this batch.
    pub fn event_context(&self, index: usize) -> LogContext {
        LogContext::new(&self.batch_id).with_event(index)
    }
}
