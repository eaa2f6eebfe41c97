//! Structured logging utilities.
//!
//! Log lines follow `<context> <EVENT_TAG> key=value ...`.

use std::fmt;

/// Logging context for a batch, optionally narrowed to one event.
#[derive(Debug, Clone)]
pub struct LogContext {
    pub batch_id: String,
    pub event_index: Option<usize>,
}

impl LogContext {
    pub fn new(batch_id: &str) -> Self {
        Self {
            batch_id: batch_id.to_string(),
            event_index: None,
        }
    }

    pub fn with_event(&self, index: usize) -> Self {
        Self {
            batch_id: self.batch_id.clone(),
            event_index: Some(index),
        }
    }
}

impl fmt::Display for LogContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.event_index {
            Some(idx) => write!(f, "[batch={}] [event={}]", self.batch_id, idx),
            None => write!(f, "[batch={}]", self.batch_id),
        }
    }
}

/// Initialize the global logger.
///
/// Defaults to `info`, honours `RUST_LOG`, and is a no-op when a logger is
/// already installed.
pub fn init_logger() {
    let _ = env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .format_timestamp_millis()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_context_display() {
        let ctx = LogContext::new("batch-123");
        assert_eq!(format!("{}", ctx), "[batch=batch-123]");

        let ctx_with_event = ctx.with_event(4);
        assert_eq!(
            format!("{}", ctx_with_event),
            "[batch=batch-123] [event=4]"
        );
    }

    #[test]
    fn test_init_logger_twice() {
        init_logger();
        init_logger();
    }
}
