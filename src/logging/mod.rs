//! Structured logging with batch context.
//!
//! Every ingestion log line carries the batch id, and the event index when
//! the line concerns a single event, for easy correlation.

pub mod structured;

pub use structured::*;
