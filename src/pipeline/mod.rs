//! Pipeline orchestration module.
//!
//! Ingestion pipeline that coordinates, per event:
//! - Required-field validation
//! - Content fingerprinting
//! - Duplicate detection
//! - Storage

pub mod context;
pub mod ingestion;

pub use context::*;
pub use ingestion::*;
