//! Aggregation module.
//!
//! Computes per-day, per-site statistics over stored events:
//! - Optional date range and site filters
//! - Grouping by (date, site, event type) with distinct participant counts
//! - Rollup into one summary per (date, site)

pub mod engine;
pub mod filter;
pub mod report;
pub mod stats;

pub use engine::*;
pub use filter::*;
pub use report::*;
pub use stats::*;
