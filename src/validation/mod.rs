//! Event validation module.
//!
//! - Required-field checks for submitted events
//! - Content fingerprints used as the deduplication key

pub mod event;
pub mod fingerprint;

pub use event::*;
pub use fingerprint::*;
