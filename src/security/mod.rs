//! Security module.
//!
//! Keeps participant addresses and other PII out of log output.

pub mod pii;

pub use pii::*;
