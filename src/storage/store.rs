//! Persistence interface consumed by the engines.

use crate::aggregation::filter::StatsFilter;
use crate::error::StoreResult;
use crate::storage::models::{EmailEvent, EventSummary};
use crate::validation::fingerprint::Fingerprint;

/// Storage backend for campaign events.
///
/// Implementations must enforce uniqueness of the fingerprint: an insert
/// whose fingerprint is already stored fails with
/// [`StoreError::Duplicate`](crate::error::StoreError::Duplicate), even when a
/// concurrent caller passed the existence check first.
#[cfg_attr(test, mockall::automock)]
pub trait EventStore: Send + Sync {
    /// Whether an event with this fingerprint is already stored.
    fn fingerprint_exists(&self, fingerprint: &Fingerprint) -> StoreResult<bool>;

    /// Store an event and return its generated identifier.
    fn insert_event(&self, event: &EmailEvent, fingerprint: &Fingerprint) -> StoreResult<String>;

    /// Summaries of stored events matching the filter.
    fn query_events(&self, filter: &StatsFilter) -> StoreResult<Vec<EventSummary>>;

    /// Total number of stored events.
    fn count_events(&self) -> StoreResult<u64>;
}
