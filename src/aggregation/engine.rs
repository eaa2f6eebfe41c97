//! Aggregation engine.
//!
//! Reads event summaries from the store and turns them into daily
//! statistics. A storage failure fails the whole call; there is no partial
//! result.

use std::sync::Arc;

use crate::aggregation::filter::StatsFilter;
use crate::aggregation::report::StatsReport;
use crate::aggregation::stats::{group_events, roll_up, DailyStats};
use crate::error::{Error, Result};
use crate::security::pii::scrub_text;
use crate::storage::store::EventStore;

/// Computes daily statistics over an injected store.
pub struct AggregationEngine {
    store: Arc<dyn EventStore>,
}

impl AggregationEngine {
    pub fn new(store: Arc<dyn EventStore>) -> Self {
        Self { store }
    }

    /// Per (date, site) statistics for events matching `filter`.
    pub fn compute_daily_stats(&self, filter: &StatsFilter) -> Result<Vec<DailyStats>> {
        log::debug!(
            "STATS_QUERY start_date={:?} end_date={:?} site={:?}",
            filter.start_date,
            filter.end_date,
            filter.site
        );

        let rows = self.store.query_events(filter).map_err(|e| {
            let (logged, _) = scrub_text(&e.to_string());
            log::error!("STATS_QUERY_FAILED error={}", logged);
            Error::Query(e)
        })?;

        let row_count = rows.len();
        let stats = roll_up(group_events(rows, filter));

        log::info!(
            "STATS_COMPLETE rows={} groups={}",
            row_count,
            stats.len()
        );

        Ok(stats)
    }

    /// Daily statistics wrapped with the period, site filter and totals.
    pub fn daily_report(&self, filter: &StatsFilter) -> Result<StatsReport> {
        let stats = self.compute_daily_stats(filter)?;
        Ok(StatsReport::new(filter, stats))
    }

    /// Total number of stored events.
    pub fn total_events(&self) -> Result<u64> {
        self.store.count_events().map_err(Error::Query)
    }
}
