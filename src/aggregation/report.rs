//! Statistics report wrapping the daily statistics with query metadata.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::aggregation::filter::StatsFilter;
use crate::aggregation::stats::DailyStats;

/// The date range a report was requested for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsPeriod {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// Daily statistics plus the filters that produced them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsReport {
    pub period: StatsPeriod,
    pub site_filter: Option<String>,
    /// Distinct dates present in `stats`.
    pub total_days: usize,
    /// Distinct sites present in `stats`.
    pub total_sites: usize,
    pub stats: Vec<DailyStats>,
}

impl StatsReport {
    pub fn new(filter: &StatsFilter, stats: Vec<DailyStats>) -> Self {
        let total_days = stats.iter().map(|s| s.date).collect::<HashSet<_>>().len();
        let total_sites = stats
            .iter()
            .map(|s| s.site.as_str())
            .collect::<HashSet<_>>()
            .len();

        Self {
            period: StatsPeriod {
                start_date: filter.start_date,
                end_date: filter.end_date,
            },
            site_filter: filter.site.clone(),
            total_days,
            total_sites,
            stats,
        }
    }

    /// Sum of `total_events` across all groups.
    pub fn total_events(&self) -> u64 {
        self.stats.iter().map(|s| s.total_events).sum()
    }
}
