//! Daily statistics models and the grouping/rollup passes.

use std::cmp::Reverse;
use std::collections::{BTreeMap, HashSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::aggregation::filter::StatsFilter;
use crate::storage::models::EventSummary;

/// Counts for one event type within a (date, site) bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventTypeStats {
    pub count: u64,
    pub unique_emails: u64,
}

/// Summary of one (date, site) bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyStats {
    pub date: NaiveDate,
    pub site: String,
    pub total_events: u64,
    /// Sum of the per-type distinct counts, not a distinct count across types.
    pub total_unique_emails: u64,
    pub events: BTreeMap<String, EventTypeStats>,
}

/// Composite (date, site, event type) key of a leaf partition.
pub type LeafKey = (NaiveDate, String, String);

#[derive(Debug, Default)]
struct Leaf {
    count: u64,
    participants: HashSet<String>,
}

/// Partition qualifying rows by (date, site, type) in a single pass.
pub fn group_events<I>(rows: I, filter: &StatsFilter) -> BTreeMap<LeafKey, EventTypeStats>
where
    I: IntoIterator<Item = EventSummary>,
{
    let mut leaves: BTreeMap<LeafKey, Leaf> = BTreeMap::new();

    for row in rows {
        if !filter.matches(row.date, &row.site) {
            continue;
        }
        let leaf = leaves
            .entry((row.date, row.site, row.event_type))
            .or_default();
        leaf.count += 1;
        leaf.participants.insert(row.email);
    }

    leaves
        .into_iter()
        .map(|(key, leaf)| {
            let stats = EventTypeStats {
                count: leaf.count,
                unique_emails: leaf.participants.len() as u64,
            };
            (key, stats)
        })
        .collect()
}

/// Roll leaves up into one [`DailyStats`] per (date, site).
///
/// Output is ordered by date descending, then site ascending.
pub fn roll_up(leaves: BTreeMap<LeafKey, EventTypeStats>) -> Vec<DailyStats> {
    let mut groups: BTreeMap<(Reverse<NaiveDate>, String), DailyStats> = BTreeMap::new();

    for ((date, site, event_type), stats) in leaves {
        let group = groups
            .entry((Reverse(date), site.clone()))
            .or_insert_with(|| DailyStats {
                date,
                site,
                total_events: 0,
                total_unique_emails: 0,
                events: BTreeMap::new(),
            });
        group.total_events += stats.count;
        group.total_unique_emails += stats.unique_emails;
        group.events.insert(event_type, stats);
    }

    groups.into_values().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn row(d: &str, site: &str, event_type: &str, email: &str) -> EventSummary {
        EventSummary::new(date(d), site, event_type, email)
    }

    #[test]
    fn test_group_counts_and_distinct() {
        let rows = vec![
            row("2025-08-21", "site-a.com", "open", "a@example.com"),
            row("2025-08-21", "site-a.com", "open", "a@example.com"),
            row("2025-08-21", "site-a.com", "open", "b@example.com"),
            row("2025-08-21", "site-a.com", "click", "a@example.com"),
        ];
        let leaves = group_events(rows, &StatsFilter::all());
        assert_eq!(leaves.len(), 2);

        let open = leaves[&(date("2025-08-21"), "site-a.com".to_string(), "open".to_string())];
        assert_eq!(open, EventTypeStats { count: 3, unique_emails: 2 });
    }

    #[test]
    fn test_group_applies_filter() {
        let rows = vec![
            row("2025-08-20", "site-a.com", "sent", "a@example.com"),
            row("2025-08-21", "site-a.com", "sent", "a@example.com"),
            row("2025-08-21", "site-b.com", "sent", "a@example.com"),
        ];
        let filter = StatsFilter::all().since(date("2025-08-21")).for_site("site-a.com");
        let leaves = group_events(rows, &filter);
        assert_eq!(leaves.len(), 1);
        assert!(leaves.contains_key(&(date("2025-08-21"), "site-a.com".to_string(), "sent".to_string())));
    }

    #[test]
    fn test_rollup_sums_distinct_per_type() {
        // One participant under two types counts twice at the rollup level.
        let rows = vec![
            row("2025-08-21", "site-a.com", "sent", "a@example.com"),
            row("2025-08-21", "site-a.com", "open", "a@example.com"),
            row("2025-08-21", "site-a.com", "open", "a@example.com"),
        ];
        let stats = roll_up(group_events(rows, &StatsFilter::all()));
        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].total_events, 3);
        assert_eq!(stats[0].total_unique_emails, 2);
        assert_eq!(stats[0].events["open"], EventTypeStats { count: 2, unique_emails: 1 });
    }

    #[test]
    fn test_rollup_order() {
        let rows = vec![
            row("2025-08-20", "site-c.com", "sent", "c@example.com"),
            row("2025-08-21", "site-b.com", "sent", "b@example.com"),
            row("2025-08-20", "site-a.com", "sent", "a@example.com"),
            row("2025-08-21", "site-a.com", "sent", "a@example.com"),
        ];
        let stats = roll_up(group_events(rows, &StatsFilter::all()));
        let keys: Vec<(String, &str)> = stats
            .iter()
            .map(|s| (s.date.to_string(), s.site.as_str()))
            .collect();
        assert_eq!(
            keys,
            vec![
                ("2025-08-21".to_string(), "site-a.com"),
                ("2025-08-21".to_string(), "site-b.com"),
                ("2025-08-20".to_string(), "site-a.com"),
                ("2025-08-20".to_string(), "site-c.com"),
            ]
        );
    }

    #[test]
    fn test_empty_input() {
        assert!(roll_up(group_events(Vec::new(), &StatsFilter::all())).is_empty());
    }

    #[test]
    fn test_daily_stats_serialization() {
        let stats = roll_up(group_events(
            vec![row("2025-08-21", "site-a.com", "sent", "a@example.com")],
            &StatsFilter::all(),
        ));
        let json = serde_json::to_value(&stats[0]).unwrap();
        assert_eq!(json["date"], "2025-08-21");
        assert_eq!(json["total_events"], 1);
        assert_eq!(json["events"]["sent"]["unique_emails"], 1);
    }
}
