//! SQL query builders.
//!
//! Generates PostgreSQL statements for hosts that back [`EventStore`] with a
//! database. Execution is left to the host. The `email_events` table is
//! expected to carry a unique index on `content_hash`.
//!
//! [`EventStore`]: crate::storage::EventStore

use crate::aggregation::filter::StatsFilter;

/// Table holding stored events.
pub const EVENTS_TABLE: &str = "email_events";

/// Get the list of columns for the events table.
///
/// Returns tuples of (column_name, parameter_placeholder).
pub fn get_event_columns() -> Vec<(&'static str, &'static str)> {
    vec![
        ("event_id", "$1"),
        ("event_type", "$2"),
        ("email", "$3"),
        ("site", "$4"),
        ("timestamp", "$5"),
        ("campaign_id", "$6"),
        ("subject", "$7"),
        ("ip_address", "$8"),
        ("user_agent", "$9"),
        ("content_hash", "$10"),
    ]
}

/// Build INSERT query for an event.
///
/// Conflicts on the fingerprint insert nothing and return no row, which the
/// host reports as a duplicate.
pub fn build_event_insert() -> String {
    let columns = get_event_columns();
    let col_names: Vec<&str> = columns.iter().map(|(name, _)| *name).collect();
    let placeholders: Vec<&str> = columns.iter().map(|(_, ph)| *ph).collect();

    format!(
        "INSERT INTO {} ({}) VALUES ({}) ON CONFLICT (content_hash) DO NOTHING RETURNING event_id",
        EVENTS_TABLE,
        col_names.join(", "),
        placeholders.join(", ")
    )
}

/// Build the fingerprint existence check. Takes the fingerprint as `$1`.
pub fn build_fingerprint_exists() -> String {
    format!(
        "SELECT EXISTS(SELECT 1 FROM {} WHERE content_hash = $1)",
        EVENTS_TABLE
    )
}

/// Build the total event count query.
pub fn build_event_count() -> String {
    format!("SELECT COUNT(*) FROM {}", EVENTS_TABLE)
}

/// A query with its positional parameters, in placeholder order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilteredQuery {
    pub sql: String,
    pub params: Vec<String>,
}

/// WHERE conditions and parameters for a stats filter.
fn filter_conditions(filter: &StatsFilter) -> (Vec<String>, Vec<String>) {
    let mut conditions = Vec::new();
    let mut params = Vec::new();

    if let Some(start) = filter.start_date {
        params.push(start.to_string());
        conditions.push(format!("DATE(timestamp) >= ${}", params.len()));
    }
    if let Some(end) = filter.end_date {
        params.push(end.to_string());
        conditions.push(format!("DATE(timestamp) <= ${}", params.len()));
    }
    if let Some(site) = &filter.site {
        params.push(site.clone());
        conditions.push(format!("site = ${}", params.len()));
    }

    (conditions, params)
}

fn where_clause(conditions: &[String]) -> String {
    if conditions.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", conditions.join(" AND "))
    }
}

/// Build the per-event summary query backing `EventStore::query_events`.
///
/// Rows are `(date, site, event_type, email)`.
pub fn build_event_summary_query(filter: &StatsFilter) -> FilteredQuery {
    let (conditions, params) = filter_conditions(filter);
    let sql = format!(
        "SELECT DATE(timestamp) AS date, site, event_type, email FROM {}{} \
         ORDER BY date DESC, site, event_type",
        EVENTS_TABLE,
        where_clause(&conditions)
    );
    FilteredQuery { sql, params }
}

/// Build the grouped leaf query for hosts that aggregate in the database.
///
/// Rows are `(date, site, event_type, count, unique_emails)`.
pub fn build_daily_stats_query(filter: &StatsFilter) -> FilteredQuery {
    let (conditions, params) = filter_conditions(filter);
    let sql = format!(
        "SELECT DATE(timestamp) AS date, site, event_type, \
         COUNT(*) AS count, COUNT(DISTINCT email) AS unique_emails FROM {}{} \
         GROUP BY DATE(timestamp), site, event_type \
         ORDER BY date DESC, site, event_type",
        EVENTS_TABLE,
        where_clause(&conditions)
    );
    FilteredQuery { sql, params }
}
