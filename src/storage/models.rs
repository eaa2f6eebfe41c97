//! Event models.
//!
//! These models represent events as submitted by callers, as stored, and as
//! returned by the statistics query.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::validation::fingerprint::Fingerprint;

/// A campaign lifecycle event as submitted by a caller.
///
/// Required fields default to empty strings when absent from JSON input so
/// that a missing field fails validation for that event only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmailEvent {
    #[serde(rename = "type", default)]
    pub event_type: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub site: String,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub campaign_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub metadata: HashMap<String, Value>,
}

impl EmailEvent {
    /// Event with only the four identifying fields set.
    pub fn new(event_type: &str, email: &str, site: &str, timestamp: &str) -> Self {
        Self {
            event_type: event_type.to_string(),
            email: email.to_string(),
            site: site.to_string(),
            timestamp: timestamp.to_string(),
            ..Self::default()
        }
    }

    pub fn with_campaign(mut self, campaign_id: &str) -> Self {
        self.campaign_id = Some(campaign_id.to_string());
        self
    }

    pub fn with_subject(mut self, subject: &str) -> Self {
        self.subject = Some(subject.to_string());
        self
    }

    pub fn with_client(mut self, ip_address: &str, user_agent: &str) -> Self {
        self.ip_address = Some(ip_address.to_string());
        self.user_agent = Some(user_agent.to_string());
        self
    }
}

/// An event persisted by a store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredEvent {
    pub id: String,
    pub fingerprint: Fingerprint,
    pub date: NaiveDate,
    pub stored_at: DateTime<Utc>,
    #[serde(flatten)]
    pub event: EmailEvent,
}

/// The slice of a stored event the aggregation needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventSummary {
    pub date: NaiveDate,
    pub site: String,
    pub event_type: String,
    pub email: String,
}

impl EventSummary {
    pub fn new(date: NaiveDate, site: &str, event_type: &str, email: &str) -> Self {
        Self {
            date,
            site: site.to_string(),
            event_type: event_type.to_string(),
            email: email.to_string(),
        }
    }
}

impl From<&StoredEvent> for EventSummary {
    fn from(stored: &StoredEvent) -> Self {
        Self {
            date: stored.date,
            site: stored.event.site.clone(),
            event_type: stored.event.event_type.clone(),
            email: stored.event.email.clone(),
        }
    }
}

/// Generate a fresh stored-event identifier.
pub fn new_event_id() -> String {
    Uuid::new_v4().to_string()
}

/// ISO 8601 date-time layouts carrying a UTC offset (`Z`, `+03`, `+0300`, `+03:00`).
const OFFSET_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f%#z",
    "%Y-%m-%dT%H:%M%#z",
    "%Y-%m-%d %H:%M:%S%.f%#z",
    "%Y%m%dT%H%M%S%#z",
];

/// ISO 8601 date-time layouts without an offset.
const NAIVE_FORMATS: [&str; 5] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y%m%dT%H%M%S",
];

/// Calendar date of an event timestamp.
///
/// Timestamps with an offset keep the date as written (the offset is not
/// applied), matching how a `TIMESTAMP` column stores them. Extended and
/// basic ISO 8601 forms, with or without seconds, and bare dates are accepted.
pub fn event_date(timestamp: &str) -> Option<NaiveDate> {
    let ts = timestamp.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(ts) {
        return Some(dt.naive_local().date());
    }

    for format in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(ts, format) {
            return Some(dt.naive_local().date());
        }
    }

    for format in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(ts, format) {
            return Some(dt.date());
        }
    }

    NaiveDate::parse_from_str(ts, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(ts, "%Y%m%d"))
        .ok()
}
