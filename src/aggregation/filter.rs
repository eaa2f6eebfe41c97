//! Optional date and site filters for the statistics query.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Date format accepted for filter bounds.
pub const FILTER_DATE_FORMAT: &str = "%Y-%m-%d";

/// Conjunctive filter over stored events. Absent bounds impose nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsFilter {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub site: Option<String>,
}

impl StatsFilter {
    /// Filter that matches every event.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn since(mut self, start: NaiveDate) -> Self {
        self.start_date = Some(start);
        self
    }

    pub fn until(mut self, end: NaiveDate) -> Self {
        self.end_date = Some(end);
        self
    }

    pub fn for_site(mut self, site: &str) -> Self {
        self.site = Some(site.to_string());
        self
    }

    /// Build a filter from caller-supplied strings.
    ///
    /// Blank strings count as absent. Dates must be `YYYY-MM-DD`; the site is
    /// compared exactly as given.
    pub fn parse(start: Option<&str>, end: Option<&str>, site: Option<&str>) -> Result<Self> {
        let filter = Self {
            start_date: parse_bound("start_date", start)?,
            end_date: parse_bound("end_date", end)?,
            site: non_empty(site).map(str::to_string),
        };

        if let (Some(start), Some(end)) = (filter.start_date, filter.end_date) {
            if start > end {
                return Err(Error::validation(format!(
                    "start_date {} is after end_date {}",
                    start, end
                )));
            }
        }

        Ok(filter)
    }

    pub fn is_unbounded(&self) -> bool {
        self.start_date.is_none() && self.end_date.is_none() && self.site.is_none()
    }

    /// Whether an event on `date` for `site` qualifies.
    pub fn matches(&self, date: NaiveDate, site: &str) -> bool {
        if let Some(start) = self.start_date {
            if date < start {
                return false;
            }
        }
        if let Some(end) = self.end_date {
            if date > end {
                return false;
            }
        }
        match &self.site {
            Some(wanted) => wanted == site,
            None => true,
        }
    }
}

/// Blank values count as absent. Non-blank values are kept verbatim.
fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_bound(name: &str, value: Option<&str>) -> Result<Option<NaiveDate>> {
    match non_empty(value) {
        None => Ok(None),
        Some(raw) => NaiveDate::parse_from_str(raw.trim(), FILTER_DATE_FORMAT)
            .map(Some)
            .map_err(|e| {
                Error::validation(format!("invalid {} {:?}: expected YYYY-MM-DD ({})", name, raw, e))
            }),
    }
}
