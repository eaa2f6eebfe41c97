//! Python bindings.
//!
//! Storage stays on the Python side. Every entry point takes a `store`
//! object exposing:
//! - `fingerprint_exists(fingerprint: str) -> bool`
//! - `insert_event(event_json: str, fingerprint: str) -> str | None`
//!   (the new event id, or `None` when the unique index rejected the row)
//! - `query_events(start_date, end_date, site) -> list[(date, site, type, email)]`
//!   with dates as `YYYY-MM-DD` strings and absent filters passed as `None`
//! - `count_events() -> int`

use std::sync::Arc;

use chrono::NaiveDate;
use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::{PyDict, PyList};

use crate::aggregation::{AggregationEngine, StatsFilter, FILTER_DATE_FORMAT};
use crate::config::IngestConfig;
use crate::error::{Error, ErrorKind, StoreError, StoreResult};
use crate::logging::init_logger;
use crate::pipeline::{parse_events_json, IngestionEngine};
use crate::storage::{seed_if_empty, EmailEvent, EventStore, EventSummary};
use crate::validation::Fingerprint;

/// [`EventStore`] backed by a Python object.
struct PyEventStore {
    inner: PyObject,
}

impl PyEventStore {
    fn new(inner: PyObject) -> Self {
        Self { inner }
    }

    fn shared(inner: PyObject) -> Arc<dyn EventStore> {
        Arc::new(Self::new(inner))
    }
}

impl EventStore for PyEventStore {
    fn fingerprint_exists(&self, fingerprint: &Fingerprint) -> StoreResult<bool> {
        Python::with_gil(|py| {
            self.inner
                .call_method1(py, "fingerprint_exists", (fingerprint.as_str(),))
                .and_then(|v| v.extract::<bool>(py))
                .map_err(StoreError::backend)
        })
    }

    fn insert_event(&self, event: &EmailEvent, fingerprint: &Fingerprint) -> StoreResult<String> {
        let event_json =
            serde_json::to_string(event).map_err(|e| StoreError::Backend(e.into()))?;

        Python::with_gil(|py| {
            let id: Option<String> = self
                .inner
                .call_method1(py, "insert_event", (event_json, fingerprint.as_str()))
                .and_then(|v| v.extract(py))
                .map_err(StoreError::backend)?;

            id.ok_or_else(|| StoreError::Duplicate(fingerprint.to_string()))
        })
    }

    fn query_events(&self, filter: &StatsFilter) -> StoreResult<Vec<EventSummary>> {
        let start = filter.start_date.map(|d| d.to_string());
        let end = filter.end_date.map(|d| d.to_string());
        let site = filter.site.clone();

        let rows: Vec<(String, String, String, String)> = Python::with_gil(|py| {
            self.inner
                .call_method1(py, "query_events", (start, end, site))
                .and_then(|v| v.extract(py))
                .map_err(StoreError::backend)
        })?;

        rows.into_iter()
            .map(|(date, site, event_type, email)| {
                let date = NaiveDate::parse_from_str(&date, FILTER_DATE_FORMAT).map_err(|e| {
                    StoreError::backend(format!("store returned invalid date {:?}: {}", date, e))
                })?;
                Ok(EventSummary {
                    date,
                    site,
                    event_type,
                    email,
                })
            })
            .collect()
    }

    fn count_events(&self) -> StoreResult<u64> {
        Python::with_gil(|py| {
            self.inner
                .call_method0(py, "count_events")
                .and_then(|v| v.extract::<u64>(py))
                .map_err(StoreError::backend)
        })
    }
}

/// Validation problems become `ValueError`, storage problems `RuntimeError`.
fn to_py_err(err: Error) -> PyErr {
    match err.kind() {
        ErrorKind::Validation => PyValueError::new_err(err.to_string()),
        ErrorKind::Duplicate | ErrorKind::Storage => PyRuntimeError::new_err(err.to_string()),
    }
}

/// Process a batch of campaign events.
///
/// # Arguments
/// * `store` - Python store object (see module docs)
/// * `events_json` - `{"events": [...]}` or a bare JSON array
/// * `max_batch_size` - Overrides `CAMPAIGN_STATS_MAX_BATCH_SIZE`
///
/// # Returns
/// Dict with `batch_id`, `processed`, `duplicates`, `errors` and the
/// per-event outcomes under `events`
#[pyfunction]
#[pyo3(signature = (store, events_json, max_batch_size=None))]
fn process_event_batch(
    py: Python<'_>,
    store: PyObject,
    events_json: &str,
    max_batch_size: Option<usize>,
) -> PyResult<Py<PyAny>> {
    init_logger();

    let events = parse_events_json(events_json).map_err(to_py_err)?;

    let mut config = IngestConfig::from_env();
    if let Some(max) = max_batch_size {
        config = config.with_max_batch_size(max);
    }

    let engine = IngestionEngine::with_config(PyEventStore::shared(store), config);
    let result = engine.process_batch(&events).map_err(to_py_err)?;

    let py_result = PyDict::new(py);
    py_result.set_item("batch_id", &result.batch_id)?;
    py_result.set_item("processed", result.processed)?;
    py_result.set_item("duplicates", result.duplicates)?;
    py_result.set_item("errors", result.errors)?;

    let events_list = PyList::empty(py);
    for outcome in &result.events {
        let outcome_dict = PyDict::new(py);
        outcome_dict.set_item("id", outcome.id.as_deref())?;
        outcome_dict.set_item("type", &outcome.event_type)?;
        outcome_dict.set_item("email", &outcome.email)?;
        outcome_dict.set_item("site", &outcome.site)?;
        outcome_dict.set_item("status", outcome.status.as_str())?;

        if let Some(reason) = &outcome.reason {
            outcome_dict.set_item("reason", reason)?;
        }

        events_list.append(outcome_dict)?;
    }
    py_result.set_item("events", events_list)?;

    Ok(py_result.into())
}

/// Compute daily statistics per (date, site).
///
/// Dates are `YYYY-MM-DD`; empty strings and `None` mean no filter.
#[pyfunction]
#[pyo3(signature = (store, start_date=None, end_date=None, site=None))]
fn compute_daily_stats(
    py: Python<'_>,
    store: PyObject,
    start_date: Option<&str>,
    end_date: Option<&str>,
    site: Option<&str>,
) -> PyResult<Py<PyAny>> {
    init_logger();

    let filter = StatsFilter::parse(start_date, end_date, site).map_err(to_py_err)?;
    let engine = AggregationEngine::new(PyEventStore::shared(store));
    let report = engine.daily_report(&filter).map_err(to_py_err)?;

    let period = PyDict::new(py);
    period.set_item("start_date", report.period.start_date.map(|d| d.to_string()))?;
    period.set_item("end_date", report.period.end_date.map(|d| d.to_string()))?;

    let py_result = PyDict::new(py);
    py_result.set_item("period", period)?;
    py_result.set_item("site_filter", report.site_filter.as_deref())?;
    py_result.set_item("total_days", report.total_days)?;
    py_result.set_item("total_sites", report.total_sites)?;

    let stats_list = PyList::empty(py);
    for daily in &report.stats {
        let daily_dict = PyDict::new(py);
        daily_dict.set_item("date", daily.date.to_string())?;
        daily_dict.set_item("site", &daily.site)?;
        daily_dict.set_item("total_events", daily.total_events)?;
        daily_dict.set_item("total_unique_emails", daily.total_unique_emails)?;

        let events_dict = PyDict::new(py);
        for (event_type, stats) in &daily.events {
            let type_dict = PyDict::new(py);
            type_dict.set_item("count", stats.count)?;
            type_dict.set_item("unique_emails", stats.unique_emails)?;
            events_dict.set_item(event_type, type_dict)?;
        }
        daily_dict.set_item("events", events_dict)?;

        stats_list.append(daily_dict)?;
    }
    py_result.set_item("stats", stats_list)?;

    Ok(py_result.into())
}

/// Total number of stored events.
#[pyfunction]
fn total_event_count(store: PyObject) -> PyResult<u64> {
    AggregationEngine::new(PyEventStore::shared(store))
        .total_events()
        .map_err(to_py_err)
}

/// Ingest the reference seed events into an empty store.
///
/// Returns the number of processed events, or `None` if the store already
/// held events.
#[pyfunction]
fn seed_reference_events(store: PyObject) -> PyResult<Option<usize>> {
    init_logger();

    let engine = IngestionEngine::new(PyEventStore::shared(store));
    let seeded = seed_if_empty(&engine).map_err(to_py_err)?;
    Ok(seeded.map(|result| result.processed))
}

/// Python module definition
#[pymodule]
fn campaign_stats_core(_py: Python<'_>, m: &PyModule) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(process_event_batch, m)?)?;
    m.add_function(wrap_pyfunction!(compute_daily_stats, m)?)?;
    m.add_function(wrap_pyfunction!(total_event_count, m)?)?;
    m.add_function(wrap_pyfunction!(seed_reference_events, m)?)?;
    Ok(())
}
