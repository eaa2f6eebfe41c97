//! Ingestion configuration.
//!
//! Defaults are usable as-is; hosts may override them through environment
//! variables or by deserializing an [`IngestConfig`] from their own config.

use std::env;

use serde::Deserialize;

/// Environment variable capping the number of events per batch.
pub const ENV_MAX_BATCH_SIZE: &str = "CAMPAIGN_STATS_MAX_BATCH_SIZE";

/// Environment variable toggling participant masking in logs.
pub const ENV_REDACT_PARTICIPANTS: &str = "CAMPAIGN_STATS_REDACT_PARTICIPANTS";

/// Settings for the ingestion engine.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    /// Reject batches with more events than this. `None` means unbounded.
    pub max_batch_size: Option<usize>,
    /// Mask participant addresses in log lines.
    pub redact_participants: bool,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            max_batch_size: None,
            redact_participants: true,
        }
    }
}

impl IngestConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_batch_size(mut self, max: usize) -> Self {
        self.max_batch_size = Some(max);
        self
    }

    pub fn with_redaction(mut self, redact: bool) -> Self {
        self.redact_participants = redact;
        self
    }

    /// Load configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_MAX_BATCH_SIZE) {
            match raw.trim().parse::<usize>() {
                Ok(0) => config.max_batch_size = None,
                Ok(max) => config.max_batch_size = Some(max),
                Err(e) => log::warn!(
                    "CONFIG_INVALID key={} value={:?} error={}",
                    ENV_MAX_BATCH_SIZE,
                    raw,
                    e
                ),
            }
        }

        if let Some(raw) = lookup(ENV_REDACT_PARTICIPANTS) {
            match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => config.redact_participants = true,
                "0" | "false" | "no" | "off" => config.redact_participants = false,
                _ => log::warn!(
                    "CONFIG_INVALID key={} value={:?}",
                    ENV_REDACT_PARTICIPANTS,
                    raw
                ),
            }
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = IngestConfig::from_lookup(lookup_from(&[]));
        assert_eq!(config, IngestConfig::default());
        assert!(config.redact_participants);
        assert_eq!(config.max_batch_size, None);
    }

    #[test]
    fn test_env_overrides() {
        let config = IngestConfig::from_lookup(lookup_from(&[
            (ENV_MAX_BATCH_SIZE, "500"),
            (ENV_REDACT_PARTICIPANTS, "off"),
        ]));
        assert_eq!(config.max_batch_size, Some(500));
        assert!(!config.redact_participants);
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = IngestConfig::from_lookup(lookup_from(&[
            (ENV_MAX_BATCH_SIZE, "lots"),
            (ENV_REDACT_PARTICIPANTS, "maybe"),
        ]));
        assert_eq!(config, IngestConfig::default());
    }

    #[test]
    fn test_deserialize_partial() {
        let config: IngestConfig = serde_json::from_str(r#"{"max_batch_size": 10}"#).unwrap();
        assert_eq!(config.max_batch_size, Some(10));
        assert!(config.redact_participants);
    }
}
