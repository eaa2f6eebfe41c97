//! Required-field validation for submitted events.

use crate::storage::models::EmailEvent;

/// Event validation result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventValidationResult {
    pub valid: bool,
    pub missing_fields: Vec<&'static str>,
}

impl EventValidationResult {
    pub fn valid() -> Self {
        Self {
            valid: true,
            missing_fields: Vec::new(),
        }
    }

    pub fn invalid(missing_fields: Vec<&'static str>) -> Self {
        Self {
            valid: false,
            missing_fields,
        }
    }

    /// Human-readable rejection reason, if invalid.
    pub fn reason(&self) -> Option<String> {
        if self.valid {
            None
        } else {
            Some(format!(
                "missing required fields: {}",
                self.missing_fields.join(", ")
            ))
        }
    }
}

/// Check that type, email, site and timestamp are all non-empty.
pub fn validate_event(event: &EmailEvent) -> EventValidationResult {
    let missing: Vec<&'static str> = [
        ("type", &event.event_type),
        ("email", &event.email),
        ("site", &event.site),
        ("timestamp", &event.timestamp),
    ]
    .into_iter()
    .filter(|(_, value)| value.is_empty())
    .map(|(name, _)| name)
    .collect();

    if missing.is_empty() {
        EventValidationResult::valid()
    } else {
        EventValidationResult::invalid(missing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_event() {
        let event = EmailEvent::new("open", "user@example.com", "site-a.com", "2025-08-21T10:35:00Z");
        let result = validate_event(&event);
        assert!(result.valid);
        assert!(result.reason().is_none());
    }

    #[test]
    fn test_missing_fields_listed_in_order() {
        let event = EmailEvent::new("", "user@example.com", "", "2025-08-21T10:35:00Z");
        let result = validate_event(&event);
        assert!(!result.valid);
        assert_eq!(result.missing_fields, vec!["type", "site"]);
        assert_eq!(
            result.reason().as_deref(),
            Some("missing required fields: type, site")
        );
    }

    #[test]
    fn test_metadata_not_required() {
        let event = EmailEvent::new("bounce", "invalid@example.com", "site-a.com", "2025-08-21T11:00:00Z");
        assert!(event.campaign_id.is_none());
        assert!(validate_event(&event).valid);
    }
}
