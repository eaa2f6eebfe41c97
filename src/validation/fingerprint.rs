//! Content fingerprints.
//!
//! The fingerprint is the deduplication key: a lowercase hex SHA-256 over
//! `type|email|site|timestamp`. Campaign id, subject and client metadata do
//! not participate, so a resubmitted event with different metadata is still
//! recognised as a duplicate.

use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::storage::models::EmailEvent;

/// Separator between the hashed fields.
pub const FINGERPRINT_DELIMITER: &str = "|";

/// Length of a rendered fingerprint (SHA-256 as hex).
pub const FINGERPRINT_LEN: usize = 64;

/// Lowercase hex SHA-256 content fingerprint.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Fingerprint of the identifying fields of an event.
    pub fn of(event: &EmailEvent) -> Self {
        Self::from_parts(&event.event_type, &event.email, &event.site, &event.timestamp)
    }

    pub fn from_parts(event_type: &str, email: &str, site: &str, timestamp: &str) -> Self {
        let content = [event_type, email, site, timestamp].join(FINGERPRINT_DELIMITER);
        let mut hasher = Sha256::new();
        hasher.update(content.as_bytes());
        Fingerprint(hex::encode(hasher.finalize()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Fingerprint {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn event() -> EmailEvent {
        EmailEvent::new("sent", "user@example.com", "site-a.com", "2025-08-21T10:30:00Z")
    }

    #[test]
    fn test_fingerprint_matches_joined_digest() {
        let expected = hex::encode(Sha256::digest(
            "sent|user@example.com|site-a.com|2025-08-21T10:30:00Z".as_bytes(),
        ));
        assert_eq!(Fingerprint::of(&event()).as_str(), expected);
    }

    #[test]
    fn test_fingerprint_format() {
        let fp = Fingerprint::of(&event());
        assert_eq!(fp.as_str().len(), FINGERPRINT_LEN);
        assert!(fp
            .as_str()
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[test]
    fn test_metadata_ignored() {
        let plain = event();
        let decorated = event()
            .with_campaign("camp_123")
            .with_subject("Welcome Email")
            .with_client("192.168.1.1", "Mozilla/5.0");
        assert_eq!(Fingerprint::of(&plain), Fingerprint::of(&decorated));
    }

    #[test]
    fn test_each_field_participates() {
        let base = Fingerprint::of(&event());
        let variants = [
            EmailEvent::new("open", "user@example.com", "site-a.com", "2025-08-21T10:30:00Z"),
            EmailEvent::new("sent", "user2@example.com", "site-a.com", "2025-08-21T10:30:00Z"),
            EmailEvent::new("sent", "user@example.com", "site-b.com", "2025-08-21T10:30:00Z"),
            EmailEvent::new("sent", "user@example.com", "site-a.com", "2025-08-21T10:31:00Z"),
        ];
        for variant in &variants {
            assert_ne!(Fingerprint::of(variant), base, "{:?}", variant);
        }
    }

    #[test]
    fn test_display_and_serde() {
        let fp = Fingerprint::of(&event());
        assert_eq!(fp.to_string(), fp.as_str());
        let json = serde_json::to_string(&fp).unwrap();
        assert_eq!(json, format!("\"{}\"", fp));
    }

    proptest! {
        #[test]
        fn prop_deterministic_and_metadata_blind(
            event_type in "[a-z]{1,10}",
            local in "[a-z0-9.]{1,12}",
            site in "[a-z-]{1,12}\\.com",
            subject in ".{0,40}",
            campaign in "[a-z_0-9]{0,12}",
        ) {
            let email = format!("{}@example.com", local);
            let a = EmailEvent::new(&event_type, &email, &site, "2025-08-21T10:30:00Z");
            let b = a.clone().with_subject(&subject).with_campaign(&campaign);
            prop_assert_eq!(Fingerprint::of(&a), Fingerprint::of(&a));
            prop_assert_eq!(Fingerprint::of(&a), Fingerprint::of(&b));
        }

        #[test]
        fn prop_site_change_changes_fingerprint(
            site_a in "[a-z]{1,12}",
            site_b in "[a-z]{1,12}",
        ) {
            prop_assume!(site_a != site_b);
            let a = EmailEvent::new("open", "user@example.com", &site_a, "2025-08-21");
            let b = EmailEvent::new("open", "user@example.com", &site_b, "2025-08-21");
            prop_assert_ne!(Fingerprint::of(&a), Fingerprint::of(&b));
        }
    }
}
