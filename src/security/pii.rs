//! PII masking for log output.
//!
//! Participant identifiers are e-mail addresses and event metadata carries
//! client IPs, so neither is written to logs verbatim:
//! - Participant addresses are masked to `u***@example.com`
//! - Free text (e.g. backend error messages) has e-mails and IPv4
//!   addresses replaced with `[EMAIL]` / `[IP_ADDRESS]`

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Email pattern
    static ref EMAIL_PATTERN: Regex = Regex::new(
        r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}"
    ).unwrap();

    /// A whole string that is exactly one address
    static ref EMAIL_EXACT: Regex = Regex::new(
        r"^([a-zA-Z0-9._%+-]+)@([a-zA-Z0-9.-]+\.[a-zA-Z]{2,})$"
    ).unwrap();

    /// IP address pattern (IPv4)
    static ref IP_PATTERN: Regex = Regex::new(
        r"\b(?:\d{1,3}\.){3}\d{1,3}\b"
    ).unwrap();
}

/// Placeholder for identifiers that are not recognisable addresses.
pub const REDACTED: &str = "[REDACTED]";

/// Counts of entities replaced by [`scrub_text`].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PiiScrubResult {
    pub emails_found: usize,
    pub ips_found: usize,
}

impl PiiScrubResult {
    pub fn total_entities(&self) -> usize {
        self.emails_found + self.ips_found
    }
}

/// Mask a participant address, keeping the first character and the domain.
///
/// Anything that is not a single address is replaced entirely.
pub fn mask_participant(participant: &str) -> String {
    match EMAIL_EXACT.captures(participant.trim()) {
        Some(caps) => {
            let local = &caps[1];
            let first = local.chars().next().unwrap_or('*');
            format!("{}***@{}", first, &caps[2])
        }
        None => REDACTED.to_string(),
    }
}

/// Participant label for a log line, honouring the redaction setting.
pub fn participant_for_log(participant: &str, redact: bool) -> String {
    if redact {
        mask_participant(participant)
    } else {
        participant.to_string()
    }
}

/// Replace e-mail and IPv4 addresses in free text.
pub fn scrub_text(text: &str) -> (String, PiiScrubResult) {
    let mut result = PiiScrubResult::default();
    let mut scrubbed = text.to_string();

    let email_count = EMAIL_PATTERN.find_iter(&scrubbed).count();
    if email_count > 0 {
        result.emails_found = email_count;
        scrubbed = EMAIL_PATTERN.replace_all(&scrubbed, "[EMAIL]").to_string();
    }

    let ip_count = IP_PATTERN.find_iter(&scrubbed).count();
    if ip_count > 0 {
        result.ips_found = ip_count;
        scrubbed = IP_PATTERN.replace_all(&scrubbed, "[IP_ADDRESS]").to_string();
    }

    (scrubbed, result)
}
