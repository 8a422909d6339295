//! Observable events in stratadb
//!
//! Every log line names one of these events. Events are explicit and
//! typed so tests and operators can grep for exact strings.

use std::fmt;

/// Observable events emitted by the store and server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Boot & lifecycle
    /// Startup begins
    BootStart,
    /// Startup complete
    BootComplete,
    /// Configuration loaded
    ConfigLoaded,
    /// HTTP server accepting requests
    Serving,

    // Write path
    /// New document registered (first revision committed)
    DocumentCreated,
    /// Revision committed and state pointer advanced
    CommitApplied,
    /// Compare-and-swap lost; commit will retry against the new head
    CommitConflict,
    /// Commit gave up after exhausting retries
    CommitFailed,
    /// Promotion committed into the target state
    PromotionApplied,

    // Index projection
    /// Index upsert failed transiently; backing off before retry
    IndexProjectionRetry,
    /// Index upsert abandoned after retries (write is still durable)
    IndexProjectionFailed,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::BootStart => "STRATADB_STARTUP_BEGIN",
            Event::BootComplete => "STRATADB_STARTUP_COMPLETE",
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::Serving => "STRATADB_SERVING",

            Event::DocumentCreated => "DOCUMENT_CREATED",
            Event::CommitApplied => "COMMIT_APPLIED",
            Event::CommitConflict => "COMMIT_CONFLICT",
            Event::CommitFailed => "COMMIT_FAILED",
            Event::PromotionApplied => "PROMOTION_APPLIED",

            Event::IndexProjectionRetry => "INDEX_PROJECTION_RETRY",
            Event::IndexProjectionFailed => "INDEX_PROJECTION_FAILED",
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_events_have_screaming_snake_names() {
        let events = [
            Event::BootStart,
            Event::BootComplete,
            Event::ConfigLoaded,
            Event::Serving,
            Event::DocumentCreated,
            Event::CommitApplied,
            Event::CommitConflict,
            Event::CommitFailed,
            Event::PromotionApplied,
            Event::IndexProjectionRetry,
            Event::IndexProjectionFailed,
        ];

        for event in events {
            let s = event.as_str();
            assert!(!s.is_empty());
            assert!(s.chars().all(|c| c.is_ascii_uppercase() || c == '_'));
        }
    }

    #[test]
    fn test_event_display() {
        assert_eq!(format!("{}", Event::CommitApplied), "COMMIT_APPLIED");
        assert_eq!(
            format!("{}", Event::IndexProjectionFailed),
            "INDEX_PROJECTION_FAILED"
        );
    }
}
