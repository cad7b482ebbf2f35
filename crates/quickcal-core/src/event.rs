//! Event draft handed to the link builder.
//!
//! An [`EventDraft`] is built fresh for every click from the page title, the
//! page address and whatever the extractor found. It is never mutated once
//! built.

use serde::{Deserialize, Serialize};

/// Description of a calendar event before it is encoded into a URL.
///
/// Empty strings are treated as "not provided" by the link builder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDraft {
    /// Event title (`text` parameter).
    pub title: String,
    /// Event description (`details` parameter).
    pub details: String,
    /// Event location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// ISO-like start timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_iso: Option<String>,
    /// ISO-like end timestamp. When absent a one hour event is assumed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_iso: Option<String>,
}

impl EventDraft {
    /// Creates a draft with a title and details.
    pub fn new(title: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            details: details.into(),
            ..Default::default()
        }
    }

    /// Sets the location.
    #[must_use]
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Sets the start timestamp.
    #[must_use]
    pub fn with_start(mut self, start_iso: impl Into<String>) -> Self {
        self.start_iso = Some(start_iso.into());
        self
    }

    /// Sets the start timestamp if one is given.
    #[must_use]
    pub fn with_optional_start(mut self, start_iso: Option<String>) -> Self {
        self.start_iso = start_iso;
        self
    }

    /// Sets the end timestamp.
    #[must_use]
    pub fn with_end(mut self, end_iso: impl Into<String>) -> Self {
        self.end_iso = Some(end_iso.into());
        self
    }

    /// Returns `true` if the draft carries a start timestamp.
    pub fn has_start(&self) -> bool {
        self.start_iso.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_fields() {
        let draft = EventDraft::new("Meeting", "https://fullcast.jp/job/1")
            .with_location("Tokyo")
            .with_start("2025-11-01T09:30:00")
            .with_end("2025-11-01T11:00:00");

        assert_eq!(draft.title, "Meeting");
        assert_eq!(draft.details, "https://fullcast.jp/job/1");
        assert_eq!(draft.location.as_deref(), Some("Tokyo"));
        assert_eq!(draft.start_iso.as_deref(), Some("2025-11-01T09:30:00"));
        assert_eq!(draft.end_iso.as_deref(), Some("2025-11-01T11:00:00"));
        assert!(draft.has_start());
    }

    #[test]
    fn optional_start_can_clear() {
        let draft = EventDraft::new("t", "d")
            .with_start("2025-11-01")
            .with_optional_start(None);
        assert!(!draft.has_start());
    }

    #[test]
    fn serde_skips_missing_optionals() {
        let draft = EventDraft::new("Meeting", "");
        let json = serde_json::to_string(&draft).unwrap();
        assert_eq!(json, r#"{"title":"Meeting","details":""}"#);

        let parsed: EventDraft =
            serde_json::from_str(r#"{"title":"Meeting","details":"","start_iso":"2025-11-01"}"#)
                .unwrap();
        assert_eq!(parsed.start_iso.as_deref(), Some("2025-11-01"));
        assert_eq!(parsed.location, None);
    }
}
