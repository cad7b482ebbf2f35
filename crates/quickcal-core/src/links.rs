//! Google Calendar deep links.
//!
//! Builds the "create event" URL from an [`EventDraft`]. Parameters are
//! form-encoded the same way a browser's `URLSearchParams` encodes them and
//! are always emitted in the order `text`, `details`, `location`, `dates`.
//!
//! # Example
//!
//! ```
//! use quickcal_core::event::EventDraft;
//! use quickcal_core::links::build_calendar_url;
//!
//! let draft = EventDraft::new("Meeting", "").with_start("2025-11-01T09:30:00");
//! let url = build_calendar_url(&draft);
//! assert!(url.ends_with("dates=20251101T093000Z%2F20251101T103000Z"));
//! ```

use tracing::debug;
use url::form_urlencoded;

use crate::event::EventDraft;
use crate::time::{ClockZone, add_hours_iso, compact_date};

/// Fixed target of every deep link.
pub const CALENDAR_BASE_URL: &str = "https://www.google.com/calendar/render?action=TEMPLATE";

/// Length of the event when the draft has a start but no end.
pub const DEFAULT_DURATION_HOURS: i64 = 1;

/// Builds calendar deep links for a given [`ClockZone`].
#[derive(Debug, Clone, Copy, Default)]
pub struct CalendarLinkBuilder {
    zone: ClockZone,
}

impl CalendarLinkBuilder {
    /// Creates a builder that reads offset-less timestamps as UTC.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder that reads offset-less timestamps in `zone`.
    pub fn with_zone(zone: ClockZone) -> Self {
        Self { zone }
    }

    /// Returns the zone used for offset-less timestamps.
    pub fn zone(&self) -> ClockZone {
        self.zone
    }

    /// Computes the `dates` parameter value for a draft.
    ///
    /// - no start, or a start that does not parse: `None`
    /// - an end that parses: `start/end`
    /// - an end that does not parse: `start/start`
    /// - no end: `start/start+1h`, or `None` if that end cannot be computed
    pub fn dates(&self, draft: &EventDraft) -> Option<String> {
        let start_iso = draft.start_iso.as_deref()?;
        let start = compact_date(start_iso, self.zone)?;

        match draft.end_iso.as_deref().filter(|end| !end.is_empty()) {
            Some(end_iso) => match compact_date(end_iso, self.zone) {
                Some(end) => Some(format!("{}/{}", start, end)),
                None => {
                    debug!(end = end_iso, "end does not parse, using a zero-length range");
                    Some(format!("{}/{}", start, start))
                }
            },
            None => {
                let end = add_hours_iso(start_iso, DEFAULT_DURATION_HOURS, self.zone)
                    .and_then(|end_iso| compact_date(&end_iso, self.zone));
                if end.is_none() {
                    debug!(start = start_iso, "default end unavailable, omitting dates");
                }
                end.map(|end| format!("{}/{}", start, end))
            }
        }
    }

    /// Builds the full deep link for a draft.
    ///
    /// Identical drafts always produce byte-identical URLs.
    pub fn build(&self, draft: &EventDraft) -> String {
        let mut params = form_urlencoded::Serializer::new(String::new());

        if !draft.title.is_empty() {
            params.append_pair("text", &draft.title);
        }
        if !draft.details.is_empty() {
            params.append_pair("details", &draft.details);
        }
        if let Some(location) = draft.location.as_deref().filter(|l| !l.is_empty()) {
            params.append_pair("location", location);
        }
        if let Some(dates) = self.dates(draft) {
            params.append_pair("dates", &dates);
        }

        format!("{}&{}", CALENDAR_BASE_URL, params.finish())
    }
}

/// Convenience function building a deep link with UTC as the clock zone.
///
/// See [`CalendarLinkBuilder::build`] for details.
pub fn build_calendar_url(draft: &EventDraft) -> String {
    CalendarLinkBuilder::new().build(draft)
}
