//! Core logic: date compaction, calendar links, datetime extraction, page overlay

pub mod error;
pub mod event;
pub mod extract;
pub mod links;
pub mod overlay;
pub mod page;
pub mod time;
pub mod tracing;

pub use error::{PageError, PageResult};
pub use event::EventDraft;
pub use extract::{
    DateTimeExtractor, DateTimeMatcher, DatetimeAttributeMatcher, IsoDateTimeMatcher,
    JapaneseDateMatcher, SlashDateMatcher, find_datetime,
};
pub use links::{CalendarLinkBuilder, build_calendar_url};
pub use overlay::{InjectReport, Overlay, inject};
pub use page::{Document, matches_site};
pub use time::{ClockZone, ZoneError, add_hours_iso, compact_date, parse_iso_like};
pub use self::tracing::{TracingConfig, TracingError, TracingOutputFormat, init_tracing};
